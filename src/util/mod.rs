use regex::Regex;
use std::sync::OnceLock;

const HASH_PRIME: u64 = 31;
const HASH_MODULUS: u64 = 10_000_000_000;

/// Value the url field is reset to whenever the create form is cleared.
pub(crate) const DEFAULT_URL_INPUT: &str = "https://www.";

static URL_RE: OnceLock<Regex> = OnceLock::new();

/// Polynomial string hash: `sum(unit[i] * 31^i) mod 10^10` over UTF-16 code units.
///
/// Only used as a stable element key for a category name. Not suitable for
/// anything that needs collision resistance.
pub(crate) fn hash(name: &str) -> u64 {
    let mut acc: u64 = 0;
    let mut power: u64 = 1;
    for unit in name.encode_utf16() {
        // unit < 2^16 and power < 10^10, so the product fits comfortably in u64.
        acc = (acc + u64::from(unit) * power) % HASH_MODULUS;
        power = power * HASH_PRIME % HASH_MODULUS;
    }
    acc
}

pub(crate) fn category_key(name: &str) -> String {
    hash(name).to_string()
}

pub(crate) fn is_valid_url(url: &str) -> bool {
    let re = URL_RE.get_or_init(|| {
        Regex::new(
            r"^(https?://)?(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-z]{2,4}\b([-a-zA-Z0-9@:%_+.~#?&/=]*)$",
        )
        .expect("url pattern is a valid regex")
    });
    re.is_match(url)
}

/// Validates the create form. `None` means the input is usable.
pub(crate) fn invalid_input(category: &str, link: &str, url: &str) -> Option<&'static str> {
    if category.is_empty() {
        return Some("Please enter a category.");
    }
    if link.is_empty() {
        return Some("Please enter a link.");
    }
    if !is_valid_url(url) {
        return Some("Please enter a valid URL.");
    }
    None
}
