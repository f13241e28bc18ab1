use serde::{Deserialize, Deserializer, Serialize};

/// A category as returned by `GET /cats`.
///
/// The server sends its entity as-is; anything beyond `name` is ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Category {
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Link {
    /// Owning category name. The server may emit `null` for orphaned rows.
    #[serde(default)]
    pub category: Option<String>,
    pub name: String,
    pub url: String,
    #[serde(rename = "numVisits", default)]
    pub num_visits: u64,
    #[serde(rename = "dateTime", default)]
    pub date_time: String,

    /// Numeric on the wire from the Java backend, but fixtures and older
    /// payloads use strings, so both are accepted.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct CreateLinkAndCatRequest {
    pub category: String,
    pub link: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct DeleteCatRequest {
    pub category: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct UpdateLinkRequest {
    pub url: String,
}

/// `{ "success": bool }` body of both delete endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}
