//! Console logging.
//!
//! In the browser these go to `console.error` / `console.log`. Host builds
//! (unit tests) print to stderr instead, since wasm-bindgen imports panic there.

#[cfg(target_arch = "wasm32")]
pub(crate) fn log_error(context: &str, detail: &dyn std::fmt::Display) {
    let msg = format!("{context}: {detail}");
    web_sys::console::error_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn log_error(context: &str, detail: &dyn std::fmt::Display) {
    eprintln!("error: {context}: {detail}");
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn log_info(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn log_info(msg: &str) {
    eprintln!("{msg}");
}
