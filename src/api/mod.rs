mod categories;
mod links;
#[cfg(all(test, not(target_arch = "wasm32")))]
mod test_server;

use crate::logging::log_error;
use crate::models::SuccessResponse;
use serde::{Deserialize, Serialize};

/// Shown instead of the real parse failure so server internals never reach the page.
pub(crate) const GENERIC_SERVER_ERROR: &str = "Something went wrong on the server.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: e.to_string(),
        }
    }

    /// Logs `detail` and hands back the generic message.
    fn parse(ctx: &str, detail: impl std::fmt::Display) -> Self {
        log_error(ctx, &detail);
        Self {
            kind: ApiErrorKind::Parse,
            status: None,
            message: GENERIC_SERVER_ERROR.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, message: String) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            status: Some(status.as_u16()),
            message,
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        // Only reached without a `window` (host builds).
        let default_api_url = "http://localhost:8080".to_string();

        // `window.ENV.API_URL` wins, then `window.ENV.api_url`, then the page origin.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self { api_url: url_str };
                            }
                        }
                    }
                }
            }

            if let Ok(origin) = window.location().origin() {
                return Self { api_url: origin };
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and decode the body.
    ///
    /// Non-2xx fails with `"{ctx}: {status}"`; an undecodable body fails with
    /// the generic server error.
    async fn get_text(&self, path: &str, ctx: &str) -> ApiResult<String> {
        let res = reqwest::Client::new()
            .get(self.url(path))
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::http(
                status,
                format!("{ctx}: {}", status.as_u16()),
            ));
        }

        res.text().await.map_err(ApiError::network)
    }

    /// Sends a mutation whose response is `{ "success": bool }`.
    async fn request_success_flag(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<bool> {
        let mut req = reqwest::Client::new()
            .request(method, self.url(path))
            .header("Content-Type", "application/json");
        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::http(
                status,
                format!("HTTP error! status: {}: {text}", status.as_u16()),
            ));
        }

        let text = res.text().await.map_err(ApiError::network)?;
        Ok(Self::parse_success_body(&text)?.success)
    }

    pub(crate) fn parse_success_body(text: &str) -> ApiResult<SuccessResponse> {
        serde_json::from_str(text).map_err(|e| ApiError::parse("Failed to parse success flag", e))
    }
}

/// Collapses a mutation result into the boolean the UI acts on.
pub(crate) fn success_or_log(ctx: &str, result: ApiResult<bool>) -> bool {
    match result {
        Ok(true) => true,
        Ok(false) => {
            log_error(ctx, &"server reported success: false");
            false
        }
        Err(e) => {
            log_error(ctx, &e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_new_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/".to_string());
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.url("/cats"), "http://localhost:8080/cats");
    }

    #[test]
    fn test_parse_success_body() {
        let ok = ApiClient::parse_success_body(r#"{"success": true}"#).expect("should parse");
        assert!(ok.success);

        // The backend pretty-prints this body.
        let pretty = ApiClient::parse_success_body("{\n  \"success\" : false\n}")
            .expect("should parse");
        assert!(!pretty.success);
    }

    #[test]
    fn test_parse_error_masks_detail() {
        let err = ApiClient::parse_success_body("<html>oops</html>").unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Parse);
        assert_eq!(err.to_string(), GENERIC_SERVER_ERROR);
        assert!(err.status.is_none());
    }

    #[test]
    fn test_http_error_carries_status() {
        let err = ApiError::http(
            reqwest::StatusCode::NOT_FOUND,
            "Failed to fetch cats: 404".to_string(),
        );
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(err.status, Some(404));
        assert_eq!(err.to_string(), "Failed to fetch cats: 404");
    }

    #[test]
    fn test_success_or_log() {
        assert!(success_or_log("ctx", Ok(true)));
        assert!(!success_or_log("ctx", Ok(false)));
        assert!(!success_or_log(
            "ctx",
            Err(ApiError::http(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                "boom".to_string()
            ))
        ));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod http_tests {
    use super::test_server::{closed_base_url, serve_once};
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = ApiClient::new(closed_base_url().await);

        let err = client.fetch_all_cats().await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Network);
        assert!(err.status.is_none());
    }

    #[tokio::test]
    async fn test_mutation_error_status_carries_body() {
        let (base, server) = serve_once("500 Internal Server Error", "db down").await;
        let client = ApiClient::new(base);

        let err = client
            .request_success_flag(reqwest::Method::DELETE, "/delete-cat", None::<&()>)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(err.status, Some(500));
        assert_eq!(err.message, "HTTP error! status: 500: db down");
        server.await.expect("server task");
    }
}
