use super::{success_or_log, ApiClient, ApiError, ApiResult};
use crate::logging::log_error;
use crate::models::{Link, UpdateLinkRequest};

impl ApiClient {
    /// `GET /links` is double-encoded: an array of strings, each a JSON link object.
    pub(crate) fn parse_links_body(text: &str) -> ApiResult<Vec<Link>> {
        let raw: Vec<String> = serde_json::from_str(text)
            .map_err(|e| ApiError::parse("Failed to parse links response as JSON", e))?;

        raw.iter()
            .map(|item| {
                serde_json::from_str::<Link>(item)
                    .map_err(|e| ApiError::parse("Failed to parse link entry as JSON", e))
            })
            .collect()
    }

    pub async fn fetch_all_links(&self) -> ApiResult<Vec<Link>> {
        let text = self.get_text("/links", "Failed to fetch links").await?;
        Self::parse_links_body(&text)
    }

    pub(crate) fn delete_link_path(id: &str) -> String {
        format!("/delete-link?id={}", urlencoding::encode(id))
    }

    pub async fn delete_link(&self, id: &str) -> bool {
        let result = self
            .request_success_flag(reqwest::Method::DELETE, &Self::delete_link_path(id), None::<&()>)
            .await;
        success_or_log(&format!("Error deleting link {id}"), result)
    }

    /// Bumps the visit counter of the link stored under `url`.
    ///
    /// The endpoint is keyed by URL, so with two links sharing a URL the server
    /// decides which one is counted.
    pub async fn increment_visits(&self, name: &str, url: &str) -> bool {
        let res = reqwest::Client::new()
            .post(self.url("/update-link"))
            .json(&UpdateLinkRequest {
                url: url.to_string(),
            })
            .send()
            .await;

        match res {
            Ok(res) if res.status().is_success() => true,
            Ok(res) => {
                log_error(
                    &format!("Failed to update link '{name}'"),
                    &res.status(),
                );
                false
            }
            Err(e) => {
                log_error(&format!("Failed to update link '{name}'"), &e);
                false
            }
        }
    }
}
