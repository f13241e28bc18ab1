use super::{success_or_log, ApiClient, ApiError, ApiResult};
use crate::models::{Category, CreateLinkAndCatRequest, DeleteCatRequest};

impl ApiClient {
    pub(crate) fn parse_cats_body(text: &str) -> ApiResult<Vec<Category>> {
        serde_json::from_str(text)
            .map_err(|e| ApiError::parse("Failed to parse categories response as JSON", e))
    }

    pub async fn fetch_all_cats(&self) -> ApiResult<Vec<Category>> {
        let text = self.get_text("/cats", "Failed to fetch cats").await?;
        Self::parse_cats_body(&text)
    }

    /// Deletes a category and all of its links. Any failure is logged and reported as `false`.
    pub async fn delete_cat(&self, category_name: &str) -> bool {
        let body = DeleteCatRequest {
            category: category_name.to_string(),
        };
        let result = self
            .request_success_flag(reqwest::Method::DELETE, "/delete-cat", Some(&body))
            .await;
        success_or_log(&format!("delete category '{category_name}'"), result)
    }

    /// Creates `link` under `category`, creating the category if it does not exist yet.
    ///
    /// On rejection the error message is the server's response text
    /// (for example `URL already exists`).
    pub async fn create_link_and_cat(&self, category: &str, link: &str, url: &str) -> ApiResult<()> {
        let res = reqwest::Client::new()
            .post(self.url("/create-link-and-cat"))
            .json(&CreateLinkAndCatRequest {
                category: category.to_string(),
                link: link.to_string(),
                url: url.to_string(),
            })
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = res.status();
        if status.is_success() {
            return Ok(());
        }

        let text = res.text().await.unwrap_or_default();
        let message = if text.trim().is_empty() {
            format!("Request failed ({status})")
        } else {
            text
        };
        Err(ApiError::http(status, message))
    }
}
