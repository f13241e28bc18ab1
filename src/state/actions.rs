use super::{is_current, AppContext};
use crate::api::{ApiClient, ApiError, ApiErrorKind, ApiResult};
use crate::logging::{log_error, log_info};
use crate::models::{Category, Link};
use crate::util::invalid_input;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Categories first, then links; both must succeed for the board to change.
async fn fetch_bookmarks(api_client: &ApiClient) -> ApiResult<(Vec<Category>, Vec<Link>)> {
    let cats = api_client.fetch_all_cats().await?;
    let links = api_client.fetch_all_links().await?;
    Ok((cats, links))
}

/// Log context for a failed refresh.
fn load_failure_context(e: &ApiError) -> String {
    match (&e.kind, e.status) {
        (ApiErrorKind::Http, Some(status)) => format!("Failed to load bookmarks (HTTP {status})"),
        (ApiErrorKind::Network, _) => "Failed to reach the bookmark server".to_string(),
        _ => "Failed to load bookmarks".to_string(),
    }
}

impl AppContext {
    /// Re-fetches categories and links and folds them into the board.
    ///
    /// Overlapping refreshes are allowed; only the most recently started one
    /// gets to touch the board or report an error.
    pub fn refresh(&self) {
        let ctx = *self;
        let req_id = ctx.0.refresh_request_id.get_untracked().saturating_add(1);
        ctx.0.refresh_request_id.set(req_id);
        ctx.0.refreshing.set(true);

        let api_client = ctx.0.api_client.get_untracked();
        spawn_local(async move {
            let result = fetch_bookmarks(&api_client).await;

            // Ignore stale responses.
            if !is_current(req_id, ctx.0.refresh_request_id.get_untracked()) {
                return;
            }

            match result {
                Ok((cats, links)) => {
                    ctx.0.board.update(|b| b.reconcile(&cats, &links));
                }
                Err(e) => {
                    log_error(&load_failure_context(&e), &e);
                    ctx.flash_below_title(e.to_string());
                }
            }
            ctx.0.refreshing.set(false);
        });
    }

    pub fn delete_category(&self, name: String) {
        let ctx = *self;
        let api_client = ctx.0.api_client.get_untracked();
        spawn_local(async move {
            if api_client.delete_cat(&name).await {
                ctx.refresh();
            } else {
                log_error("delete_category", &"delete_cat did not return true");
            }
        });
    }

    pub fn delete_link(&self, id: String) {
        let ctx = *self;
        let api_client = ctx.0.api_client.get_untracked();
        spawn_local(async move {
            if api_client.delete_link(&id).await {
                ctx.refresh();
            } else {
                log_error("delete_link", &"delete_link did not return true");
            }
        });
    }

    /// Counts a visit. The browser opens the link itself; this only updates the counter.
    pub fn visit_link(&self, name: String, url: String) {
        let ctx = *self;
        let api_client = ctx.0.api_client.get_untracked();
        spawn_local(async move {
            if api_client.increment_visits(&name, &url).await {
                ctx.refresh();
            } else {
                log_error("visit_link", &"increment_visits returned false");
            }
        });
    }

    /// Validates and submits the create form.
    ///
    /// Validation and server errors go above the form. `on_created` runs only
    /// after the server accepted the link, before the refresh is kicked off;
    /// `on_settled` runs once the request finished either way.
    pub fn create_link_and_cat(
        &self,
        category: String,
        link: String,
        url: String,
        on_created: impl FnOnce() + 'static,
        on_settled: impl FnOnce() + 'static,
    ) {
        if let Some(msg) = invalid_input(&category, &link, &url) {
            log_info(&format!("invalid input: {msg}"));
            self.flash_above_form(msg.to_string());
            on_settled();
            return;
        }

        let ctx = *self;
        let api_client = ctx.0.api_client.get_untracked();
        spawn_local(async move {
            match api_client.create_link_and_cat(&category, &link, &url).await {
                Ok(()) => {
                    on_created();
                    ctx.refresh();
                }
                Err(e) => {
                    log_error("Error creating link and category", &e);
                    ctx.flash_above_form(e.to_string());
                }
            }
            on_settled();
        });
    }
}
