mod actions;

use crate::api::ApiClient;
use crate::board::Board;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// How long an inline error stays on screen.
pub(crate) const FLASH_MS: i32 = 5_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FlashMessage {
    pub id: u64,
    pub text: String,
}

impl FlashMessage {
    pub fn display_text(&self) -> String {
        format!("*** Error:  {}  ***", self.text)
    }
}

/// Only the most recently started refresh may publish its result.
pub(crate) fn is_current(req_id: u64, latest: u64) -> bool {
    req_id == latest
}

/// A flash timer only clears the message it put up.
pub(crate) fn should_clear(current: Option<&FlashMessage>, id: u64) -> bool {
    current.is_some_and(|m| m.id == id)
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// What the page renders. Only replaced wholesale by a refresh.
    pub board: RwSignal<Board>,

    /// Refresh guard: a response is applied only if its id is still the latest.
    pub refresh_request_id: RwSignal<u64>,
    pub refreshing: RwSignal<bool>,

    /// Transient errors below the page title and above the create form.
    pub title_message: RwSignal<Option<FlashMessage>>,
    pub form_message: RwSignal<Option<FlashMessage>>,
    flash_seq: RwSignal<u64>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            board: RwSignal::new(Board::default()),
            refresh_request_id: RwSignal::new(0),
            refreshing: RwSignal::new(false),
            title_message: RwSignal::new(None),
            form_message: RwSignal::new(None),
            flash_seq: RwSignal::new(0),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

impl AppContext {
    pub fn flash_below_title(&self, text: String) {
        self.flash(self.0.title_message, text);
    }

    pub fn flash_above_form(&self, text: String) {
        self.flash(self.0.form_message, text);
    }

    /// Shows `text` in `slot` and clears it after [`FLASH_MS`], unless a newer
    /// message took the slot in the meantime.
    fn flash(&self, slot: RwSignal<Option<FlashMessage>>, text: String) {
        let id = self.0.flash_seq.get_untracked().saturating_add(1);
        self.0.flash_seq.set(id);
        slot.set(Some(FlashMessage { id, text }));

        let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
            wasm_bindgen::closure::Closure::once_into_js(move || {
                slot.update(|current| {
                    if should_clear(current.as_ref(), id) {
                        *current = None;
                    }
                });
            })
            .as_ref()
            .unchecked_ref(),
            FLASH_MS,
        );
    }
}
