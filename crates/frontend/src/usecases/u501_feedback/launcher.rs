use contracts::shared::errors::WorkflowError;
use contracts::shared::notice::Notice;
use contracts::usecases::u501_feedback::{DialogMode, FeedbackSession};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::view::FeedbackDialog;
use crate::domain::a003_company;
use crate::shared::notices::NoticeStack;
use crate::shared::storage;

/// Slot holding the session of the dialog currently on screen
#[derive(Clone, Copy)]
pub struct FeedbackLauncher {
    current: RwSignal<Option<FeedbackSession>>,
}

impl FeedbackLauncher {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.with_untracked(Option::is_some)
    }

    fn show(&self, session: FeedbackSession) {
        self.current.set(Some(session));
    }

    pub fn close(&self) {
        self.current.set(None);
    }
}

impl Default for FeedbackLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackLauncher {
    /// Opens the feedback dialog for `company`, or for the default company
    /// when `company` is empty.
    ///
    /// A post-save prompt for a suppressed document is skipped silently. The
    /// settings are fetched for every opening; when that fails the dialog is
    /// not shown at all.
    pub fn open(&self, notices: NoticeStack, company: String, mode: DialogMode) {
        if let DialogMode::PostSavePrompt { document_id } = &mode {
            if !storage::load_suppression().should_prompt(document_id) {
                log::debug!("feedback prompt suppressed for {}", document_id);
                return;
            }
        }
        if self.is_open() {
            return;
        }

        let launcher = *self;
        spawn_local(async move {
            let company = if company.trim().is_empty() {
                match a003_company::fetch_default_company().await {
                    Ok(default) => default.unwrap_or_default(),
                    Err(e) => {
                        log::warn!("default company unavailable: {}", e);
                        String::new()
                    }
                }
            } else {
                company
            };
            match api::fetch_settings().await {
                Ok(config) => {
                    log::info!("feedback dialog opened ({:?})", mode);
                    launcher.show(FeedbackSession::open(config, company, mode));
                }
                Err(e) => {
                    log::error!("Error fetching feedback settings: {}", e);
                    notices.push(Notice::failure(WorkflowError::ConfigUnavailable(e).to_string()));
                }
            }
        });
    }
}

/// Renders the open dialog, if any
#[component]
pub fn FeedbackDialogHost() -> impl IntoView {
    let launcher = use_context::<FeedbackLauncher>().unwrap_or_default();
    let on_closed = Callback::new(move |_| launcher.close());

    move || {
        launcher
            .current
            .get()
            .map(|session| view! { <FeedbackDialog session=session on_closed=on_closed /> })
    }
}
