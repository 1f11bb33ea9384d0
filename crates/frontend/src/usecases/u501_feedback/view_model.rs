use contracts::shared::notice::Notice;
use contracts::usecases::u501_feedback::{
    AttachmentRef, CancelOutcome, FeedbackDraft, FeedbackSession, FeedbackSubject, SubmissionPhase,
    SubmitStart,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::notices::NoticeStack;
use crate::shared::storage;

/// ViewModel of one open feedback dialog
#[derive(Clone, Copy)]
pub struct FeedbackDialogViewModel {
    pub session: RwSignal<FeedbackSession>,
    pub subject: RwSignal<String>,
    pub description: RwSignal<String>,
    pub contact_email: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub uploading: RwSignal<bool>,
    notices: NoticeStack,
    on_closed: Callback<()>,
}

impl FeedbackDialogViewModel {
    pub fn new(session: FeedbackSession, notices: NoticeStack, on_closed: Callback<()>) -> Self {
        Self {
            session: RwSignal::new(session),
            subject: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            contact_email: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            uploading: RwSignal::new(false),
            notices,
            on_closed,
        }
    }

    pub fn draft(&self) -> FeedbackDraft {
        FeedbackDraft {
            subject: FeedbackSubject::from_label(&self.subject.get_untracked()),
            description: self.description.get_untracked(),
            contact_email: self.contact_email.get_untracked(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.session.with(|s| s.phase() == SubmissionPhase::Submitting)
    }

    pub fn is_action_enabled(&self) -> bool {
        self.session.with(|s| s.is_action_enabled()) && !self.uploading.get()
    }

    pub fn attachments(&self) -> Vec<AttachmentRef> {
        self.session.with(|s| s.attachments().to_vec())
    }

    pub fn secondary_label(&self) -> &'static str {
        self.session.with_untracked(|s| s.mode().secondary_label())
    }

    /// Checks a picked file locally, then uploads it and stages the result
    pub fn upload_command(&self, file: web_sys::File) {
        let name = file.name();
        let size = file.size() as u64;

        let precheck = self.session.with_untracked(|s| s.check_upload(&name, size));
        if let Err(rejection) = precheck {
            log::warn!("upload rejected before transfer: {}", rejection);
            let notice = self.session.try_update(|s| s.stage_upload(Err(rejection)));
            if let Some(notice) = notice {
                self.notices.push(notice);
            }
            return;
        }

        let this = *self;
        this.uploading.set(true);
        spawn_local(async move {
            let outcome = api::upload_file(file).await;
            if let Err(e) = &outcome {
                log::error!("Error uploading file {}: {}", name, e);
            }
            if let Some(notice) = this.session.try_update(|s| s.stage_upload(outcome)) {
                this.notices.push(notice);
            }
            this.uploading.set(false);
        });
    }

    /// Primary action: validate, send, interpret the answer
    pub fn submit_command(&self) {
        let draft = self.draft();
        let start = self.session.try_update(|s| s.begin_submit(&draft));

        let request = match start {
            Some(Ok(SubmitStart::Send(request))) => request,
            Some(Ok(SubmitStart::Ignored)) | None => return,
            Some(Err(validation)) => {
                self.error.set(Some(validation.to_string()));
                self.notices.push(Notice::failure(validation.to_string()));
                return;
            }
        };
        self.error.set(None);

        let this = *self;
        spawn_local(async move {
            let result = api::send_feedback(&request).await;
            if let Err(e) = &result {
                log::error!("Error sending feedback: {}", e);
            }
            let Some(notice) = this.session.try_update(|s| s.finish_submit(result)) else {
                return;
            };
            this.notices.push(notice);
            if this.session.with_untracked(|s| s.phase() == SubmissionPhase::Closed) {
                this.on_closed.run(());
            }
        });
    }

    /// Secondary action: "Cancel", or "Don't show again" after a save
    pub fn cancel_command(&self) {
        let mut record = storage::load_suppression();
        let outcome = self.session.try_update(|s| s.cancel(&mut record));
        match outcome {
            Some(CancelOutcome::Closed { suppressed }) => {
                if let Some(document_id) = suppressed {
                    log::info!("feedback prompt suppressed for {}", document_id);
                    storage::save_suppression(&record);
                }
                self.on_closed.run(());
            }
            Some(CancelOutcome::Ignored) | None => {}
        }
    }

    /// Close button, overlay and Escape
    pub fn dismiss_command(&self) {
        if self.session.try_update(|s| s.dismiss()).unwrap_or(false) {
            self.on_closed.run(());
        }
    }
}
