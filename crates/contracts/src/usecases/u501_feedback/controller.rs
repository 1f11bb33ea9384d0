use super::suppression::SuppressionRecord;

/// Lifecycle of the primary action of one dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Closed,
}

/// How the dialog was opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    /// Opened on demand by the user
    Standard,
    /// Opened automatically after a document was saved; the secondary action
    /// becomes "Don't show again" for that document
    PostSavePrompt { document_id: String },
}

impl DialogMode {
    pub fn is_prompt(&self) -> bool {
        matches!(self, DialogMode::PostSavePrompt { .. })
    }

    pub fn secondary_label(&self) -> &'static str {
        match self {
            DialogMode::Standard => "Cancel",
            DialogMode::PostSavePrompt { .. } => "Don't show again",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    Closed { suppressed: Option<String> },
    Ignored,
}

/// Idle → Submitting → (Idle | Closed), plus Idle → Closed on cancel.
///
/// The primary action is enabled only in `Idle`; that is the single guard
/// against a second submission while one is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedActionController {
    phase: SubmissionPhase,
    mode: DialogMode,
}

impl GuardedActionController {
    pub fn new(mode: DialogMode) -> Self {
        Self {
            phase: SubmissionPhase::Idle,
            mode,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn mode(&self) -> &DialogMode {
        &self.mode
    }

    pub fn is_action_enabled(&self) -> bool {
        self.phase == SubmissionPhase::Idle
    }

    /// Idle → Submitting. Any other phase leaves the state alone and returns `false`.
    pub fn try_begin(&mut self) -> bool {
        if self.phase != SubmissionPhase::Idle {
            return false;
        }
        self.phase = SubmissionPhase::Submitting;
        true
    }

    /// Submitting → Closed
    pub fn succeed(&mut self) {
        if self.phase == SubmissionPhase::Submitting {
            self.phase = SubmissionPhase::Closed;
        }
    }

    /// Submitting → Idle, re-enabling the action
    pub fn fail(&mut self) {
        if self.phase == SubmissionPhase::Submitting {
            self.phase = SubmissionPhase::Idle;
        }
    }

    /// Explicit secondary action. In post-save mode the document is added to
    /// the suppression record before closing.
    pub fn cancel(&mut self, record: &mut SuppressionRecord) -> CancelOutcome {
        if self.phase != SubmissionPhase::Idle {
            return CancelOutcome::Ignored;
        }
        self.phase = SubmissionPhase::Closed;

        let suppressed = match &self.mode {
            DialogMode::PostSavePrompt { document_id } => {
                record.insert(document_id);
                Some(document_id.clone())
            }
            DialogMode::Standard => None,
        };
        CancelOutcome::Closed { suppressed }
    }

    /// Close button / Escape: closes without recording an opt-out
    pub fn dismiss(&mut self) -> bool {
        if self.phase != SubmissionPhase::Idle {
            return false;
        }
        self.phase = SubmissionPhase::Closed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_submit_is_noop() {
        let mut c = GuardedActionController::new(DialogMode::Standard);
        assert!(c.try_begin());
        assert!(!c.try_begin());
        assert_eq!(c.phase(), SubmissionPhase::Submitting);
        assert!(!c.is_action_enabled());
    }

    #[test]
    fn test_failure_reenables_action() {
        let mut c = GuardedActionController::new(DialogMode::Standard);
        c.try_begin();
        c.fail();
        assert_eq!(c.phase(), SubmissionPhase::Idle);
        assert!(c.is_action_enabled());
        assert!(c.try_begin());
    }

    #[test]
    fn test_success_closes() {
        let mut c = GuardedActionController::new(DialogMode::Standard);
        c.try_begin();
        c.succeed();
        assert_eq!(c.phase(), SubmissionPhase::Closed);
        assert!(!c.try_begin());
    }

    #[test]
    fn test_outcomes_ignored_when_not_submitting() {
        let mut c = GuardedActionController::new(DialogMode::Standard);
        c.succeed();
        assert_eq!(c.phase(), SubmissionPhase::Idle);
        c.fail();
        assert_eq!(c.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn test_cancel_in_prompt_mode_suppresses() {
        let mut record = SuppressionRecord::default();
        let mut c = GuardedActionController::new(DialogMode::PostSavePrompt {
            document_id: "BS-0001".into(),
        });
        assert_eq!(
            c.cancel(&mut record),
            CancelOutcome::Closed {
                suppressed: Some("BS-0001".into())
            }
        );
        assert!(record.contains("BS-0001"));
    }

    #[test]
    fn test_cancel_in_standard_mode_does_not_suppress() {
        let mut record = SuppressionRecord::default();
        let mut c = GuardedActionController::new(DialogMode::Standard);
        assert_eq!(
            c.cancel(&mut record),
            CancelOutcome::Closed { suppressed: None }
        );
        assert!(record.is_empty());
    }

    #[test]
    fn test_cancel_ignored_while_submitting() {
        let mut record = SuppressionRecord::default();
        let mut c = GuardedActionController::new(DialogMode::PostSavePrompt {
            document_id: "BS-0001".into(),
        });
        c.try_begin();
        assert_eq!(c.cancel(&mut record), CancelOutcome::Ignored);
        assert!(!c.dismiss());
        assert!(record.is_empty());
    }

    #[test]
    fn test_secondary_label() {
        assert_eq!(DialogMode::Standard.secondary_label(), "Cancel");
        assert_eq!(
            DialogMode::PostSavePrompt {
                document_id: "x".into()
            }
            .secondary_label(),
            "Don't show again"
        );
    }
}
