use serde::{Deserialize, Serialize};

use crate::shared::notice::Indicator;

/// ZATCA integration state of an invoice's additional-fields record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegrationStatus {
    #[serde(rename = "Ready For Batch")]
    ReadyForBatch,
    #[serde(rename = "Resend")]
    Resend,
    #[serde(rename = "Corrected")]
    Corrected,
    #[serde(rename = "Accepted with warnings")]
    AcceptedWithWarnings,
    #[serde(rename = "Accepted")]
    Accepted,
    #[serde(rename = "Rejected")]
    Rejected,
    #[serde(rename = "Clearance switched off")]
    ClearanceSwitchedOff,
}

impl IntegrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationStatus::ReadyForBatch => "Ready For Batch",
            IntegrationStatus::Resend => "Resend",
            IntegrationStatus::Corrected => "Corrected",
            IntegrationStatus::AcceptedWithWarnings => "Accepted with warnings",
            IntegrationStatus::Accepted => "Accepted",
            IntegrationStatus::Rejected => "Rejected",
            IntegrationStatus::ClearanceSwitchedOff => "Clearance switched off",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|status| status.as_str() == s)
    }

    pub fn all() -> [IntegrationStatus; 7] {
        [
            IntegrationStatus::ReadyForBatch,
            IntegrationStatus::Resend,
            IntegrationStatus::Corrected,
            IntegrationStatus::AcceptedWithWarnings,
            IntegrationStatus::Accepted,
            IntegrationStatus::Rejected,
            IntegrationStatus::ClearanceSwitchedOff,
        ]
    }

    /// Banner colour for the status intro on a submitted document
    pub fn indicator(&self) -> Indicator {
        match self {
            IntegrationStatus::Accepted => Indicator::Green,
            IntegrationStatus::Rejected | IntegrationStatus::Resend => Indicator::Red,
            _ => Indicator::Blue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_colours() {
        assert_eq!(IntegrationStatus::Accepted.indicator(), Indicator::Green);
        assert_eq!(IntegrationStatus::Rejected.indicator(), Indicator::Red);
        assert_eq!(IntegrationStatus::Resend.indicator(), Indicator::Red);
        assert_eq!(
            IntegrationStatus::AcceptedWithWarnings.indicator(),
            Indicator::Blue
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            IntegrationStatus::parse("Clearance switched off"),
            Some(IntegrationStatus::ClearanceSwitchedOff)
        );
        assert_eq!(IntegrationStatus::parse("rejected"), None);
    }
}
