//! Remote procedure surface shared by the client and the server.
//!
//! Paths are relative to the API base; both sides import them from here so a
//! renamed route cannot drift between the two crates.

use serde::{Deserialize, Serialize};

pub const FEEDBACK_SETTINGS: &str = "/api/method/feedback/settings";
pub const FEEDBACK_SEND: &str = "/api/method/feedback/send";
pub const UPLOAD_FILE: &str = "/api/method/upload_file";

pub const FIX_REJECTION: &str = "/api/method/fix_rejection";
pub const INVOICE_FIX_REJECTION: &str = "/api/invoice_fix_rejection";
pub const FIX_REJECTION_AMOUNTS: &str = "/api/method/fix_rejection/amounts";
pub const FIX_REJECTION_REJECTED: &str = "/api/method/fix_rejection/rejected";
pub const INTEGRATION_STATUS: &str = "/api/method/integration_status";

pub const COMPANIES: &str = "/api/method/company";
pub const COMPANY_ADDRESSES: &str = "/api/method/company/addresses";
pub const COMPANY_PRIMARY_ADDRESS: &str = "/api/method/company/primary_address";
pub const COMPANY_DEFAULT: &str = "/api/method/company/default";

pub const BUSINESS_SETTINGS: &str = "/api/business_settings";
pub const PHASE1_BUSINESS_SETTINGS: &str = "/api/phase1_business_settings";
pub const CUSTOMERS: &str = "/api/customer";
pub const BRANCHES: &str = "/api/branch";

/// Public prefix under which uploaded files are served
pub const PUBLIC_FILES_PREFIX: &str = "/files";

/// Success/failure envelope returned by side-effecting procedures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEnvelope {
    pub success: bool,
    pub message: String,
}

impl RemoteEnvelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Path of a single business settings record
pub fn business_settings_path(id: &str) -> String {
    format!("{}/{}", BUSINESS_SETTINGS, id)
}

pub fn customer_path(id: &str) -> String {
    format!("{}/{}", CUSTOMERS, id)
}

pub fn branch_path(id: &str) -> String {
    format!("{}/{}", BRANCHES, id)
}

/// Path of a single rejection fix record
pub fn invoice_fix_rejection_path(id: &str) -> String {
    format!("{}/{}", INVOICE_FIX_REJECTION, id)
}

/// Path of the onboarding call for a business settings record
pub fn onboard_path(id: &str) -> String {
    format!("{}/{}/onboard", BUSINESS_SETTINGS, id)
}

/// Path of the production CSID call for a business settings record
pub fn production_csid_path(id: &str) -> String {
    format!("{}/{}/production_csid", BUSINESS_SETTINGS, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_paths() {
        assert_eq!(business_settings_path("BS-1"), "/api/business_settings/BS-1");
        assert_eq!(onboard_path("BS-1"), "/api/business_settings/BS-1/onboard");
        assert_eq!(
            production_csid_path("BS-1"),
            "/api/business_settings/BS-1/production_csid"
        );
    }

    #[test]
    fn test_envelope_serialization() {
        let json = serde_json::to_string(&RemoteEnvelope::failed("quota exceeded")).unwrap();
        assert_eq!(json, r#"{"success":false,"message":"quota exceeded"}"#);
    }
}
