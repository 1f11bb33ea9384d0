use serde::{Deserialize, Serialize};

use crate::domain::common::{
    seed_if_empty, AdditionalId, AggregateRoot, BaseAggregate, EntityMetadata, IdentifierType,
};
use crate::shared::errors::{ValidationError, WorkflowError};

crate::uuid_aggregate_id!(
    /// Identifier of a business settings record
    BusinessSettingsId
);

/// Seller identification kinds offered on a new settings record
pub const SELLER_ID_TYPES: [IdentifierType; 6] = [
    IdentifierType {
        type_name: "Commercial Registration Number",
        type_code: "CRN",
    },
    IdentifierType {
        type_name: "MOMRAH License",
        type_code: "MOM",
    },
    IdentifierType {
        type_name: "MHRSD License",
        type_code: "MLS",
    },
    IdentifierType {
        type_name: "700 Number",
        type_code: "700",
    },
    IdentifierType {
        type_name: "MISA License",
        type_code: "SAG",
    },
    IdentifierType {
        type_name: "Other OD",
        type_code: "OTH",
    },
];

/// How invoices are reported to ZATCA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SyncMode {
    #[default]
    Live,
    Batches,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::Live => "Live",
            SyncMode::Batches => "Batches",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Batches" => SyncMode::Batches,
            _ => SyncMode::Live,
        }
    }
}

/// ZATCA settings of one company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSettings {
    #[serde(flatten)]
    pub base: BaseAggregate<BusinessSettingsId>,

    pub company: String,
    pub company_address: String,
    pub seller_name: String,
    pub vat_registration_number: String,
    pub fatoora_server_url: String,
    pub enable_zatca_integration: bool,
    /// Branches of the company must then carry their own CRN
    pub enable_branch_configuration: bool,
    pub sync_with_zatca: SyncMode,

    /// Set by the onboarding call
    pub compliance_request_id: Option<String>,
    /// Set by the production CSID call
    pub production_request_id: Option<String>,

    pub other_ids: Vec<AdditionalId>,
}

impl BusinessSettings {
    pub fn new_for_insert(dto: &BusinessSettingsDto) -> Self {
        let code = dto.code.clone().unwrap_or_default();
        let mut settings = Self {
            base: BaseAggregate::new(
                BusinessSettingsId::new_v4(),
                code,
                dto.company.clone(),
            ),
            company: String::new(),
            company_address: String::new(),
            seller_name: String::new(),
            vat_registration_number: String::new(),
            fatoora_server_url: String::new(),
            enable_zatca_integration: false,
            enable_branch_configuration: false,
            sync_with_zatca: SyncMode::Live,
            compliance_request_id: None,
            production_request_id: None,
            other_ids: Vec::new(),
        };
        settings.update(dto);
        settings
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.0.to_string()
    }

    /// Copy user-editable fields from a form
    pub fn update(&mut self, dto: &BusinessSettingsDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.company.clone();
        self.base.comment = dto.comment.clone();
        self.company = dto.company.clone();
        self.company_address = dto.company_address.clone();
        self.seller_name = dto.seller_name.clone();
        self.vat_registration_number = dto.vat_registration_number.clone();
        self.fatoora_server_url = dto.fatoora_server_url.clone();
        self.enable_zatca_integration = dto.enable_zatca_integration;
        self.enable_branch_configuration = dto.enable_branch_configuration;
        self.sync_with_zatca = dto.sync_with_zatca;
        self.other_ids = dto.other_ids.clone();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.company.trim().is_empty() {
            return Err(ValidationError::Required("Company".into()));
        }
        if self.seller_name.trim().is_empty() {
            return Err(ValidationError::Required("Seller name".into()));
        }
        if self.vat_registration_number.trim().is_empty() {
            return Err(ValidationError::Required("VAT registration number".into()));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }

    /// Guard of "Get Production CSID": onboarding must have produced a
    /// compliance request id first
    pub fn ensure_onboarded(&self) -> Result<&str, WorkflowError> {
        self.compliance_request_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                WorkflowError::PrerequisiteMissing(
                    "Please Onboard first to generate a compliance request ID".into(),
                )
            })
    }

    /// Guard of every call that talks to the Fatoora portal
    pub fn ensure_server_configured(&self) -> Result<&str, WorkflowError> {
        let url = self.fatoora_server_url.trim();
        if url.is_empty() {
            return Err(WorkflowError::PrerequisiteMissing(
                "Please configure 'Fatoora Server URL'".into(),
            ));
        }
        Ok(url)
    }
}

impl AggregateRoot for BusinessSettings {
    type Id = BusinessSettingsId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "business_settings"
    }

    fn element_name() -> &'static str {
        "ZATCA Business Settings"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Create/update form of a business settings record
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BusinessSettingsDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub company: String,
    #[serde(default)]
    pub company_address: String,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub vat_registration_number: String,
    #[serde(default)]
    pub fatoora_server_url: String,
    #[serde(default)]
    pub enable_zatca_integration: bool,
    #[serde(default)]
    pub enable_branch_configuration: bool,
    #[serde(default)]
    pub sync_with_zatca: SyncMode,
    #[serde(default)]
    pub other_ids: Vec<AdditionalId>,
    pub comment: Option<String>,
}

impl BusinessSettingsDto {
    /// Seeds the seller id table of a record that has no rows yet
    pub fn seed_other_ids(&mut self) -> bool {
        seed_if_empty(&mut self.other_ids, &SELLER_ID_TYPES)
    }
}

impl From<&BusinessSettings> for BusinessSettingsDto {
    fn from(settings: &BusinessSettings) -> Self {
        Self {
            id: Some(settings.to_string_id()),
            code: Some(settings.base.code.clone()),
            company: settings.company.clone(),
            company_address: settings.company_address.clone(),
            seller_name: settings.seller_name.clone(),
            vat_registration_number: settings.vat_registration_number.clone(),
            fatoora_server_url: settings.fatoora_server_url.clone(),
            enable_zatca_integration: settings.enable_zatca_integration,
            enable_branch_configuration: settings.enable_branch_configuration,
            sync_with_zatca: settings.sync_with_zatca,
            other_ids: settings.other_ids.clone(),
            comment: settings.base.comment.clone(),
        }
    }
}

/// OTP-carrying call to onboard or to fetch the production CSID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRequest {
    pub otp: String,
}

impl OtpRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.otp.trim().is_empty() {
            return Err(ValidationError::Required("OTP".into()));
        }
        Ok(())
    }
}

/// Answer of the external compliance engine to a CSID request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsidResponse {
    pub request_id: String,
    #[serde(default)]
    pub message: String,
}

/// Body the backend forwards to the compliance engine on onboarding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCsidCall {
    pub fatoora_server_url: String,
    pub vat_registration_number: String,
    pub seller_name: String,
    pub otp: String,
}

/// Body the backend forwards to the compliance engine for the production CSID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCsidCall {
    pub fatoora_server_url: String,
    pub compliance_request_id: String,
    pub otp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> BusinessSettingsDto {
        BusinessSettingsDto {
            code: Some("BS-0001".into()),
            company: "ACME KSA".into(),
            seller_name: "ACME Trading".into(),
            vat_registration_number: "300000000000003".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_seed_other_ids_canonical_order() {
        let mut form = dto();
        assert!(form.seed_other_ids());
        let codes: Vec<_> = form.other_ids.iter().map(|r| r.type_code.as_str()).collect();
        assert_eq!(codes, ["CRN", "MOM", "MLS", "700", "SAG", "OTH"]);
        assert!(!form.seed_other_ids());
        assert_eq!(form.other_ids.len(), 6);
    }

    #[test]
    fn test_reseed_after_all_rows_deleted() {
        let mut form = dto();
        form.seed_other_ids();
        form.other_ids.clear();
        assert!(form.seed_other_ids());
    }

    #[test]
    fn test_production_csid_requires_onboarding() {
        let mut settings = BusinessSettings::new_for_insert(&dto());
        let err = settings.ensure_onboarded().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please Onboard first to generate a compliance request ID"
        );

        settings.compliance_request_id = Some("  ".into());
        assert!(settings.ensure_onboarded().is_err());

        settings.compliance_request_id = Some("1234567890123".into());
        assert_eq!(settings.ensure_onboarded(), Ok("1234567890123"));
    }

    #[test]
    fn test_validate_required_fields() {
        let mut settings = BusinessSettings::new_for_insert(&dto());
        assert!(settings.validate().is_ok());
        settings.vat_registration_number.clear();
        assert_eq!(
            settings.validate(),
            Err(ValidationError::Required("VAT registration number".into()))
        );
    }

    #[test]
    fn test_full_name() {
        assert_eq!(BusinessSettings::full_name(), "a001_business_settings");
    }
}
