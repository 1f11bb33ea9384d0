use serde::{Deserialize, Serialize};

use crate::domain::a003_company::CompanyAddress;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::errors::{ValidationError, WorkflowError};

crate::uuid_aggregate_id!(
    /// Identifier of a phase-1 settings record
    Phase1SettingsId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase1Status {
    #[default]
    Active,
    Disabled,
}

impl Phase1Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase1Status::Active => "Active",
            Phase1Status::Disabled => "Disabled",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Disabled" => Phase1Status::Disabled,
            _ => Phase1Status::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransactionType {
    Simplified,
    #[serde(rename = "Standard Tax Invoice")]
    StandardTaxInvoice,
    #[default]
    Both,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Simplified => "Simplified",
            TransactionType::StandardTaxInvoice => "Standard Tax Invoice",
            TransactionType::Both => "Both",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Simplified" => TransactionType::Simplified,
            "Standard Tax Invoice" => TransactionType::StandardTaxInvoice,
            _ => TransactionType::Both,
        }
    }

    pub fn all() -> [TransactionType; 3] {
        [
            TransactionType::Simplified,
            TransactionType::StandardTaxInvoice,
            TransactionType::Both,
        ]
    }
}

/// ZATCA phase 1 (generation only) settings of a company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase1BusinessSettings {
    #[serde(flatten)]
    pub base: BaseAggregate<Phase1SettingsId>,

    pub company: String,
    pub address: String,
    pub status: Phase1Status,
    pub type_of_transaction: TransactionType,
    pub vat_registration_number: String,
}

impl Phase1BusinessSettings {
    pub fn new_for_insert(dto: &Phase1BusinessSettingsDto) -> Self {
        let mut settings = Self {
            base: BaseAggregate::new(
                Phase1SettingsId::new_v4(),
                dto.code.clone().unwrap_or_default(),
                dto.company.clone(),
            ),
            company: String::new(),
            address: String::new(),
            status: Phase1Status::Active,
            type_of_transaction: TransactionType::Both,
            vat_registration_number: String::new(),
        };
        settings.update(dto);
        settings
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.0.to_string()
    }

    pub fn update(&mut self, dto: &Phase1BusinessSettingsDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.company.clone();
        self.company = dto.company.clone();
        self.address = dto.address.clone();
        self.status = dto.status;
        self.type_of_transaction = dto.type_of_transaction;
        self.vat_registration_number = dto.vat_registration_number.clone();
    }

    /// `phase2_enabled` tells whether the company already has phase 2
    /// business settings; an active phase 1 record cannot coexist with them.
    pub fn validate(&self, phase2_enabled: bool) -> Result<(), WorkflowError> {
        if self.company.trim().is_empty() {
            return Err(ValidationError::Required("Company".into()).into());
        }
        if phase2_enabled && self.status == Phase1Status::Active {
            return Err(WorkflowError::PrerequisiteMissing(
                "ZATCA Phase 2 Business Settings already enabled.".into(),
            ));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Phase1BusinessSettings {
    type Id = Phase1SettingsId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "phase1_business_settings"
    }

    fn element_name() -> &'static str {
        "ZATCA Phase 1 Business Settings"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Phase1BusinessSettingsDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub company: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: Phase1Status,
    #[serde(default)]
    pub type_of_transaction: TransactionType,
    #[serde(default)]
    pub vat_registration_number: String,
}

impl Phase1BusinessSettingsDto {
    /// Applies a company change: the address follows the company's primary
    /// address, or is cleared when the company has none.
    pub fn change_company(&mut self, company: String, primary: &[CompanyAddress]) {
        self.company = company;
        self.address = primary_address(primary);
    }
}

impl From<&Phase1BusinessSettings> for Phase1BusinessSettingsDto {
    fn from(settings: &Phase1BusinessSettings) -> Self {
        Self {
            id: Some(settings.to_string_id()),
            code: Some(settings.base.code.clone()),
            company: settings.company.clone(),
            address: settings.address.clone(),
            status: settings.status,
            type_of_transaction: settings.type_of_transaction,
            vat_registration_number: settings.vat_registration_number.clone(),
        }
    }
}

/// First entry of a primary-address lookup, or empty
pub fn primary_address(addresses: &[CompanyAddress]) -> String {
    addresses
        .first()
        .map(|a| a.id.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: &str) -> CompanyAddress {
        CompanyAddress {
            id: id.into(),
            company: "ACME KSA".into(),
            address_line: "King Fahd Rd, Riyadh".into(),
            is_primary: true,
        }
    }

    #[test]
    fn test_company_change_sets_primary_address() {
        let mut form = Phase1BusinessSettingsDto {
            address: "Old-Billing".into(),
            ..Default::default()
        };
        form.change_company("ACME KSA".into(), &[address("ACME-Billing"), address("ACME-Other")]);
        assert_eq!(form.address, "ACME-Billing");

        form.change_company("Empty Co".into(), &[]);
        assert_eq!(form.company, "Empty Co");
        assert_eq!(form.address, "");
    }

    #[test]
    fn test_active_conflicts_with_phase2() {
        let dto = Phase1BusinessSettingsDto {
            company: "ACME KSA".into(),
            ..Default::default()
        };
        let mut settings = Phase1BusinessSettings::new_for_insert(&dto);
        assert!(settings.validate(false).is_ok());
        assert_eq!(
            settings.validate(true).unwrap_err().to_string(),
            "ZATCA Phase 2 Business Settings already enabled."
        );
        settings.status = Phase1Status::Disabled;
        assert!(settings.validate(true).is_ok());
    }

    #[test]
    fn test_transaction_type_labels() {
        for kind in TransactionType::all() {
            assert_eq!(TransactionType::parse(kind.as_str()), kind);
        }
        assert_eq!(
            serde_json::to_string(&TransactionType::StandardTaxInvoice).unwrap(),
            "\"Standard Tax Invoice\""
        );
    }
}
