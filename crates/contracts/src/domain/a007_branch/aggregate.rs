use serde::{Deserialize, Serialize};

use crate::domain::common::{
    seed_if_empty, AdditionalId, AggregateRoot, BaseAggregate, EntityMetadata, IdentifierType,
};
use crate::shared::errors::ValidationError;

crate::uuid_aggregate_id!(
    /// Identifier of a branch record
    BranchId
);

/// A branch is identified to ZATCA by its own commercial registration
pub const BRANCH_ID_TYPES: [IdentifierType; 1] = [IdentifierType {
    type_name: "Commercial Registration Number",
    type_code: "CRN",
}];

/// Selling branch of a company, with its address and CRN
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    #[serde(flatten)]
    pub base: BaseAggregate<BranchId>,

    pub branch_name: String,
    pub company: String,
    pub company_address: String,
    pub branch_ids: Vec<AdditionalId>,
}

impl Branch {
    pub fn new_for_insert(dto: &BranchDto) -> Self {
        let code = dto.code.clone().unwrap_or_default();
        let mut branch = Self {
            base: BaseAggregate::new(BranchId::new_v4(), code, dto.branch_name.clone()),
            branch_name: String::new(),
            company: String::new(),
            company_address: String::new(),
            branch_ids: Vec::new(),
        };
        branch.update(dto);
        branch
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.0.to_string()
    }

    pub fn update(&mut self, dto: &BranchDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.branch_name.clone();
        self.base.comment = dto.comment.clone();
        self.branch_name = dto.branch_name.clone();
        self.company = dto.company.clone();
        self.company_address = dto.company_address.clone();
        self.branch_ids = dto.branch_ids.clone();
    }

    /// Filled CRN of the branch, if any
    pub fn crn(&self) -> Option<&str> {
        self.branch_ids
            .iter()
            .find(|row| row.type_code == "CRN")
            .map(|row| row.value.trim())
            .filter(|value| !value.is_empty())
    }

    /// `branch_config_enabled` comes from the business settings of the
    /// branch's company
    pub fn validate(&self, branch_config_enabled: bool) -> Result<(), ValidationError> {
        if self.branch_name.trim().is_empty() {
            return Err(ValidationError::Required("Branch".into()));
        }
        if self.company.trim().is_empty() {
            return Err(ValidationError::Required("Company".into()));
        }
        if branch_config_enabled && self.crn().is_none() {
            return Err(ValidationError::Rule(
                "CRN is mandatory when ZATCA branch configuration is enabled for company.".into(),
            ));
        }
        Ok(())
    }

    /// A CRN belongs to one branch only
    pub fn ensure_unique_crn(&self, others: &[Branch]) -> Result<(), ValidationError> {
        let Some(crn) = self.crn() else {
            return Ok(());
        };
        let taken = others
            .iter()
            .filter(|other| other.base.id != self.base.id && !other.base.metadata.is_deleted)
            .any(|other| other.crn() == Some(crn));
        if taken {
            return Err(ValidationError::Rule(
                "This CRN is already used in another branch configuration.".into(),
            ));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Branch {
    type Id = BranchId;

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
        "a007"
    }

    fn collection_name() -> &'static str {
        "branch"
    }

    fn element_name() -> &'static str {
        "Branch"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BranchDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub branch_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub company_address: String,
    #[serde(default)]
    pub branch_ids: Vec<AdditionalId>,
    pub comment: Option<String>,
}

impl BranchDto {
    /// Seeds the CRN row; the table has a fixed shape, so it is seeded
    /// whenever it is empty
    pub fn seed_branch_ids(&mut self) -> bool {
        seed_if_empty(&mut self.branch_ids, &BRANCH_ID_TYPES)
    }
}

impl From<&Branch> for BranchDto {
    fn from(branch: &Branch) -> Self {
        Self {
            id: Some(branch.to_string_id()),
            code: Some(branch.base.code.clone()),
            branch_name: branch.branch_name.clone(),
            company: branch.company.clone(),
            company_address: branch.company_address.clone(),
            branch_ids: branch.branch_ids.clone(),
            comment: branch.base.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(name: &str, crn: &str) -> Branch {
        let mut dto = BranchDto {
            branch_name: name.into(),
            company: "ACME KSA".into(),
            ..Default::default()
        };
        dto.seed_branch_ids();
        dto.branch_ids[0].value = crn.into();
        Branch::new_for_insert(&dto)
    }

    #[test]
    fn test_seed_branch_ids_with_crn_only() {
        let mut form = BranchDto::default();
        assert!(form.seed_branch_ids());
        assert_eq!(form.branch_ids.len(), 1);
        assert_eq!(form.branch_ids[0].type_code, "CRN");
        assert!(!form.seed_branch_ids());
    }

    #[test]
    fn test_crn_mandatory_only_with_branch_configuration() {
        let jeddah = branch("Jeddah", "  ");
        assert!(jeddah.validate(false).is_ok());
        assert_eq!(
            jeddah.validate(true).unwrap_err().to_string(),
            "CRN is mandatory when ZATCA branch configuration is enabled for company."
        );
        assert!(branch("Jeddah", "4030000001").validate(true).is_ok());
    }

    #[test]
    fn test_crn_used_by_another_branch_is_refused() {
        let riyadh = branch("Riyadh", "1010000001");
        let jeddah = branch("Jeddah", " 1010000001 ");
        assert_eq!(
            jeddah.ensure_unique_crn(&[riyadh.clone()]).unwrap_err().to_string(),
            "This CRN is already used in another branch configuration."
        );
        assert!(riyadh.ensure_unique_crn(&[riyadh.clone()]).is_ok());
        assert!(branch("Dammam", "").ensure_unique_crn(&[riyadh]).is_ok());
    }

    #[test]
    fn test_full_name() {
        assert_eq!(Branch::full_name(), "a007_branch");
    }
}
