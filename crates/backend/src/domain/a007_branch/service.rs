use super::repository;
use crate::domain::{a001_business_settings, a003_company};
use contracts::domain::a007_branch::aggregate::{Branch, BranchDto};
use contracts::shared::errors::ValidationError;
use uuid::Uuid;

async fn branch_config_enabled(company: &str) -> anyhow::Result<bool> {
    Ok(a001_business_settings::repository::find_by_company(company)
        .await?
        .is_some_and(|settings| settings.enable_branch_configuration))
}

/// Company rules of a branch: CRN requirement and uniqueness, and an
/// address picked among the company's own addresses
async fn check(branch: &Branch) -> anyhow::Result<()> {
    branch.validate(branch_config_enabled(&branch.company).await?)?;
    branch.ensure_unique_crn(&repository::list_all().await?)?;

    let address = branch.company_address.trim();
    if !address.is_empty() {
        let addresses = a003_company::service::fetch_company_addresses(&branch.company).await?;
        if !addresses.iter().any(|a| a == address) {
            return Err(ValidationError::Rule(format!(
                "Address {} does not belong to company {}",
                address, branch.company
            ))
            .into());
        }
    }
    Ok(())
}

pub async fn create(mut dto: BranchDto) -> anyhow::Result<Uuid> {
    if dto.code.as_deref().map_or(true, |c| c.trim().is_empty()) {
        let next = repository::count().await? + 1;
        dto.code = Some(format!("BR-{:04}", next));
    }
    dto.seed_branch_ids();

    let mut aggregate = Branch::new_for_insert(&dto);
    check(&aggregate).await?;
    aggregate.before_write();
    repository::insert(&aggregate).await
}

pub async fn update(dto: BranchDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);
    check(&aggregate).await?;
    aggregate.before_write();
    repository::update(&aggregate).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Branch>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Branch>> {
    repository::list_all().await
}
