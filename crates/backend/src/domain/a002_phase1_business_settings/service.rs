use super::repository;
use crate::domain::a001_business_settings;
use contracts::domain::a002_phase1_business_settings::aggregate::{
    Phase1BusinessSettings, Phase1BusinessSettingsDto,
};
use uuid::Uuid;

async fn phase2_enabled(company: &str) -> anyhow::Result<bool> {
    Ok(a001_business_settings::repository::find_by_company(company)
        .await?
        .is_some())
}

pub async fn create(mut dto: Phase1BusinessSettingsDto) -> anyhow::Result<Uuid> {
    if dto.code.as_deref().map_or(true, |c| c.trim().is_empty()) {
        let next = repository::count().await? + 1;
        dto.code = Some(format!("P1-{:04}", next));
    }
    let mut aggregate = Phase1BusinessSettings::new_for_insert(&dto);
    aggregate.validate(phase2_enabled(&aggregate.company).await?)?;
    aggregate.before_write();
    repository::insert(&aggregate).await
}

pub async fn update(dto: Phase1BusinessSettingsDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);
    aggregate.validate(phase2_enabled(&aggregate.company).await?)?;
    aggregate.before_write();
    repository::update(&aggregate).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Phase1BusinessSettings>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Phase1BusinessSettings>> {
    repository::list_all().await
}
