use super::repository;
use contracts::domain::a006_customer::aggregate::{Customer, CustomerDto};
use uuid::Uuid;

pub async fn create(mut dto: CustomerDto) -> anyhow::Result<Uuid> {
    if dto.code.as_deref().map_or(true, |c| c.trim().is_empty()) {
        let next = repository::count().await? + 1;
        dto.code = Some(format!("CUST-{:04}", next));
    }
    let mut aggregate = Customer::new_for_insert(&dto);
    aggregate.validate()?;
    aggregate.before_write();
    repository::insert(&aggregate).await
}

pub async fn update(dto: CustomerDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);
    aggregate.validate()?;
    aggregate.before_write();
    repository::update(&aggregate).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Customer>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Customer>> {
    repository::list_all().await
}
