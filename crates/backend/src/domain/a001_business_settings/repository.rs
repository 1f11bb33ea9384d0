use chrono::Utc;
use contracts::domain::a001_business_settings::aggregate::{
    BusinessSettings, BusinessSettingsId, SyncMode,
};
use contracts::domain::common::{AdditionalId, BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_business_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub company: String,
    pub company_address: String,
    pub seller_name: String,
    pub vat_registration_number: String,
    pub fatoora_server_url: String,
    pub enable_zatca_integration: bool,
    pub enable_branch_configuration: bool,
    pub sync_with_zatca: String,
    pub compliance_request_id: Option<String>,
    pub production_request_id: Option<String>,
    pub other_ids_json: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BusinessSettings {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let other_ids: Vec<AdditionalId> = serde_json::from_str(&m.other_ids_json)
            .unwrap_or_else(|e| {
                tracing::warn!("Broken other_ids_json for business settings {}: {}", m.id, e);
                Vec::new()
            });

        BusinessSettings {
            base: BaseAggregate::with_metadata(
                BusinessSettingsId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            company: m.company,
            company_address: m.company_address,
            seller_name: m.seller_name,
            vat_registration_number: m.vat_registration_number,
            fatoora_server_url: m.fatoora_server_url,
            enable_zatca_integration: m.enable_zatca_integration,
            enable_branch_configuration: m.enable_branch_configuration,
            sync_with_zatca: SyncMode::parse(&m.sync_with_zatca),
            compliance_request_id: m.compliance_request_id,
            production_request_id: m.production_request_id,
            other_ids,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &BusinessSettings) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        company: Set(aggregate.company.clone()),
        company_address: Set(aggregate.company_address.clone()),
        seller_name: Set(aggregate.seller_name.clone()),
        vat_registration_number: Set(aggregate.vat_registration_number.clone()),
        fatoora_server_url: Set(aggregate.fatoora_server_url.clone()),
        enable_zatca_integration: Set(aggregate.enable_zatca_integration),
        enable_branch_configuration: Set(aggregate.enable_branch_configuration),
        sync_with_zatca: Set(aggregate.sync_with_zatca.as_str().to_string()),
        compliance_request_id: Set(aggregate.compliance_request_id.clone()),
        production_request_id: Set(aggregate.production_request_id.clone()),
        other_ids_json: Set(serde_json::to_string(&aggregate.other_ids)?),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    })
}

pub async fn list_all() -> anyhow::Result<Vec<BusinessSettings>> {
    let mut items: Vec<BusinessSettings> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.base.code.cmp(&b.base.code));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<BusinessSettings>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn find_by_company(company: &str) -> anyhow::Result<Option<BusinessSettings>> {
    let result = Entity::find()
        .filter(Column::Company.eq(company))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn count() -> anyhow::Result<u64> {
    Ok(Entity::find().count(conn()).await?)
}

pub async fn insert(aggregate: &BusinessSettings) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate)?.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &BusinessSettings) -> anyhow::Result<()> {
    let mut active = to_active(aggregate)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
