use chrono::Utc;
use contracts::domain::a005_invoice_fix_rejection::{
    InvoiceFixRejection, InvoiceFixRejectionId, RejectionFixDraft,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a005_invoice_fix_rejection")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub invoice_type: String,
    pub invoice: Option<String>,
    pub fix_reason: String,
    pub draft_json: String,
    pub successor_id: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for InvoiceFixRejection {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id)?;
        let draft: RejectionFixDraft = serde_json::from_str(&m.draft_json)?;

        Ok(InvoiceFixRejection {
            base: BaseAggregate::with_metadata(
                InvoiceFixRejectionId(uuid),
                m.code,
                m.description,
                None,
                metadata,
            ),
            draft,
            successor_id: m.successor_id,
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &InvoiceFixRejection) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.to_string_id()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        invoice_type: Set(aggregate.draft.invoice_type.label().to_string()),
        invoice: Set(aggregate.draft.invoice.clone()),
        fix_reason: Set(aggregate.draft.fix_reason.clone()),
        draft_json: Set(serde_json::to_string(&aggregate.draft)?),
        successor_id: Set(aggregate.successor_id.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    })
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<InvoiceFixRejection>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    result.map(TryInto::try_into).transpose()
}

pub async fn count() -> anyhow::Result<u64> {
    Ok(Entity::find().count(conn()).await?)
}

pub async fn insert(aggregate: &InvoiceFixRejection) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate)?.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &InvoiceFixRejection) -> anyhow::Result<()> {
    let mut active = to_active(aggregate)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

/// Claims the record for its single resubmission.
///
/// Returns `false` when the record is already linked to a successor, so of
/// two concurrent calls only one goes on.
pub async fn mark_resubmitted<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    successor_id: &str,
) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::SuccessorId, Expr::value(successor_id))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::SuccessorId.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::bootstrap_schema;
    use contracts::enums::InvoiceType;
    use sea_orm::{ConnectOptions, Database};

    async fn memory_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_string());
        options.max_connections(1).min_connections(1);
        let db = Database::connect(options).await.unwrap();
        bootstrap_schema(&db).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_second_resubmission_is_refused() {
        let db = memory_db().await;
        let mut draft = RejectionFixDraft::new(InvoiceType::SalesInvoice);
        draft.select_invoice(Some("INV-0007".into()));
        let record = InvoiceFixRejection::new_for_insert("FIX-0001".into(), draft);
        to_active(&record).unwrap().insert(&db).await.unwrap();
        let id = record.base.id.value();

        assert!(mark_resubmitted(&db, id, "succ-1").await.unwrap());
        assert!(!mark_resubmitted(&db, id, "succ-2").await.unwrap());

        let stored: InvoiceFixRejection = Entity::find_by_id(id.to_string())
            .one(&db)
            .await
            .unwrap()
            .unwrap()
            .try_into()
            .unwrap();
        assert_eq!(stored.successor_id.as_deref(), Some("succ-1"));
    }
}
