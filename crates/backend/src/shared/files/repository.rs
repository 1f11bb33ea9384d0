use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

/// Uploaded file, addressed by its public URL
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "file")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub file_name: String,
    pub file_url: String,
    pub stored_path: String,
    pub file_size: i64,
    pub content_type: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn insert(
    id: &str,
    file_name: &str,
    file_url: &str,
    stored_path: &str,
    file_size: i64,
    content_type: Option<String>,
) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(id.to_string()),
        file_name: Set(file_name.to_string()),
        file_url: Set(file_url.to_string()),
        stored_path: Set(stored_path.to_string()),
        file_size: Set(file_size),
        content_type: Set(content_type),
        created_at: Set(Some(Utc::now().to_rfc3339())),
    };
    active.insert(conn()).await?;
    Ok(())
}

pub async fn get_by_url(file_url: &str) -> anyhow::Result<Option<Model>> {
    let result = Entity::find()
        .filter(Column::FileUrl.eq(file_url))
        .one(conn())
        .await?;
    Ok(result)
}
