use contracts::domain::a003_company::CompanyAddress;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "company_address")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub company: String,
    pub address_line: String,
    pub is_primary: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CompanyAddress {
    fn from(m: Model) -> Self {
        CompanyAddress {
            id: m.id,
            company: m.company,
            address_line: m.address_line,
            is_primary: m.is_primary,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Addresses linked to a company, in id order
pub async fn list_by_company(company: &str) -> anyhow::Result<Vec<CompanyAddress>> {
    let items = Entity::find()
        .filter(Column::Company.eq(company))
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Primary addresses of a company, in id order
pub async fn list_primary(company: &str) -> anyhow::Result<Vec<CompanyAddress>> {
    let items = Entity::find()
        .filter(Column::Company.eq(company))
        .filter(Column::IsPrimary.eq(true))
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(address: &CompanyAddress) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(address.id.clone()),
        company: Set(address.company.clone()),
        address_line: Set(address.address_line.clone()),
        is_primary: Set(address.is_primary),
    };
    active.insert(conn()).await?;
    Ok(())
}
