use contracts::domain::a003_company::Company;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub vat_registration_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Company {
    fn from(m: Model) -> Self {
        Company {
            name: m.name,
            vat_registration_number: m.vat_registration_number,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Company>> {
    let items = Entity::find()
        .order_by_asc(Column::Name)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_name(name: &str) -> anyhow::Result<Option<Company>> {
    Ok(Entity::find_by_id(name.to_string())
        .one(conn())
        .await?
        .map(Into::into))
}

pub async fn insert(company: &Company) -> anyhow::Result<()> {
    let active = ActiveModel {
        name: Set(company.name.clone()),
        vat_registration_number: Set(company.vat_registration_number.clone()),
    };
    active.insert(conn()).await?;
    Ok(())
}
