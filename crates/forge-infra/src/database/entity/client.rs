//! Client (customer reference) entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use forge_core::domain::Client;

use crate::database::postgres_base::DisplayOrder;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub logo_url: String,
    pub website: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl DisplayOrder for Entity {
    fn display_order(select: Select<Self>) -> Select<Self> {
        select
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::CreatedAt)
    }
}

impl From<Model> for Client {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            logo_url: model.logo_url,
            website: model.website,
            sort_order: model.sort_order,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Client> for ActiveModel {
    fn from(client: Client) -> Self {
        Self {
            id: Set(client.id),
            name: Set(client.name),
            logo_url: Set(client.logo_url),
            website: Set(client.website),
            sort_order: Set(client.sort_order),
            created_at: Set(client.created_at.into()),
            updated_at: Set(client.updated_at.into()),
        }
    }
}
