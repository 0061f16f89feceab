//! Admin user entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use forge_core::domain::AdminUser;

use crate::database::postgres_base::DisplayOrder;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl DisplayOrder for Entity {
    fn display_order(select: Select<Self>) -> Select<Self> {
        select.order_by_asc(Column::CreatedAt)
    }
}

/// Conversion from SeaORM Model to Domain AdminUser.
impl From<Model> for AdminUser {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain AdminUser to SeaORM ActiveModel.
impl From<AdminUser> for ActiveModel {
    fn from(admin: AdminUser) -> Self {
        Self {
            id: Set(admin.id),
            email: Set(admin.email),
            password_hash: Set(admin.password_hash),
            created_at: Set(admin.created_at.into()),
            updated_at: Set(admin.updated_at.into()),
        }
    }
}
