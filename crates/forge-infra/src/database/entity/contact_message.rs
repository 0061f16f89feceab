//! Contact form submission entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use forge_core::domain::ContactMessage;

use super::stored_locale;
use crate::database::postgres_base::DisplayOrder;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub locale: String,
    pub ip_address: String,
    pub read: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl DisplayOrder for Entity {
    fn display_order(select: Select<Self>) -> Select<Self> {
        select.order_by_desc(Column::CreatedAt)
    }
}

impl From<Model> for ContactMessage {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            company: model.company,
            subject: model.subject,
            message: model.message,
            locale: stored_locale(&model.locale),
            ip_address: model.ip_address,
            read: model.read,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<ContactMessage> for ActiveModel {
    fn from(message: ContactMessage) -> Self {
        Self {
            id: Set(message.id),
            name: Set(message.name),
            email: Set(message.email),
            phone: Set(message.phone),
            company: Set(message.company),
            subject: Set(message.subject),
            message: Set(message.message),
            locale: Set(message.locale.code().to_string()),
            ip_address: Set(message.ip_address),
            read: Set(message.read),
            created_at: Set(message.created_at.into()),
            updated_at: Set(message.updated_at.into()),
        }
    }
}
