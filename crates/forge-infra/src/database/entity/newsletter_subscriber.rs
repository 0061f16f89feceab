//! Newsletter subscriber entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use forge_core::domain::NewsletterSubscriber;

use super::stored_locale;
use crate::database::postgres_base::DisplayOrder;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "newsletter_subscribers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub locale: String,
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

impl From<Model> for NewsletterSubscriber {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            locale: stored_locale(&model.locale),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<NewsletterSubscriber> for ActiveModel {
    fn from(subscriber: NewsletterSubscriber) -> Self {
        Self {
            id: Set(subscriber.id),
            email: Set(subscriber.email),
            locale: Set(subscriber.locale.code().to_string()),
            created_at: Set(subscriber.created_at.into()),
            updated_at: Set(subscriber.updated_at.into()),
        }
    }
}
