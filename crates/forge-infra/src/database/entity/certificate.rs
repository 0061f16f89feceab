//! Certificate entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use forge_core::domain::{Certificate, LocalizedText};

use crate::database::postgres_base::DisplayOrder;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "certificates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title_ar: String,
    pub title_en: String,
    pub title_tr: String,
    pub issuer: Option<String>,
    pub image_url: String,
    pub issued_on: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl DisplayOrder for Entity {
    fn display_order(select: Select<Self>) -> Select<Self> {
        select
            .order_by_desc(Column::IssuedOn)
            .order_by_desc(Column::CreatedAt)
    }
}

impl From<Model> for Certificate {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: LocalizedText::new(model.title_ar, model.title_en, model.title_tr),
            issuer: model.issuer,
            image_url: model.image_url,
            issued_on: model.issued_on,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Certificate> for ActiveModel {
    fn from(certificate: Certificate) -> Self {
        Self {
            id: Set(certificate.id),
            title_ar: Set(certificate.title.ar),
            title_en: Set(certificate.title.en),
            title_tr: Set(certificate.title.tr),
            issuer: Set(certificate.issuer),
            image_url: Set(certificate.image_url),
            issued_on: Set(certificate.issued_on),
            created_at: Set(certificate.created_at.into()),
            updated_at: Set(certificate.updated_at.into()),
        }
    }
}
