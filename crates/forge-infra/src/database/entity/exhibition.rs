//! Exhibition entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use forge_core::domain::{Exhibition, LocalizedText};

use crate::database::postgres_base::DisplayOrder;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exhibitions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name_ar: String,
    pub name_en: String,
    pub name_tr: String,
    pub location_ar: String,
    pub location_en: String,
    pub location_tr: String,
    pub start_date: Date,
    pub end_date: Date,
    pub booth: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl DisplayOrder for Entity {
    fn display_order(select: Select<Self>) -> Select<Self> {
        select.order_by_desc(Column::StartDate)
    }
}

impl From<Model> for Exhibition {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: LocalizedText::new(model.name_ar, model.name_en, model.name_tr),
            location: LocalizedText::new(model.location_ar, model.location_en, model.location_tr),
            start_date: model.start_date,
            end_date: model.end_date,
            booth: model.booth,
            image_url: model.image_url,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Exhibition> for ActiveModel {
    fn from(exhibition: Exhibition) -> Self {
        Self {
            id: Set(exhibition.id),
            name_ar: Set(exhibition.name.ar),
            name_en: Set(exhibition.name.en),
            name_tr: Set(exhibition.name.tr),
            location_ar: Set(exhibition.location.ar),
            location_en: Set(exhibition.location.en),
            location_tr: Set(exhibition.location.tr),
            start_date: Set(exhibition.start_date),
            end_date: Set(exhibition.end_date),
            booth: Set(exhibition.booth),
            image_url: Set(exhibition.image_url),
            created_at: Set(exhibition.created_at.into()),
            updated_at: Set(exhibition.updated_at.into()),
        }
    }
}
