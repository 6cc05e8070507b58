//! 图片附件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category: String,
    pub file: String,
    pub award_record_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::award_records::Entity",
        from = "Column::AwardRecordId",
        to = "super::award_records::Column::Id"
    )]
    AwardRecord,
}

impl Related<super::award_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AwardRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_image(self) -> crate::models::images::entities::Image {
        use crate::models::images::entities::{Image, ImageCategory};
        use std::str::FromStr;

        Image {
            id: self.id,
            category: ImageCategory::from_str(&self.category).unwrap_or(ImageCategory::Notice),
            file: self.file,
            award_record_id: self.award_record_id,
        }
    }
}
