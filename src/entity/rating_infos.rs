//! 评级信息实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rating_infos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub competition_name: String,
    pub category: String,
    pub level_title: String,
    pub level: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::competitions::Entity")]
    Competitions,
}

impl Related<super::competitions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Competitions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_rating_info(self) -> crate::models::competitions::entities::RatingInfo {
        crate::models::competitions::entities::RatingInfo {
            competition_name: self.competition_name,
            category: self.category,
            level_title: self.level_title,
            level: self.level,
        }
    }
}
