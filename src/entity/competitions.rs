//! 标准竞赛实体
//!
//! 以名称为主键的全局去重竞赛，只在审核通过时惰性创建，
//! 被多条获奖记录共享。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "competitions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub category: String,
    pub hold_time: Date,
    pub organizer: String,
    pub rating_competition_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rating_infos::Entity",
        from = "Column::RatingCompetitionName",
        to = "super::rating_infos::Column::CompetitionName"
    )]
    RatingInfo,
    #[sea_orm(has_many = "super::competition_records::Entity")]
    CompetitionRecords,
}

impl Related<super::rating_infos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RatingInfo.def()
    }
}

impl Related<super::competition_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompetitionRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
