//! 竞赛快照实体
//!
//! 每条获奖记录持有一份提交时的竞赛信息快照，审核通过后
//! 与标准竞赛（competitions）建立关联并被标准值覆盖。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "competition_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub category: String,
    pub hold_time: Date,
    pub organizer: String,
    #[sea_orm(unique)]
    pub award_record_id: i64,
    pub competition_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::award_records::Entity",
        from = "Column::AwardRecordId",
        to = "super::award_records::Column::Id"
    )]
    AwardRecord,
    #[sea_orm(
        belongs_to = "super::competitions::Entity",
        from = "Column::CompetitionName",
        to = "super::competitions::Column::Name"
    )]
    Competition,
}

impl Related<super::award_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AwardRecord.def()
    }
}

impl Related<super::competitions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Competition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
