//! 审核实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub status: String,
    #[sea_orm(unique)]
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
