//! 获奖记录-学生关联实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "award_record_students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub award_record_id: i64,
    pub student_id: i64,
    pub is_principal: bool,
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
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::award_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AwardRecord.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
