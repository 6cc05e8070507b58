//! 获奖记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "award_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub works_name: Option<String>,
    pub award_level: String,
    pub update_time: i64,
    pub teacher_id: Option<i64>,
    pub main_student_id: Option<i64>,
    pub submit_user_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::MainStudentId",
        to = "super::students::Column::Id"
    )]
    MainStudent,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SubmitUserId",
        to = "super::users::Column::Id"
    )]
    SubmitUser,
    #[sea_orm(has_many = "super::award_record_students::Entity")]
    AwardRecordStudents,
    #[sea_orm(has_one = "super::competition_records::Entity")]
    CompetitionRecord,
    #[sea_orm(has_one = "super::reviews::Entity")]
    Review,
    #[sea_orm(has_many = "super::images::Entity")]
    Images,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubmitUser.def()
    }
}

impl Related<super::award_record_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AwardRecordStudents.def()
    }
}

impl Related<super::competition_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompetitionRecord.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
