use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 同一角色下用户名唯一（不同角色可以重名）
        manager
            .create_index(
                Index::create()
                    .name("idx_users_role_username")
                    .table(Users::Table)
                    .col(Users::Role)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建学院表
        manager
            .create_table(
                Table::create()
                    .table(Colleges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Colleges::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Colleges::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建专业表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subjects::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subjects::CollegeId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Subjects::Table, Subjects::CollegeId)
                            .to(Colleges::Table, Colleges::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建班级表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::Grade).integer().not_null())
                    .col(ColumnDef::new(Classes::Number).integer().not_null())
                    .col(ColumnDef::new(Classes::SubjectId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // (年级, 班号, 专业) 唯一
        manager
            .create_index(
                Index::create()
                    .name("idx_classes_grade_number_subject")
                    .table(Classes::Table)
                    .col(Classes::Grade)
                    .col(Classes::Number)
                    .col(Classes::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::CardId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::ClassId).big_integer().null())
                    .col(ColumnDef::new(Students::UserId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教师表
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Teachers::CardId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teachers::Name).string().not_null())
                    .col(ColumnDef::new(Teachers::UserId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teachers::Table, Teachers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评级信息表（以竞赛名称为主键）
        manager
            .create_table(
                Table::create()
                    .table(RatingInfos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RatingInfos::CompetitionName)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RatingInfos::Category).string().not_null())
                    .col(ColumnDef::new(RatingInfos::LevelTitle).string().not_null())
                    .col(ColumnDef::new(RatingInfos::Level).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建标准竞赛表（以名称为主键，全局去重）
        manager
            .create_table(
                Table::create()
                    .table(Competitions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Competitions::Name)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Competitions::Category).string().not_null())
                    .col(ColumnDef::new(Competitions::HoldTime).date().not_null())
                    .col(ColumnDef::new(Competitions::Organizer).string().not_null())
                    .col(
                        ColumnDef::new(Competitions::RatingCompetitionName)
                            .string()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Competitions::Table, Competitions::RatingCompetitionName)
                            .to(RatingInfos::Table, RatingInfos::CompetitionName)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建获奖记录表
        manager
            .create_table(
                Table::create()
                    .table(AwardRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AwardRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AwardRecords::WorksName).string().null())
                    .col(ColumnDef::new(AwardRecords::AwardLevel).string().not_null())
                    .col(
                        ColumnDef::new(AwardRecords::UpdateTime)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AwardRecords::TeacherId).big_integer().null())
                    .col(
                        ColumnDef::new(AwardRecords::MainStudentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AwardRecords::SubmitUserId)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AwardRecords::Table, AwardRecords::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AwardRecords::Table, AwardRecords::MainStudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AwardRecords::Table, AwardRecords::SubmitUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建获奖记录-学生关联表
        manager
            .create_table(
                Table::create()
                    .table(AwardRecordStudents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AwardRecordStudents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AwardRecordStudents::AwardRecordId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AwardRecordStudents::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AwardRecordStudents::IsPrincipal)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AwardRecordStudents::Table,
                                AwardRecordStudents::AwardRecordId,
                            )
                            .to(AwardRecords::Table, AwardRecords::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AwardRecordStudents::Table, AwardRecordStudents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_award_record_students_unique")
                    .table(AwardRecordStudents::Table)
                    .col(AwardRecordStudents::AwardRecordId)
                    .col(AwardRecordStudents::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建竞赛快照表（每条获奖记录恰有一条）
        manager
            .create_table(
                Table::create()
                    .table(CompetitionRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompetitionRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CompetitionRecords::Name).string().not_null())
                    .col(
                        ColumnDef::new(CompetitionRecords::Category)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompetitionRecords::HoldTime)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompetitionRecords::Organizer)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompetitionRecords::AwardRecordId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CompetitionRecords::CompetitionName)
                            .string()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                CompetitionRecords::Table,
                                CompetitionRecords::AwardRecordId,
                            )
                            .to(AwardRecords::Table, AwardRecords::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                CompetitionRecords::Table,
                                CompetitionRecords::CompetitionName,
                            )
                            .to(Competitions::Table, Competitions::Name)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建审核表（每条获奖记录恰有一条，随记录创建）
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reviews::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Reviews::Status)
                            .string()
                            .not_null()
                            .default("WAITING"),
                    )
                    .col(
                        ColumnDef::new(Reviews::AwardRecordId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::AwardRecordId)
                            .to(AwardRecords::Table, AwardRecords::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建图片附件表
        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Images::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Images::Category).string().not_null())
                    .col(ColumnDef::new(Images::File).string().not_null())
                    .col(ColumnDef::new(Images::AwardRecordId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Images::Table, Images::AwardRecordId)
                            .to(AwardRecords::Table, AwardRecords::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 每条记录每种类别至多一张图片
        manager
            .create_index(
                Index::create()
                    .name("idx_images_record_category")
                    .table(Images::Table)
                    .col(Images::AwardRecordId)
                    .col(Images::Category)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Images::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CompetitionRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AwardRecordStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AwardRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Competitions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RatingInfos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Colleges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    Role,
    DisplayName,
    LastLogin,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Colleges {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
    Name,
    CollegeId,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
    Grade,
    Number,
    SubjectId,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    CardId,
    Name,
    ClassId,
    UserId,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    Id,
    CardId,
    Name,
    UserId,
}

#[derive(DeriveIden)]
enum AwardRecords {
    Table,
    Id,
    WorksName,
    AwardLevel,
    UpdateTime,
    TeacherId,
    MainStudentId,
    SubmitUserId,
}

#[derive(DeriveIden)]
enum AwardRecordStudents {
    Table,
    Id,
    AwardRecordId,
    StudentId,
    IsPrincipal,
}

#[derive(DeriveIden)]
enum CompetitionRecords {
    Table,
    Id,
    Name,
    Category,
    HoldTime,
    Organizer,
    AwardRecordId,
    CompetitionName,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    Status,
    AwardRecordId,
}

#[derive(DeriveIden)]
enum Competitions {
    Table,
    Name,
    Category,
    HoldTime,
    Organizer,
    RatingCompetitionName,
}

#[derive(DeriveIden)]
enum RatingInfos {
    Table,
    CompetitionName,
    Category,
    LevelTitle,
    Level,
}

#[derive(DeriveIden)]
enum Images {
    Table,
    Id,
    Category,
    File,
    AwardRecordId,
}
