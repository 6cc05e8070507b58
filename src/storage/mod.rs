use std::sync::Arc;

use crate::models::{
    competitions::{
        entities::{Competition, RatingInfo},
        requests::{CompetitionQueryParams, CompetitionRequest, CompetitionUpdateRequest},
        responses::{CompetitionListResponse, RatingInfoListResponse},
    },
    directory::{
        entities::{Class, College, Student, Subject, Teacher},
        requests::{ClassQueryParams, DirectoryQueryParams, StudentQueryParams},
        responses::{
            ClassListResponse, CollegeListResponse, StudentListResponse, SubjectListResponse,
            TeacherListResponse,
        },
    },
    images::entities::{Image, ImageCategory},
    records::{
        requests::{CreateRecordData, RecordListQuery, UpdateRecordData},
        responses::{RecordDetail, RecordListResponse},
    },
    reviews::entities::ReviewStatus,
    users::{
        entities::{User, UserRole},
        requests::{CreateUserData, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学院管理方法
    // 创建学院（重名返回 Conflict）
    async fn create_college(&self, name: &str) -> Result<College>;
    // 通过名称获取学院
    async fn get_college_by_name(&self, name: &str) -> Result<Option<College>>;
    // 通过ID获取学院
    async fn get_college_by_id(&self, id: i64) -> Result<Option<College>>;
    // 列出学院
    async fn list_colleges_with_pagination(
        &self,
        query: DirectoryQueryParams,
    ) -> Result<CollegeListResponse>;
    // 更新学院名称
    async fn update_college(&self, id: i64, name: &str) -> Result<Option<College>>;
    // 删除学院
    async fn delete_college(&self, id: i64) -> Result<bool>;

    /// 专业管理方法
    async fn create_subject(&self, name: &str, college_id: i64) -> Result<Subject>;
    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: DirectoryQueryParams,
    ) -> Result<SubjectListResponse>;
    async fn update_subject(
        &self,
        id: i64,
        name: Option<String>,
        college_id: Option<i64>,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 班级管理方法
    async fn create_class(&self, grade: i32, number: i32, subject_id: i64) -> Result<Class>;
    // 通过 (年级, 班号, 专业) 三元组获取班级
    async fn get_class_by_triple(
        &self,
        grade: i32,
        number: i32,
        subject_id: i64,
    ) -> Result<Option<Class>>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn list_classes_with_pagination(
        &self,
        query: ClassQueryParams,
    ) -> Result<ClassListResponse>;
    async fn update_class(
        &self,
        id: i64,
        grade: Option<i32>,
        number: Option<i32>,
        subject_id: Option<i64>,
    ) -> Result<Option<Class>>;
    async fn delete_class(&self, id: i64) -> Result<bool>;

    /// 学生管理方法
    async fn create_student(
        &self,
        card_id: &str,
        name: &str,
        class_id: Option<i64>,
    ) -> Result<Student>;
    async fn get_student_by_card_id(&self, card_id: &str) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentQueryParams,
    ) -> Result<StudentListResponse>;
    // 按学号覆盖姓名与班级（批量导入语义）
    async fn upsert_student(
        &self,
        card_id: &str,
        name: &str,
        class_id: Option<i64>,
    ) -> Result<Student>;
    async fn update_student(
        &self,
        card_id: &str,
        name: Option<String>,
        class_id: Option<Option<i64>>,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, card_id: &str) -> Result<bool>;
    // 账号绑定
    async fn bind_student_user(&self, card_id: &str, user_id: i64) -> Result<bool>;

    /// 教师管理方法
    async fn create_teacher(&self, card_id: &str, name: &str) -> Result<Teacher>;
    async fn get_teacher_by_card_id(&self, card_id: &str) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: DirectoryQueryParams,
    ) -> Result<TeacherListResponse>;
    // 按工号覆盖姓名（批量导入语义）
    async fn upsert_teacher(&self, card_id: &str, name: &str) -> Result<Teacher>;
    async fn update_teacher(&self, card_id: &str, name: &str) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, card_id: &str) -> Result<bool>;
    async fn bind_teacher_user(&self, card_id: &str, user_id: i64) -> Result<bool>;

    /// 获奖记录管理方法
    // 创建记录 + 竞赛快照 + 审核（单事务）
    async fn create_award_record(&self, data: CreateRecordData) -> Result<RecordDetail>;
    // 获取记录详情（含目录档案、评级投影和附件）
    async fn get_record_detail(&self, id: i64) -> Result<Option<RecordDetail>>;
    // 分页列出记录
    async fn list_records_with_pagination(
        &self,
        query: RecordListQuery,
    ) -> Result<RecordListResponse>;
    // 部分更新记录并把审核重置为待审（单事务）
    async fn update_award_record(
        &self,
        id: i64,
        data: UpdateRecordData,
    ) -> Result<Option<RecordDetail>>;
    // 删除记录，返回被删记录的附件文件名供清理
    async fn delete_award_record(&self, id: i64) -> Result<Option<Vec<String>>>;

    /// 审核管理方法
    async fn get_review_status(&self, record_id: i64) -> Result<Option<ReviewStatus>>;
    async fn set_review_status(&self, record_id: i64, status: ReviewStatus) -> Result<bool>;
    // 把竞赛快照字段覆盖为标准竞赛的值并建立关联
    async fn link_competition_record(&self, record_id: i64, competition: &Competition)
    -> Result<bool>;

    /// 标准竞赛管理方法
    async fn create_competition(&self, data: CompetitionRequest) -> Result<Competition>;
    async fn get_competition_by_name(&self, name: &str) -> Result<Option<Competition>>;
    async fn list_competitions_with_pagination(
        &self,
        query: CompetitionQueryParams,
    ) -> Result<CompetitionListResponse>;
    async fn update_competition(
        &self,
        name: &str,
        update: CompetitionUpdateRequest,
    ) -> Result<Option<Competition>>;
    async fn delete_competition(&self, name: &str) -> Result<bool>;

    /// 评级信息管理方法
    async fn get_rating_info_by_name(&self, competition_name: &str) -> Result<Option<RatingInfo>>;
    async fn list_rating_infos_with_pagination(
        &self,
        query: CompetitionQueryParams,
    ) -> Result<RatingInfoListResponse>;
    // 按竞赛名覆盖（批量导入语义），返回是否新建
    async fn upsert_rating_info(
        &self,
        competition_name: &str,
        category: &str,
        level_title: &str,
        level: i32,
    ) -> Result<bool>;
    async fn delete_rating_info(&self, competition_name: &str) -> Result<bool>;

    /// 附件管理方法
    // 登记附件文件名，同类别已存在时覆盖并返回旧文件名
    async fn upsert_image(
        &self,
        record_id: i64,
        category: ImageCategory,
        file: &str,
    ) -> Result<(Image, Option<String>)>;
    async fn list_images_by_record(&self, record_id: i64) -> Result<Vec<Image>>;

    /// 账号管理方法
    async fn create_user(&self, user: CreateUserData) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 用户名在角色内唯一
    async fn get_user_by_username_and_role(
        &self,
        username: &str,
        role: UserRole,
    ) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    async fn update_user(
        &self,
        id: i64,
        password_hash: Option<String>,
        display_name: Option<String>,
    ) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users_by_role(&self, role: UserRole) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
