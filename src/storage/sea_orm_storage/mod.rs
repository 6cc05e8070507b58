//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod classes;
mod colleges;
mod competitions;
mod images;
mod rating_infos;
mod records;
mod reviews;
mod students;
mod subjects;
mod teachers;
mod users;

use crate::config::AppConfig;
use crate::errors::{AwardSysError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(&config.database.url).await
    }

    /// 按指定 URL 创建存储实例（集成测试使用 `:memory:`）
    pub async fn new_with_url(url: &str) -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AwardSysError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AwardSysError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        // 内存库必须单连接，否则每个连接各自一套空库
        let max_connections = if url.contains(":memory:") {
            1
        } else {
            config.database.pool_size
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AwardSysError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AwardSysError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AwardSysError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学院模块
    async fn create_college(&self, name: &str) -> Result<College> {
        self.create_college_impl(name).await
    }

    async fn get_college_by_name(&self, name: &str) -> Result<Option<College>> {
        self.get_college_by_name_impl(name).await
    }

    async fn get_college_by_id(&self, id: i64) -> Result<Option<College>> {
        self.get_college_by_id_impl(id).await
    }

    async fn list_colleges_with_pagination(
        &self,
        query: DirectoryQueryParams,
    ) -> Result<CollegeListResponse> {
        self.list_colleges_with_pagination_impl(query).await
    }

    async fn update_college(&self, id: i64, name: &str) -> Result<Option<College>> {
        self.update_college_impl(id, name).await
    }

    async fn delete_college(&self, id: i64) -> Result<bool> {
        self.delete_college_impl(id).await
    }

    // 专业模块
    async fn create_subject(&self, name: &str, college_id: i64) -> Result<Subject> {
        self.create_subject_impl(name, college_id).await
    }

    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>> {
        self.get_subject_by_name_impl(name).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: DirectoryQueryParams,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn update_subject(
        &self,
        id: i64,
        name: Option<String>,
        college_id: Option<i64>,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, name, college_id).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 班级模块
    async fn create_class(&self, grade: i32, number: i32, subject_id: i64) -> Result<Class> {
        self.create_class_impl(grade, number, subject_id).await
    }

    async fn get_class_by_triple(
        &self,
        grade: i32,
        number: i32,
        subject_id: i64,
    ) -> Result<Option<Class>> {
        self.get_class_by_triple_impl(grade, number, subject_id)
            .await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassQueryParams,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        id: i64,
        grade: Option<i32>,
        number: Option<i32>,
        subject_id: Option<i64>,
    ) -> Result<Option<Class>> {
        self.update_class_impl(id, grade, number, subject_id).await
    }

    async fn delete_class(&self, id: i64) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    // 学生模块
    async fn create_student(
        &self,
        card_id: &str,
        name: &str,
        class_id: Option<i64>,
    ) -> Result<Student> {
        self.create_student_impl(card_id, name, class_id).await
    }

    async fn get_student_by_card_id(&self, card_id: &str) -> Result<Option<Student>> {
        self.get_student_by_card_id_impl(card_id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentQueryParams,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn upsert_student(
        &self,
        card_id: &str,
        name: &str,
        class_id: Option<i64>,
    ) -> Result<Student> {
        self.upsert_student_impl(card_id, name, class_id).await
    }

    async fn update_student(
        &self,
        card_id: &str,
        name: Option<String>,
        class_id: Option<Option<i64>>,
    ) -> Result<Option<Student>> {
        self.update_student_impl(card_id, name, class_id).await
    }

    async fn delete_student(&self, card_id: &str) -> Result<bool> {
        self.delete_student_impl(card_id).await
    }

    async fn bind_student_user(&self, card_id: &str, user_id: i64) -> Result<bool> {
        self.bind_student_user_impl(card_id, user_id).await
    }

    // 教师模块
    async fn create_teacher(&self, card_id: &str, name: &str) -> Result<Teacher> {
        self.create_teacher_impl(card_id, name).await
    }

    async fn get_teacher_by_card_id(&self, card_id: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_card_id_impl(card_id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: DirectoryQueryParams,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn upsert_teacher(&self, card_id: &str, name: &str) -> Result<Teacher> {
        self.upsert_teacher_impl(card_id, name).await
    }

    async fn update_teacher(&self, card_id: &str, name: &str) -> Result<Option<Teacher>> {
        self.update_teacher_impl(card_id, name).await
    }

    async fn delete_teacher(&self, card_id: &str) -> Result<bool> {
        self.delete_teacher_impl(card_id).await
    }

    async fn bind_teacher_user(&self, card_id: &str, user_id: i64) -> Result<bool> {
        self.bind_teacher_user_impl(card_id, user_id).await
    }

    // 获奖记录模块
    async fn create_award_record(&self, data: CreateRecordData) -> Result<RecordDetail> {
        self.create_award_record_impl(data).await
    }

    async fn get_record_detail(&self, id: i64) -> Result<Option<RecordDetail>> {
        self.get_record_detail_impl(id).await
    }

    async fn list_records_with_pagination(
        &self,
        query: RecordListQuery,
    ) -> Result<RecordListResponse> {
        self.list_records_with_pagination_impl(query).await
    }

    async fn update_award_record(
        &self,
        id: i64,
        data: UpdateRecordData,
    ) -> Result<Option<RecordDetail>> {
        self.update_award_record_impl(id, data).await
    }

    async fn delete_award_record(&self, id: i64) -> Result<Option<Vec<String>>> {
        self.delete_award_record_impl(id).await
    }

    // 审核模块
    async fn get_review_status(&self, record_id: i64) -> Result<Option<ReviewStatus>> {
        self.get_review_status_impl(record_id).await
    }

    async fn set_review_status(&self, record_id: i64, status: ReviewStatus) -> Result<bool> {
        self.set_review_status_impl(record_id, status).await
    }

    async fn link_competition_record(
        &self,
        record_id: i64,
        competition: &Competition,
    ) -> Result<bool> {
        self.link_competition_record_impl(record_id, competition)
            .await
    }

    // 标准竞赛模块
    async fn create_competition(&self, data: CompetitionRequest) -> Result<Competition> {
        self.create_competition_impl(data).await
    }

    async fn get_competition_by_name(&self, name: &str) -> Result<Option<Competition>> {
        self.get_competition_by_name_impl(name).await
    }

    async fn list_competitions_with_pagination(
        &self,
        query: CompetitionQueryParams,
    ) -> Result<CompetitionListResponse> {
        self.list_competitions_with_pagination_impl(query).await
    }

    async fn update_competition(
        &self,
        name: &str,
        update: CompetitionUpdateRequest,
    ) -> Result<Option<Competition>> {
        self.update_competition_impl(name, update).await
    }

    async fn delete_competition(&self, name: &str) -> Result<bool> {
        self.delete_competition_impl(name).await
    }

    // 评级信息模块
    async fn get_rating_info_by_name(&self, competition_name: &str) -> Result<Option<RatingInfo>> {
        self.get_rating_info_by_name_impl(competition_name).await
    }

    async fn list_rating_infos_with_pagination(
        &self,
        query: CompetitionQueryParams,
    ) -> Result<RatingInfoListResponse> {
        self.list_rating_infos_with_pagination_impl(query).await
    }

    async fn upsert_rating_info(
        &self,
        competition_name: &str,
        category: &str,
        level_title: &str,
        level: i32,
    ) -> Result<bool> {
        self.upsert_rating_info_impl(competition_name, category, level_title, level)
            .await
    }

    async fn delete_rating_info(&self, competition_name: &str) -> Result<bool> {
        self.delete_rating_info_impl(competition_name).await
    }

    // 附件模块
    async fn upsert_image(
        &self,
        record_id: i64,
        category: ImageCategory,
        file: &str,
    ) -> Result<(Image, Option<String>)> {
        self.upsert_image_impl(record_id, category, file).await
    }

    async fn list_images_by_record(&self, record_id: i64) -> Result<Vec<Image>> {
        self.list_images_by_record_impl(record_id).await
    }

    // 账号模块
    async fn create_user(&self, user: CreateUserData) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_and_role(
        &self,
        username: &str,
        role: UserRole,
    ) -> Result<Option<User>> {
        self.get_user_by_username_and_role_impl(username, role)
            .await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(
        &self,
        id: i64,
        password_hash: Option<String>,
        display_name: Option<String>,
    ) -> Result<Option<User>> {
        self.update_user_impl(id, password_hash, display_name).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users_by_role(&self, role: UserRole) -> Result<u64> {
        self.count_users_by_role_impl(role).await
    }
}
