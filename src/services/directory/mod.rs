pub mod batch;
pub mod classes;
pub mod colleges;
pub mod students;
pub mod subjects;
pub mod teachers;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::directory::requests::{
    ClassBatchRow, ClassQueryParams, ClassRequest, CollegeRequest, DirectoryQueryParams,
    StudentBatchRow, StudentQueryParams, StudentRequest, StudentUpdateRequest, SubjectRequest,
    TeacherRequest, TeacherUpdateRequest,
};
use crate::storage::Storage;

/// 组织目录服务：学院 / 专业 / 班级 / 学生 / 教师。
///
/// 学院、专业、教师、学生均以自然键（名称或学号/工号）寻址，
/// 班级以数据库 ID 寻址（(年级, 班号, 专业) 三元组不便入路径）。
pub struct DirectoryService {
    storage: Option<Arc<dyn Storage>>,
}

impl DirectoryService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // ---- 学院 ----

    pub async fn list_colleges(
        &self,
        query: DirectoryQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        colleges::handle_list_colleges(self, query, request).await
    }

    pub async fn create_college(
        &self,
        college: CollegeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        colleges::handle_create_college(self, college, request).await
    }

    pub async fn update_college(
        &self,
        name: String,
        college: CollegeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        colleges::handle_update_college(self, name, college, request).await
    }

    pub async fn delete_college(
        &self,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        colleges::handle_delete_college(self, name, request).await
    }

    // ---- 专业 ----

    pub async fn batch_colleges(
        &self,
        rows: Vec<CollegeRequest>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        batch::handle_batch_colleges(self, rows, request).await
    }

    pub async fn list_subjects(
        &self,
        query: DirectoryQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::handle_list_subjects(self, query, request).await
    }

    pub async fn batch_subjects(
        &self,
        rows: Vec<SubjectRequest>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        batch::handle_batch_subjects(self, rows, request).await
    }

    pub async fn create_subject(
        &self,
        subject: SubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::handle_create_subject(self, subject, request).await
    }

    pub async fn update_subject(
        &self,
        name: String,
        subject: SubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::handle_update_subject(self, name, subject, request).await
    }

    pub async fn delete_subject(
        &self,
        name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::handle_delete_subject(self, name, request).await
    }

    // ---- 班级 ----

    pub async fn list_classes(
        &self,
        query: ClassQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        classes::handle_list_classes(self, query, request).await
    }

    pub async fn create_class(
        &self,
        class: ClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        classes::handle_create_class(self, class, request).await
    }

    pub async fn update_class(
        &self,
        class_id: i64,
        class: ClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        classes::handle_update_class(self, class_id, class, request).await
    }

    pub async fn delete_class(
        &self,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        classes::handle_delete_class(self, class_id, request).await
    }

    pub async fn batch_classes(
        &self,
        rows: Vec<ClassBatchRow>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        batch::handle_batch_classes(self, rows, request).await
    }

    // ---- 学生 ----

    pub async fn list_students(
        &self,
        query: StudentQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::handle_list_students(self, query, request).await
    }

    pub async fn create_student(
        &self,
        student: StudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::handle_create_student(self, student, request).await
    }

    pub async fn update_student(
        &self,
        card_id: String,
        student: StudentUpdateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::handle_update_student(self, card_id, student, request).await
    }

    pub async fn delete_student(
        &self,
        card_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::handle_delete_student(self, card_id, request).await
    }

    pub async fn batch_students(
        &self,
        rows: Vec<StudentBatchRow>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        batch::handle_batch_students(self, rows, request).await
    }

    // ---- 教师 ----

    pub async fn list_teachers(
        &self,
        query: DirectoryQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::handle_list_teachers(self, query, request).await
    }

    pub async fn create_teacher(
        &self,
        teacher: TeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::handle_create_teacher(self, teacher, request).await
    }

    pub async fn update_teacher(
        &self,
        card_id: String,
        teacher: TeacherUpdateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::handle_update_teacher(self, card_id, teacher, request).await
    }

    pub async fn delete_teacher(
        &self,
        card_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::handle_delete_teacher(self, card_id, request).await
    }

    pub async fn batch_teachers(
        &self,
        rows: Vec<TeacherRequest>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        batch::handle_batch_teachers(self, rows, request).await
    }
}
