//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod award_record_students;
pub mod award_records;
pub mod classes;
pub mod colleges;
pub mod competition_records;
pub mod competitions;
pub mod images;
pub mod rating_infos;
pub mod reviews;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;
