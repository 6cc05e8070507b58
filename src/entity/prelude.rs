//! 预导入模块，方便使用

pub use super::award_record_students::{
    ActiveModel as AwardRecordStudentActiveModel, Entity as AwardRecordStudents,
    Model as AwardRecordStudentModel,
};
pub use super::award_records::{
    ActiveModel as AwardRecordActiveModel, Entity as AwardRecords, Model as AwardRecordModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::colleges::{
    ActiveModel as CollegeActiveModel, Entity as Colleges, Model as CollegeModel,
};
pub use super::competition_records::{
    ActiveModel as CompetitionRecordActiveModel, Entity as CompetitionRecords,
    Model as CompetitionRecordModel,
};
pub use super::competitions::{
    ActiveModel as CompetitionActiveModel, Entity as Competitions, Model as CompetitionModel,
};
pub use super::images::{ActiveModel as ImageActiveModel, Entity as Images, Model as ImageModel};
pub use super::rating_infos::{
    ActiveModel as RatingInfoActiveModel, Entity as RatingInfos, Model as RatingInfoModel,
};
pub use super::reviews::{
    ActiveModel as ReviewActiveModel, Entity as Reviews, Model as ReviewModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
