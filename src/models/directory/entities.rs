use serde::{Deserialize, Serialize};

// 学院
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct College {
    #[serde(skip_serializing)]
    pub id: i64,
    pub name: String,
}

// 专业（带所属学院名称，读取时由存储层联表解析）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    #[serde(skip_serializing)]
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub college_id: i64,
    #[serde(rename = "college")]
    pub college_name: String,
}

// 班级视图：(年级, 班号, 专业) 三元组唯一
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub grade: i32,
    pub number: i32,
    #[serde(skip_serializing)]
    pub subject_id: i64,
    #[serde(rename = "subject")]
    pub subject_name: String,
    #[serde(rename = "college")]
    pub college_name: String,
}

// 学生视图：班级/专业/学院信息由显式投影组装，而非关系惰性遍历
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    #[serde(skip_serializing)]
    pub id: i64,
    pub card_id: String,
    pub name: String,
    pub clazz: Option<i64>,
    pub clazz_grade: Option<i32>,
    pub clazz_number: Option<i32>,
    pub subject: Option<String>,
    pub college: Option<String>,
}

// 教师
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub card_id: String,
    pub name: String,
}
