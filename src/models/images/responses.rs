use serde::Serialize;

use super::entities::{Image, ImageCategory};

#[derive(Debug, Serialize)]
pub struct ImageUploadResponse {
    pub award_record: i64,
    pub category: ImageCategory,
    pub file: String,
}

#[derive(Debug, Serialize)]
pub struct ImageListResponse {
    pub images: Vec<Image>,
}
