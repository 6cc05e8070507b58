//! 获奖记录报表导出

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::error;

use crate::models::images::entities::Image;
use crate::models::records::requests::RecordListQuery;
use crate::models::records::responses::RecordDetail;
use crate::models::reviews::entities::ReviewStatus;
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::services::storage_error_response;

use super::RecordService;

// 导出上限，超出时提示先用过滤条件收窄
const EXPORT_MAX_ROWS: i64 = 10000;

pub async fn handle_export_records(
    service: &RecordService,
    query: RecordListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 导出不分页，沿用列表的过滤条件
    let export_query = RecordListQuery {
        pagination: PaginationQuery {
            page: 1,
            size: EXPORT_MAX_ROWS,
        },
        ..query
    };

    let response = match storage.list_records_with_pagination(export_query).await {
        Ok(resp) => resp,
        Err(e) => return Ok(storage_error_response(&e, "查询获奖记录失败")),
    };

    if response.pagination.total > EXPORT_MAX_ROWS {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("记录数超过导出上限 {EXPORT_MAX_ROWS}，请先用过滤条件收窄范围"),
        )));
    }

    match generate_xlsx(&response.records) {
        Ok(buffer) => {
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let filename = format!("award_records_{timestamp}.xlsx");

            Ok(HttpResponse::Ok()
                .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            error!("生成 XLSX 失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("生成报表失败: {e}"),
                )),
            )
        }
    }
}

/// 生成 XLSX 文件
fn generate_xlsx(records: &[RecordDetail]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new().set_bold();
    let title_format = Format::new().set_bold().set_font_size(14);

    // Sheet 1: 概览
    let sheet1 = workbook
        .add_worksheet()
        .set_name("概览")
        .map_err(|e| e.to_string())?;
    write_overview_sheet(sheet1, &header_format, &title_format, records)?;

    // Sheet 2: 记录明细
    let sheet2 = workbook
        .add_worksheet()
        .set_name("获奖记录")
        .map_err(|e| e.to_string())?;
    write_records_sheet(sheet2, &header_format, records)?;

    workbook.save_to_buffer().map_err(|e| e.to_string())
}

fn write_overview_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    title_format: &Format,
    records: &[RecordDetail],
) -> Result<(), String> {
    sheet
        .write_string_with_format(0, 0, "获奖记录报表", title_format)
        .map_err(|e| e.to_string())?;

    sheet
        .write_string_with_format(2, 0, "项目", header_format)
        .map_err(|e| e.to_string())?;
    sheet
        .write_string_with_format(2, 1, "数值", header_format)
        .map_err(|e| e.to_string())?;

    let count_by = |status: ReviewStatus| {
        records.iter().filter(|r| r.review_status == status).count() as f64
    };

    let mut row = 3u32;

    sheet.write_string(row, 0, "记录总数").ok();
    sheet.write_number(row, 1, records.len() as f64).ok();
    row += 1;

    sheet.write_string(row, 0, "待审核").ok();
    sheet.write_number(row, 1, count_by(ReviewStatus::Waiting)).ok();
    row += 1;

    sheet.write_string(row, 0, "审核通过").ok();
    sheet.write_number(row, 1, count_by(ReviewStatus::Passed)).ok();
    row += 1;

    sheet.write_string(row, 0, "审核未通过").ok();
    sheet
        .write_number(row, 1, count_by(ReviewStatus::NotPass))
        .ok();

    sheet.set_column_width(0, 20).ok();
    sheet.set_column_width(1, 16).ok();

    Ok(())
}

// 附件在导出包里的文件名：{记录ID}-{类别展示名}{扩展名}，
// 扩展名取自存储文件名
fn bundle_file_name(record_id: i64, image: &Image) -> String {
    let ext = std::path::Path::new(&image.file)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{}-{}{}", record_id, image.category.display_name(), ext)
}

fn attachments_cell(record_id: i64, images: &[Image]) -> String {
    if images.is_empty() {
        return "-".to_string();
    }
    images
        .iter()
        .map(|image| bundle_file_name(record_id, image))
        .collect::<Vec<_>>()
        .join("、")
}

fn write_records_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    records: &[RecordDetail],
) -> Result<(), String> {
    let headers = [
        "ID",
        "作品名",
        "奖项等级",
        "赛事名称",
        "赛事类别",
        "主办方",
        "举办时间",
        "指导教师",
        "参与学生",
        "主力学生",
        "审核状态",
        "标准竞赛",
        "评级类别",
        "评级等级",
        "更新时间",
        "附件",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, header_format)
            .map_err(|e| e.to_string())?;
    }

    for (row, record) in records.iter().enumerate() {
        let row = (row + 1) as u32;

        sheet.write_number(row, 0, record.id as f64).ok();
        sheet
            .write_string(row, 1, record.works_name.as_deref().unwrap_or("-"))
            .ok();
        sheet.write_string(row, 2, &record.award_level).ok();
        sheet.write_string(row, 3, &record.competition_name).ok();
        sheet.write_string(row, 4, &record.competition_category).ok();
        sheet.write_string(row, 5, &record.organizer).ok();
        sheet
            .write_string(row, 6, record.hold_time.to_string())
            .ok();

        // 姓名(工号/学号)，档案已删除时只剩编号
        let teacher_cell = match (&record.teacher_info, &record.teacher) {
            (Some(info), Some(card)) => format!("{}({})", info.name, card),
            (None, Some(card)) => card.clone(),
            _ => "-".to_string(),
        };
        sheet.write_string(row, 7, teacher_cell).ok();

        let students_cell = record
            .students_info
            .iter()
            .map(|s| format!("{}({})", s.name, s.card_id))
            .collect::<Vec<_>>()
            .join("、");
        sheet.write_string(row, 8, students_cell).ok();

        let main_cell = match (&record.main_student_info, &record.main_student) {
            (Some(info), Some(card)) => format!("{}({})", info.name, card),
            (None, Some(card)) => card.clone(),
            _ => "-".to_string(),
        };
        sheet.write_string(row, 9, main_cell).ok();

        sheet
            .write_string(row, 10, record.review_status.to_string())
            .ok();
        sheet
            .write_string(row, 11, record.competition.as_deref().unwrap_or("-"))
            .ok();
        sheet
            .write_string(row, 12, record.rating_category.as_deref().unwrap_or("-"))
            .ok();
        match (&record.rating_level_title, record.rating_level) {
            (Some(title), Some(level)) => {
                sheet.write_string(row, 13, format!("{title}({level})")).ok();
            }
            _ => {
                sheet.write_string(row, 13, "-").ok();
            }
        }

        let update_time = chrono::DateTime::from_timestamp(record.update_time, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| record.update_time.to_string());
        sheet.write_string(row, 14, update_time).ok();
        sheet
            .write_string(row, 15, attachments_cell(record.id, &record.images))
            .ok();
    }

    sheet.set_column_width(1, 24).ok();
    sheet.set_column_width(3, 30).ok();
    sheet.set_column_width(5, 24).ok();
    sheet.set_column_width(7, 16).ok();
    sheet.set_column_width(8, 30).ok();
    sheet.set_column_width(9, 16).ok();
    sheet.set_column_width(14, 20).ok();
    sheet.set_column_width(15, 36).ok();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{attachments_cell, bundle_file_name};
    use crate::models::images::entities::{Image, ImageCategory};

    fn image(record_id: i64, category: ImageCategory, file: &str) -> Image {
        Image {
            id: 1,
            award_record_id: record_id,
            category,
            file: file.to_string(),
        }
    }

    #[test]
    fn bundle_name_keeps_stored_extension() {
        let img = image(12, ImageCategory::Award, "12-AWARD-9f3a.png");
        assert_eq!(bundle_file_name(12, &img), "12-Award.png");
    }

    #[test]
    fn bundle_name_without_extension() {
        let img = image(7, ImageCategory::Notice, "7-NOTICE-9f3a");
        assert_eq!(bundle_file_name(7, &img), "7-Notice");
    }

    #[test]
    fn attachments_cell_joins_and_defaults() {
        assert_eq!(attachments_cell(3, &[]), "-");

        let images = vec![
            image(3, ImageCategory::Award, "3-AWARD-a.png"),
            image(3, ImageCategory::List, "3-LIST-b.jpg"),
        ];
        assert_eq!(attachments_cell(3, &images), "3-Award.png、3-List.jpg");
    }
}
