// ==========================================
// 批量内容导入工具 - 记录规范化
// ==========================================
// 阶段 1: JSON 元素 → ImportRecord
// 规则:
// - 仅 title 必填（TRIM 后非空）
// - 文本字段标量转换: string 原样 / number 十进制 / true → "1" / 其余 → ""
// - post_type、expiry_date TRIM；expiry_date 为空视为未提供，不校验格式
// - content、excerpt 原样保留
// ==========================================

use crate::domain::post::ImportRecord;
use crate::importer::error::{json_kind, ValidationError};
use serde_json::{Map, Value};

/// 记录字段名
pub mod fields {
    pub const TITLE: &str = "title";
    pub const CONTENT: &str = "content";
    pub const EXCERPT: &str = "excerpt";
    pub const POST_TYPE: &str = "post_type";
    pub const EXPIRY_DATE: &str = "expiry_date";
}

/// 规范化单条记录（纯函数，无副作用）
pub fn normalize_record(item: &Value) -> Result<ImportRecord, ValidationError> {
    let object = item.as_object().ok_or(ValidationError::NotAnObject {
        kind: json_kind(item),
    })?;

    let title = field_text(object, fields::TITLE).trim().to_string();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    let expiry_date = field_text(object, fields::EXPIRY_DATE).trim().to_string();

    Ok(ImportRecord {
        title,
        content: field_text(object, fields::CONTENT),
        excerpt: field_text(object, fields::EXCERPT),
        post_type: field_text(object, fields::POST_TYPE).trim().to_string(),
        expiry_date: (!expiry_date.is_empty()).then_some(expiry_date),
    })
}

fn field_text(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "1".to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_full_record() {
        let record = normalize_record(&json!({
            "title": "  T  ",
            "content": " C ",
            "excerpt": "E",
            "post_type": " page ",
            "expiry_date": "2028-12-24 16:00:00"
        }))
        .unwrap();

        assert_eq!(record.title, "T");
        assert_eq!(record.content, " C ");
        assert_eq!(record.excerpt, "E");
        assert_eq!(record.post_type, "page");
        assert_eq!(record.expiry_date.as_deref(), Some("2028-12-24 16:00:00"));
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let record = normalize_record(&json!({"title": "X"})).unwrap();
        assert_eq!(record.content, "");
        assert_eq!(record.excerpt, "");
        assert_eq!(record.post_type, "");
        assert_eq!(record.expiry_date, None);
    }

    #[test]
    fn test_missing_or_blank_title_is_rejected() {
        assert_eq!(
            normalize_record(&json!({"content": "no title"})),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            normalize_record(&json!({"title": " \t\n "})),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            normalize_record(&json!({"title": null})),
            Err(ValidationError::EmptyTitle)
        );
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert_eq!(
            normalize_record(&json!(["title", "X"])),
            Err(ValidationError::NotAnObject { kind: "array" })
        );
        assert_eq!(
            normalize_record(&json!("X")),
            Err(ValidationError::NotAnObject { kind: "string" })
        );
    }

    #[test]
    fn test_scalar_titles_are_coerced() {
        assert_eq!(normalize_record(&json!({"title": 2024})).unwrap().title, "2024");
        assert_eq!(normalize_record(&json!({"title": true})).unwrap().title, "1");
        assert!(normalize_record(&json!({"title": false})).is_err());
        assert!(normalize_record(&json!({"title": {"text": "X"}})).is_err());
    }

    #[test]
    fn test_expiry_date_is_passed_through_unvalidated() {
        let record = normalize_record(&json!({"title": "X", "expiry_date": "next tuesday"})).unwrap();
        assert_eq!(record.expiry_date.as_deref(), Some("next tuesday"));

        let record = normalize_record(&json!({"title": "X", "expiry_date": "   "})).unwrap();
        assert_eq!(record.expiry_date, None);
    }
}
