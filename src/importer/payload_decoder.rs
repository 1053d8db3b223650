// ==========================================
// 批量内容导入工具 - 上传内容解码
// ==========================================
// 阶段 0: 原始字节 → JSON 数组
// 约束: 信封校验一次完成，失败时不处理任何记录
// ==========================================

use crate::importer::error::{json_kind, DecodeError};
use serde_json::Value;

/// 解码上传内容
///
/// # 参数
/// - raw: 上传文件原始字节（UTF-8 JSON）
///
/// # 返回
/// - Ok(Vec<Value>): 顶层数组的元素（保持原顺序，元素类型不做校验）
/// - Err(DecodeError::NotJson): 无法解析为 JSON
/// - Err(DecodeError::NotArray): 顶层不是数组
pub fn decode_batch(raw: &[u8]) -> Result<Vec<Value>, DecodeError> {
    let value: Value =
        serde_json::from_slice(raw).map_err(|e| DecodeError::NotJson(e.to_string()))?;

    match value {
        Value::Array(items) => Ok(items),
        other => Err(DecodeError::NotArray {
            found: json_kind(&other),
        }),
    }
}
