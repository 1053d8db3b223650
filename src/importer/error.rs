// ==========================================
// 批量内容导入工具 - 导入模块错误类型
// ==========================================
// 分层:
// - 信封错误（无文件/非 JSON/非数组）: 整批终止，不处理任何记录
// - 记录错误（非对象/标题为空/存储拒绝）: 仅该条计为失败
// - 元数据错误: 吞掉，不计数
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 上传内容解码错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("上传文件不是合法的 JSON: {0}")]
    NotJson(String),

    #[error("JSON 顶层不是数组（实际为 {found}）")]
    NotArray { found: &'static str },
}

/// 单条记录校验错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("记录不是对象（实际为 {kind}）")]
    NotAnObject { kind: &'static str },

    #[error("标题为空")]
    EmptyTitle,
}

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 信封错误 =====
    #[error("未上传文件")]
    NoFileSupplied,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    // ===== 记录错误 =====
    #[error("记录 {index} 校验失败: {source}")]
    Validation {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("记录 {index} 创建失败: {source}")]
    StoreCreation {
        index: usize,
        #[source]
        source: RepositoryError,
    },

    // ===== 配置错误 =====
    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

impl ImportError {
    /// 是否为信封级错误（整批未处理）
    pub fn is_envelope_error(&self) -> bool {
        matches!(self, ImportError::NoFileSupplied | ImportError::Decode(_))
    }
}

/// 返回 JSON 值的类型名（用于错误信息）
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
