// ==========================================
// 批量内容导入工具 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入/仓储错误为操作员可读的错误消息
// ==========================================

use crate::importer::error::{DecodeError, ImportError};
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 上传错误（整批未处理）
    // ==========================================
    #[error("未上传文件")]
    NoFileSupplied,

    #[error("上传内容无效: {0}")]
    InvalidPayload(DecodeError),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 是否为上传信封错误（对应 no-file-supplied / invalid-json 通知）
    pub fn is_upload_error(&self) -> bool {
        matches!(self, ApiError::NoFileSupplied | ApiError::InvalidPayload(_))
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::LockError(msg) => ApiError::LockError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("{}: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::NoFileSupplied => ApiError::NoFileSupplied,
            ImportError::Decode(e) => ApiError::InvalidPayload(e),
            e @ (ImportError::ConfigReadError { .. } | ImportError::ConfigValueError { .. }) => {
                ApiError::ConfigError(e.to_string())
            }
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_errors_stay_distinguishable() {
        let err: ApiError = ImportError::NoFileSupplied.into();
        assert!(matches!(err, ApiError::NoFileSupplied));

        let err: ApiError = ImportError::Decode(DecodeError::NotArray { found: "object" }).into();
        assert!(matches!(
            err,
            ApiError::InvalidPayload(DecodeError::NotArray { found: "object" })
        ));
        assert!(err.is_upload_error());
    }

    #[test]
    fn test_config_errors_map_to_config_error() {
        let err: ApiError = ImportError::ConfigValueError {
            key: "import.default_post_status".to_string(),
            value: "archived".to_string(),
            message: "未知状态".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::ConfigError(_)));
        assert!(!err.is_upload_error());
    }

    #[test]
    fn test_repository_errors() {
        let err: ApiError = RepositoryError::UniqueConstraintViolation("dup".to_string()).into();
        assert!(matches!(err, ApiError::DatabaseError(_)));

        let err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(err, ApiError::LockError(_)));
    }
}
