// ==========================================
// 批量内容导入工具 - 导入层
// ==========================================
// 职责: 上传 JSON → 内容记录
// 容错: 单条记录失败不影响其余记录
// ==========================================

// 模块声明
pub mod error;
pub mod payload_decoder;
pub mod post_importer_impl;
pub mod post_importer_trait;
pub mod record_normalizer;

// 重导出核心类型
pub use error::{DecodeError, ImportError, ValidationError};
pub use payload_decoder::decode_batch;
pub use post_importer_impl::PostImporterImpl;
pub use post_importer_trait::PostImporter;
pub use record_normalizer::normalize_record;
