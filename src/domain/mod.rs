// ==========================================
// 批量内容导入工具 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod import;
pub mod post;
pub mod types;

// 重导出核心类型
pub use import::{ImportNotice, ImportResult, RecordFailure, UploadPayload, UploadRequest};
pub use post::{ImportRecord, NewPost, Post, PostId};
pub use types::{PostStatus, UnknownPostStatus};
