// ==========================================
// 批量内容导入工具 - API 层
// ==========================================
// 职责: 面向宿主的入口，封装导入流程与状态展示
// ==========================================

pub mod error;
pub mod import_api;

pub use error::ApiError;
pub use import_api::{ImportApi, ImportScreen};
