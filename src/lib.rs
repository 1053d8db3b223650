// ==========================================
// 批量内容导入工具 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 上传 JSON 数组 → 批量创建内容记录（附过期时间/摘要描述元数据）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 内容存储 / 元数据
pub mod repository;

// 导入层 - 解码 / 规范化 / 逐条导入
pub mod importer;

// 配置层 - 导入策略
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 宿主入口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    ImportNotice, ImportRecord, ImportResult, NewPost, Post, PostId, PostStatus, UploadPayload,
    UploadRequest,
};

// 导入
pub use importer::{decode_batch, normalize_record, PostImporter, PostImporterImpl};

// 配置
pub use config::{ConfigManager, ImportPolicy, PolicyOverrides};

// API
pub use api::{ApiError, ImportApi, ImportScreen};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "批量内容导入工具";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
