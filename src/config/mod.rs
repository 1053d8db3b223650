// ==========================================
// 批量内容导入工具 - 配置层
// ==========================================
// 职责: 导入策略配置（发布状态 / 默认内容类型 / SEO 能力）
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use import_config_trait::{
    ImportConfigReader, ImportPolicy, PolicyOverrides, DEFAULT_POST_STATUS, DEFAULT_POST_TYPE,
};
