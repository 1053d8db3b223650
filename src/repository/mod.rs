// ==========================================
// 批量内容导入工具 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供内容存储 / 元数据写入接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod post_meta_repo;
pub mod post_meta_repo_impl;
pub mod post_repo;
pub mod post_repo_impl;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use post_meta_repo::{
    MetadataAttacher, SeoMetadataAttacher, EXPIRY_META_KEY, SEO_DESCRIPTION_META_KEY,
};
pub use post_meta_repo_impl::PostMetaRepositoryImpl;
pub use post_repo::ContentStore;
pub use post_repo_impl::PostRepositoryImpl;
