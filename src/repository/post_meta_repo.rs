// ==========================================
// 批量内容导入工具 - 内容元数据 Trait
// ==========================================
// 职责: 定义附加元数据（过期时间 / SEO 描述）的写入接口
// 说明: 调用方按“尽力而为”处理返回值，失败不计入导入统计
// ==========================================

use crate::domain::post::PostId;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

/// 过期时间元数据键
pub const EXPIRY_META_KEY: &str = "_post_expiry_date";

/// SEO 描述元数据键
pub const SEO_DESCRIPTION_META_KEY: &str = "_seo_description";

// ==========================================
// MetadataAttacher Trait
// ==========================================
// 实现者: PostMetaRepositoryImpl
#[async_trait]
pub trait MetadataAttacher: Send + Sync {
    /// 设置过期时间
    ///
    /// # 参数
    /// - post_id: 内容记录 ID
    /// - expiry_date: 过期时间（原样保存，约定格式 YYYY-MM-DD HH:MM:SS）
    async fn set_expiry(&self, post_id: PostId, expiry_date: &str) -> RepositoryResult<()>;
}

// ==========================================
// SeoMetadataAttacher Trait
// ==========================================
// 仅当宿主声明具备 SEO 能力时才会被调用
#[async_trait]
pub trait SeoMetadataAttacher: Send + Sync {
    /// 设置 SEO 描述
    async fn set_description(&self, post_id: PostId, description: &str) -> RepositoryResult<()>;
}
