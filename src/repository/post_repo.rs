// ==========================================
// 批量内容导入工具 - 内容存储 Trait
// ==========================================
// 职责: 定义内容记录的创建/查询接口（不包含业务逻辑）
// 红线: 每次调用独立，不跨记录开启事务
// ==========================================

use crate::domain::post::{NewPost, Post, PostId};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ContentStore Trait
// ==========================================
// 用途: 导入器创建内容记录
// 实现者: PostRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// 创建一条内容记录
    ///
    /// # 参数
    /// - post: 待创建内容（post_type 为空串时由存储自身的默认规则决定）
    ///
    /// # 返回
    /// - Ok(PostId): 存储分配的记录 ID
    /// - Err: 存储拒绝创建（仅影响该条记录）
    async fn create_post(&self, post: NewPost) -> RepositoryResult<PostId>;

    /// 按 ID 查询内容记录
    async fn find_post(&self, post_id: PostId) -> RepositoryResult<Option<Post>>;

    /// 查询最近创建的内容记录（按 ID 倒序）
    async fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<Post>>;
}
