// ==========================================
// 批量内容导入工具 - 内容元数据实现
// ==========================================
// 职责: 实现 MetadataAttacher / SeoMetadataAttacher（写入 post_meta 表）
// ==========================================

use crate::domain::post::PostId;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::post_meta_repo::{
    MetadataAttacher, SeoMetadataAttacher, EXPIRY_META_KEY, SEO_DESCRIPTION_META_KEY,
};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// PostMetaRepositoryImpl
// ==========================================
pub struct PostMetaRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl PostMetaRepositoryImpl {
    /// 从已有连接创建
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入元数据（同键覆盖）
    pub fn upsert_meta(&self, post_id: PostId, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO post_meta (post_id, meta_key, meta_value) VALUES (?1, ?2, ?3)
            ON CONFLICT(post_id, meta_key) DO UPDATE SET meta_value = excluded.meta_value
            "#,
            params![post_id, key, value],
        )?;
        Ok(())
    }

    /// 读取元数据
    pub fn get_meta(&self, post_id: PostId, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT meta_value FROM post_meta WHERE post_id = ?1 AND meta_key = ?2",
                params![post_id, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }
}

#[async_trait]
impl MetadataAttacher for PostMetaRepositoryImpl {
    async fn set_expiry(&self, post_id: PostId, expiry_date: &str) -> RepositoryResult<()> {
        self.upsert_meta(post_id, EXPIRY_META_KEY, expiry_date)
    }
}

#[async_trait]
impl SeoMetadataAttacher for PostMetaRepositoryImpl {
    async fn set_description(&self, post_id: PostId, description: &str) -> RepositoryResult<()> {
        self.upsert_meta(post_id, SEO_DESCRIPTION_META_KEY, description)
    }
}
