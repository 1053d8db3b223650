// ==========================================
// 批量内容导入工具 - 内容存储实现
// ==========================================
// 职责: 实现 ContentStore（使用 rusqlite）
// 红线: Repository 不含导入规则，只做数据 CRUD
// ==========================================

use crate::domain::post::{NewPost, Post, PostId};
use crate::domain::types::PostStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::post_repo::ContentStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// post_type 为空时存储使用的默认类型
pub const DEFAULT_STORE_POST_TYPE: &str = "post";

/// 默认已注册的内容类型
pub const DEFAULT_REGISTERED_POST_TYPES: &[&str] = &["post", "page"];

/// post_type 最大长度
pub const MAX_POST_TYPE_LEN: usize = 20;

const POST_COLUMNS: &str =
    "post_id, title, content, excerpt, post_type, post_status, created_at";

// ==========================================
// PostRepositoryImpl
// ==========================================
pub struct PostRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
    registered_post_types: Vec<String>,
}

impl PostRepositoryImpl {
    /// 从已有连接创建（与 ConfigManager / PostMetaRepositoryImpl 共享）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            conn,
            registered_post_types: DEFAULT_REGISTERED_POST_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    /// 覆盖已注册的内容类型
    pub fn with_registered_post_types<I, S>(mut self, post_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registered_post_types = post_types.into_iter().map(Into::into).collect();
        self
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 解析内容类型（空串 → 存储默认类型；未注册 → 拒绝）
    fn resolve_post_type(&self, raw: &str) -> RepositoryResult<String> {
        let post_type = raw.trim();
        if post_type.is_empty() {
            return Ok(DEFAULT_STORE_POST_TYPE.to_string());
        }

        if post_type.chars().count() > MAX_POST_TYPE_LEN {
            return Err(RepositoryError::FieldValueError {
                field: "post_type".to_string(),
                message: format!("长度超过 {} 个字符", MAX_POST_TYPE_LEN),
            });
        }

        if !self.registered_post_types.iter().any(|t| t == post_type) {
            return Err(RepositoryError::BusinessRuleViolation(format!(
                "未注册的内容类型: {}",
                post_type
            )));
        }

        Ok(post_type.to_string())
    }

    fn map_post_row(row: &Row<'_>) -> rusqlite::Result<Post> {
        let status_raw: String = row.get(5)?;
        let status = status_raw
            .parse::<PostStatus>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
        let created_at: DateTime<Utc> = row.get(6)?;

        Ok(Post {
            post_id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            excerpt: row.get(3)?,
            post_type: row.get(4)?,
            status,
            created_at,
        })
    }
}

#[async_trait]
impl ContentStore for PostRepositoryImpl {
    async fn create_post(&self, post: NewPost) -> RepositoryResult<PostId> {
        if post.title.trim().is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: "title".to_string(),
                message: "标题不能为空".to_string(),
            });
        }
        let post_type = self.resolve_post_type(&post.post_type)?;

        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO posts (title, content, excerpt, post_type, post_status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                post.title,
                post.content,
                post.excerpt,
                post_type,
                post.status.as_str(),
                Utc::now(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    async fn find_post(&self, post_id: PostId) -> RepositoryResult<Option<Post>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM posts WHERE post_id = ?1", POST_COLUMNS);
        let post = conn
            .query_row(&sql, params![post_id], Self::map_post_row)
            .optional()?;
        Ok(post)
    }

    async fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<Post>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM posts ORDER BY post_id DESC LIMIT ?1",
            POST_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit as i64], Self::map_post_row)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};

    fn memory_repo() -> PostRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        PostRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)))
    }

    fn new_post(title: &str, post_type: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "<p>正文</p>".to_string(),
            post_type: post_type.to_string(),
            status: PostStatus::Draft,
            excerpt: "摘要".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_post() {
        let repo = memory_repo();
        let id = repo.create_post(new_post("第一篇", "page")).await.unwrap();

        let post = repo.find_post(id).await.unwrap().unwrap();
        assert_eq!(post.title, "第一篇");
        assert_eq!(post.post_type, "page");
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.excerpt, "摘要");
    }

    #[tokio::test]
    async fn test_empty_post_type_uses_store_default() {
        let repo = memory_repo();
        let id = repo.create_post(new_post("无类型", "")).await.unwrap();

        let post = repo.find_post(id).await.unwrap().unwrap();
        assert_eq!(post.post_type, DEFAULT_STORE_POST_TYPE);
    }

    #[tokio::test]
    async fn test_unregistered_post_type_is_rejected() {
        let repo = memory_repo();
        let result = repo.create_post(new_post("产品", "product")).await;
        assert!(matches!(
            result,
            Err(RepositoryError::BusinessRuleViolation(_))
        ));

        let repo = memory_repo().with_registered_post_types(["post", "product"]);
        assert!(repo.create_post(new_post("产品", "product")).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_recent_orders_newest_first() {
        let repo = memory_repo();
        let first = repo.create_post(new_post("A", "post")).await.unwrap();
        let second = repo.create_post(new_post("B", "post")).await.unwrap();

        let posts = repo.list_recent(10).await.unwrap();
        let ids: Vec<PostId> = posts.iter().map(|p| p.post_id).collect();
        assert_eq!(ids, vec![second, first]);

        assert_eq!(repo.list_recent(1).await.unwrap().len(), 1);
        assert!(repo.find_post(9999).await.unwrap().is_none());
    }
}
