// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、内存版内容存储 / 元数据写入
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use post_importer::db::open_and_init;
use post_importer::domain::{NewPost, Post, PostId};
use post_importer::repository::{
    ContentStore, MetadataAttacher, RepositoryError, RepositoryResult, SeoMetadataAttacher,
};
use rusqlite::Connection;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_and_init(&db_path)?;
    drop(conn);

    Ok((temp_file, db_path))
}

/// 创建共享连接（已建表）
pub fn create_shared_conn() -> Result<(NamedTempFile, Arc<Mutex<Connection>>), Box<dyn Error>> {
    let (temp_file, db_path) = create_test_db()?;
    let conn = open_and_init(&db_path)?;
    Ok((temp_file, Arc::new(Mutex::new(conn))))
}

// ==========================================
// RecordingStore - 记录所有创建请求
// ==========================================
#[derive(Default)]
pub struct RecordingStore {
    pub created: Mutex<Vec<NewPost>>,
    pub calls: AtomicUsize,
    pub reject_titles: Vec<String>,
}

impl RecordingStore {
    pub fn rejecting(titles: &[&str]) -> Self {
        Self {
            reject_titles: titles.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn created_posts(&self) -> Vec<NewPost> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentStore for RecordingStore {
    async fn create_post(&self, post: NewPost) -> RepositoryResult<PostId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_titles.contains(&post.title) {
            return Err(RepositoryError::BusinessRuleViolation(format!(
                "存储拒绝: {}",
                post.title
            )));
        }
        let mut created = self.created.lock().unwrap();
        created.push(post);
        Ok(created.len() as PostId)
    }

    async fn find_post(&self, post_id: PostId) -> RepositoryResult<Option<Post>> {
        let created = self.created.lock().unwrap();
        let index = (post_id - 1) as usize;
        Ok(created.get(index).map(|p| Post {
            post_id,
            title: p.title.clone(),
            content: p.content.clone(),
            excerpt: p.excerpt.clone(),
            post_type: p.post_type.clone(),
            status: p.status,
            created_at: Utc::now(),
        }))
    }

    async fn list_recent(&self, _limit: usize) -> RepositoryResult<Vec<Post>> {
        Ok(Vec::new())
    }
}

/// 与测试共享记录的存储句柄
#[derive(Clone, Default)]
pub struct SharedStore(pub Arc<RecordingStore>);

#[async_trait]
impl ContentStore for SharedStore {
    async fn create_post(&self, post: NewPost) -> RepositoryResult<PostId> {
        self.0.create_post(post).await
    }

    async fn find_post(&self, post_id: PostId) -> RepositoryResult<Option<Post>> {
        self.0.find_post(post_id).await
    }

    async fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<Post>> {
        self.0.list_recent(limit).await
    }
}

// ==========================================
// RecordingMeta - 记录元数据写入，可配置为失败
// ==========================================
#[derive(Clone, Default)]
pub struct RecordingMeta {
    pub expiries: Arc<Mutex<Vec<(PostId, String)>>>,
    pub descriptions: Arc<Mutex<Vec<(PostId, String)>>>,
    pub fail: bool,
}

impl RecordingMeta {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn expiry_writes(&self) -> Vec<(PostId, String)> {
        self.expiries.lock().unwrap().clone()
    }

    pub fn description_writes(&self) -> Vec<(PostId, String)> {
        self.descriptions.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataAttacher for RecordingMeta {
    async fn set_expiry(&self, post_id: PostId, expiry_date: &str) -> RepositoryResult<()> {
        if self.fail {
            return Err(RepositoryError::InternalError("元数据写入失败".to_string()));
        }
        self.expiries
            .lock()
            .unwrap()
            .push((post_id, expiry_date.to_string()));
        Ok(())
    }
}

#[async_trait]
impl SeoMetadataAttacher for RecordingMeta {
    async fn set_description(&self, post_id: PostId, description: &str) -> RepositoryResult<()> {
        if self.fail {
            return Err(RepositoryError::InternalError("SEO 写入失败".to_string()));
        }
        self.descriptions
            .lock()
            .unwrap()
            .push((post_id, description.to_string()));
        Ok(())
    }
}
