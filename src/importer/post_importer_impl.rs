// ==========================================
// 批量内容导入工具 - 内容导入器实现
// ==========================================
// 职责: 整合导入流程，从 JSON 数组到内容存储
// 流程: 解码 → 规范化 → 创建 → 附加元数据 → 计数
// ==========================================

use crate::config::ImportPolicy;
use crate::domain::import::ImportResult;
use crate::domain::post::{ImportRecord, NewPost, PostId};
use crate::importer::error::ImportError;
use crate::importer::payload_decoder::decode_batch;
use crate::importer::post_importer_trait::PostImporter;
use crate::importer::record_normalizer::normalize_record;
use crate::repository::{ContentStore, MetadataAttacher, SeoMetadataAttacher};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// PostImporterImpl - 内容导入器实现
// ==========================================
pub struct PostImporterImpl<S, M>
where
    S: ContentStore,
    M: MetadataAttacher,
{
    // 内容存储
    store: S,

    // 过期时间写入
    metadata: M,

    // SEO 描述写入（宿主不具备能力时为 None）
    seo: Option<Box<dyn SeoMetadataAttacher>>,

    // 批次策略（构造时确定，整批不变）
    policy: ImportPolicy,
}

impl<S, M> PostImporterImpl<S, M>
where
    S: ContentStore,
    M: MetadataAttacher,
{
    /// 创建新的 PostImporter 实例
    ///
    /// # 参数
    /// - store: 内容存储
    /// - metadata: 过期时间写入
    /// - policy: 批次策略
    pub fn new(store: S, metadata: M, policy: ImportPolicy) -> Self {
        Self {
            store,
            metadata,
            seo: None,
            policy,
        }
    }

    /// 挂载 SEO 描述写入
    pub fn with_seo_attacher(mut self, seo: Box<dyn SeoMetadataAttacher>) -> Self {
        self.seo = Some(seo);
        self
    }

    pub fn policy(&self) -> &ImportPolicy {
        &self.policy
    }

    fn build_new_post(&self, record: &ImportRecord) -> NewPost {
        NewPost {
            title: record.title.clone(),
            content: record.content.clone(),
            post_type: self.policy.resolve_post_type(&record.post_type).to_string(),
            status: self.policy.post_status,
            excerpt: record.excerpt.clone(),
        }
    }

    /// 导入单条记录（失败仅影响该条）
    async fn ingest_record(&self, index: usize, item: &Value) -> Result<PostId, ImportError> {
        let record =
            normalize_record(item).map_err(|source| ImportError::Validation { index, source })?;

        let post_id = self
            .store
            .create_post(self.build_new_post(&record))
            .await
            .map_err(|source| ImportError::StoreCreation { index, source })?;
        debug!(index = index, post_id = post_id, "内容记录已创建");

        self.attach_metadata(post_id, &record).await;
        Ok(post_id)
    }

    /// 附加元数据
    ///
    /// 尽力而为：返回值只记日志，不改变 created/failed
    async fn attach_metadata(&self, post_id: PostId, record: &ImportRecord) {
        if let Some(expiry_date) = &record.expiry_date {
            if let Err(e) = self.metadata.set_expiry(post_id, expiry_date).await {
                warn!(post_id = post_id, error = %e, "过期时间写入失败（已忽略）");
            }
        }

        if !self.policy.seo_description_enabled || record.excerpt.trim().is_empty() {
            return;
        }
        if let Some(seo) = &self.seo {
            if let Err(e) = seo.set_description(post_id, &record.excerpt).await {
                warn!(post_id = post_id, error = %e, "SEO 描述写入失败（已忽略）");
            }
        }
    }
}

#[async_trait::async_trait]
impl<S, M> PostImporter for PostImporterImpl<S, M>
where
    S: ContentStore,
    M: MetadataAttacher,
{
    #[instrument(skip(self, items), fields(batch_id = tracing::field::Empty, total = items.len()))]
    async fn ingest_batch(&self, items: Vec<Value>) -> ImportResult {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(
            batch_id = %batch_id,
            total = items.len(),
            post_status = %self.policy.post_status,
            default_post_type = %self.policy.default_post_type,
            "开始导入内容记录"
        );

        let mut result = ImportResult::new(batch_id);
        for (index, item) in items.iter().enumerate() {
            match self.ingest_record(index, item).await {
                Ok(post_id) => result.record_created(post_id),
                Err(e) => {
                    warn!(index = index, error = %e, "记录导入失败");
                    result.record_failed(index, e.to_string());
                }
            }
        }

        result.elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            batch_id = %result.batch_id,
            created = result.created,
            failed = result.failed,
            elapsed_ms = result.elapsed_ms,
            "内容导入完成"
        );
        result
    }

    async fn import_bytes(&self, raw: &[u8]) -> Result<ImportResult, ImportError> {
        let items = decode_batch(raw).map_err(|e| {
            warn!(error = %e, bytes = raw.len(), "上传内容解码失败");
            e
        })?;
        Ok(self.ingest_batch(items).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::Post;
    use crate::domain::types::PostStatus;
    use crate::repository::{RepositoryError, RepositoryResult};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        created: Mutex<Vec<NewPost>>,
        reject_titles: Vec<String>,
    }

    #[async_trait]
    impl ContentStore for RecordingStore {
        async fn create_post(&self, post: NewPost) -> RepositoryResult<PostId> {
            if self.reject_titles.contains(&post.title) {
                return Err(RepositoryError::BusinessRuleViolation("拒绝".to_string()));
            }
            let mut created = self.created.lock().unwrap();
            created.push(post);
            Ok(created.len() as PostId)
        }

        async fn find_post(&self, _post_id: PostId) -> RepositoryResult<Option<Post>> {
            Ok(None)
        }

        async fn list_recent(&self, _limit: usize) -> RepositoryResult<Vec<Post>> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct FailingMeta {
        calls: Mutex<Vec<(PostId, String)>>,
    }

    #[async_trait]
    impl MetadataAttacher for FailingMeta {
        async fn set_expiry(&self, post_id: PostId, expiry_date: &str) -> RepositoryResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push((post_id, expiry_date.to_string()));
            Err(RepositoryError::InternalError("元数据服务不可用".to_string()))
        }
    }

    #[tokio::test]
    async fn test_mixed_batch_counts() {
        let importer = PostImporterImpl::new(
            RecordingStore::default(),
            FailingMeta::default(),
            ImportPolicy::default(),
        );

        let result = importer
            .ingest_batch(vec![
                json!({"title": "A"}),
                json!({"title": ""}),
                json!(42),
                json!({"title": "B", "post_type": "page"}),
            ])
            .await;

        assert_eq!(result.created, 2);
        assert_eq!(result.failed, 2);
        assert_eq!(result.processed(), 4);
        assert_eq!(
            result.failures.iter().map(|f| f.index).collect::<Vec<_>>(),
            vec![1, 2]
        );

        let created = importer.store.created.lock().unwrap();
        assert_eq!(created[0].post_type, "post");
        assert_eq!(created[0].status, PostStatus::Publish);
        assert_eq!(created[1].post_type, "page");
    }

    #[tokio::test]
    async fn test_store_rejection_skips_metadata() {
        let store = RecordingStore {
            reject_titles: vec!["坏记录".to_string()],
            ..RecordingStore::default()
        };
        let importer = PostImporterImpl::new(store, FailingMeta::default(), ImportPolicy::default());

        let result = importer
            .ingest_batch(vec![
                json!({"title": "坏记录", "expiry_date": "2028-12-24 16:00:00"}),
                json!({"title": "好记录", "expiry_date": "2028-12-24 16:00:00"}),
            ])
            .await;

        assert_eq!((result.created, result.failed), (1, 1));
        let calls = importer.metadata.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, result.created_post_ids[0]);
    }

    #[tokio::test]
    async fn test_import_bytes_rejects_envelope() {
        let importer = PostImporterImpl::new(
            RecordingStore::default(),
            FailingMeta::default(),
            ImportPolicy::default(),
        );

        let err = importer.import_bytes(b"{\"title\":\"X\"}").await.unwrap_err();
        assert!(err.is_envelope_error());
        assert!(importer.store.created.lock().unwrap().is_empty());
    }
}
