// ==========================================
// 内容导入API
// ==========================================
// 职责: 宿主入口（表单说明 / 处理提交 / 展示状态）
// 说明: 权限校验与防伪令牌由宿主在调用前完成
// ==========================================

use crate::api::error::ApiError;
use crate::config::{config_keys, ConfigManager, ImportConfigReader, ImportPolicy, PolicyOverrides};
use crate::db::open_and_init;
use crate::domain::import::{ImportNotice, ImportResult, UploadRequest};
use crate::domain::post::Post;
use crate::i18n::{resolve_locale, t_in, DEFAULT_LOCALE};
use crate::importer::{decode_batch, ImportError, PostImporter, PostImporterImpl};
use crate::repository::post_repo_impl::DEFAULT_STORE_POST_TYPE;
use crate::repository::{ContentStore, PostMetaRepositoryImpl, PostRepositoryImpl};
use async_trait::async_trait;
use rusqlite::Connection;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

// ==========================================
// ImportScreen - 宿主能力接口
// ==========================================
// 由 CLI / HTTP 路由 / 消息处理器等宿主显式调用，不做全局注册
#[async_trait]
pub trait ImportScreen: Send + Sync {
    /// 渲染上传说明（字段 / 格式 / 示例）
    async fn render_form(&self) -> Result<String, ApiError>;

    /// 处理一次提交，返回终态通知
    ///
    /// # 返回
    /// - Ok(NoFile): 未上传文件
    /// - Ok(InvalidJson): 非 JSON 或顶层不是数组
    /// - Ok(Done): 导入完成（含成功/失败计数）
    /// - Err: 配置/数据库等宿主侧错误
    async fn handle_submit(&self, request: UploadRequest) -> Result<ImportNotice, ApiError>;

    /// 渲染状态通知
    fn render_status(&self, notice: &ImportNotice) -> String;
}

/// 导入API
pub struct ImportApi {
    conn: Arc<Mutex<Connection>>,
    locale: Option<String>,
    overrides: PolicyOverrides,
    registered_post_types: Option<Vec<String>>,
}

impl ImportApi {
    /// 打开数据库并创建 ImportApi
    pub fn new(db_path: &str) -> Result<Self, ApiError> {
        let conn = open_and_init(db_path)
            .map_err(|e| ApiError::DatabaseError(format!("打开数据库失败: {}", e)))?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    /// 从已有连接创建（连接需已完成建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            conn,
            locale: None,
            overrides: PolicyOverrides::default(),
            registered_post_types: None,
        }
    }

    /// 指定通知语言（优先于配置 ui.locale）
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// 指定本次调用的策略覆写
    pub fn with_overrides(mut self, overrides: PolicyOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// 指定内容存储接受的内容类型
    pub fn with_registered_post_types(mut self, post_types: Vec<String>) -> Self {
        self.registered_post_types = Some(post_types);
        self
    }

    /// 配置管理器（与导入共享连接）
    pub fn config_manager(&self) -> Result<ConfigManager, ApiError> {
        Ok(ConfigManager::from_connection(Arc::clone(&self.conn))?)
    }

    /// 当前通知语言
    pub fn locale(&self) -> String {
        if let Some(locale) = &self.locale {
            return resolve_locale(locale);
        }

        let configured = self
            .config_manager()
            .and_then(|config| Ok(config.get_config_value(config_keys::LOCALE)?));
        match configured {
            Ok(Some(locale)) => resolve_locale(&locale),
            Ok(None) => DEFAULT_LOCALE.to_string(),
            Err(e) => {
                warn!(error = %e, "读取语言配置失败，使用默认语言");
                DEFAULT_LOCALE.to_string()
            }
        }
    }

    /// 解析本批次策略（配置 + 覆写）
    pub async fn resolve_policy(&self) -> Result<ImportPolicy, ApiError> {
        let config = self.config_manager()?;
        let policy = config.load_import_policy().await?;
        Ok(policy.with_overrides(&self.overrides))
    }

    fn post_repository(&self) -> PostRepositoryImpl {
        let repo = PostRepositoryImpl::from_connection(Arc::clone(&self.conn));
        match &self.registered_post_types {
            Some(post_types) => repo.with_registered_post_types(post_types.clone()),
            None => repo,
        }
    }

    fn create_importer(
        &self,
        policy: ImportPolicy,
    ) -> PostImporterImpl<PostRepositoryImpl, PostMetaRepositoryImpl> {
        let importer = PostImporterImpl::new(
            self.post_repository(),
            PostMetaRepositoryImpl::from_connection(Arc::clone(&self.conn)),
            policy,
        );
        importer.with_seo_attacher(Box::new(PostMetaRepositoryImpl::from_connection(
            Arc::clone(&self.conn),
        )))
    }

    /// 执行一次导入
    ///
    /// # 顺序
    /// 1. 检查文件 → 2. 解码信封 → 3. 解析策略 → 4. 逐条导入
    ///
    /// 信封错误在读取配置之前返回，不会产生任何写入
    pub async fn run_import(&self, request: &UploadRequest) -> Result<ImportResult, ApiError> {
        let payload = request.file.as_ref().ok_or(ImportError::NoFileSupplied)?;
        let file_name = payload.file_name.as_deref().unwrap_or("unknown");

        let items = decode_batch(&payload.bytes).map_err(|e| {
            warn!(file_name = file_name, error = %e, "上传内容无效");
            ImportError::Decode(e)
        })?;

        let policy = self.resolve_policy().await?;
        info!(file_name = file_name, records = items.len(), "收到导入请求");

        let importer = self.create_importer(policy);
        Ok(importer.ingest_batch(items).await)
    }

    /// 执行一次导入并给出终态通知
    ///
    /// 信封错误转为 NoFile / InvalidJson 通知，此时没有导入结果
    pub async fn submit(
        &self,
        request: &UploadRequest,
    ) -> Result<(ImportNotice, Option<ImportResult>), ApiError> {
        match self.run_import(request).await {
            Ok(result) => Ok((ImportNotice::from_result(&result), Some(result))),
            Err(ApiError::NoFileSupplied) => Ok((ImportNotice::NoFile, None)),
            Err(ApiError::InvalidPayload(_)) => Ok((ImportNotice::InvalidJson, None)),
            Err(e) => Err(e),
        }
    }

    /// 最近创建的内容
    pub async fn list_recent_posts(&self, limit: usize) -> Result<Vec<Post>, ApiError> {
        let limit = limit.clamp(1, 500);
        Ok(self.post_repository().list_recent(limit).await?)
    }
}

#[async_trait]
impl ImportScreen for ImportApi {
    async fn render_form(&self) -> Result<String, ApiError> {
        let locale = self.locale();
        let policy = self.resolve_policy().await?;
        let default_post_type = if policy.default_post_type.is_empty() {
            DEFAULT_STORE_POST_TYPE
        } else {
            policy.default_post_type.as_str()
        };

        let example = json!([
            {
                "title": "My First Post",
                "content": "<p>This is the post content</p>",
                "excerpt": "A short summary",
                "post_type": "post",
                "expiry_date": "2028-12-24 16:00:00"
            },
            {
                "title": "My Second Post",
                "content": "<p>More content here</p>"
            }
        ]);
        let example = serde_json::to_string_pretty(&example)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;

        let status = policy.post_status.to_string();
        let lines = [
            t_in(&locale, "form.title"),
            String::new(),
            t_in(&locale, "form.intro"),
            t_in(&locale, "form.expiry_format"),
            rust_i18n::t!(
                "form.defaults",
                locale = locale.as_str(),
                status = status,
                post_type = default_post_type
            )
            .to_string(),
            String::new(),
            t_in(&locale, "form.example_heading"),
            example,
        ];
        Ok(lines.join("\n"))
    }

    async fn handle_submit(&self, request: UploadRequest) -> Result<ImportNotice, ApiError> {
        let (notice, _) = self.submit(&request).await?;
        Ok(notice)
    }

    fn render_status(&self, notice: &ImportNotice) -> String {
        let locale = self.locale();
        match notice {
            ImportNotice::NoFile => t_in(&locale, "notice.no_file"),
            ImportNotice::InvalidJson => t_in(&locale, "notice.invalid_json"),
            ImportNotice::Done { created, failed } => rust_i18n::t!(
                "notice.done",
                locale = locale.as_str(),
                created = created,
                failed = failed
            )
            .to_string(),
        }
    }
}
