// ==========================================
// 批量内容导入工具 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口 + 批次策略
// 红线: 不包含配置写入、不包含导入流程逻辑
// ==========================================

use crate::domain::types::PostStatus;
use crate::importer::error::ImportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 默认发布状态
pub const DEFAULT_POST_STATUS: PostStatus = PostStatus::Publish;

/// 默认内容类型（空串表示交由存储决定）
pub const DEFAULT_POST_TYPE: &str = "post";

/// 默认不写入 SEO 描述
pub const DEFAULT_SEO_DESCRIPTION_ENABLED: bool = false;

// ==========================================
// ImportPolicy - 批次策略
// ==========================================
// 每批导入开始前解析一次，整批记录共用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPolicy {
    pub post_status: PostStatus,      // 发布状态
    pub default_post_type: String,    // 记录未指定 post_type 时使用
    pub seo_description_enabled: bool, // 宿主是否具备 SEO 能力
}

impl Default for ImportPolicy {
    fn default() -> Self {
        Self {
            post_status: DEFAULT_POST_STATUS,
            default_post_type: DEFAULT_POST_TYPE.to_string(),
            seo_description_enabled: DEFAULT_SEO_DESCRIPTION_ENABLED,
        }
    }
}

impl ImportPolicy {
    /// 记录的最终内容类型
    pub fn resolve_post_type<'a>(&'a self, record_post_type: &'a str) -> &'a str {
        if record_post_type.is_empty() {
            &self.default_post_type
        } else {
            record_post_type
        }
    }

    /// 应用操作员覆写
    pub fn with_overrides(mut self, overrides: &PolicyOverrides) -> Self {
        if let Some(status) = overrides.post_status {
            self.post_status = status;
        }
        if let Some(post_type) = &overrides.default_post_type {
            self.default_post_type = post_type.trim().to_string();
        }
        if let Some(enabled) = overrides.seo_description_enabled {
            self.seo_description_enabled = enabled;
        }
        self
    }
}

// ==========================================
// PolicyOverrides - 单次调用覆写
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyOverrides {
    pub post_status: Option<PostStatus>,
    pub default_post_type: Option<String>,
    pub seo_description_enabled: Option<bool>,
}

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）、ImportPolicy（固定配置）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取发布状态
    ///
    /// # 默认值
    /// - publish
    async fn get_default_post_status(&self) -> Result<PostStatus, ImportError>;

    /// 获取默认内容类型
    ///
    /// # 默认值
    /// - "post"（配置为空串时交由存储默认规则）
    async fn get_default_post_type(&self) -> Result<String, ImportError>;

    /// 宿主是否具备 SEO 描述能力
    ///
    /// # 默认值
    /// - false
    async fn is_seo_description_enabled(&self) -> Result<bool, ImportError>;

    /// 读取完整批次策略
    async fn load_import_policy(&self) -> Result<ImportPolicy, ImportError> {
        Ok(ImportPolicy {
            post_status: self.get_default_post_status().await?,
            default_post_type: self.get_default_post_type().await?,
            seo_description_enabled: self.is_seo_description_enabled().await?,
        })
    }
}

#[async_trait]
impl ImportConfigReader for ImportPolicy {
    async fn get_default_post_status(&self) -> Result<PostStatus, ImportError> {
        Ok(self.post_status)
    }

    async fn get_default_post_type(&self) -> Result<String, ImportError> {
        Ok(self.default_post_type.clone())
    }

    async fn is_seo_description_enabled(&self) -> Result<bool, ImportError> {
        Ok(self.seo_description_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = ImportPolicy::default();
        assert_eq!(policy.post_status, PostStatus::Publish);
        assert_eq!(policy.default_post_type, "post");
        assert!(!policy.seo_description_enabled);
    }

    #[test]
    fn test_resolve_post_type() {
        let policy = ImportPolicy::default();
        assert_eq!(policy.resolve_post_type(""), "post");
        assert_eq!(policy.resolve_post_type("page"), "page");

        let passthrough = ImportPolicy {
            default_post_type: String::new(),
            ..ImportPolicy::default()
        };
        assert_eq!(passthrough.resolve_post_type(""), "");
    }

    #[test]
    fn test_overrides_only_touch_given_fields() {
        let overrides = PolicyOverrides {
            post_status: Some(PostStatus::Draft),
            ..PolicyOverrides::default()
        };
        let policy = ImportPolicy::default().with_overrides(&overrides);
        assert_eq!(policy.post_status, PostStatus::Draft);
        assert_eq!(policy.default_post_type, "post");
        assert!(!policy.seo_description_enabled);
    }

    #[tokio::test]
    async fn test_policy_is_its_own_reader() {
        let policy = ImportPolicy {
            post_status: PostStatus::Pending,
            default_post_type: "page".to_string(),
            seo_description_enabled: true,
        };
        assert_eq!(policy.load_import_policy().await.unwrap(), policy);
    }
}
