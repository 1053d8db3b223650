// ==========================================
// 批量内容导入工具 - 内容导入 Trait
// ==========================================
// 职责: 定义内容导入接口（不包含实现）
// ==========================================

use crate::domain::import::ImportResult;
use crate::importer::error::ImportError;
use async_trait::async_trait;
use serde_json::Value;

// ==========================================
// PostImporter Trait
// ==========================================
// 用途: 内容导入主接口
// 实现者: PostImporterImpl
#[async_trait]
pub trait PostImporter: Send + Sync {
    /// 逐条导入已解码的记录
    ///
    /// # 参数
    /// - items: 顶层数组的元素（任意 JSON 值）
    ///
    /// # 返回
    /// - ImportResult: created + failed == items.len()
    ///
    /// # 流程（每条记录）
    /// 1. 规范化（失败 → failed）
    /// 2. 创建内容记录（失败 → failed）
    /// 3. 附加过期时间 / SEO 描述（尽力而为，不影响计数）
    ///
    /// # 说明
    /// - 严格按输入顺序串行处理，不提前终止、不回滚
    async fn ingest_batch(&self, items: Vec<Value>) -> ImportResult;

    /// 解码并导入上传内容
    ///
    /// # 返回
    /// - Ok(ImportResult): 导入结果
    /// - Err(ImportError::Decode): 信封错误，未处理任何记录
    async fn import_bytes(&self, raw: &[u8]) -> Result<ImportResult, ImportError>;
}
