// ==========================================
// 批量内容导入工具 - 导入批次实体
// ==========================================
// 职责: 上传载荷 / 导入结果 / 状态通知
// 约束: created + failed == 顶层数组元素个数
// ==========================================

use crate::domain::post::PostId;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

// ==========================================
// UploadPayload - 上传文件
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    pub file_name: Option<String>, // 源文件名（仅用于日志）
    pub bytes: Vec<u8>,            // 原始字节
}

impl UploadPayload {
    pub fn new(file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }
}

// ==========================================
// UploadRequest - 一次提交
// ==========================================
// 由宿主（CLI/HTTP 等）构造后显式传入，导入器不读取任何环境状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: Option<UploadPayload>,
}

impl UploadRequest {
    pub fn with_file(payload: UploadPayload) -> Self {
        Self {
            file: Some(payload),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

// ==========================================
// RecordFailure - 单条记录失败明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub index: usize,   // 数组下标（从 0 开始）
    pub reason: String, // 失败原因
}

// ==========================================
// ImportResult - 导入结果
// ==========================================
// 生命周期: 每次上传新建，展示后丢弃（不持久化）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub batch_id: String,                // 批次 ID（仅用于日志关联）
    pub created: usize,                  // 创建成功数
    pub failed: usize,                   // 失败数
    pub created_post_ids: Vec<PostId>,   // 创建成功的内容 ID（按输入顺序）
    pub failures: Vec<RecordFailure>,    // 失败明细（按输入顺序）
    pub elapsed_ms: u64,                 // 耗时（毫秒）
}

impl ImportResult {
    pub fn new(batch_id: impl Into<String>) -> Self {
        Self {
            batch_id: batch_id.into(),
            ..Self::default()
        }
    }

    pub fn record_created(&mut self, post_id: PostId) {
        self.created += 1;
        self.created_post_ids.push(post_id);
    }

    pub fn record_failed(&mut self, index: usize, reason: impl Into<String>) {
        self.failed += 1;
        self.failures.push(RecordFailure {
            index,
            reason: reason.into(),
        });
    }

    /// 已处理记录总数
    pub fn processed(&self) -> usize {
        self.created + self.failed
    }
}

// ==========================================
// ImportNotice - 面向操作员的终态通知
// ==========================================
// 通过重定向查询串回传，展示后即丢弃
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ImportNotice {
    #[serde(rename = "no-file-supplied")]
    NoFile,
    InvalidJson,
    Done { created: usize, failed: usize },
}

/// 查询参数名
pub mod notice_params {
    pub const MESSAGE: &str = "import_msg";
    pub const CREATED: &str = "import_created";
    pub const FAILED: &str = "import_failed";

    pub const NO_FILE: &str = "no-file-supplied";
    pub const INVALID_JSON: &str = "invalid-json";
    pub const DONE: &str = "done";
}

impl ImportNotice {
    pub fn from_result(result: &ImportResult) -> Self {
        ImportNotice::Done {
            created: result.created,
            failed: result.failed,
        }
    }

    /// 状态标识（no-file-supplied / invalid-json / done）
    pub fn code(&self) -> &'static str {
        match self {
            ImportNotice::NoFile => notice_params::NO_FILE,
            ImportNotice::InvalidJson => notice_params::INVALID_JSON,
            ImportNotice::Done { .. } => notice_params::DONE,
        }
    }

    /// 编码为重定向查询串
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair(notice_params::MESSAGE, self.code());
        if let ImportNotice::Done { created, failed } = self {
            serializer.append_pair(notice_params::CREATED, &created.to_string());
            serializer.append_pair(notice_params::FAILED, &failed.to_string());
        }
        serializer.finish()
    }

    /// 从查询串解析
    ///
    /// # 规则
    /// - 消息缺失或未知 → None（不展示通知）
    /// - 计数缺失或非数字 → 0
    pub fn from_query_str(query: &str) -> Option<Self> {
        let query = query.trim_start_matches('?');
        let mut message = None;
        let mut created = 0;
        let mut failed = 0;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                notice_params::MESSAGE => message = Some(value.trim().to_string()),
                notice_params::CREATED => created = parse_count(&value),
                notice_params::FAILED => failed = parse_count(&value),
                _ => {}
            }
        }

        match message.as_deref()? {
            notice_params::NO_FILE => Some(ImportNotice::NoFile),
            notice_params::INVALID_JSON => Some(ImportNotice::InvalidJson),
            notice_params::DONE => Some(ImportNotice::Done { created, failed }),
            _ => None,
        }
    }
}

fn parse_count(value: &str) -> usize {
    value.trim().parse().unwrap_or(0)
}
