// ==========================================
// 批量内容导入工具 - 领域类型定义
// ==========================================
// 职责: 内容状态等枚举类型
// 序列化格式: 小写 (与存储一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 内容发布状态 (Post Status)
// ==========================================
// 整批导入共用同一状态（由配置决定，不按记录区分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Publish, // 已发布
    Draft,   // 草稿
    Pending, // 待审核
    Private, // 私有
}

impl PostStatus {
    /// 存储层使用的状态字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Publish => "publish",
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Private => "private",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 状态字符串解析失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("未知的内容状态: {0}（应为 publish/draft/pending/private）")]
pub struct UnknownPostStatus(pub String);

impl FromStr for PostStatus {
    type Err = UnknownPostStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "publish" => Ok(PostStatus::Publish),
            "draft" => Ok(PostStatus::Draft),
            "pending" => Ok(PostStatus::Pending),
            "private" => Ok(PostStatus::Private),
            _ => Err(UnknownPostStatus(s.to_string())),
        }
    }
}
