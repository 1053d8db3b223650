// ==========================================
// 批量内容导入工具 - 内容记录实体
// ==========================================
// 职责: 导入记录（输入）/ 待创建内容 / 已存储内容
// ==========================================

use crate::domain::types::PostStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 内容记录 ID（由内容存储分配）
pub type PostId = i64;

// ==========================================
// ImportRecord - 导入记录（规范化后）
// ==========================================
// 来源: 上传 JSON 数组中的单个对象
// 生命周期: 仅在单次导入内存在，不落库
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub title: String,               // 标题（已 TRIM，非空）
    pub content: String,             // 正文
    pub excerpt: String,             // 摘要
    pub post_type: String,           // 内容类型（空串表示使用批次默认值）
    pub expiry_date: Option<String>, // 过期时间（约定格式 YYYY-MM-DD HH:MM:SS，不校验）
}

// ==========================================
// NewPost - 待创建内容
// ==========================================
// 用途: ContentStore::create_post 的入参
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub post_type: String,
    pub status: PostStatus,
    pub excerpt: String,
}

// ==========================================
// Post - 已存储内容
// ==========================================
// 对齐: posts 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: PostId,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub post_type: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
}
