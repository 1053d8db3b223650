// ==========================================
// 批量内容导入工具 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::{
    ImportConfigReader, DEFAULT_POST_STATUS, DEFAULT_POST_TYPE, DEFAULT_SEO_DESCRIPTION_ENABLED,
};
use crate::db::configure_sqlite_connection;
use crate::domain::types::PostStatus;
use crate::importer::error::ImportError;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// 配置作用域（当前仅 global）
pub const GLOBAL_SCOPE: &str = "global";

/// 配置键
pub mod config_keys {
    /// 发布状态: publish / draft / pending / private
    pub const DEFAULT_POST_STATUS: &str = "import.default_post_status";
    /// 默认内容类型（空串表示交由存储决定）
    pub const DEFAULT_POST_TYPE: &str = "import.default_post_type";
    /// 是否写入 SEO 描述: true / false
    pub const SEO_DESCRIPTION_ENABLED: &str = "import.seo_description_enabled";
    /// 通知语言: en / zh-CN
    pub const LOCALE: &str = "ui.locale";

    pub const ALL: &[&str] = &[
        DEFAULT_POST_STATUS,
        DEFAULT_POST_TYPE,
        SEO_DESCRIPTION_ENABLED,
        LOCALE,
    ];
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        if !config_keys::ALL.iter().any(|known| *known == key) {
            return Err(RepositoryError::FieldValueError {
                field: key.to_string(),
                message: format!("未知的配置键，可用: {}", config_keys::ALL.join(", ")),
            });
        }

        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
            ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')
            "#,
            params![GLOBAL_SCOPE, key, value],
        )?;
        tracing::info!(key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 删除配置值（恢复默认）
    pub fn remove_config_value(&self, key: &str) -> RepositoryResult<bool> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
        )?;
        Ok(affected > 0)
    }

    /// 获取所有 global 配置
    pub fn list_config_values(&self) -> RepositoryResult<BTreeMap<String, String>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut values = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            values.insert(key, value);
        }
        Ok(values)
    }

    fn read_for_import(&self, key: &str) -> Result<Option<String>, ImportError> {
        self.get_config_value(key)
            .map_err(|e| ImportError::ConfigReadError {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_default_post_status(&self) -> Result<PostStatus, ImportError> {
        let key = config_keys::DEFAULT_POST_STATUS;
        match self.read_for_import(key)? {
            None => Ok(DEFAULT_POST_STATUS),
            Some(raw) => raw
                .parse::<PostStatus>()
                .map_err(|e| ImportError::ConfigValueError {
                    key: key.to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                }),
        }
    }

    async fn get_default_post_type(&self) -> Result<String, ImportError> {
        Ok(self
            .read_for_import(config_keys::DEFAULT_POST_TYPE)?
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_POST_TYPE.to_string()))
    }

    async fn is_seo_description_enabled(&self) -> Result<bool, ImportError> {
        let key = config_keys::SEO_DESCRIPTION_ENABLED;
        match self.read_for_import(key)? {
            None => Ok(DEFAULT_SEO_DESCRIPTION_ENABLED),
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" | "" => Ok(false),
                _ => Err(ImportError::ConfigValueError {
                    key: key.to_string(),
                    value: raw,
                    message: "应为 true/false".to_string(),
                }),
            },
        }
    }
}
