// ==========================================
// 批量内容导入工具 - 命令行入口
// ==========================================
// 职责: 宿主接线（form / import / status / posts / config）
// 说明: stdout 输出面向操作员的结果，日志输出到 stderr
// ==========================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use post_importer::config::config_keys;
use post_importer::db::get_default_db_path;
use post_importer::domain::{ImportNotice, PostStatus, UploadPayload, UploadRequest};
use post_importer::{logging, ImportApi, ImportScreen, PolicyOverrides};
use tracing::{info, warn};

/// 批量内容导入工具
#[derive(Parser, Debug)]
#[command(name = "post-importer")]
#[command(about = "Bulk-create posts from an uploaded JSON array")]
#[command(version)]
struct Args {
    /// SQLite 数据库路径
    #[arg(long, global = true, env = "POST_IMPORTER_DB_PATH")]
    db: Option<String>,

    /// 通知语言（en / zh-CN）
    #[arg(long, global = true, env = "POST_IMPORTER_LOCALE")]
    locale: Option<String>,

    /// 覆写本次导入的发布状态
    #[arg(long, global = true)]
    status: Option<PostStatus>,

    /// 覆写本次导入的默认内容类型（空字符串表示使用存储默认值）
    #[arg(long = "post-type", global = true)]
    post_type: Option<String>,

    /// 覆写是否写入摘要描述元数据
    #[arg(long = "seo-description", global = true)]
    seo_description: Option<bool>,

    /// 以 JSON 格式输出日志
    #[arg(long = "log-json", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 显示上传说明与示例
    Form,

    /// 导入 JSON 文件
    Import {
        /// 上传文件（JSON 数组）
        file: Option<PathBuf>,

        /// 以 JSON 输出完整导入结果
        #[arg(long)]
        json: bool,
    },

    /// 渲染状态查询串（如 import_msg=done&import_created=2&import_failed=1）
    Status {
        /// 查询串
        query: String,
    },

    /// 列出最近创建的内容
    Posts {
        /// 条数
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// 显示全部配置
    Show,
    /// 读取配置项
    Get { key: String },
    /// 写入配置项
    Set { key: String, value: String },
    /// 删除配置项（恢复默认值）
    Unset { key: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    let db_path = args.db.clone().unwrap_or_else(get_default_db_path);
    info!(
        app = post_importer::APP_NAME,
        version = post_importer::VERSION,
        db_path = %db_path,
        "启动"
    );

    let overrides = PolicyOverrides {
        post_status: args.status,
        default_post_type: args.post_type.clone(),
        seo_description_enabled: args.seo_description,
    };

    let mut api = ImportApi::new(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?
        .with_overrides(overrides);
    if let Some(locale) = &args.locale {
        api = api.with_locale(locale.clone());
    }

    match args.command {
        Command::Form => {
            println!("{}", api.render_form().await?);
        }
        Command::Import { file, json } => {
            let request = load_upload(file.as_deref()).await;
            let (notice, result) = api.submit(&request).await.context("导入失败")?;
            if json {
                match result {
                    Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                    None => println!("{}", serde_json::to_string_pretty(&notice)?),
                }
            } else {
                println!("{}", api.render_status(&notice));
                println!("?{}", notice.to_query_string());
            }
        }
        Command::Status { query } => match ImportNotice::from_query_str(&query) {
            Some(notice) => println!("{}", api.render_status(&notice)),
            None => warn!(query = %query, "查询串中没有导入状态"),
        },
        Command::Posts { limit } => {
            let posts = api.list_recent_posts(limit).await?;
            if posts.is_empty() {
                let locale = api.locale();
                println!("{}", post_importer::i18n::t_in(&locale, "posts.empty"));
            }
            for post in posts {
                println!(
                    "#{}\t{}\t{}\t{}\t{}",
                    post.post_id,
                    post.status,
                    post.post_type,
                    post.created_at.format("%Y-%m-%d %H:%M:%S"),
                    post.title
                );
            }
        }
        Command::Config(cmd) => run_config(&api, cmd)?,
    }

    Ok(())
}

/// 读取上传文件；未指定或无法读取时视为未上传
async fn load_upload(path: Option<&Path>) -> UploadRequest {
    let Some(path) = path else {
        return UploadRequest::empty();
    };

    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string());
            UploadRequest::with_file(UploadPayload::new(file_name, bytes))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "无法读取上传文件");
            UploadRequest::empty()
        }
    }
}

fn run_config(api: &ImportApi, cmd: ConfigCommand) -> Result<()> {
    let config = api.config_manager()?;
    match cmd {
        ConfigCommand::Show => {
            let values = config.list_config_values()?;
            for key in config_keys::ALL {
                match values.get(*key) {
                    Some(value) => println!("{} = {}", key, value),
                    None => println!("{} = (default)", key),
                }
            }
        }
        ConfigCommand::Get { key } => match config.get_config_value(&key)? {
            Some(value) => println!("{}", value),
            None => println!("(default)"),
        },
        ConfigCommand::Set { key, value } => {
            config
                .set_config_value(&key, &value)
                .with_context(|| format!("写入配置失败: {}", key))?;
        }
        ConfigCommand::Unset { key } => {
            if !config.remove_config_value(&key)? {
                warn!(key = %key, "配置项不存在");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_upload_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[{"title":"A"}]"#).unwrap();

        let request = load_upload(Some(file.path())).await;
        let payload = request.file.expect("应读取到上传文件");
        assert_eq!(payload.bytes, br#"[{"title":"A"}]"#.to_vec());
        assert!(payload.file_name.is_some());
    }

    #[tokio::test]
    async fn test_unreadable_or_missing_file_means_no_file() {
        assert_eq!(load_upload(None).await, UploadRequest::empty());

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(load_upload(Some(&missing)).await, UploadRequest::empty());

        // 目录无法作为文件读取
        assert_eq!(load_upload(Some(dir.path())).await, UploadRequest::empty());
    }
}
