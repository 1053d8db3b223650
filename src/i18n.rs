// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "en";

/// 是否为已提供翻译的语言
pub fn is_supported_locale(locale: &str) -> bool {
    rust_i18n::available_locales!()
        .iter()
        .any(|available| *available == locale)
}

/// 规范化语言代码（不支持时回退到默认语言）
pub fn resolve_locale(locale: &str) -> String {
    let trimmed = locale.trim();
    if is_supported_locale(trimmed) {
        trimmed.to_string()
    } else {
        tracing::debug!(locale = trimmed, "不支持的语言，回退到默认语言");
        DEFAULT_LOCALE.to_string()
    }
}

/// 按指定语言翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use post_importer::i18n::t_in;
/// let msg = t_in("zh-CN", "notice.no_file");
/// ```
pub fn t_in(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}
