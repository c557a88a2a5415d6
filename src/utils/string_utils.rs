//! 字符串工具模块
//! 导入输入的规范化处理

/// 规范化导入文本
///
/// 移除所有空白字符（包括中间的空白）以及 U+FEFF（BOM）。xpub 与地址本身
/// 不含空白，因此粘贴或扫码带入的换行、空格都可以安全丢弃。
///
/// 幂等：`sanitize_import_text(&sanitize_import_text(x)) == sanitize_import_text(x)`
pub fn sanitize_import_text(raw: &str) -> String {
    raw.chars().filter(|c| !is_strippable(*c)).collect()
}

// char::is_whitespace 不包含 BOM
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// 检查字符串规范化后是否为空
pub fn is_blank(s: &str) -> bool {
    s.chars().all(is_strippable)
}
