/// ASCII 空白字符
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

/// 文本是否只包含空白字符
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
