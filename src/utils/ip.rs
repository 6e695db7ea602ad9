//! IP 地址输入校验
//!
//! 只做语法层面的 dotted-quad 判断，不校验 0-255 范围，也不支持 IPv6。
//! 不满足格式的输入一律按主机名处理。

use once_cell::sync::Lazy;
use regex::Regex;

static DOTTED_QUAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A(?:[0-9]{1,3}\.){3}[0-9]{1,3}\z").expect("valid regex"));

/// 判断输入是否为 dotted-quad 形式的 IPv4 字面量
///
/// `"999.999.999.999"` 也会返回 true，原样交给上游处理。
pub fn is_valid_ip(s: &str) -> bool {
    DOTTED_QUAD.is_match(s)
}
