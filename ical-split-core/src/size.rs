use crate::{Error, Result};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// 后缀按长度从长到短排列，保证 `MB` 先于 `M` 匹配
const SUFFIXES: [(&str, u64); 6] = [
    ("GB", GIB),
    ("MB", MIB),
    ("KB", KIB),
    ("G", GIB),
    ("M", MIB),
    ("K", KIB),
];

/// 解析人类可读的大小字符串，如 `1M`、`512K`、`1.5GB`
pub fn parse_size(size: &str) -> Result<u64> {
    let normalized = size.trim().to_uppercase();
    let invalid = || Error::InvalidSize(size.trim().to_string());

    for (suffix, multiplier) in SUFFIXES {
        if let Some(number) = normalized.strip_suffix(suffix) {
            let value: f64 = number.trim().parse().map_err(|_| invalid())?;
            if !value.is_finite() || value < 0.0 {
                return Err(invalid());
            }
            return Ok((value * multiplier as f64) as u64);
        }
    }

    normalized.parse().map_err(|_| invalid())
}

/// 格式化字节数用于显示
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} bytes")
    }
}
