//! 时间类型模块
//!
//! 后端返回的时间字段既可能带时区（`2025-08-25T16:30:00Z`），
//! 也可能是不带时区的 ISO 字符串（`2025-08-25T16:30:00.123456`）。
//! `Timestamp` 统一按 UTC 解释，并提供表格/详情页使用的格式化方法。

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 不带时区时尝试的格式（按顺序）
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d"];

// =========================================================
// Timestamp - 可传输的时间类型
// =========================================================

/// UTC 时间戳，序列化为 RFC 3339 字符串
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[inline]
    pub const fn new(inner: DateTime<Utc>) -> Self {
        Self(inner)
    }

    /// 从字符串解析
    ///
    /// 返回 None 如果所有格式都解析失败
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }

        NAIVE_FORMATS.iter().find_map(|fmt| {
            NaiveDateTime::parse_from_str(s, fmt)
                .ok()
                .or_else(|| {
                    chrono::NaiveDate::parse_from_str(s, fmt)
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                })
                .map(|naive| Self(naive.and_utc()))
        })
    }

    #[inline]
    pub fn inner(&self) -> DateTime<Utc> {
        self.0
    }

    /// 表格中使用的日期格式，例如 `2025-08-25`
    pub fn format_date(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// 详情页使用的日期时间格式，例如 `Aug 25, 2025 16:30`
    pub fn format_datetime(&self) -> String {
        self.0.format("%b %d, %Y %H:%M").to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(inner: DateTime<Utc>) -> Self {
        Self(inner)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}
