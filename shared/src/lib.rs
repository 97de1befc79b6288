use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod date;
pub mod protocol;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 服务端未提供错误信息时展示的兜底文案
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// 分页组件可选的每页条数
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

pub const DEFAULT_PAGE_SIZE: u32 = 10;

// =========================================================
// 反序列化辅助 (Serde Helpers)
// =========================================================

/// 后端的主键可能是整数也可能是字符串，这里统一转换为字符串
fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Str(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// 角色字段既可能是单个字符串也可能是数组
fn de_roles<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Role>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Role),
        Many(Vec<Role>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(role)) => vec![role],
        Some(OneOrMany::Many(roles)) => roles,
        None => Vec::new(),
    })
}

/// 状态字段可能缺失、为 null 或为空字符串
fn de_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SiteStatus, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .map(SiteStatus::from)
        .unwrap_or_default())
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户角色
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    User,
    /// 未知角色原样保留
    Other(String),
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "user" => Role::User,
            _ => Role::Other(raw),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::User => write!(f, "User"),
            Role::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// 当前登录用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "de_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de_roles")]
    pub role: Vec<Role>,
}

impl User {
    /// 是否拥有给定角色中的任意一个
    pub fn has_role(&self, allowed: &[Role]) -> bool {
        self.role.iter().any(|r| allowed.contains(r))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&[Role::Admin])
    }

    /// 头像上显示的首字母
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .or_else(|| self.email.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }
}

/// 站点分析状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteStatus {
    #[default]
    New,
    Processing,
    Pause,
    Done,
}

impl SiteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteStatus::New => "New",
            SiteStatus::Processing => "Processing",
            SiteStatus::Pause => "Pause",
            SiteStatus::Done => "Done",
        }
    }
}

impl From<String> for SiteStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Processing" => SiteStatus::Processing,
            "Pause" => SiteStatus::Pause,
            "Done" => SiteStatus::Done,
            // 后端可能返回空字符串
            _ => SiteStatus::New,
        }
    }
}

impl From<SiteStatus> for String {
    fn from(status: SiteStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 站点列表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub site_title: String,
    pub site_url: String,
    #[serde(default, deserialize_with = "de_status")]
    pub status: SiteStatus,
    #[serde(default)]
    pub created_on: Option<Timestamp>,
}

/// 站点统计数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteStats {
    pub pages: u32,
    pub test_scenario: u32,
    pub test_cases: u32,
    pub test_suite: u32,
    pub test_environment: u32,
    pub schedule_test_case: u32,
}

impl SiteStats {
    /// 详情页统计卡片的 (标签, 数值) 列表
    pub fn entries(&self) -> [(&'static str, u32); 6] {
        [
            ("Pages", self.pages),
            ("Test Scenario", self.test_scenario),
            ("Test Cases", self.test_cases),
            ("Test Suite", self.test_suite),
            ("Test Environment", self.test_environment),
            ("Schedule Test Case", self.schedule_test_case),
        ]
    }
}

/// 站点详情视图模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub id: String,
    pub title: String,
    pub url: String,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub analyze_status: SiteStatus,
    pub stats: SiteStats,
}

impl From<Site> for SiteInfo {
    fn from(site: Site) -> Self {
        Self {
            id: site.id,
            title: site.site_title,
            url: site.site_url,
            created_at: site.created_on,
            updated_at: site.created_on,
            analyze_status: site.status,
            stats: SiteStats::default(),
        }
    }
}

/// 站点列表排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedDesc,
    CreatedAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::CreatedDesc,
        SortKey::CreatedAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedDesc => "created_desc",
            SortKey::CreatedAsc => "created_asc",
            SortKey::TitleAsc => "title_asc",
            SortKey::TitleDesc => "title_desc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }

    /// 下拉框中的展示文案
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::CreatedDesc => "Newest first",
            SortKey::CreatedAsc => "Oldest first",
            SortKey::TitleAsc => "Title A-Z",
            SortKey::TitleDesc => "Title Z-A",
        }
    }
}

// =========================================================
// 请求与响应载荷 (Payloads)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSiteRequest {
    pub site_title: String,
    pub site_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `GET /sites` 的原始响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteListResponse {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub data: Vec<Site>,
}

/// 登录接口在 bearer 模式下可能额外返回的令牌
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenEnvelope {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// 错误响应体
///
/// 不同接口分别使用 `message` 和 `detail` 字段
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

impl ErrorBody {
    /// 提取可展示的错误信息
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.detail.and_then(ErrorDetail::into_message))
    }
}

/// `detail` 可能是字符串，也可能是校验错误数组 `[{"msg": ...}]`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Items(Vec<ErrorDetailItem>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetailItem {
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorDetail {
    pub fn into_message(self) -> Option<String> {
        match self {
            ErrorDetail::Text(text) if !text.trim().is_empty() => Some(text),
            ErrorDetail::Text(_) => None,
            ErrorDetail::Items(items) => items.into_iter().find_map(|i| i.msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accepts_numeric_id_and_single_role() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "email": "a@b.c", "name": "ann", "role": "Admin"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "7");
        assert!(user.is_admin());
        assert_eq!(user.initial(), "A");
    }

    #[test]
    fn test_user_round_trips_through_storage_format() {
        let user = User {
            id: "abc".to_string(),
            email: "a@b.c".to_string(),
            name: "Ann".to_string(),
            role: vec![Role::User, Role::Other("Tester".to_string())],
        };
        let raw = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, user);
        assert!(!back.is_admin());
    }

    #[test]
    fn test_site_status_empty_string_is_new() {
        let site: Site = serde_json::from_str(
            r#"{"id": 1, "site_title": "t", "site_url": "https://x", "status": "", "created_on": null}"#,
        )
        .unwrap();
        assert_eq!(site.status, SiteStatus::New);
        assert!(site.created_on.is_none());
    }

    #[test]
    fn test_sort_key_wire_names() {
        assert_eq!(
            serde_json::to_string(&SortKey::TitleDesc).unwrap(),
            "\"title_desc\""
        );
        assert_eq!(SortKey::parse("created_asc"), Some(SortKey::CreatedAsc));
        assert_eq!(SortKey::parse("asc"), None);
    }

    #[test]
    fn test_error_body_prefers_message_then_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "Token expired"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Token expired"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": [{"msg": "field required"}]}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("field required"));

        let body: ErrorBody = serde_json::from_str(r#"{"message": ""}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
