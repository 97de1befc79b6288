use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::request::HttpRequest;
use crate::route::{LOGIN_PATH, NETWORK_ISSUE_PATH, REGISTER_PATH};
use crate::storage::{KeyValueStore, STORAGE_KEY_TOKEN};

// =========================================================
// 客户端配置 (Client Configuration)
// =========================================================

/// 这些是默认值，如果构建时没有设置对应的环境变量，则使用这些值
pub const DEFAULT_API_BASE: &str = "/api/v1";
pub const DEFAULT_AUTH_STRATEGY: &str = "cookie";

const ENV_API_BASE: Option<&str> = option_env!("AUTOTEST_API_BASE");
const ENV_AUTH_STRATEGY: Option<&str> = option_env!("AUTOTEST_AUTH_STRATEGY");

/// 认证凭据的携带方式
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthStrategy {
    /// 服务端通过 HttpOnly Cookie 维持会话
    #[default]
    CookieSession,
    /// 访问令牌保存在持久存储中，随请求以 `Authorization: Bearer` 发送
    BearerToken {
        #[serde(default = "default_token_key")]
        storage_key: String,
    },
}

fn default_token_key() -> String {
    STORAGE_KEY_TOKEN.to_string()
}

impl AuthStrategy {
    /// 解析 `cookie` / `bearer`，未知值返回 `None`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cookie" | "cookie_session" => Some(AuthStrategy::CookieSession),
            "bearer" | "bearer_token" => Some(AuthStrategy::BearerToken {
                storage_key: default_token_key(),
            }),
            _ => None,
        }
    }

    /// 为请求附加凭据
    ///
    /// 两种策略都携带 Cookie，刷新令牌始终走 Cookie。
    pub fn attach<S: KeyValueStore + ?Sized>(&self, req: &mut HttpRequest, durable: &S) {
        req.with_credentials = true;
        if let AuthStrategy::BearerToken { storage_key } = self
            && let Some(token) = durable.get(storage_key).filter(|t| !t.is_empty())
        {
            req.headers
                .insert("Authorization".to_string(), format!("Bearer {token}"));
        }
    }

    /// bearer 模式下令牌的存储键
    pub fn token_key(&self) -> Option<&str> {
        match self {
            AuthStrategy::CookieSession => None,
            AuthStrategy::BearerToken { storage_key } => Some(storage_key),
        }
    }
}

/// 客户端配置结构体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API 根路径，可以是相对路径或完整 URL
    pub base_url: String,
    pub auth: AuthStrategy,
    /// 不参与 401 刷新流程的页面
    pub public_paths: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            auth: AuthStrategy::default(),
            public_paths: vec![
                LOGIN_PATH.to_string(),
                REGISTER_PATH.to_string(),
                NETWORK_ISSUE_PATH.to_string(),
            ],
        }
    }
}

impl ClientConfig {
    /// 从构建时环境变量读取配置，读不到就用默认值
    pub fn from_env() -> Self {
        Self::from_vars(ENV_API_BASE, ENV_AUTH_STRATEGY)
    }

    fn from_vars(api_base: Option<&str>, auth_strategy: Option<&str>) -> Self {
        let auth_raw = auth_strategy.unwrap_or(DEFAULT_AUTH_STRATEGY);
        let auth = AuthStrategy::parse(auth_raw).unwrap_or_else(|| {
            warn!(value = auth_raw, "unknown auth strategy, falling back to cookie session");
            AuthStrategy::default()
        });

        Self {
            base_url: api_base
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(DEFAULT_API_BASE)
                .to_string(),
            auth,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_auth(mut self, auth: AuthStrategy) -> Self {
        self.auth = auth;
        self
    }

    /// 拼接完整的请求地址
    pub fn endpoint_url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    pub fn is_public_path(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let normalized = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        self.public_paths.iter().any(|p| p == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_when_env_missing() {
        let cfg = ClientConfig::from_vars(None, None);
        assert_eq!(cfg.base_url, DEFAULT_API_BASE);
        assert_eq!(cfg.auth, AuthStrategy::CookieSession);
    }

    #[test]
    fn test_unknown_strategy_falls_back() {
        let cfg = ClientConfig::from_vars(Some("https://api.example.com/v1"), Some("magic"));
        assert_eq!(cfg.base_url, "https://api.example.com/v1");
        assert_eq!(cfg.auth, AuthStrategy::CookieSession);

        let cfg = ClientConfig::from_vars(None, Some("Bearer"));
        assert_eq!(cfg.auth.token_key(), Some(STORAGE_KEY_TOKEN));
    }

    #[test]
    fn test_endpoint_url_encodes_query() {
        let cfg = ClientConfig::default();
        let url = cfg.endpoint_url(
            "/sites",
            &[
                ("page".to_string(), "1".to_string()),
                ("search".to_string(), "a b&c".to_string()),
            ],
        );
        assert_eq!(url, "/api/v1/sites?page=1&search=a+b%26c");
    }

    #[test]
    fn test_public_path_matching() {
        let cfg = ClientConfig::default();
        assert!(cfg.is_public_path("/login"));
        assert!(cfg.is_public_path("/login/"));
        assert!(cfg.is_public_path("/network-issue?from=x"));
        assert!(!cfg.is_public_path("/"));
        assert!(!cfg.is_public_path("/login-help"));
    }

    #[test]
    fn test_attach_bearer_only_when_token_stored() {
        let store = MemoryStore::new();
        let auth = AuthStrategy::parse("bearer").unwrap();

        let mut req = HttpRequest::get("/sites");
        auth.attach(&mut req, &store);
        assert!(req.with_credentials);
        assert_eq!(req.header("Authorization"), None);

        store.set(STORAGE_KEY_TOKEN, "tok");
        let mut req = HttpRequest::get("/sites");
        auth.attach(&mut req, &store);
        assert_eq!(req.header("Authorization"), Some("Bearer tok"));

        let mut req = HttpRequest::get("/sites");
        AuthStrategy::CookieSession.attach(&mut req, &store);
        assert_eq!(req.header("Authorization"), None);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let cfg: ClientConfig =
            serde_json::from_str(r#"{"auth": {"kind": "bearer_token"}}"#).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_API_BASE);
        assert_eq!(cfg.auth.token_key(), Some(STORAGE_KEY_TOKEN));
        assert_eq!(cfg.public_paths.len(), 3);
    }
}
