use autotest_shared::{ErrorBody, FALLBACK_ERROR_MESSAGE};
use thiserror::Error;

use crate::request::HttpResponse;

/// 传输层错误
///
/// 只有 `Network` 会触发网络异常页跳转。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// 无法连接（离线、DNS 失败、连接被拒绝）
    #[error("network error: {0}")]
    Network(String),
    /// 请求构建失败
    #[error("request build failed: {0}")]
    Request(String),
    /// 响应体读取失败
    #[error("response body unreadable: {0}")]
    Body(String),
}

/// API 调用错误
///
/// 实现 `Clone`，一次刷新失败需要同时交付给所有排队的请求。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network unreachable: {0}")]
    Network(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("session refresh failed: {0}")]
    RefreshFailed(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("{0}")]
    Transport(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// 把非 2xx 响应转换为错误，优先使用服务端返回的 `message`/`detail`
    pub fn from_response(response: &HttpResponse) -> Self {
        let message = server_message(response);
        if response.status == 401 {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Http {
                status: response.status,
                message,
            }
        }
    }

    /// toast 中展示的文案
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. }
            | ApiError::Unauthorized(message)
            | ApiError::RefreshFailed(message) => message.clone(),
            ApiError::Network(_) => "No Internet Connection.".to_string(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }

    /// 登录态已失效（未授权或刷新失败）
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::RefreshFailed(_))
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) => ApiError::Network(msg),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

/// 本地存储错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("failed to serialize value for `{key}`: {reason}")]
    Serialize { key: String, reason: String },
    #[error("storage rejected write to `{0}`")]
    Write(String),
}

fn server_message(response: &HttpResponse) -> String {
    serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_uses_detail() {
        let resp = HttpResponse::new(400, r#"{"detail": "Email already registered"}"#);
        let err = ApiError::from_response(&resp);
        assert_eq!(
            err,
            ApiError::Http {
                status: 400,
                message: "Email already registered".to_string()
            }
        );
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test]
    fn test_from_response_falls_back_on_html_body() {
        let resp = HttpResponse::new(502, "<html>Bad Gateway</html>");
        let err = ApiError::from_response(&resp);
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_401_maps_to_unauthorized() {
        let resp = HttpResponse::new(401, r#"{"detail": "Token expired"}"#);
        let err = ApiError::from_response(&resp);
        assert_eq!(err, ApiError::Unauthorized("Token expired".to_string()));
        assert!(err.is_auth_failure());
    }
}
