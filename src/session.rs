//! 会话状态模型
//!
//! 由 "who am I" 查询的结果推导出当前用户、是否已登录、是否管理员，
//! 并据此决定路由是渲染、显示加载中还是重定向。

use autotest_shared::User;
use tracing::{debug, warn};

use crate::error::{ApiError, StorageError};
use crate::route::AppRoute;
use crate::storage::{KeyValueStore, STORAGE_KEY_USER};

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// 加载中或查询出错
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl SessionState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    /// 未登录（公共页面跳过查询时也是这个状态）
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// 由 "who am I" 查询的结果构造
    ///
    /// 任何错误 (包括 401 与刷新失败) 都保留在 `error` 中，状态为未知。
    pub fn from_result(result: Result<User, ApiError>) -> Self {
        match result {
            Ok(user) => Self::authenticated(user),
            Err(err) => Self {
                error: Some(err),
                ..Self::default()
            },
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.loading || self.error.is_some() {
            SessionStatus::Unknown
        } else if self.user.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// 公共页面不发起 "who am I" 查询
pub fn should_fetch_identity(route: &AppRoute) -> bool {
    !route.is_public()
}

// =========================================================
// 路由守卫 (Route Guard)
// =========================================================

/// 守卫决策
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话状态未定，显示加载中
    Loading,
    Redirect(AppRoute),
    Render,
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn decide(route: &AppRoute, session: &SessionState) -> GuardDecision {
        if route.requires_auth() {
            return match session.status() {
                SessionStatus::Authenticated => GuardDecision::Render,
                SessionStatus::Unknown if session.loading => GuardDecision::Loading,
                // 查询出错 (非 401) 时同样退回登录页
                _ => GuardDecision::Redirect(AppRoute::auth_failure_redirect()),
            };
        }

        if route.should_redirect_when_authenticated() && session.is_authenticated() {
            return GuardDecision::Redirect(AppRoute::auth_success_redirect());
        }

        GuardDecision::Render
    }
}

// =========================================================
// 用户持久化 (User Persistence)
// =========================================================

/// 持久存储中的当前用户
pub struct SessionStore;

impl SessionStore {
    /// 读取保存的用户，损坏或为 `"undefined"` 的值会被删除
    pub fn load_user<S: KeyValueStore + ?Sized>(store: &S) -> Option<User> {
        let raw = store.get(STORAGE_KEY_USER)?;
        if raw.is_empty() || raw == "undefined" || raw == "null" {
            store.delete(STORAGE_KEY_USER);
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "discarding corrupt stored user");
                store.delete(STORAGE_KEY_USER);
                None
            }
        }
    }

    pub fn save_user<S: KeyValueStore + ?Sized>(store: &S, user: &User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user).map_err(|e| StorageError::Serialize {
            key: STORAGE_KEY_USER.to_string(),
            reason: e.to_string(),
        })?;
        if !store.set(STORAGE_KEY_USER, &raw) {
            return Err(StorageError::Write(STORAGE_KEY_USER.to_string()));
        }
        debug!(user = %user.id, "stored current user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use autotest_shared::Role;

    fn user(role: Role) -> User {
        User {
            id: "u1".to_string(),
            email: "ann@example.com".to_string(),
            name: "Ann".to_string(),
            role: vec![role],
        }
    }

    #[test]
    fn test_status_derivation() {
        assert_eq!(SessionState::loading().status(), SessionStatus::Unknown);
        assert_eq!(
            SessionState::from_result(Ok(user(Role::User))).status(),
            SessionStatus::Authenticated
        );
        assert_eq!(
            SessionState::from_result(Err(ApiError::Unauthorized("no".to_string()))).status(),
            SessionStatus::Unknown
        );
        assert_eq!(
            SessionState::from_result(Err(ApiError::RefreshFailed("expired".to_string())))
                .status(),
            SessionStatus::Unknown
        );
        assert_eq!(SessionState::anonymous().status(), SessionStatus::Unauthenticated);
        assert_eq!(
            SessionState::from_result(Err(ApiError::Http {
                status: 500,
                message: "boom".to_string()
            }))
            .status(),
            SessionStatus::Unknown
        );
    }

    #[test]
    fn test_is_admin_only_for_admin_role() {
        assert!(SessionState::authenticated(user(Role::Admin)).is_admin());
        assert!(!SessionState::authenticated(user(Role::User)).is_admin());
        assert!(!SessionState::anonymous().is_admin());
    }

    #[test]
    fn test_guard_protected_routes() {
        let route = AppRoute::Dashboard;
        assert_eq!(
            RouteGuard::decide(&route, &SessionState::loading()),
            GuardDecision::Loading
        );
        assert_eq!(
            RouteGuard::decide(&route, &SessionState::anonymous()),
            GuardDecision::Redirect(AppRoute::Login)
        );
        assert_eq!(
            RouteGuard::decide(&route, &SessionState::authenticated(user(Role::User))),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_guard_public_routes() {
        let signed_in = SessionState::authenticated(user(Role::User));
        assert_eq!(
            RouteGuard::decide(&AppRoute::Login, &signed_in),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
        assert_eq!(
            RouteGuard::decide(&AppRoute::Login, &SessionState::anonymous()),
            GuardDecision::Render
        );
        assert_eq!(
            RouteGuard::decide(&AppRoute::NetworkIssue, &signed_in),
            GuardDecision::Render
        );
        assert!(!should_fetch_identity(&AppRoute::Register));
        assert!(should_fetch_identity(&AppRoute::Settings));
    }

    #[test]
    fn test_store_round_trip_and_corrupt_values() {
        let store = MemoryStore::new();
        SessionStore::save_user(&store, &user(Role::Admin)).unwrap();
        assert_eq!(SessionStore::load_user(&store), Some(user(Role::Admin)));

        store.set(STORAGE_KEY_USER, "undefined");
        assert_eq!(SessionStore::load_user(&store), None);
        assert!(store.get(STORAGE_KEY_USER).is_none());

        store.set(STORAGE_KEY_USER, "{not json");
        assert_eq!(SessionStore::load_user(&store), None);
        assert!(store.is_empty());
    }
}
