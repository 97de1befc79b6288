//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的会话信号来检查认证状态。

use autotest_client::session::{SessionState, SessionStore, should_fetch_identity};
use autotest_client::shared::{LoginRequest, RegisterRequest, User};
use autotest_client::{ApiError, AppRoute};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, warn};

use crate::api::ApiContext;
use crate::web::router::current_path;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<SessionState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::loading());
        Self { state, set_state }
    }

    /// 获取会话状态信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<SessionState> {
        let state = self.state;
        Signal::derive(move || state.get())
    }

    pub fn user(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }

    pub fn is_admin(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(SessionState::is_admin))
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化会话状态
///
/// 公共页面不查询当前用户；其他页面先显示保存的用户，
/// 再以 "who am I" 查询的结果为准。
pub fn init_auth(ctx: &AuthContext, api: &ApiContext) {
    let route = AppRoute::from_path(&current_path());
    if !should_fetch_identity(&route) {
        debug!(%route, "public route, skipping identity query");
        ctx.set_state.set(SessionState::anonymous());
        return;
    }

    let client = api.client();
    let stored = SessionStore::load_user(client.durable());
    ctx.set_state.set(SessionState {
        user: stored,
        ..SessionState::loading()
    });

    let set_state = ctx.set_state;
    spawn_local(async move {
        let result = client.me().await;
        match &result {
            Ok(user) => {
                if let Err(e) = SessionStore::save_user(client.durable(), user) {
                    warn!(error = %e, "failed to persist current user");
                }
            }
            Err(e) if e.is_auth_failure() => debug!(error = %e, "no active session"),
            Err(e) => warn!(error = %e, "identity query failed"),
        }
        set_state.set(SessionState::from_result(result));
    });
}

/// 登录并更新会话状态
///
/// 导航将由路由服务的会话状态监听自动处理。
pub async fn login(
    ctx: &AuthContext,
    api: &ApiContext,
    credentials: LoginRequest,
) -> Result<User, ApiError> {
    let user = api.client().login(&credentials).await?;
    ctx.set_state.set(SessionState::authenticated(user.clone()));
    Ok(user)
}

/// 注册新账号，成功后跳转到登录页由调用方处理
pub async fn register(api: &ApiContext, payload: RegisterRequest) -> Result<User, ApiError> {
    api.client().register(&payload).await
}

/// 注销并清除状态
///
/// 注意：不需要手动导航，路由服务会监听会话状态变化并自动重定向
pub async fn logout(ctx: &AuthContext, api: &ApiContext) -> Result<(), ApiError> {
    api.client().logout().await?;
    ctx.set_state.set(SessionState::anonymous());
    Ok(())
}
