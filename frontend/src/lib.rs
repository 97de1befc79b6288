//! Autotest 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::router`: 路由服务（核心引擎），路由定义与守卫在 `autotest_client`
//! - `api`: 共享的 HTTP 客户端与查询缓存
//! - `auth`: 会话状态管理
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    mod add_site_dialog;
    pub mod dashboard;
    pub mod error_fallback;
    mod field;
    mod header;
    pub mod icons;
    pub mod layout;
    pub mod loader;
    pub mod login;
    pub mod network_issue;
    pub mod not_found;
    mod pagination;
    pub mod placeholder;
    pub mod register;
    mod sidebar;
    pub mod site_info;
    mod site_table;
    mod status_badge;
}
pub mod logging;
mod toast;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web;

use autotest_client::{AppRoute, ClientConfig};
use leptos::prelude::*;

use crate::api::ApiContext;
use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::error_fallback::ErrorFallback;
use crate::components::layout::AppLayout;
use crate::components::login::LoginPage;
use crate::components::network_issue::NetworkIssuePage;
use crate::components::not_found::NotFoundPage;
use crate::components::placeholder::Placeholder;
use crate::components::register::RegisterPage;
use crate::components::site_info::SiteInfoPage;
use crate::toast::{ToastContext, Toaster};
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件，需要认证的页面包裹在 AppLayout 中。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::NetworkIssue => view! { <NetworkIssuePage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
        AppRoute::Dashboard => view! { <AppLayout><DashboardPage /></AppLayout> }.into_any(),
        AppRoute::Page => view! { <AppLayout><Placeholder title="Pages" /></AppLayout> }.into_any(),
        AppRoute::User => view! { <AppLayout><Placeholder title="Users" /></AppLayout> }.into_any(),
        AppRoute::Settings => {
            view! { <AppLayout><Placeholder title="Settings" /></AppLayout> }.into_any()
        }
        AppRoute::SiteInfo { id, section } => view! {
            <AppLayout><SiteInfoPage id=id section=section /></AppLayout>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建 API 上下文（全局唯一的客户端与缓存）
    let api_ctx = ApiContext::new(ClientConfig::from_env());
    provide_context(api_ctx);
    provide_context(ToastContext::new());

    // 2. 创建认证上下文并查询当前用户
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx, &api_ctx);

    // 3. 获取会话状态信号，用于注入路由服务（解耦！）
    let session = auth_ctx.session_signal();

    view! {
        <ErrorBoundary fallback=|errors| view! { <ErrorFallback errors=errors /> }>
            // 4. 路由器组件：注入会话信号实现守卫
            <Router session=session>
                <RouterOutlet matcher=route_matcher />
            </Router>
        </ErrorBoundary>
        <Toaster />
    }
}
