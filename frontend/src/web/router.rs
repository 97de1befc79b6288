//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程，验证由 `RouteGuard` 完成。

use autotest_client::navigation::Navigator;
use autotest_client::session::{GuardDecision, RouteGuard, SessionState};
use autotest_client::AppRoute;
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

use crate::components::loader::FullPageLoader;

/// 获取当前浏览器路径
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window()
        && let Ok(history) = window.history()
    {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window()
        && let Ok(history) = window.history()
    {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

// ============================================================================
// 整页跳转 (供 HTTP 客户端使用)
// ============================================================================

/// 浏览器导航器
///
/// 网络异常与强制登出时通过 `location.href` 整页跳转。
/// 跳转生效前 `pathname` 仍是旧值，因此记录待跳转的目标，
/// 避免并发失败的请求重复记录路径。
#[derive(Debug, Clone, Default)]
pub struct BrowserNavigator {
    pending: Rc<RefCell<Option<String>>>,
}

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        self.pending.borrow().clone().unwrap_or_else(current_path)
    }

    fn redirect(&self, path: &str) {
        *self.pending.borrow_mut() = Some(path.to_string());
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}

/// 整页重新加载当前地址
pub fn hard_reload() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

/// 整页跳转到指定路径
pub fn hard_navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

// ============================================================================
// 路由服务
// ============================================================================

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话状态信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话状态（注入的信号，实现解耦）
    session: Signal<SessionState>,
    /// 当前路由的守卫决策
    decision: Memo<GuardDecision>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `session` - 会话状态信号，由外部注入实现解耦
    fn new(session: Signal<SessionState>) -> Self {
        // 1. 初始化当前路由（从 URL 解析）
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);
        let decision =
            Memo::new(move |_| RouteGuard::decide(&current_route.get(), &session.get()));

        Self {
            current_route,
            set_route,
            session,
            decision,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn decision(&self) -> Memo<GuardDecision> {
        self.decision
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        // --- Step 1: 验证目标路由 ---
        let route = match RouteGuard::decide(&target_route, &self.session.get_untracked()) {
            GuardDecision::Redirect(redirect) => {
                debug!(from = %target_route, to = %redirect, "navigation redirected by guard");
                redirect
            }
            // 会话仍在加载时先进入目标路由，由出口显示加载状态
            GuardDecision::Loading | GuardDecision::Render => target_route,
        };

        // --- Step 2: 加载页面 (更新状态) ---
        if use_push {
            push_history_state(&route.to_path());
        } else {
            replace_history_state(&route.to_path());
        }
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        // 守卫逻辑由 `setup_auth_redirect` 中的 Effect 统一处理
        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话状态或路由变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let decision = self.decision;

        Effect::new(move |_| {
            if let GuardDecision::Redirect(target) = decision.get() {
                let route = current_route.get_untracked();
                info!(from = %route, to = %target, "session guard redirect");
                replace_history_state(&target.to_path());
                set_route.set(target);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<SessionState>) -> RouterService {
    let router = RouterService::new(session);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话状态信号
    session: Signal<SessionState>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 守卫放行时渲染对应的组件，否则显示加载状态。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let decision = router.decision();

    move || match decision.get() {
        GuardDecision::Render => matcher(router.current_route().get()),
        GuardDecision::Loading | GuardDecision::Redirect(_) => {
            view! { <FullPageLoader /> }.into_any()
        }
    }
}

/// 应用内链接，拦截点击改为 History 导航
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::web_sys::MouseEvent| {
        // 保留新标签页打开等默认行为
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
