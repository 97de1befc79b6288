//! 站点测试面板的客户端核心
//!
//! 与运行目标无关：浏览器端由 `autotest-frontend` 提供 fetch 传输层、
//! Web Storage 和导航实现，测试中使用内存实现。

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod navigation;
pub mod pagination;
pub mod query;
pub mod refresh;
pub mod request;
pub mod route;
pub mod session;
pub mod sidebar;
pub mod storage;
pub mod validation;

pub use autotest_shared as shared;

pub use client::ApiClient;
pub use config::{AuthStrategy, ClientConfig};
pub use error::{ApiError, StorageError, TransportError};
pub use navigation::Navigator;
pub use pagination::{PageMeta, PageWindow, SitePage};
pub use query::{QueryCache, SiteListParams, SiteQueries};
pub use request::{HttpRequest, HttpResponse, HttpTransport};
pub use route::AppRoute;
pub use session::{GuardDecision, RouteGuard, SessionState, SessionStatus};
pub use sidebar::SidebarResolver;
pub use storage::KeyValueStore;
