//! API 上下文
//!
//! 在组件树中共享同一个 HTTP 客户端与查询缓存，
//! 使刷新闸门和缓存在所有页面之间保持唯一。

use autotest_client::{ApiClient, ClientConfig, QueryCache, SiteQueries};
use leptos::prelude::*;
use std::rc::Rc;
use tracing::info;

use crate::web::{BrowserNavigator, FetchTransport, WebStorage};

pub type WebClient = ApiClient<FetchTransport, BrowserNavigator, WebStorage>;
pub type WebQueries = SiteQueries<FetchTransport, BrowserNavigator, WebStorage>;

struct Services {
    client: Rc<WebClient>,
    queries: WebQueries,
}

/// API 上下文
///
/// `revision` 在写操作成功后递增，订阅它的列表会重新查询。
#[derive(Clone, Copy)]
pub struct ApiContext {
    services: StoredValue<Rc<Services>, LocalStorage>,
    revision: RwSignal<u64>,
}

impl ApiContext {
    pub fn new(config: ClientConfig) -> Self {
        info!(base_url = %config.base_url, auth = ?config.auth, "api client configured");
        let client = Rc::new(ApiClient::new(
            config,
            FetchTransport,
            BrowserNavigator::default(),
            WebStorage::Local,
            WebStorage::Session,
        ));
        let queries = SiteQueries::new(client.clone(), Rc::new(QueryCache::new()));

        Self {
            services: StoredValue::new_local(Rc::new(Services { client, queries })),
            revision: RwSignal::new(0),
        }
    }

    pub fn client(&self) -> Rc<WebClient> {
        self.services.with_value(|s| s.client.clone())
    }

    pub fn queries(&self) -> WebQueries {
        self.services.with_value(|s| s.queries.clone())
    }

    /// 当前修订号（订阅）
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// 通知订阅者缓存已失效
    pub fn bump(&self) {
        self.revision.update(|r| *r += 1);
    }
}

/// 从 Context 获取 API 上下文
pub fn use_api() -> ApiContext {
    use_context::<ApiContext>().expect("ApiContext should be provided")
}
