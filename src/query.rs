//! 查询缓存与站点数据钩子
//!
//! 查询结果按键缓存，变更操作按前缀失效相关的键。

use autotest_shared::protocol::ListSitesRequest;
use autotest_shared::{CreateSiteRequest, DEFAULT_PAGE_SIZE, Site, SiteInfo, SortKey};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::navigation::Navigator;
use crate::pagination::SitePage;
use crate::request::HttpTransport;
use crate::storage::KeyValueStore;

pub const KEY_SITES: &str = "sites";
pub const KEY_SITE_INFO: &str = "site-info";

// =========================================================
// 缓存 (Query Cache)
// =========================================================

/// 查询键，如 `["sites", "1", "10", "", "created_desc"]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, T>(segments: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.0.len() && self.0.iter().zip(prefix).all(|(a, b)| a == b)
    }
}

/// 类型擦除的查询缓存
///
/// 每次失效都会递增 `generation`，界面据此重新拉取。
/// 条目数超过容量时淘汰最久未使用的键。
pub struct QueryCache {
    entries: RefCell<HashMap<QueryKey, CacheEntry>>,
    capacity: usize,
    clock: Cell<u64>,
    generation: Cell<u64>,
}

struct CacheEntry {
    value: Rc<dyn Any>,
    last_used: u64,
}

/// 默认缓存容量
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            capacity: capacity.max(1),
            clock: Cell::new(0),
            generation: Cell::new(0),
        }
    }

    fn tick(&self) -> u64 {
        let now = self.clock.get() + 1;
        self.clock.set(now);
        now
    }

    pub fn get<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let now = self.tick();
        let mut entries = self.entries.borrow_mut();
        let entry = entries.get_mut(key)?;
        entry.last_used = now;
        entry.value.downcast_ref::<T>().cloned()
    }

    pub fn insert<T: 'static>(&self, key: QueryKey, value: T) {
        let now = self.tick();
        let mut entries = self.entries.borrow_mut();
        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                debug!(key = ?oldest.segments(), "evicting least recently used query");
                entries.remove(&oldest);
            }
        }
        entries.insert(
            key,
            CacheEntry {
                value: Rc::new(value),
                last_used: now,
            },
        );
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// 删除所有以 `prefix` 开头的键，返回删除数量
    pub fn invalidate_prefix(&self, prefix: &[&str]) -> usize {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - entries.len();
        self.generation.set(self.generation.get() + 1);
        debug!(?prefix, removed, "invalidated queries");
        removed
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

// =========================================================
// 站点查询 (Site Queries)
// =========================================================

/// 站点列表的查询参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteListParams {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub sort: SortKey,
}

impl Default for SiteListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: String::new(),
            sort: SortKey::default(),
        }
    }
}

impl SiteListParams {
    pub fn key(&self) -> QueryKey {
        QueryKey::new([
            KEY_SITES.to_string(),
            self.page.to_string(),
            self.limit.to_string(),
            self.search.trim().to_string(),
            self.sort.as_str().to_string(),
        ])
    }

    pub fn to_request(&self) -> ListSitesRequest {
        ListSitesRequest {
            page: self.page.max(1),
            limit: self.limit.max(1),
            search: Some(self.search.clone()),
            sort: self.sort,
        }
    }

    /// 搜索词或排序变化时回到第一页
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
            ..self
        }
    }

    pub fn with_sort(self, sort: SortKey) -> Self {
        Self {
            sort,
            page: 1,
            ..self
        }
    }
}

pub fn site_info_key(id: &str) -> QueryKey {
    QueryKey::new([KEY_SITE_INFO, id])
}

pub struct SiteQueries<C, N, S> {
    client: Rc<ApiClient<C, N, S>>,
    cache: Rc<QueryCache>,
}

impl<C, N, S> Clone for SiteQueries<C, N, S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<C, N, S> SiteQueries<C, N, S>
where
    C: HttpTransport,
    N: Navigator,
    S: KeyValueStore,
{
    pub fn new(client: Rc<ApiClient<C, N, S>>, cache: Rc<QueryCache>) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// 分页列出站点
    pub async fn list(&self, params: &SiteListParams) -> Result<SitePage, ApiError> {
        let key = params.key();
        if let Some(hit) = self.cache.get::<SitePage>(&key) {
            return Ok(hit);
        }
        let page = self.client.list_sites(&params.to_request()).await?;
        self.cache.insert(key, page.clone());
        Ok(page)
    }

    /// 创建站点，成功后所有站点列表失效
    pub async fn create(&self, payload: &CreateSiteRequest) -> Result<Site, ApiError> {
        let site = self.client.create_site(payload).await?;
        self.cache.invalidate_prefix(&[KEY_SITES]);
        Ok(site)
    }

    pub async fn info(&self, id: &str) -> Result<SiteInfo, ApiError> {
        let key = site_info_key(id);
        if let Some(hit) = self.cache.get::<SiteInfo>(&key) {
            return Ok(hit);
        }
        let info = self.client.site_info(id).await?;
        self.cache.insert(key, info.clone());
        Ok(info)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_site(id).await?;
        self.cache.invalidate_prefix(&[KEY_SITES]);
        self.cache.invalidate_prefix(&[KEY_SITE_INFO, id]);
        Ok(())
    }

    pub async fn analyse(&self, id: &str) -> Result<(), ApiError> {
        self.client.analyse_site(id).await?;
        self.cache.invalidate_prefix(&[KEY_SITES]);
        self.cache.invalidate_prefix(&[KEY_SITE_INFO, id]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{FakeBackend, harness};
    use crate::navigation::MemoryNavigator;
    use crate::storage::MemoryStore;

    type TestQueries = SiteQueries<Rc<FakeBackend>, MemoryNavigator, MemoryStore>;

    fn queries(backend: FakeBackend) -> (TestQueries, Rc<FakeBackend>) {
        let h = harness(backend, "/");
        (SiteQueries::new(h.client, Rc::new(QueryCache::new())), h.backend)
    }

    #[test]
    fn test_key_prefix_matching() {
        let key = SiteListParams::default().key();
        assert_eq!(key.segments()[0], "sites");
        assert!(key.starts_with(&["sites"]));
        assert!(!key.starts_with(&["site-info"]));
        assert!(site_info_key("42").starts_with(&["site-info", "42"]));
        assert!(!site_info_key("42").starts_with(&["site-info", "42", "x"]));
    }

    #[test]
    fn test_search_and_sort_reset_page() {
        let params = SiteListParams {
            page: 4,
            ..SiteListParams::default()
        };
        assert_eq!(params.clone().with_search("docs").page, 1);
        assert_eq!(params.with_sort(SortKey::TitleAsc).page, 1);
    }

    #[test]
    fn test_cache_evicts_least_recently_used_beyond_capacity() {
        let cache = QueryCache::with_capacity(2);
        let first = SiteListParams::default();
        let second = first.clone().with_search("a");
        let third = first.clone().with_search("b");

        cache.insert(first.key(), 1u32);
        cache.insert(second.key(), 2u32);
        // 读取使第一个键变为最近使用
        assert_eq!(cache.get::<u32>(&first.key()), Some(1));
        cache.insert(third.key(), 3u32);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&first.key()));
        assert!(!cache.contains(&second.key()));
        assert!(cache.contains(&third.key()));

        // 覆盖已有键不触发淘汰
        cache.insert(third.key(), 4u32);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get::<u32>(&third.key()), Some(4));
    }

    #[test]
    fn test_cache_stays_bounded_over_many_params() {
        let cache = QueryCache::new();
        for page in 1..=200u32 {
            let params = SiteListParams {
                page,
                ..SiteListParams::default()
            };
            cache.insert(params.key(), page);
        }
        assert_eq!(cache.len(), DEFAULT_CACHE_CAPACITY);
    }

    #[tokio::test]
    async fn test_list_is_cached_per_key() {
        let (queries, backend) = queries(FakeBackend::new());
        let params = SiteListParams::default();

        queries.list(&params).await.unwrap();
        queries.list(&params).await.unwrap();
        assert_eq!(backend.list_calls.get(), 1);

        queries.list(&params.clone().with_search("x")).await.unwrap();
        assert_eq!(backend.list_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_create_invalidates_list_and_new_site_appears() {
        let (queries, backend) = queries(FakeBackend::new());
        let params = SiteListParams::default();

        let before = queries.list(&params).await.unwrap();
        assert!(before.data.is_empty());
        let generation = queries.cache().generation();

        let created = queries
            .create(&CreateSiteRequest {
                site_title: "Example".to_string(),
                site_url: "https://example.com".to_string(),
            })
            .await
            .unwrap();
        assert!(queries.cache().generation() > generation);
        assert!(!queries.cache().contains(&params.key()));

        let after = queries.list(&params).await.unwrap();
        assert_eq!(backend.list_calls.get(), 2);
        assert_eq!(after.meta.total, 1);
        assert_eq!(after.data[0], created);
        assert_eq!(after.data[0].site_title, "Example");
    }

    #[tokio::test]
    async fn test_delete_drops_cached_info() {
        let (queries, backend) = queries(FakeBackend::new());
        let site = backend.seed_site("Docs", "https://docs.example.com");

        queries.info(&site.id).await.unwrap();
        assert!(queries.cache().contains(&site_info_key(&site.id)));

        queries.delete(&site.id).await.unwrap();
        assert!(!queries.cache().contains(&site_info_key(&site.id)));
        assert!(queries.info(&site.id).await.is_err());
    }

    #[tokio::test]
    async fn test_failed_query_is_not_cached() {
        let backend = FakeBackend::new();
        backend.offline.set(true);
        let (queries, backend) = queries(backend);

        assert!(queries.list(&SiteListParams::default()).await.is_err());
        assert!(queries.cache().is_empty());

        backend.offline.set(false);
        assert!(queries.list(&SiteListParams::default()).await.is_ok());
    }
}
