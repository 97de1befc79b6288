//! 侧边栏解析
//!
//! 按声明顺序用路径规则匹配侧边栏定义，第一个匹配者胜出；
//! 没有匹配时退回持久化的上一次定义，再退回第一个定义。

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

use crate::route::DASHBOARD_PATH;
use crate::storage::{KeyValueStore, STORAGE_KEY_SIDEBAR};

/// 侧边栏图标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Dashboard,
    File,
    Tree,
    Checklist,
    Settings,
    Calendar,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: Icon,
    /// 路径模板，`:id` 会被替换为当前站点 id
    pub path: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackLink {
    pub to: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone)]
pub struct SidebarDefinition {
    pub id: &'static str,
    pub rule: Regex,
    pub items: Vec<SidebarItem>,
    pub back: Option<BackLink>,
}

impl SidebarDefinition {
    pub fn matches(&self, path: &str) -> bool {
        self.rule.is_match(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SidebarError {
    #[error("sidebar resolver needs at least one definition")]
    Empty,
    #[error("invalid path rule for sidebar `{id}`: {reason}")]
    InvalidRule { id: &'static str, reason: String },
}

/// 解析来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarSource {
    PathMatch,
    Persisted,
    Default,
}

/// 解析结果
#[derive(Debug, Clone)]
pub struct ResolvedSidebar<'a> {
    pub definition: &'a SidebarDefinition,
    pub source: SidebarSource,
    /// 从路径中提取的站点 id
    pub site_id: Option<String>,
}

impl<'a> ResolvedSidebar<'a> {
    pub fn id(&self) -> &'static str {
        self.definition.id
    }

    pub fn items(&self) -> &'a [SidebarItem] {
        &self.definition.items
    }

    pub fn back(&self) -> Option<&'a BackLink> {
        self.definition.back.as_ref()
    }

    /// 展开条目的路径模板；没有站点 id 时退回首页
    pub fn href_for(&self, item: &SidebarItem) -> String {
        if !item.path.contains(":id") {
            return item.path.to_string();
        }
        match &self.site_id {
            Some(id) => item.path.replace(":id", id),
            None => DASHBOARD_PATH.to_string(),
        }
    }

    /// 展开后路径与当前路径相同的条目
    pub fn active_item(&self, path: &str) -> Option<&'a SidebarItem> {
        let path = normalize(path);
        self.items().iter().find(|item| self.href_for(item) == path)
    }
}

static SITE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/site-info/([^/?#]+)").expect("valid site id pattern"));

static STANDARD: LazyLock<SidebarResolver> = LazyLock::new(|| {
    standard_definitions()
        .and_then(SidebarResolver::new)
        .expect("built-in sidebar table is valid")
});

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    }
}

pub fn site_id_from_path(path: &str) -> Option<String> {
    SITE_ID_PATTERN
        .captures(path)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

pub struct SidebarResolver {
    definitions: Vec<SidebarDefinition>,
}

impl SidebarResolver {
    pub fn new(definitions: Vec<SidebarDefinition>) -> Result<Self, SidebarError> {
        if definitions.is_empty() {
            return Err(SidebarError::Empty);
        }
        Ok(Self { definitions })
    }

    /// 内置的侧边栏表
    pub fn standard() -> &'static SidebarResolver {
        &STANDARD
    }

    pub fn definitions(&self) -> &[SidebarDefinition] {
        &self.definitions
    }

    pub fn find(&self, id: &str) -> Option<&SidebarDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// 解析当前路径对应的侧边栏，并持久化解析出的 id
    pub fn resolve<S: KeyValueStore + ?Sized>(&self, path: &str, store: &S) -> ResolvedSidebar<'_> {
        let (definition, source) = self.select(path, store);
        if store.get(STORAGE_KEY_SIDEBAR).as_deref() != Some(definition.id) {
            store.set(STORAGE_KEY_SIDEBAR, definition.id);
        }
        debug!(path, sidebar = definition.id, ?source, "resolved sidebar");
        ResolvedSidebar {
            definition,
            source,
            site_id: site_id_from_path(path),
        }
    }

    fn select<S: KeyValueStore + ?Sized>(
        &self,
        path: &str,
        store: &S,
    ) -> (&SidebarDefinition, SidebarSource) {
        if let Some(def) = self.definitions.iter().find(|d| d.matches(path)) {
            return (def, SidebarSource::PathMatch);
        }
        if let Some(def) = store
            .get(STORAGE_KEY_SIDEBAR)
            .and_then(|id| self.find(&id))
        {
            return (def, SidebarSource::Persisted);
        }
        (&self.definitions[0], SidebarSource::Default)
    }
}

/// 构造一个侧边栏定义，规则非法时返回错误
pub fn definition(
    id: &'static str,
    rule: &str,
    items: Vec<SidebarItem>,
    back: Option<BackLink>,
) -> Result<SidebarDefinition, SidebarError> {
    let rule = Regex::new(rule).map_err(|e| SidebarError::InvalidRule {
        id,
        reason: e.to_string(),
    })?;
    Ok(SidebarDefinition {
        id,
        rule,
        items,
        back,
    })
}

fn item(id: &'static str, label: &'static str, icon: Icon, path: &'static str) -> SidebarItem {
    SidebarItem {
        id,
        label,
        icon,
        path,
    }
}

fn standard_definitions() -> Result<Vec<SidebarDefinition>, SidebarError> {
    let root = definition(
        "root",
        r"^/($|page$|user|settings)",
        vec![
            item("site", "Site", Icon::Dashboard, "/"),
            item("page", "Page", Icon::File, "/page"),
            item("user", "User", Icon::User, "/user"),
            item("settings", "Settings", Icon::Settings, "/settings"),
        ],
        None,
    )?;
    let site_info = definition(
        "site-info",
        r"^/site-info",
        vec![
            item("site-info", "Site Info", Icon::Dashboard, "/site-info/:id"),
            item("site-info-page", "Page", Icon::File, "/site-info/:id/site-page"),
            item("test-scenario", "Test Scenario", Icon::Tree, "/site-info/:id/test-scenario"),
            item("test-suite", "Test Suite", Icon::Checklist, "/site-info/:id/test-suite"),
            item("configuration", "Configuration", Icon::Settings, "/site-info/:id/configuration"),
            item("schedule-test", "Schedule Test Case", Icon::Calendar, "/site-info/:id/schedule"),
        ],
        Some(BackLink {
            to: DASHBOARD_PATH,
            label: "Back to Menu",
        }),
    )?;
    Ok(vec![root, site_info])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::AppRoute;
    use crate::storage::MemoryStore;

    #[test]
    fn test_path_match_wins_over_persisted() {
        let resolver = SidebarResolver::standard();
        let store = MemoryStore::new();
        store.set(STORAGE_KEY_SIDEBAR, "site-info");

        let resolved = resolver.resolve("/settings", &store);
        assert_eq!(resolved.id(), "root");
        assert_eq!(resolved.source, SidebarSource::PathMatch);
        assert!(resolved.back().is_none());
        assert_eq!(store.get(STORAGE_KEY_SIDEBAR).as_deref(), Some("root"));
    }

    #[test]
    fn test_site_info_has_back_link() {
        let resolver = SidebarResolver::standard();
        let store = MemoryStore::new();

        let resolved = resolver.resolve("/site-info/42", &store);
        assert_eq!(resolved.id(), "site-info");
        assert_eq!(
            resolved.back(),
            Some(&BackLink {
                to: "/",
                label: "Back to Menu"
            })
        );
        assert_eq!(resolved.items().len(), 6);
        assert_eq!(resolved.href_for(&resolved.items()[5]), "/site-info/42/schedule");
        assert_eq!(resolved.active_item("/site-info/42").map(|i| i.id), Some("site-info"));
    }

    #[test]
    fn test_unmatched_path_uses_persisted_then_default() {
        let resolver = SidebarResolver::standard();
        let store = MemoryStore::new();

        let resolved = resolver.resolve("/unknown", &store);
        assert_eq!(resolved.id(), "root");
        assert_eq!(resolved.source, SidebarSource::Default);

        resolver.resolve("/site-info/7/test-suite", &store);
        let resolved = resolver.resolve("/unknown", &store);
        assert_eq!(resolved.id(), "site-info");
        assert_eq!(resolved.source, SidebarSource::Persisted);

        store.set(STORAGE_KEY_SIDEBAR, "gone");
        assert_eq!(resolver.resolve("/unknown", &store).source, SidebarSource::Default);
    }

    #[test]
    fn test_root_rule_is_anchored() {
        let resolver = SidebarResolver::standard();
        let store = MemoryStore::new();
        // `/pages` 不匹配 `page$`
        assert_eq!(
            resolver.resolve("/pages", &store).source,
            SidebarSource::Default
        );
        assert_eq!(
            resolver.resolve("/user/5", &store).source,
            SidebarSource::PathMatch
        );
    }

    #[test]
    fn test_active_item_agrees_with_route_table() {
        let resolver = SidebarResolver::standard();
        let store = MemoryStore::new();
        for path in [
            "/",
            "/page",
            "/settings",
            "/site-info/3/site-page",
            "/site-info/3/configuration",
        ] {
            let resolved = resolver.resolve(path, &store);
            assert_eq!(
                resolved.active_item(path).map(|i| i.id),
                AppRoute::from_path(path).sidebar_item_id(),
                "{path}"
            );
        }
    }

    #[test]
    fn test_template_without_site_id_falls_back_home() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY_SIDEBAR, "site-info");
        let resolved = SidebarResolver::standard().resolve("/unknown", &store);
        assert_eq!(resolved.href_for(&resolved.items()[1]), "/");
    }

    #[test]
    fn test_resolver_rejects_empty_and_bad_rules() {
        assert_eq!(SidebarResolver::new(Vec::new()).err(), Some(SidebarError::Empty));
        assert!(matches!(
            definition("bad", "(", Vec::new(), None),
            Err(SidebarError::InvalidRule { id: "bad", .. })
        ));
    }
}
