//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const NETWORK_ISSUE_PATH: &str = "/network-issue";
pub const DASHBOARD_PATH: &str = "/";

/// 站点详情下的子页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteSection {
    Overview,
    SitePage,
    TestScenario,
    TestSuite,
    Configuration,
    Schedule,
}

impl SiteSection {
    fn from_segment(segment: Option<&str>) -> Option<Self> {
        match segment {
            None => Some(Self::Overview),
            Some("site-page") => Some(Self::SitePage),
            Some("test-scenario") => Some(Self::TestScenario),
            Some("test-suite") => Some(Self::TestSuite),
            Some("configuration") => Some(Self::Configuration),
            Some("schedule") => Some(Self::Schedule),
            Some(_) => None,
        }
    }

    fn segment(&self) -> Option<&'static str> {
        match self {
            Self::Overview => None,
            Self::SitePage => Some("site-page"),
            Self::TestScenario => Some("test-scenario"),
            Self::TestSuite => Some("test-suite"),
            Self::Configuration => Some("configuration"),
            Self::Schedule => Some("schedule"),
        }
    }

    /// 页面标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Site Info",
            Self::SitePage => "Page",
            Self::TestScenario => "Test Scenario",
            Self::TestSuite => "Test Suite",
            Self::Configuration => "Configuration",
            Self::Schedule => "Schedule Test Case",
        }
    }
}

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    Login,
    Register,
    NetworkIssue,
    /// 站点列表 (默认路由)
    #[default]
    Dashboard,
    Page,
    User,
    Settings,
    SiteInfo { id: String, section: SiteSection },
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        // 去掉查询参数、锚点和结尾的斜杠
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Dashboard,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["network-issue"] => Self::NetworkIssue,
            ["page"] => Self::Page,
            ["user"] => Self::User,
            ["settings"] => Self::Settings,
            ["site-info", id, rest @ ..] if rest.len() <= 1 => {
                match SiteSection::from_segment(rest.first().copied()) {
                    Some(section) => Self::SiteInfo {
                        id: (*id).to_string(),
                        section,
                    },
                    None => Self::NotFound,
                }
            }
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_string(),
            Self::Register => REGISTER_PATH.to_string(),
            Self::NetworkIssue => NETWORK_ISSUE_PATH.to_string(),
            Self::Dashboard => DASHBOARD_PATH.to_string(),
            Self::Page => "/page".to_string(),
            Self::User => "/user".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::SiteInfo { id, section } => match section.segment() {
                Some(segment) => format!("/site-info/{id}/{segment}"),
                None => format!("/site-info/{id}"),
            },
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 登录、注册、网络异常页不需要认证，也不参与 401 刷新流程
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Register | Self::NetworkIssue)
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !self.is_public() && !matches!(self, Self::NotFound)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 路由对应的侧边栏条目 id，用于高亮当前条目
    pub fn sidebar_item_id(&self) -> Option<&'static str> {
        match self {
            Self::Dashboard => Some("site"),
            Self::Page => Some("page"),
            Self::User => Some("user"),
            Self::Settings => Some("settings"),
            Self::SiteInfo { section, .. } => Some(match section {
                SiteSection::Overview => "site-info",
                SiteSection::SitePage => "site-info-page",
                SiteSection::TestScenario => "test-scenario",
                SiteSection::TestSuite => "test-suite",
                SiteSection::Configuration => "configuration",
                SiteSection::Schedule => "schedule-test",
            }),
            _ => None,
        }
    }

    /// 站点详情路由中的站点 id
    pub fn site_id(&self) -> Option<&str> {
        match self {
            Self::SiteInfo { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_top_level_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path(""), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/settings?tab=1"), AppRoute::Settings);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn test_parse_site_info_routes() {
        assert_eq!(
            AppRoute::from_path("/site-info/42"),
            AppRoute::SiteInfo {
                id: "42".to_string(),
                section: SiteSection::Overview
            }
        );
        assert_eq!(
            AppRoute::from_path("/site-info/42/test-suite"),
            AppRoute::SiteInfo {
                id: "42".to_string(),
                section: SiteSection::TestSuite
            }
        );
        assert_eq!(AppRoute::from_path("/site-info"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/site-info/42/bogus"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/site-info/42/schedule/x"), AppRoute::NotFound);
    }

    #[test]
    fn test_path_round_trip() {
        for path in [
            "/",
            "/login",
            "/register",
            "/network-issue",
            "/page",
            "/user",
            "/settings",
            "/site-info/7",
            "/site-info/7/site-page",
            "/site-info/7/test-scenario",
            "/site-info/7/configuration",
            "/site-info/7/schedule",
        ] {
            assert_eq!(AppRoute::from_path(path).to_path(), path);
        }
    }

    #[test]
    fn test_auth_properties() {
        assert!(AppRoute::Login.is_public());
        assert!(AppRoute::NetworkIssue.is_public());
        assert!(!AppRoute::NetworkIssue.should_redirect_when_authenticated());
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
        assert_eq!(
            AppRoute::from_path("/site-info/9/schedule").sidebar_item_id(),
            Some("schedule-test")
        );
    }
}
