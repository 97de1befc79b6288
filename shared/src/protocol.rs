use crate::{CreateSiteRequest, LoginRequest, RegisterRequest, Site, SiteListResponse, SortKey, User};
use serde::{
    Deserialize, Serialize,
    de::{DeserializeOwned, IgnoredAny},
};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Endpoints that only acknowledge (`{"message": ...}` or an empty 204 body)
/// declare `IgnoredAny` as their response.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path relative to the API base.
    fn path(&self) -> String;

    /// Query-string pairs, for GET endpoints.
    fn query(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

// =========================================================
// Auth
// =========================================================

pub const PATH_LOGIN: &str = "/auth/login";
pub const PATH_REGISTER: &str = "/auth/register";
pub const PATH_ME: &str = "/auth/me";
pub const PATH_LOGOUT: &str = "/auth/logout";
pub const PATH_REFRESH: &str = "/auth/refresh";

impl ApiRequest for LoginRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PATH_LOGIN.to_string()
    }
}

impl ApiRequest for RegisterRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PATH_REGISTER.to_string()
    }
}

/// Fetch the current user ("who am I")
#[derive(Debug, Serialize, Deserialize)]
pub struct MeRequest;

impl ApiRequest for MeRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PATH_ME.to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PATH_LOGOUT.to_string()
    }
}

/// Exchange the refresh cookie for a new session
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshRequest;

impl ApiRequest for RefreshRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PATH_REFRESH.to_string()
    }
}

// =========================================================
// Sites
// =========================================================

pub const PATH_SITES: &str = "/sites";

/// List sites, paginated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSitesRequest {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub sort: SortKey,
}

impl ApiRequest for ListSitesRequest {
    type Response = SiteListResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PATH_SITES.to_string()
    }

    fn query(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        pairs.push(("sort".to_string(), self.sort.as_str().to_string()));
        pairs
    }
}

impl ApiRequest for CreateSiteRequest {
    type Response = Site;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PATH_SITES.to_string()
    }
}

/// Fetch a single site
#[derive(Debug, Serialize, Deserialize)]
pub struct GetSiteRequest {
    pub id: String,
}

impl ApiRequest for GetSiteRequest {
    type Response = Site;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{PATH_SITES}/{}", self.id)
    }
}

/// Delete a site (204 on success)
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteSiteRequest {
    pub id: String,
}

impl ApiRequest for DeleteSiteRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{PATH_SITES}/{}", self.id)
    }
}

/// Trigger background analysis of a site
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyseSiteRequest {
    pub id: String,
}

impl ApiRequest for AnalyseSiteRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{PATH_SITES}/analyse/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sites_query_omits_blank_search() {
        let req = ListSitesRequest {
            page: 2,
            limit: 20,
            search: Some("   ".to_string()),
            sort: SortKey::TitleAsc,
        };
        let query = req.query();
        assert_eq!(
            query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "20".to_string()),
                ("sort".to_string(), "title_asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_site_paths() {
        let id = "42".to_string();
        assert_eq!(GetSiteRequest { id: id.clone() }.path(), "/sites/42");
        assert_eq!(AnalyseSiteRequest { id }.path(), "/sites/analyse/42");
        assert!(!<GetSiteRequest as ApiRequest>::METHOD.has_body());
        assert!(<CreateSiteRequest as ApiRequest>::METHOD.has_body());
    }
}
