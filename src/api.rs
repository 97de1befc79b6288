use autotest_shared::protocol::{
    AnalyseSiteRequest, DeleteSiteRequest, GetSiteRequest, ListSitesRequest, LogoutRequest,
    MeRequest,
};
use autotest_shared::{CreateSiteRequest, LoginRequest, RegisterRequest, Site, SiteInfo, User};
use tracing::{info, warn};

use crate::client::{ApiClient, build_request};
use crate::error::ApiError;
use crate::navigation::Navigator;
use crate::pagination::SitePage;
use crate::request::HttpTransport;
use crate::session::SessionStore;
use crate::storage::KeyValueStore;

// =========================================================
// 业务接口: 认证 (Auth)
// =========================================================

impl<C, N, S> ApiClient<C, N, S>
where
    C: HttpTransport,
    N: Navigator,
    S: KeyValueStore,
{
    /// 登录并保存返回的用户
    ///
    /// bearer 模式下同时保存响应中的 `access_token`。
    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, ApiError> {
        let resp = self.execute(build_request(credentials)?).await?;
        self.store_token(&resp);
        let user: User = resp.json()?;
        if let Err(e) = SessionStore::save_user(self.durable(), &user) {
            warn!(error = %e, "failed to persist user after login");
        }
        info!(user = %user.id, "logged in");
        Ok(user)
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<User, ApiError> {
        self.call(payload).await
    }

    /// 获取当前用户 ("who am I")
    pub async fn me(&self) -> Result<User, ApiError> {
        self.call(&MeRequest).await
    }

    /// 登出成功后清空持久存储
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.call(&LogoutRequest).await?;
        self.durable().clear();
        info!("logged out");
        Ok(())
    }

    // =========================================================
    // 业务接口: 站点 (Sites)
    // =========================================================

    pub async fn list_sites(&self, request: &ListSitesRequest) -> Result<SitePage, ApiError> {
        self.call(request).await.map(SitePage::from)
    }

    pub async fn create_site(&self, payload: &CreateSiteRequest) -> Result<Site, ApiError> {
        let site = self.call(payload).await?;
        info!(site = %site.id, "site created");
        Ok(site)
    }

    pub async fn site_info(&self, id: &str) -> Result<SiteInfo, ApiError> {
        self.call(&GetSiteRequest { id: id.to_string() })
            .await
            .map(SiteInfo::from)
    }

    pub async fn delete_site(&self, id: &str) -> Result<(), ApiError> {
        self.call(&DeleteSiteRequest { id: id.to_string() }).await?;
        Ok(())
    }

    /// 触发站点的后台分析
    pub async fn analyse_site(&self, id: &str) -> Result<(), ApiError> {
        self.call(&AnalyseSiteRequest { id: id.to_string() }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{FakeBackend, harness, harness_with};
    use crate::config::{AuthStrategy, ClientConfig};
    use crate::error::ApiError;
    use crate::route::LOGIN_PATH;
    use crate::session::SessionStore;
    use crate::storage::{KeyValueStore, STORAGE_KEY_SIDEBAR, STORAGE_KEY_TOKEN};
    use autotest_shared::{LoginRequest, RegisterRequest};

    fn credentials(password: &str) -> LoginRequest {
        LoginRequest {
            email: "ann@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_user() {
        let h = harness(FakeBackend::expired(), LOGIN_PATH);
        let user = h.client.login(&credentials("secret")).await.unwrap();

        assert_eq!(user.email, "ann@example.com");
        assert!(user.is_admin());
        assert_eq!(SessionStore::load_user(&h.durable), Some(user));
        assert!(h.durable.get(STORAGE_KEY_TOKEN).is_none());
    }

    #[tokio::test]
    async fn test_bearer_login_stores_token() {
        let backend = FakeBackend::expired();
        backend.issue_token.replace(Some("tok-9".to_string()));
        let config = ClientConfig::default().with_auth(AuthStrategy::BearerToken {
            storage_key: STORAGE_KEY_TOKEN.to_string(),
        });
        let h = harness_with(backend, LOGIN_PATH, config);

        h.client.login(&credentials("secret")).await.unwrap();
        assert_eq!(h.durable.get(STORAGE_KEY_TOKEN).as_deref(), Some("tok-9"));
    }

    #[tokio::test]
    async fn test_register_surfaces_detail_message() {
        let h = harness(FakeBackend::new(), "/register");
        let err = h
            .client
            .register(&RegisterRequest {
                firstname: "Ann".to_string(),
                lastname: "Lee".to_string(),
                username: "ann".to_string(),
                email: "ann@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[tokio::test]
    async fn test_logout_clears_durable_state() {
        let h = harness(FakeBackend::new(), "/");
        h.durable.set(STORAGE_KEY_SIDEBAR, "root");
        h.client.logout().await.unwrap();

        assert!(h.durable.is_empty());
        assert!(!h.backend.session_valid.get());

        h.backend.refresh_ok.set(false);
        assert_eq!(
            h.client.me().await.unwrap_err(),
            ApiError::RefreshFailed("Refresh token expired".to_string())
        );
        assert_eq!(h.navigator.redirects(), vec![LOGIN_PATH.to_string()]);
    }

    #[tokio::test]
    async fn test_site_operations() {
        let h = harness(FakeBackend::new(), "/");
        let seeded = h.backend.seed_site("Docs", "https://docs.example.com");

        let info = h.client.site_info(&seeded.id).await.unwrap();
        assert_eq!(info.title, "Docs");
        assert_eq!(info.url, "https://docs.example.com");

        h.client.analyse_site(&seeded.id).await.unwrap();
        h.client.delete_site(&seeded.id).await.unwrap();
        assert!(h.backend.sites.borrow().is_empty());
    }
}
