use autotest_shared::TokenEnvelope;
use autotest_shared::protocol::{ApiRequest, PATH_REFRESH, RefreshRequest};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, TransportError};
use crate::navigation::Navigator;
use crate::refresh::RefreshGate;
use crate::request::{HttpRequest, HttpResponse, HttpTransport};
use crate::route::{DASHBOARD_PATH, LOGIN_PATH, NETWORK_ISSUE_PATH};
use crate::storage::{KeyValueStore, SESSION_KEY_PREVIOUS_PATH};


// =========================================================
// API 客户端 (Request / Response Pipeline)
// =========================================================

/// 带拦截逻辑的 API 客户端
///
/// - 所有请求携带 API 根路径、JSON 请求头和 Cookie
/// - 网络不可达时记录当前路径并跳转到网络异常页
/// - 401 时执行单飞刷新并重放原请求一次，刷新失败则强制登出
pub struct ApiClient<C, N, S> {
    config: ClientConfig,
    transport: C,
    navigator: N,
    /// 持久存储 (localStorage)
    durable: S,
    /// 会话存储 (sessionStorage)
    session: S,
    refresh: RefreshGate,
}

impl<C, N, S> ApiClient<C, N, S>
where
    C: HttpTransport,
    N: Navigator,
    S: KeyValueStore,
{
    pub fn new(config: ClientConfig, transport: C, navigator: N, durable: S, session: S) -> Self {
        Self {
            config,
            transport,
            navigator,
            durable,
            session,
            refresh: RefreshGate::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn durable(&self) -> &S {
        &self.durable
    }

    pub fn refresh_gate(&self) -> &RefreshGate {
        &self.refresh
    }

    /// 调用一个类型化的端点
    pub async fn call<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let req = build_request(request)?;
        self.execute(req).await?.json()
    }

    /// 发送请求并执行完整的拦截流程
    pub async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut req = self.prepare(req);
        let resp = self.send_once(req.clone()).await?;

        if resp.status != 401 || !self.should_refresh(&req) {
            return finish(resp);
        }

        req.retried = true;
        self.refresh_session().await?;

        // 重新附加凭据，bearer 模式下令牌可能已更新
        let req = self.prepare(req);
        debug!(method = req.method.as_str(), path = %req.path, "replaying after refresh");
        let resp = self.send_once(req).await?;
        finish(resp)
    }

    /// 只有未重放过、不是刷新请求本身、且不在公共页面上的 401 才会触发刷新
    pub fn should_refresh(&self, req: &HttpRequest) -> bool {
        !req.retried
            && req.path != PATH_REFRESH
            && !self.config.is_public_path(&self.navigator.current_path())
    }

    /// 取出网络异常前所在的路径，默认回到首页
    pub fn take_restore_path(&self) -> String {
        let path = self
            .session
            .get(SESSION_KEY_PREVIOUS_PATH)
            .filter(|p| !p.is_empty() && p != NETWORK_ISSUE_PATH)
            .unwrap_or_else(|| DASHBOARD_PATH.to_string());
        self.session.delete(SESSION_KEY_PREVIOUS_PATH);
        path
    }

    fn prepare(&self, mut req: HttpRequest) -> HttpRequest {
        req.url = self.config.endpoint_url(&req.path, &req.query);
        req.headers
            .entry("Content-Type".to_string())
            .or_insert_with(|| "application/json".to_string());
        self.config.auth.attach(&mut req, &self.durable);
        req
    }

    async fn send_once(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = req.method;
        let path = req.path.clone();

        match self.transport.send(req).await {
            Ok(resp) => {
                debug!(method = method.as_str(), path = %path, status = resp.status, "response");
                Ok(resp)
            }
            Err(TransportError::Network(reason)) => {
                warn!(method = method.as_str(), path = %path, %reason, "network unreachable");
                self.handle_network_failure();
                Err(ApiError::Network(reason))
            }
            Err(err) => {
                warn!(method = method.as_str(), path = %path, error = %err, "transport error");
                Err(err.into())
            }
        }
    }

    /// 单飞刷新：同一时刻只有一个刷新请求在途
    async fn refresh_session(&self) -> Result<(), ApiError> {
        self.refresh
            .run_exclusive(|| async {
                let req = self.prepare(build_request(&RefreshRequest)?);
                match self.send_once(req).await {
                    Ok(resp) if resp.is_success() => {
                        info!("session refreshed");
                        self.store_token(&resp);
                        Ok(())
                    }
                    Ok(resp) => {
                        let reason = ApiError::from_response(&resp).user_message();
                        self.force_logout();
                        Err(ApiError::RefreshFailed(reason))
                    }
                    // 网络异常已经跳转，不视为登出
                    Err(err @ ApiError::Network(_)) => Err(err),
                    Err(err) => {
                        self.force_logout();
                        Err(ApiError::RefreshFailed(err.to_string()))
                    }
                }
            })
            .await
    }

    /// bearer 模式下保存响应中的访问令牌
    pub(crate) fn store_token(&self, resp: &HttpResponse) {
        let Some(key) = self.config.auth.token_key() else {
            return;
        };
        let token = resp
            .json::<Option<TokenEnvelope>>()
            .ok()
            .flatten()
            .and_then(|t| t.access_token)
            .filter(|t| !t.is_empty());
        if let Some(token) = token
            && !self.durable.set(key, &token)
        {
            warn!(key, "failed to persist access token");
        }
    }

    fn force_logout(&self) {
        warn!("session could not be refreshed, logging out");
        self.durable.clear();
        self.navigator.redirect(LOGIN_PATH);
    }

    fn handle_network_failure(&self) {
        let current = self.navigator.current_path();
        if current == NETWORK_ISSUE_PATH {
            return;
        }
        self.session.set(SESSION_KEY_PREVIOUS_PATH, &current);
        self.navigator.redirect(NETWORK_ISSUE_PATH);
    }
}

/// 把类型化的端点转换为通用请求
pub fn build_request<R: ApiRequest>(request: &R) -> Result<HttpRequest, ApiError> {
    let req = HttpRequest::new(R::METHOD, request.path()).with_query(request.query());
    if R::METHOD.has_body() {
        req.with_json(request)
    } else {
        Ok(req)
    }
}

fn finish(resp: HttpResponse) -> Result<HttpResponse, ApiError> {
    if resp.is_success() {
        Ok(resp)
    } else {
        Err(ApiError::from_response(&resp))
    }
}
