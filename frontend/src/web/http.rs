//! HTTP 传输层
//!
//! 使用 `web_sys::fetch` 实现客户端核心的 `HttpTransport`。
//! fetch 的 Promise 被拒绝（离线、DNS 失败、CORS 拒绝）统一视为网络异常。

use autotest_client::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

/// 基于浏览器 fetch 的传输层
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    fn build(req: &HttpRequest) -> Result<Request, TransportError> {
        let headers = Headers::new()
            .map_err(|e| TransportError::Request(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| TransportError::Request(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if req.with_credentials {
            opts.set_credentials(RequestCredentials::Include);
        }

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| TransportError::Request(format!("{:?}", e)))
    }

    async fn read_body(response: &Response) -> Result<String, TransportError> {
        let promise = response
            .text()
            .map_err(|e| TransportError::Body(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| TransportError::Body(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| TransportError::Body("无法转换为字符串".to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request = Self::build(&req)?;

        let window = web_sys::window()
            .ok_or_else(|| TransportError::Request("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| TransportError::Network(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| TransportError::Body(format!("Response 类型转换失败: {:?}", e)))?;

        let status = response.status();
        let body = Self::read_body(&response).await?;
        Ok(HttpResponse::new(status, body))
    }
}
