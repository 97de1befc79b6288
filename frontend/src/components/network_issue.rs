//! 网络异常页
//!
//! 请求因网络不可达失败时整页跳转到这里，"重试"回到失败前的路径。

use leptos::prelude::*;
use tracing::info;

use crate::api::use_api;
use crate::components::icons::WifiOff;
use crate::web::router::hard_navigate;

#[component]
pub fn NetworkIssuePage() -> impl IntoView {
    let api = use_api();

    let on_retry = move |_| {
        let path = api.client().take_restore_path();
        info!(%path, "retrying after network issue");
        hard_navigate(&path);
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md flex flex-col items-center gap-4">
                    <div class="p-4 bg-warning/10 rounded-2xl text-warning">
                        <WifiOff attr:class="h-10 w-10" />
                    </div>
                    <h1 class="text-3xl font-bold">"Network issue"</h1>
                    <p class="text-base-content/70">
                        "We couldn't reach the server. Check your connection and try again."
                    </p>
                    <button class="btn btn-primary" on:click=on_retry>"Try again"</button>
                </div>
            </div>
        </div>
    }
}
