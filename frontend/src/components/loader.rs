use leptos::prelude::*;

/// 整页加载状态
#[component]
pub fn FullPageLoader() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 区块内加载状态
#[component]
pub fn InlineLoader(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2 py-8 text-base-content/50">
            <span class="loading loading-spinner loading-md"></span>
            {label}
        </div>
    }
}
