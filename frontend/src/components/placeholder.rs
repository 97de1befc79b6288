use leptos::prelude::*;

/// 尚未实现内容的页面
#[component]
pub fn Placeholder(title: &'static str) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">{title}</h3>
                <p class="text-base-content/70">"Nothing here yet."</p>
            </div>
        </div>
    }
}
