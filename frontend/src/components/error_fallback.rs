use leptos::prelude::*;

use crate::components::icons::AlertTriangle;
use crate::web::router::hard_reload;

/// 顶层错误边界的兜底界面
#[component]
pub fn ErrorFallback(errors: ArcRwSignal<Errors>) -> impl IntoView {
    let messages = move || {
        errors
            .get()
            .into_iter()
            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
            .collect_view()
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md flex flex-col items-center gap-4">
                    <AlertTriangle attr:class="h-10 w-10 text-error" />
                    <h1 class="text-2xl font-bold">"Something went wrong"</h1>
                    <ul class="text-sm text-base-content/70">{messages}</ul>
                    <button class="btn btn-primary" on:click=move |_| hard_reload()>
                        "Reload page"
                    </button>
                </div>
            </div>
        </div>
    }
}
