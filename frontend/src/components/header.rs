use autotest_client::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use crate::api::use_api;
use crate::auth::{logout, use_auth};
use crate::components::icons::{LogOut, PanelLeft};
use crate::toast::use_toast;
use crate::web::router::use_router;

#[component]
pub fn Header(set_collapsed: WriteSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let toast = use_toast();
    let router = use_router();

    let user = auth.user();
    let is_admin = auth.is_admin();

    let title = move || match router.current_route().get() {
        AppRoute::SiteInfo { section, .. } => section.title().to_string(),
        AppRoute::Page => "Pages".to_string(),
        AppRoute::User => "Users".to_string(),
        AppRoute::Settings => "Settings".to_string(),
        _ => "Sites".to_string(),
    };

    let on_logout = move |_| {
        spawn_local(async move {
            if let Err(e) = logout(&auth, &api).await {
                warn!(error = %e, "logout failed");
                toast.error(e.user_message());
            }
        });
    };

    view! {
        <div class="navbar bg-base-100 shadow px-4">
            <div class="flex-1 gap-2">
                <button class="btn btn-ghost btn-square btn-sm" on:click=move |_| set_collapsed.update(|c| *c = !*c)>
                    <PanelLeft attr:class="h-5 w-5" />
                </button>
                <h2 class="text-lg font-semibold">{title}</h2>
            </div>
            <div class="flex-none gap-3">
                {move || user.get().map(|u| view! {
                    <div class="flex items-center gap-2">
                        <div class="avatar placeholder">
                            <div class="bg-neutral text-neutral-content w-8 rounded-full">
                                <span class="text-sm">{u.initial()}</span>
                            </div>
                        </div>
                        <div class="hidden md:flex flex-col leading-tight">
                            <span class="text-sm font-medium">{u.name.clone()}</span>
                            <span class="text-xs text-base-content/60">{u.email.clone()}</span>
                        </div>
                        <Show when=move || is_admin.get()>
                            <span class="badge badge-secondary badge-sm">"Admin"</span>
                        </Show>
                    </div>
                })}
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Log out"
                </button>
            </div>
        </div>
    }
}
