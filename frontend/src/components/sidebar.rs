//! 侧边栏
//!
//! 每次路由变化都重新解析侧边栏定义，解析结果同时写入 localStorage，
//! 未匹配任何规则的页面沿用上一次的侧边栏。

use autotest_client::SidebarResolver;
use leptos::prelude::*;

use crate::components::icons::{ArrowLeft, sidebar_icon};
use crate::web::WebStorage;
use crate::web::router::{Link, use_router};

#[component]
pub fn Sidebar(collapsed: ReadSignal<bool>) -> impl IntoView {
    let router = use_router();

    let content = move || {
        let route = router.current_route().get();
        let path = route.to_path();
        let resolved = SidebarResolver::standard().resolve(&path, &WebStorage::Local);
        let active = route.sidebar_item_id();

        let back = resolved.back().map(|back| {
            view! {
                <li class="mb-2">
                    <Link to=back.to class="text-base-content/70">
                        <ArrowLeft attr:class="h-4 w-4" />
                        <span class=move || if collapsed.get() { "hidden" } else { "" }>{back.label}</span>
                    </Link>
                </li>
            }
        });

        let items = resolved
            .items()
            .iter()
            .map(|item| {
                let href = resolved.href_for(item);
                let class = if active == Some(item.id) { "active" } else { "" };
                view! {
                    <li>
                        <Link to=href class=class>
                            {sidebar_icon(item.icon)}
                            <span class=move || if collapsed.get() { "hidden" } else { "" }>{item.label}</span>
                        </Link>
                    </li>
                }
            })
            .collect_view();

        view! {
            {back}
            {items}
        }
    };

    view! {
        <aside class=move || {
            if collapsed.get() {
                "bg-base-100 shadow-xl w-16 transition-all"
            } else {
                "bg-base-100 shadow-xl w-64 transition-all"
            }
        }>
            <div class="p-4 font-bold text-xl text-primary truncate">
                {move || if collapsed.get() { "A" } else { "Autotest" }}
            </div>
            <ul class="menu w-full">{content}</ul>
        </aside>
    }
}
