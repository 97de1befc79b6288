use leptos::prelude::*;

use crate::components::header::Header;
use crate::components::sidebar::Sidebar;

/// 已登录页面的外框：侧边栏、顶栏与内容区
#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    let (collapsed, set_collapsed) = signal(false);

    view! {
        <div class="flex min-h-screen bg-base-200 font-sans">
            <Sidebar collapsed=collapsed />
            <div class="flex-1 flex flex-col min-w-0">
                <Header set_collapsed=set_collapsed />
                <main class="flex-1 p-4 md:p-8">
                    <div class="max-w-7xl mx-auto space-y-6">{children()}</div>
                </main>
            </div>
        </div>
    }
}
