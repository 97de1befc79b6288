//! 站点列表页
//!
//! 查询参数 (页码、条数、搜索、排序) 与 API 修订号共同驱动列表重新加载。

use autotest_client::shared::{CreateSiteRequest, SortKey};
use autotest_client::{PageWindow, SiteListParams, SitePage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, warn};

use crate::api::use_api;
use crate::components::add_site_dialog::AddSiteDialog;
use crate::components::icons::Search;
use crate::components::pagination::Pagination;
use crate::components::site_table::SiteTable;
use crate::toast::use_toast;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();

    let params = RwSignal::new(SiteListParams::default());
    let (page, set_page) = signal(Option::<SitePage>::None);
    let (loading, set_loading) = signal(true);
    let (search_input, set_search_input) = signal(String::new());
    // 只接受最后一次请求的结果
    let latest = StoredValue::new(0u64);

    Effect::new(move |_| {
        let current = params.get();
        api.revision();

        let ticket = latest.get_value() + 1;
        latest.set_value(ticket);
        set_loading.set(true);

        let queries = api.queries();
        spawn_local(async move {
            let result = queries.list(&current).await;
            if latest.try_get_value() != Some(ticket) {
                debug!(ticket, "dropping stale site list response");
                return;
            }
            match result {
                Ok(data) => {
                    // 删除最后一页的最后一行后页码会越界，退回到最后一页
                    let window =
                        PageWindow::new(current.page, current.limit, data.meta.total).clamped();
                    set_page.set(Some(data));
                    if window.page != current.page {
                        debug!(from = current.page, to = window.page, "clamping site list page");
                        params.update(|p| p.page = window.page);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to load sites");
                    toast.error(e.user_message());
                }
            }
            set_loading.set(false);
        });
    });

    let sites = Signal::derive(move || {
        page.with(|p| p.as_ref().map(|p| p.data.clone()).unwrap_or_default())
    });
    let window = Signal::derive(move || {
        let current = params.get();
        let total = page.with(|p| p.as_ref().map(|p| p.meta.total).unwrap_or(0));
        PageWindow::new(current.page, current.limit, total)
    });

    let on_page_change = move |next: PageWindow| {
        params.update(|p| {
            p.page = next.page;
            p.limit = next.limit;
        });
    };

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let search = search_input.get_untracked();
        params.update(|p| *p = p.clone().with_search(search));
    };

    let on_sort = move |ev: leptos::web_sys::Event| {
        if let Some(sort) = SortKey::parse(&event_target_value(&ev)) {
            params.update(|p| *p = p.clone().with_sort(sort));
        }
    };

    let handle_add = move |req: CreateSiteRequest| {
        let queries = api.queries();
        spawn_local(async move {
            match queries.create(&req).await {
                Ok(_) => {
                    toast.success("Site added");
                    api.bump();
                }
                Err(e) => toast.error(e.user_message()),
            }
        });
    };

    let handle_analyse = move |id: String| {
        let queries = api.queries();
        spawn_local(async move {
            match queries.analyse(&id).await {
                Ok(()) => {
                    toast.success("Analysis started");
                    api.bump();
                }
                Err(e) => toast.error(e.user_message()),
            }
        });
    };

    let handle_delete = move |id: String| {
        let queries = api.queries();
        spawn_local(async move {
            match queries.delete(&id).await {
                Ok(()) => {
                    toast.success("Site deleted");
                    api.bump();
                }
                Err(e) => toast.error(e.user_message()),
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex flex-wrap items-center justify-between gap-4 p-6 pb-2">
                    <div>
                        <h3 class="card-title">"Sites"</h3>
                        <p class="text-base-content/70 text-sm">"Manage the sites under test."</p>
                    </div>
                    <div class="flex flex-wrap items-center gap-2">
                        <form class="join" on:submit=on_search>
                            <input
                                type="search"
                                class="input input-bordered input-sm join-item"
                                placeholder="Search sites"
                                prop:value=search_input
                                on:input=move |ev| set_search_input.set(event_target_value(&ev))
                            />
                            <button type="submit" class="btn btn-sm join-item">
                                <Search attr:class="h-4 w-4" />
                            </button>
                        </form>
                        <select class="select select-bordered select-sm" on:change=on_sort>
                            {SortKey::ALL
                                .into_iter()
                                .map(|key| view! {
                                    <option value=key.as_str() selected=move || params.get().sort == key>
                                        {key.label()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                        <AddSiteDialog on_add=handle_add />
                    </div>
                </div>

                <SiteTable
                    sites=sites
                    loading=loading
                    on_analyse=handle_analyse
                    on_delete=handle_delete
                />
                <Pagination window=window on_change=on_page_change />
            </div>
        </div>
    }
}
