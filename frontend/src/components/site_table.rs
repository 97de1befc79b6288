use autotest_client::shared::Site;
use leptos::prelude::*;

use crate::components::icons::{Globe, RefreshCw, Trash2};
use crate::components::loader::InlineLoader;
use crate::components::status_badge::StatusBadge;
use crate::web::router::Link;

/// 站点列表表格
#[component]
pub fn SiteTable(
    #[prop(into)] sites: Signal<Vec<Site>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] on_analyse: Callback<String>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    let is_empty = move || sites.with(Vec::is_empty);

    view! {
        <div class="overflow-x-auto w-full">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"URL"</th>
                        <th>"Status"</th>
                        <th class="hidden md:table-cell">"Created"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || loading.get() && is_empty()>
                        <tr>
                            <td colspan="5"><InlineLoader label=" Loading..." /></td>
                        </tr>
                    </Show>
                    <Show when=move || !loading.get() && is_empty()>
                        <tr>
                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                "No sites yet. Add one to get started."
                            </td>
                        </tr>
                    </Show>
                    <For
                        each=move || sites.get()
                        key=|site| (site.id.clone(), site.status)
                        children=move |site| {
                            let analyse_id = site.id.clone();
                            let delete_id = site.id.clone();
                            let created = site
                                .created_on
                                .map(|t| t.format_date())
                                .unwrap_or_else(|| "-".to_string());
                            view! {
                                <tr>
                                    <td class="font-medium">
                                        <Link to=format!("/site-info/{}", site.id) class="link link-hover">
                                            {site.site_title.clone()}
                                        </Link>
                                    </td>
                                    <td>
                                        <div class="flex items-center gap-2 font-mono text-sm opacity-70">
                                            <Globe attr:class="h-4 w-4 opacity-50" />
                                            {site.site_url.clone()}
                                        </div>
                                    </td>
                                    <td><StatusBadge status=site.status /></td>
                                    <td class="hidden md:table-cell text-sm opacity-70">{created}</td>
                                    <td>
                                        <div class="flex justify-end gap-1">
                                            <button
                                                class="btn btn-ghost btn-sm btn-square"
                                                title="Analyse"
                                                on:click=move |_| on_analyse.run(analyse_id.clone())
                                            >
                                                <RefreshCw attr:class="h-4 w-4" />
                                            </button>
                                            <button
                                                class="btn btn-ghost btn-sm btn-square text-error"
                                                title="Delete"
                                                on:click=move |_| on_delete.run(delete_id.clone())
                                            >
                                                <Trash2 attr:class="h-4 w-4" />
                                            </button>
                                        </div>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
