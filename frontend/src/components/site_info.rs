//! 站点详情页
//!
//! 概览分区展示站点信息与统计，其余分区暂时只有标题。

use autotest_client::route::SiteSection;
use autotest_client::shared::SiteInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use crate::api::use_api;
use crate::components::loader::InlineLoader;
use crate::components::placeholder::Placeholder;
use crate::components::status_badge::StatusBadge;
use crate::toast::use_toast;

#[component]
pub fn SiteInfoPage(id: String, section: SiteSection) -> impl IntoView {
    match section {
        SiteSection::Overview => view! { <SiteOverview id=id /> }.into_any(),
        other => view! { <Placeholder title=other.title() /> }.into_any(),
    }
}

#[component]
fn SiteOverview(id: String) -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let (info, set_info) = signal(Option::<SiteInfo>::None);
    let (failed, set_failed) = signal(false);

    Effect::new(move |_| {
        api.revision();
        let queries = api.queries();
        let id = id.clone();
        spawn_local(async move {
            match queries.info(&id).await {
                Ok(data) => set_info.set(Some(data)),
                Err(e) => {
                    warn!(site = %id, error = %e, "failed to load site info");
                    set_failed.set(true);
                    toast.error(e.user_message());
                }
            }
        });
    });

    view! {
        {move || match info.get() {
            Some(info) => view! { <SiteSummary info=info /> }.into_any(),
            None if failed.get() => view! {
                <div class="alert alert-error">"Could not load this site."</div>
            }
            .into_any(),
            None => view! { <InlineLoader /> }.into_any(),
        }}
    }
}

#[component]
fn SiteSummary(info: SiteInfo) -> impl IntoView {
    let created = info.created_at.map(|t| t.format_datetime()).unwrap_or_else(|| "-".to_string());
    let updated = info.updated_at.map(|t| t.format_datetime()).unwrap_or_else(|| "-".to_string());

    let stats = info
        .stats
        .entries()
        .into_iter()
        .map(|(label, value)| {
            view! {
                <div class="stat">
                    <div class="stat-title">{label}</div>
                    <div class="stat-value text-primary">{value}</div>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <h3 class="card-title">{info.title}</h3>
                    <StatusBadge status=info.analyze_status />
                </div>
                <a class="link link-primary font-mono text-sm" href=info.url.clone() target="_blank">
                    {info.url.clone()}
                </a>
                <div class="text-sm text-base-content/70">
                    "Created " {created} " · Updated " {updated}
                </div>
            </div>
        </div>
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100 flex-wrap">
            {stats}
        </div>
    }
}
