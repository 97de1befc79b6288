use autotest_client::shared::SiteStatus;
use leptos::prelude::*;

#[component]
pub fn StatusBadge(status: SiteStatus) -> impl IntoView {
    let class = match status {
        SiteStatus::New => "badge badge-info badge-outline",
        SiteStatus::Processing => "badge badge-warning",
        SiteStatus::Pause => "badge badge-ghost",
        SiteStatus::Done => "badge badge-success",
    };
    view! { <span class=class>{status.as_str()}</span> }
}
