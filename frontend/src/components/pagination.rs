use autotest_client::PageWindow;
use autotest_client::shared::PAGE_SIZE_OPTIONS;
use leptos::prelude::*;

use crate::components::icons::{ChevronLeft, ChevronRight};

/// 分页栏：每页条数、区间文案与翻页按钮
#[component]
pub fn Pagination(
    #[prop(into)] window: Signal<PageWindow>,
    #[prop(into)] on_change: Callback<PageWindow>,
) -> impl IntoView {
    let on_limit = move |ev: leptos::web_sys::Event| {
        if let Ok(limit) = event_target_value(&ev).parse::<u32>() {
            on_change.run(window.get_untracked().with_limit(limit));
        }
    };

    view! {
        <div class="flex flex-wrap items-center justify-between gap-4 p-4">
            <label class="flex items-center gap-2 text-sm">
                "Rows per page"
                <select class="select select-bordered select-sm" on:change=on_limit>
                    {PAGE_SIZE_OPTIONS
                        .into_iter()
                        .map(|size| view! {
                            <option value=size.to_string() selected=move || window.get().limit == size>
                                {size}
                            </option>
                        })
                        .collect_view()}
                </select>
            </label>

            <span class="text-sm text-base-content/70">{move || window.get().summary()}</span>

            <div class="join">
                <button
                    class="join-item btn btn-sm"
                    disabled=move || !window.get().has_prev()
                    on:click=move |_| on_change.run(window.get_untracked().prev())
                >
                    <ChevronLeft attr:class="h-4 w-4" />
                </button>
                <button class="join-item btn btn-sm btn-disabled">
                    {move || {
                        let w = window.get();
                        format!("{} / {}", w.page, w.display_pages())
                    }}
                </button>
                <button
                    class="join-item btn btn-sm"
                    disabled=move || !window.get().has_next()
                    on:click=move |_| on_change.run(window.get_untracked().next())
                >
                    <ChevronRight attr:class="h-4 w-4" />
                </button>
            </div>
        </div>
    }
}
