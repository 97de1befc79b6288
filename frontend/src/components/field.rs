use autotest_client::validation::FieldErrors;
use leptos::prelude::*;

/// 带行内错误提示的输入框
#[component]
pub fn TextField(
    /// 字段名，同时用作 input id 与错误查找键
    name: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    value: RwSignal<String>,
    errors: ReadSignal<FieldErrors>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(name).map(str::to_string));

    view! {
        <div class="form-control">
            <label class="label" for=name>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=name
                type=input_type
                placeholder=placeholder
                class=move || {
                    if error().is_some() {
                        "input input-bordered input-error w-full"
                    } else {
                        "input input-bordered w-full"
                    }
                }
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <Show when=move || error().is_some()>
                <label class="label">
                    <span class="label-text-alt text-error">{error}</span>
                </label>
            </Show>
        </div>
    }
}
