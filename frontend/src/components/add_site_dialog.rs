use autotest_client::shared::CreateSiteRequest;
use autotest_client::validation::{FieldErrors, SiteForm};
use leptos::prelude::*;

use crate::components::field::TextField;
use crate::components::icons::Plus;

#[component]
pub fn AddSiteDialog(#[prop(into)] on_add: Callback<CreateSiteRequest>) -> impl IntoView {
    let (open, set_open) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // 表单字段
    let title = RwSignal::new(String::new());
    let url = RwSignal::new(String::new());
    let (errors, set_errors) = signal(FieldErrors::default());

    let reset_form = move || {
        title.set(String::new());
        url.set(String::new());
        set_errors.set(FieldErrors::default());
    };

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = SiteForm {
            title: title.get(),
            url: url.get(),
        };
        match form.validate() {
            Ok(req) => {
                on_add.run(req);
                set_open.set(false);
                reset_form();
            }
            Err(field_errors) => set_errors.set(field_errors),
        }
    };

    view! {
        // 触发按钮
        <button class="btn btn-primary gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" /> "Add site"
        </button>

        // 模态框内容
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Add a new site"</h3>
                <p class="py-4 text-base-content/70">"Sites are analysed in the background once added."</p>

                <form on:submit=on_submit class="space-y-4" novalidate>
                    <TextField
                        name="title"
                        label="Title"
                        placeholder="Example"
                        value=title
                        errors=errors
                    />
                    <TextField
                        name="url"
                        label="URL"
                        input_type="url"
                        placeholder="https://example.com"
                        value=url
                        errors=errors
                    />

                    <div class="modal-action">
                        <button
                            type="button"
                            class="btn btn-ghost"
                            on:click=move |_| {
                                set_open.set(false);
                                reset_form();
                            }
                        >
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">"Add site"</button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
