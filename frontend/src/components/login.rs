use autotest_client::validation::{FieldErrors, LoginForm};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::components::field::TextField;
use crate::components::icons::ShieldCheck;
use crate::web::router::Link;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (errors, set_errors) = signal(FieldErrors::default());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 登录成功后由路由服务的会话监听跳转到首页
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm {
            email: email.get(),
            password: password.get(),
        };
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(field_errors) => {
                set_errors.set(field_errors);
                return;
            }
        };

        set_errors.set(FieldErrors::default());
        set_error_msg.set(None);
        set_is_submitting.set(true);

        spawn_local(async move {
            if let Err(e) = login(&auth, &api, credentials).await {
                warn!(error = %e, "login failed");
                set_error_msg.set(Some(e.user_message()));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Autotest"</h1>
                        <p class="text-base-content/70">"Sign in to your account"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <TextField
                            name="email"
                            label="Email"
                            input_type="email"
                            placeholder="you@example.com"
                            value=email
                            errors=errors
                        />
                        <TextField
                            name="password"
                            label="Password"
                            input_type="password"
                            placeholder="••••••••"
                            value=password
                            errors=errors
                        />

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center text-base-content/70">
                            "No account? "
                            <Link to="/register" class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
