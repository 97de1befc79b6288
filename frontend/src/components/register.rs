use autotest_client::validation::{FieldErrors, RegisterForm};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use crate::api::use_api;
use crate::auth::register;
use crate::components::field::TextField;
use crate::toast::use_toast;
use crate::web::router::{Link, use_navigate};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let navigate = use_navigate();

    let firstname = RwSignal::new(String::new());
    let lastname = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (errors, set_errors) = signal(FieldErrors::default());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RegisterForm {
            firstname: firstname.get(),
            lastname: lastname.get(),
            username: username.get(),
            email: email.get(),
            password: password.get(),
        };
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(field_errors) => {
                set_errors.set(field_errors);
                return;
            }
        };

        set_errors.set(FieldErrors::default());
        set_is_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            match register(&api, payload).await {
                Ok(user) => {
                    info!(user = %user.id, "account registered");
                    toast.success("Account created, please sign in");
                    navigate("/login");
                }
                Err(e) => {
                    warn!(error = %e, "registration failed");
                    toast.error(e.user_message());
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create an account"</h1>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <div class="grid grid-cols-2 gap-4">
                            <TextField name="firstname" label="First name" value=firstname errors=errors />
                            <TextField name="lastname" label="Last name" value=lastname errors=errors />
                        </div>
                        <TextField name="username" label="Username" value=username errors=errors />
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
                            value=password
                            errors=errors
                        />

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center text-base-content/70">
                            "Already have an account? "
                            <Link to="/login" class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
