//! Auth Form Component
//!
//! Email-only login / sign-up card.

use leptos::prelude::*;

use crate::context::use_session;
use crate::identity::AuthFlow;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn AuthForm(flow: AuthFlow) -> impl IntoView {
    let session = use_session();
    let store = use_app_store();

    let (email, set_email) = signal(String::new());
    let (local_error, set_local_error) = signal::<Option<String>>(None);
    let loading = move || store.auth_loading().get();

    let (hint, busy_label) = match flow {
        AuthFlow::SignIn => ("Enter your email to log in", "Logging in..."),
        AuthFlow::SignUp => ("Enter your email to create an account", "Signing up..."),
    };
    let title = flow.label();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_local_error.set(None);
        if let Err(e) = session.submit(flow, email.get_untracked()) {
            set_local_error.set(Some(e.to_string()));
        }
    };

    // endpoint errors win over local validation, as both can be set
    let message = move || store.auth_error().get().or_else(|| local_error.get());

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h2 class="auth-title">{title}</h2>
                <p class="auth-hint">{hint}</p>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    disabled=loading
                />
                <button type="submit" class="auth-submit" disabled=loading>
                    {move || if loading() { busy_label } else { title }}
                </button>
                {move || message().map(|m| view! { <div class="auth-error">"⚠ " {m}</div> })}
            </form>
        </div>
    }
}
