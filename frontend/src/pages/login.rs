use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::bind_input;
use crate::{
    alert::{Alert, AlertBox},
    api::{ApiClient, ApiError},
    config,
    flash::{take_flash, SessionStore},
    models::Credentials,
    navigation::redirect,
};

const LOGIN_ERROR: &str = "Login error";

/// The server's own explanation is shown as is; it already falls back to the
/// text body and then to the status line.
fn login_error_alert(error: &ApiError) -> Alert {
    match error {
        ApiError::Api { .. } => Alert::danger(error.to_string()),
        _ => Alert::danger(LOGIN_ERROR),
    }
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let alert = use_state(|| take_flash(&SessionStore).map(Alert::success));
    let loading = use_state(|| false);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let alert = alert.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            alert.set(None);

            let credentials = Credentials {
                email: email.trim().to_owned(),
                password: (*password).clone(),
            };

            loading.set(true);
            let alert = alert.clone();
            let loading = loading.clone();
            spawn_local(async move {
                match ApiClient::default().login(&credentials).await {
                    Ok(()) => redirect(config::ACCOUNTS_PAGE),
                    Err(error) => {
                        alert.set(Some(login_error_alert(&error)));
                        loading.set(false);
                    }
                }
            });
        })
    };

    let on_dismiss = {
        let alert = alert.clone();
        Callback::from(move |_| alert.set(None))
    };

    html! {
        <div class="container py-5" style="max-width: 420px;">
            <h1 class="h3 mb-4 text-center">{"Sign in"}</h1>
            <AlertBox alert={(*alert).clone()} on_dismiss={on_dismiss} />
            <form id="loginForm" onsubmit={on_submit}>
                <div class="mb-3">
                    <label class="form-label" for="email">{"Email"}</label>
                    <input id="email" name="email" type="email" class="form-control" required=true
                        value={(*email).clone()} oninput={bind_input(&email)} />
                </div>
                <div class="mb-3">
                    <label class="form-label" for="password">{"Password"}</label>
                    <input id="password" name="password" type="password" class="form-control" required=true
                        value={(*password).clone()} oninput={bind_input(&password)} />
                </div>
                <button type="submit" class="btn btn-primary w-100" disabled={*loading}>
                    { if *loading { "Please wait..." } else { "Log in" } }
                </button>
            </form>
            <p class="mt-4 text-center text-muted">
                {"No account? "}<a href={config::REGISTER_PAGE}>{"Register"}</a>
            </p>
        </div>
    }
}
