use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::bind_input;
use crate::{
    alert::{api_error_alert, Alert, AlertBox, FieldLabels},
    api::ApiClient,
    config,
    flash::{set_flash, SessionStore},
    models::SignUp,
    navigation::redirect,
    validation::check_passwords,
};

const LABELS: FieldLabels = &[
    ("firstName", "First name"),
    ("lastName", "Last name"),
    ("email", "Email"),
    ("password", "Password"),
    ("birthDate", "Birth date"),
];

const REGISTERED_NOTICE: &str = "Registration was successful. Please, sign in";

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let first_name = use_state(String::new);
    let last_name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirmation = use_state(String::new);
    let birth_date = use_state(String::new);
    let password_invalid = use_state(|| false);
    let confirmation_invalid = use_state(|| false);
    let alert = use_state(|| None::<Alert>);
    let saving = use_state(|| false);

    let on_submit = {
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let email = email.clone();
        let password = password.clone();
        let confirmation = confirmation.clone();
        let birth_date = birth_date.clone();
        let password_invalid = password_invalid.clone();
        let confirmation_invalid = confirmation_invalid.clone();
        let alert = alert.clone();
        let saving = saving.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            alert.set(None);

            if let Err(error) = check_passwords(&password, &confirmation) {
                password_invalid.set(true);
                confirmation_invalid.set(true);
                alert.set(Some(error.into()));
                return;
            }

            let sign_up = SignUp {
                first_name: first_name.trim().to_owned(),
                last_name: last_name.trim().to_owned(),
                email: email.trim().to_owned(),
                password: (*password).clone(),
                birth_date: (*birth_date).clone(),
            };

            saving.set(true);
            let alert = alert.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match ApiClient::default().sign_up(&sign_up).await {
                    Ok(()) => {
                        set_flash(&SessionStore, REGISTERED_NOTICE);
                        redirect(config::LOGIN_PAGE);
                    }
                    Err(error) => {
                        alert.set(Some(api_error_alert(
                            &error,
                            "Error during registration",
                            LABELS,
                        )));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_password_input = {
        let on_input = bind_input(&password);
        let password_invalid = password_invalid.clone();
        Callback::from(move |e: InputEvent| {
            password_invalid.set(false);
            on_input.emit(e);
        })
    };

    let on_confirmation_input = {
        let on_input = bind_input(&confirmation);
        let confirmation_invalid = confirmation_invalid.clone();
        Callback::from(move |e: InputEvent| {
            confirmation_invalid.set(false);
            on_input.emit(e);
        })
    };

    let on_dismiss = {
        let alert = alert.clone();
        Callback::from(move |_| alert.set(None))
    };

    let invalid = |flag: bool| classes!("form-control", flag.then_some("is-invalid"));

    html! {
        <div class="container py-5" style="max-width: 520px;">
            <h1 class="h3 mb-4 text-center">{"Create an account"}</h1>
            <AlertBox alert={(*alert).clone()} on_dismiss={on_dismiss} />
            <form id="registerForm" onsubmit={on_submit}>
                <div class="row">
                    <div class="col mb-3">
                        <label class="form-label" for="firstName">{"First name"}</label>
                        <input id="firstName" name="firstName" class="form-control" required=true
                            value={(*first_name).clone()} oninput={bind_input(&first_name)} />
                    </div>
                    <div class="col mb-3">
                        <label class="form-label" for="lastName">{"Last name"}</label>
                        <input id="lastName" name="lastName" class="form-control" required=true
                            value={(*last_name).clone()} oninput={bind_input(&last_name)} />
                    </div>
                </div>
                <div class="mb-3">
                    <label class="form-label" for="email">{"Email"}</label>
                    <input id="email" name="email" type="email" class="form-control" required=true
                        value={(*email).clone()} oninput={bind_input(&email)} />
                </div>
                <div class="mb-3">
                    <label class="form-label" for="birthDate">{"Birth date"}</label>
                    <input id="birthDate" name="birthDate" type="date" class="form-control"
                        value={(*birth_date).clone()} oninput={bind_input(&birth_date)} />
                </div>
                <div class="mb-3">
                    <label class="form-label" for="password">{"Password"}</label>
                    <input id="password" name="password" type="password" class={invalid(*password_invalid)} required=true
                        value={(*password).clone()} oninput={on_password_input} />
                </div>
                if !password.is_empty() {
                    <div id="pass2" class="mb-3">
                        <label class="form-label" for="password2">{"Repeat password"}</label>
                        <input id="password2" name="password2" type="password" class={invalid(*confirmation_invalid)}
                            value={(*confirmation).clone()} oninput={on_confirmation_input} />
                    </div>
                }
                <button id="btnSubmit" type="submit" class="btn btn-primary w-100" disabled={*saving}>
                    { if *saving { "Please wait..." } else { "Sign up" } }
                </button>
            </form>
            <p class="mt-4 text-center text-muted">
                {"Already registered? "}<a href={config::LOGIN_PAGE}>{"Sign in"}</a>
            </p>
        </div>
    }
}
