//! Browser client for the FinTrack personal finance service.

pub mod alert;
pub mod api;
pub mod auth;
pub mod cache;
pub mod components;
pub mod config;
pub mod flash;
pub mod format;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod pages;
pub mod validation;

use yew::prelude::*;

use navigation::Route;
use pages::{
    finance::FinancePage, login::LoginPage, register::RegisterPage, report::ReportPage,
};

fn render(route: Route) -> Html {
    match route {
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Accounts => html! { <FinancePage /> },
        Route::Report => html! { <ReportPage /> },
        Route::NotFound => html! {
            <main class="container py-5 text-center">
                <h1 class="h4">{"Page not found"}</h1>
                <a href={config::LOGIN_PAGE}>{"Back to sign in"}</a>
            </main>
        },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let route = use_state(Route::current);
    render(*route)
}
