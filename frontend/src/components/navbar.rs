use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{api::ApiClient, auth, config, models::UserInfo, navigation::Route};

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
    pub active: Route,
    #[prop_or_default]
    pub user: Option<UserInfo>,
}

struct NavItem {
    label: &'static str,
    href: &'static str,
    route: Route,
}

const NAV_ITEMS: [NavItem; 2] = [
    NavItem {
        label: "Accounts",
        href: config::ACCOUNTS_PAGE,
        route: Route::Accounts,
    },
    NavItem {
        label: "Report",
        href: config::REPORT_PAGE,
        route: Route::Report,
    },
];

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    let logging_out = use_state(|| false);

    let on_logout = {
        let logging_out = logging_out.clone();
        Callback::from(move |_| {
            logging_out.set(true);
            spawn_local(async move {
                auth::logout(&ApiClient::default()).await;
            });
        })
    };

    html! {
        <nav class="navbar navbar-expand bg-body-tertiary mb-4">
            <div class="container">
                <span class="navbar-brand">{"Fintrack"}</span>
                <ul class="navbar-nav me-auto">
                    { for NAV_ITEMS.iter().map(|item| {
                        let class = if item.route == props.active { "nav-link active" } else { "nav-link" };
                        html! {
                            <li class="nav-item"><a class={class} href={item.href}>{ item.label }</a></li>
                        }
                    }) }
                </ul>
                if let Some(user) = &props.user {
                    <span class="navbar-text me-3">{ format!("Welcome {}!", user.email) }</span>
                }
                <button id="btnLogout" class="btn btn-outline-secondary" onclick={on_logout} disabled={*logging_out}>
                    { if *logging_out { "Logging out..." } else { "Log out" } }
                </button>
            </div>
        </nav>
    }
}
