//! The main screen: accounts, categories and transaction entry.

mod accounts;
mod categories;
mod state;
mod transaction;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    alert::{api_error_alert, Alert, AlertBox},
    api::ApiClient,
    auth,
    components::NavBar,
    models::{CategoryType, UserInfo},
    navigation::Route,
};

use accounts::AccountsPanel;
use categories::CategoriesPanel;
use state::{FinanceAction, FinanceState};
use transaction::TransactionForm;

#[function_component(FinancePage)]
pub fn finance_page() -> Html {
    let state = use_reducer(FinanceState::default);
    let user = use_state(|| None::<UserInfo>);
    let alert = use_state(|| None::<Alert>);

    {
        let dispatcher = state.dispatcher();
        let user = user.clone();
        let alert = alert.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let client = ApiClient::default();
                let Some(current_user) = auth::require_auth(&client).await else {
                    return;
                };
                user.set(current_user);

                // Each list loads on its own so one failure leaves the others intact.
                {
                    let client = client.clone();
                    let dispatcher = dispatcher.clone();
                    let alert = alert.clone();
                    spawn_local(async move {
                        match client.accounts().await {
                            Ok(accounts) => {
                                dispatcher.dispatch(FinanceAction::AccountsLoaded(accounts))
                            }
                            Err(error) => {
                                dispatcher.dispatch(FinanceAction::LoadFailed);
                                alert.set(Some(api_error_alert(
                                    &error,
                                    "Could not load accounts",
                                    &[],
                                )));
                            }
                        }
                    });
                }

                for category_type in CategoryType::ALL {
                    let client = client.clone();
                    let dispatcher = dispatcher.clone();
                    let alert = alert.clone();
                    spawn_local(async move {
                        match client.categories(category_type).await {
                            Ok(categories) => dispatcher.dispatch(
                                FinanceAction::CategoriesLoaded(category_type, categories),
                            ),
                            Err(error) => {
                                dispatcher.dispatch(FinanceAction::LoadFailed);
                                alert.set(Some(api_error_alert(
                                    &error,
                                    &format!(
                                        "Could not load {} categories",
                                        category_type.label().to_lowercase()
                                    ),
                                    &[],
                                )));
                            }
                        }
                    });
                }
            });
            || ()
        });
    }

    let on_dismiss = {
        let alert = alert.clone();
        Callback::from(move |_| alert.set(None))
    };

    html! {
        <>
            <NavBar active={Route::Accounts} user={(*user).clone()} />
            <main class="container">
                <AlertBox alert={(*alert).clone()} on_dismiss={on_dismiss} />
                if state.is_loading() {
                    <p class="text-muted">{"Loading..."}</p>
                } else {
                    <div class="row">
                        <div class="col-lg-4">
                            <AccountsPanel state={state.clone()} />
                        </div>
                        <div class="col-lg-4">
                            <CategoriesPanel state={state.clone()} />
                        </div>
                        <div class="col-lg-4">
                            <TransactionForm state={state.clone()} />
                        </div>
                    </div>
                }
            </main>
        </>
    }
}
