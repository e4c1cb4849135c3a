use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::state::{FinanceAction, FinanceState};
use crate::{
    alert::{api_error_alert, Alert, AlertBox, FieldLabels},
    api::ApiClient,
    components::Modal,
    format::format_amount,
    models::{Account, AccountForm, AccountId},
    pages::bind_input,
    validation::{parse_amount, require, ValidationError},
};

const LABELS: FieldLabels = &[("accountName", "Account name"), ("balance", "Balance")];

/// The account the dialog is working on.
#[derive(Debug, Clone, PartialEq)]
enum AccountDialog {
    Create,
    Edit(Account),
}

impl AccountDialog {
    fn title(&self) -> &'static str {
        match self {
            AccountDialog::Create => "New account",
            AccountDialog::Edit(_) => "Edit account",
        }
    }
}

fn account_form(
    dialog: &AccountDialog,
    name: &str,
    balance: &str,
) -> Result<AccountForm, ValidationError> {
    let creation_date = match dialog {
        AccountDialog::Create => None,
        AccountDialog::Edit(account) => account.creation_date.clone(),
    };

    Ok(AccountForm {
        account_name: require("Account name", name)?.to_owned(),
        balance: parse_amount("Balance", balance)?,
        creation_date,
    })
}

#[derive(Properties, PartialEq)]
pub struct AccountsPanelProps {
    pub state: UseReducerHandle<FinanceState>,
}

#[function_component(AccountsPanel)]
pub fn accounts_panel(props: &AccountsPanelProps) -> Html {
    let dialog = use_state(|| None::<AccountDialog>);
    let name = use_state(String::new);
    let balance = use_state(String::new);
    let dialog_alert = use_state(|| None::<Alert>);
    let panel_alert = use_state(|| None::<Alert>);
    let saving = use_state(|| false);

    let open = {
        let dialog = dialog.clone();
        let name = name.clone();
        let balance = balance.clone();
        let dialog_alert = dialog_alert.clone();
        move |next: AccountDialog| {
            match &next {
                AccountDialog::Create => {
                    name.set(String::new());
                    balance.set("0".to_owned());
                }
                AccountDialog::Edit(account) => {
                    name.set(account.account_name.clone());
                    balance.set(account.balance.to_string());
                }
            }
            dialog_alert.set(None);
            dialog.set(Some(next));
        }
    };

    let on_create = {
        let open = open.clone();
        Callback::from(move |_| open(AccountDialog::Create))
    };

    let on_close = {
        let dialog = dialog.clone();
        Callback::from(move |_| dialog.set(None))
    };

    let on_submit = {
        let dialog = dialog.clone();
        let name = name.clone();
        let balance = balance.clone();
        let dialog_alert = dialog_alert.clone();
        let panel_alert = panel_alert.clone();
        let saving = saving.clone();
        let dispatcher = props.state.dispatcher();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            dialog_alert.set(None);

            let Some(current) = (*dialog).clone() else {
                return;
            };
            let form = match account_form(&current, &name, &balance) {
                Ok(form) => form,
                Err(error) => {
                    dialog_alert.set(Some(error.into()));
                    return;
                }
            };

            saving.set(true);
            let dialog = dialog.clone();
            let dialog_alert = dialog_alert.clone();
            let panel_alert = panel_alert.clone();
            let saving = saving.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let client = ApiClient::default();
                let result = match &current {
                    AccountDialog::Create => client.create_account(&form).await,
                    AccountDialog::Edit(account) => client.update_account(account.id, &form).await,
                };

                match result {
                    Ok(account) => {
                        let message = format!("Account \"{}\" saved", account.account_name);
                        dispatcher.dispatch(FinanceAction::AccountSaved(account));
                        panel_alert.set(Some(Alert::success(message)));
                        dialog.set(None);
                    }
                    Err(error) => {
                        dialog_alert.set(Some(api_error_alert(
                            &error,
                            "Could not save the account",
                            LABELS,
                        )));
                    }
                }
                saving.set(false);
            });
        })
    };

    let delete = {
        let panel_alert = panel_alert.clone();
        let dispatcher = props.state.dispatcher();
        move |id: AccountId| {
            panel_alert.set(None);
            let panel_alert = panel_alert.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                match ApiClient::default().delete_account(id).await {
                    Ok(()) => {
                        dispatcher.dispatch(FinanceAction::AccountDeleted(id));
                        panel_alert.set(Some(Alert::success("Account deleted")));
                    }
                    Err(error) => {
                        panel_alert.set(Some(api_error_alert(
                            &error,
                            "Could not delete the account",
                            LABELS,
                        )));
                    }
                }
            });
        }
    };

    let on_dismiss_panel = {
        let panel_alert = panel_alert.clone();
        Callback::from(move |_| panel_alert.set(None))
    };

    let on_dismiss_dialog = {
        let dialog_alert = dialog_alert.clone();
        Callback::from(move |_| dialog_alert.set(None))
    };

    let accounts = props.state.accounts();

    html! {
        <div class="card mb-4">
            <div class="card-body">
                <div class="d-flex justify-content-between align-items-center mb-3">
                    <h2 class="h5 card-title mb-0">{"Accounts"}</h2>
                    <button class="btn btn-sm btn-primary" onclick={on_create}>{"Add account"}</button>
                </div>
                <AlertBox alert={(*panel_alert).clone()} on_dismiss={on_dismiss_panel} />
                if accounts.is_empty() {
                    <p class="text-muted mb-0">{"No accounts yet."}</p>
                } else {
                    <ul class="list-group">
                        { for accounts.iter().map(|account| {
                            let on_edit = {
                                let open = open.clone();
                                let account = account.clone();
                                Callback::from(move |_| open(AccountDialog::Edit(account.clone())))
                            };
                            let on_delete = {
                                let delete = delete.clone();
                                let id = account.id;
                                Callback::from(move |_| delete(id))
                            };
                            html! {
                                <li key={account.id.to_string()} class="list-group-item d-flex justify-content-between align-items-center">
                                    <div>
                                        <div class="fw-semibold">{ account.account_name.clone() }</div>
                                        if let Some(created) = &account.creation_date {
                                            <small class="text-muted">{ format!("Created {created}") }</small>
                                        }
                                    </div>
                                    <div class="d-flex align-items-center gap-2">
                                        <span class="badge text-bg-light fs-6">{ format_amount(account.balance) }</span>
                                        <button class="btn btn-sm btn-outline-secondary" onclick={on_edit}>{"Edit"}</button>
                                        <button class="btn btn-sm btn-outline-danger" onclick={on_delete}>{"Delete"}</button>
                                    </div>
                                </li>
                            }
                        }) }
                    </ul>
                }
            </div>
            <Modal
                title={(*dialog).as_ref().map(AccountDialog::title).unwrap_or_default()}
                show={dialog.is_some()}
                on_close={on_close}
            >
                <AlertBox alert={(*dialog_alert).clone()} on_dismiss={on_dismiss_dialog} />
                <form onsubmit={on_submit}>
                    <div class="mb-3">
                        <label class="form-label" for="accountName">{"Account name"}</label>
                        <input id="accountName" class="form-control" value={(*name).clone()} oninput={bind_input(&name)} />
                    </div>
                    <div class="mb-3">
                        <label class="form-label" for="balance">{"Balance"}</label>
                        <input id="balance" type="number" step="0.01" min="0" class="form-control"
                            value={(*balance).clone()} oninput={bind_input(&balance)} />
                    </div>
                    <button type="submit" class="btn btn-primary w-100" disabled={*saving}>
                        { if *saving { "Saving..." } else { "Save" } }
                    </button>
                </form>
            </Modal>
        </div>
    }
}
