//! The transaction entry form and the rules for each transaction type.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::state::{FinanceAction, FinanceState};
use crate::{
    alert::{api_error_alert, Alert, AlertBox, FieldLabels},
    api::ApiClient,
    format::format_amount,
    models::{AccountId, Category, CategoryId, CategoryType, NewTransaction},
    pages::select_value,
    validation::{parse_sum, ValidationError},
};

const LABELS: FieldLabels = &[
    ("accountFrom", "From account"),
    ("accountTo", "To account"),
    ("sum", "Sum"),
    ("categoryIdList", "Category"),
];

/// What the user has entered so far.
///
/// The type decides which accounts are used: income only has a destination,
/// expenses only a source, transfers both, tagged with the transfer category.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: CategoryType,
    pub account_from: Option<AccountId>,
    pub account_to: Option<AccountId>,
    pub category: Option<CategoryId>,
    pub sum: String,
}

impl TransactionDraft {
    pub fn new(kind: CategoryType) -> Self {
        Self {
            kind,
            account_from: None,
            account_to: None,
            category: None,
            sum: String::new(),
        }
    }

    /// Switch type, clearing the account and category choices.
    pub fn with_kind(&self, kind: CategoryType) -> Self {
        Self {
            sum: self.sum.clone(),
            ..Self::new(kind)
        }
    }

    pub fn uses_source(&self) -> bool {
        self.kind != CategoryType::Income
    }

    pub fn uses_destination(&self) -> bool {
        self.kind != CategoryType::Expense
    }

    /// Transfers always use the transfer category, so there is nothing to pick.
    pub fn uses_category_selector(&self) -> bool {
        self.kind != CategoryType::Transfer
    }

    /// Drop selections that no longer exist, e.g. an account deleted in
    /// another panel.
    pub fn without_stale(&self, state: &FinanceState) -> Self {
        let known_account = |id: &AccountId| state.accounts().get(*id).is_some();
        Self {
            account_from: self.account_from.filter(known_account),
            account_to: self.account_to.filter(known_account),
            category: self
                .category
                .filter(|id| state.categories(self.kind).get(*id).is_some()),
            ..self.clone()
        }
    }

    /// Validate the draft and build the request payload.
    pub fn build(
        &self,
        transfer_category: Option<&Category>,
    ) -> Result<NewTransaction, ValidationError> {
        let (account_from, account_to, category) = match self.kind {
            CategoryType::Income => {
                let to = self.account_to.ok_or(ValidationError::MissingDestination)?;
                let category = self.category.ok_or(ValidationError::MissingCategory)?;
                (None, Some(to), category)
            }
            CategoryType::Expense => {
                let from = self.account_from.ok_or(ValidationError::MissingSource)?;
                let category = self.category.ok_or(ValidationError::MissingCategory)?;
                (Some(from), None, category)
            }
            CategoryType::Transfer => {
                let from = self.account_from.ok_or(ValidationError::MissingSource)?;
                let to = self.account_to.ok_or(ValidationError::MissingDestination)?;
                if from == to {
                    return Err(ValidationError::SameAccount);
                }
                let category = transfer_category.ok_or(ValidationError::NoTransferCategory)?;
                (Some(from), Some(to), category.id)
            }
        };

        Ok(NewTransaction {
            account_to,
            account_from,
            sum: parse_sum(&self.sum)?,
            category_id_list: vec![category],
        })
    }
}

/// The types offered in the form. Transfers need a transfer category.
pub fn available_kinds(has_transfer_category: bool) -> Vec<CategoryType> {
    CategoryType::ALL
        .into_iter()
        .filter(|kind| *kind != CategoryType::Transfer || has_transfer_category)
        .collect()
}

fn parse_id(value: &str) -> Option<i64> {
    value.parse().ok()
}

#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    pub state: UseReducerHandle<FinanceState>,
}

#[function_component(TransactionForm)]
pub fn transaction_form(props: &TransactionFormProps) -> Html {
    let draft = use_state(|| TransactionDraft::new(CategoryType::Expense));
    let alert = use_state(|| None::<Alert>);
    let saving = use_state(|| false);

    let state = &props.state;
    let transfer_category = state.transfer_category().cloned();
    let current = draft.without_stale(state);

    let on_kind_change = {
        let draft = draft.clone();
        let alert = alert.clone();
        Callback::from(move |e: Event| {
            if let Some(kind) = CategoryType::parse(&select_value(&e)) {
                draft.set(draft.with_kind(kind));
                alert.set(None);
            }
        })
    };

    let on_from_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            draft.set(TransactionDraft {
                account_from: parse_id(&select_value(&e)),
                ..(*draft).clone()
            });
        })
    };

    let on_to_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            draft.set(TransactionDraft {
                account_to: parse_id(&select_value(&e)),
                ..(*draft).clone()
            });
        })
    };

    let on_category_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            draft.set(TransactionDraft {
                category: parse_id(&select_value(&e)),
                ..(*draft).clone()
            });
        })
    };

    let on_sum_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            draft.set(TransactionDraft {
                sum: input.value(),
                ..(*draft).clone()
            });
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let current = current.clone();
        let alert = alert.clone();
        let saving = saving.clone();
        let dispatcher = state.dispatcher();
        let transfer_category = transfer_category.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            alert.set(None);

            let kind = current.kind;
            let transaction = match current.build(transfer_category.as_ref()) {
                Ok(transaction) => transaction,
                Err(error) => {
                    alert.set(Some(error.into()));
                    return;
                }
            };

            saving.set(true);
            let draft = draft.clone();
            let alert = alert.clone();
            let saving = saving.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let client = ApiClient::default();
                match client.create_transaction(&transaction).await {
                    Ok(()) => {
                        draft.set(TransactionDraft::new(kind));
                        // Balances are only computed on the server.
                        match client.accounts().await {
                            Ok(accounts) => {
                                dispatcher.dispatch(FinanceAction::AccountsLoaded(accounts));
                                alert.set(Some(Alert::success("Transaction saved")));
                            }
                            Err(error) => {
                                tracing::warn!("could not reload accounts: {error}");
                                alert.set(Some(Alert::warning(
                                    "Transaction saved, but the balances could not be refreshed",
                                )));
                            }
                        }
                    }
                    Err(error) => {
                        alert.set(Some(api_error_alert(
                            &error,
                            "Could not save the transaction",
                            LABELS,
                        )));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_dismiss = {
        let alert = alert.clone();
        Callback::from(move |_| alert.set(None))
    };

    let kinds = available_kinds(transfer_category.is_some());
    let account_options = |selected: Option<AccountId>| {
        html! {
            <>
                <option value="" selected={selected.is_none()}>{"Choose account..."}</option>
                { for state.accounts().iter().map(|account| html! {
                    <option value={account.id.to_string()} selected={selected == Some(account.id)}>
                        { format!("{} ({})", account.account_name, format_amount(account.balance)) }
                    </option>
                }) }
            </>
        }
    };

    html! {
        <div class="card mb-4">
            <div class="card-body">
                <h2 class="h5 card-title">{"New transaction"}</h2>
                <AlertBox alert={(*alert).clone()} on_dismiss={on_dismiss} />
                <form onsubmit={on_submit}>
                    <div class="mb-2">
                        <label class="form-label">{"Type"}</label>
                        <select class="form-select" onchange={on_kind_change}>
                            { for CategoryType::ALL.into_iter().map(|kind| html! {
                                <option value={kind.as_str()}
                                    selected={kind == current.kind}
                                    disabled={!kinds.contains(&kind)}>
                                    { kind.label() }
                                </option>
                            }) }
                        </select>
                    </div>
                    <div class="mb-2">
                        <label class="form-label">{"From account"}</label>
                        <select class="form-select" onchange={on_from_change} disabled={!current.uses_source()}>
                            { account_options(current.account_from) }
                        </select>
                    </div>
                    <div class="mb-2">
                        <label class="form-label">{"To account"}</label>
                        <select class="form-select" onchange={on_to_change} disabled={!current.uses_destination()}>
                            { account_options(current.account_to) }
                        </select>
                    </div>
                    <div class="mb-2">
                        <label class="form-label">{"Category"}</label>
                        if current.uses_category_selector() {
                            <select class="form-select" onchange={on_category_change}>
                                <option value="" selected={current.category.is_none()}>{"Choose category..."}</option>
                                { for state.categories(current.kind).iter().map(|category| html! {
                                    <option value={category.id.to_string()} selected={current.category == Some(category.id)}>
                                        { category.description.clone() }
                                    </option>
                                }) }
                            </select>
                        } else {
                            <select class="form-select" disabled=true>
                                <option selected=true>
                                    { transfer_category.as_ref().map(|c| c.description.clone()).unwrap_or_default() }
                                </option>
                            </select>
                        }
                    </div>
                    <div class="mb-3">
                        <label class="form-label">{"Sum"}</label>
                        <input type="number" step="0.01" min="0" class="form-control"
                            value={current.sum.clone()} oninput={on_sum_input} />
                    </div>
                    <button type="submit" class="btn btn-primary w-100" disabled={*saving}>
                        { if *saving { "Saving..." } else { "Add transaction" } }
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::{available_kinds, FinanceAction, FinanceState, TransactionDraft};
    use crate::{
        models::{Account, Category, CategoryType, NewTransaction},
        validation::ValidationError,
    };

    fn transfer_category() -> Category {
        Category {
            id: 30,
            description: "Transfer".to_owned(),
            category_type: CategoryType::Transfer,
        }
    }

    fn draft(kind: CategoryType, from: Option<i64>, to: Option<i64>, sum: &str) -> TransactionDraft {
        TransactionDraft {
            account_from: from,
            account_to: to,
            category: Some(7),
            sum: sum.to_owned(),
            ..TransactionDraft::new(kind)
        }
    }

    #[test]
    fn income_only_has_a_destination() {
        let transaction = draft(CategoryType::Income, None, Some(2), "100")
            .build(None)
            .unwrap();

        assert_eq!(
            transaction,
            NewTransaction {
                account_to: Some(2),
                account_from: None,
                sum: 100.0,
                category_id_list: vec![7],
            }
        );
    }

    #[test]
    fn expense_requires_source_and_category() {
        let missing_source = draft(CategoryType::Expense, None, None, "5").build(None);
        assert_eq!(missing_source, Err(ValidationError::MissingSource));

        let missing_category = TransactionDraft {
            category: None,
            ..draft(CategoryType::Expense, Some(1), None, "5")
        }
        .build(None);
        assert_eq!(missing_category, Err(ValidationError::MissingCategory));

        let transaction = draft(CategoryType::Expense, Some(1), None, "5").build(None).unwrap();
        assert_eq!(transaction.account_from, Some(1));
        assert_eq!(transaction.account_to, None);
    }

    #[test]
    fn transfer_between_same_account_is_rejected() {
        let category = transfer_category();

        let result = draft(CategoryType::Transfer, Some(3), Some(3), "10").build(Some(&category));

        assert_eq!(result, Err(ValidationError::SameAccount));
    }

    #[test]
    fn transfer_uses_transfer_category() {
        let category = transfer_category();

        let transaction = draft(CategoryType::Transfer, Some(1), Some(2), "10")
            .build(Some(&category))
            .unwrap();

        assert_eq!(transaction.category_id_list, vec![30]);
        assert_eq!(transaction.account_from, Some(1));
        assert_eq!(transaction.account_to, Some(2));

        let without_category = draft(CategoryType::Transfer, Some(1), Some(2), "10").build(None);
        assert_eq!(without_category, Err(ValidationError::NoTransferCategory));
    }

    #[test]
    fn invalid_sums_are_rejected() {
        for sum in ["-5", "ten", ""] {
            let result = draft(CategoryType::Income, None, Some(1), sum).build(None);
            assert!(result.is_err(), "sum {sum:?} should be rejected");
        }
    }

    #[test]
    fn switching_type_resets_selections() {
        let current = draft(CategoryType::Transfer, Some(1), Some(2), "10");

        let switched = current.with_kind(CategoryType::Income);

        assert_eq!(switched.kind, CategoryType::Income);
        assert_eq!(switched.account_from, None);
        assert_eq!(switched.account_to, None);
        assert_eq!(switched.category, None);
        assert!(!switched.uses_source());
        assert!(switched.uses_destination());
        assert!(switched.uses_category_selector());
    }

    #[test]
    fn deleted_selections_are_dropped_before_building() {
        let account = |id| Account {
            id,
            account_name: format!("Account {id}"),
            balance: 0.0,
            creation_date: None,
        };
        let mut state = FinanceState::default();
        state.apply(FinanceAction::AccountsLoaded(vec![account(1), account(2)]));
        state.apply(FinanceAction::CategoriesLoaded(
            CategoryType::Expense,
            vec![Category {
                id: 7,
                description: "Food".to_owned(),
                category_type: CategoryType::Expense,
            }],
        ));
        let current = draft(CategoryType::Expense, Some(1), None, "5");
        assert_eq!(current.without_stale(&state), current);

        state.apply(FinanceAction::AccountDeleted(1));
        assert_eq!(
            current.without_stale(&state).build(None),
            Err(ValidationError::MissingSource)
        );

        state.apply(FinanceAction::CategoryDeleted(7));
        let other_source = TransactionDraft {
            account_from: Some(2),
            ..current
        };
        assert_eq!(
            other_source.without_stale(&state).build(None),
            Err(ValidationError::MissingCategory)
        );
    }

    #[test]
    fn transfer_is_offered_only_with_a_transfer_category() {
        assert_eq!(
            available_kinds(false),
            vec![CategoryType::Income, CategoryType::Expense]
        );
        assert_eq!(available_kinds(true), CategoryType::ALL.to_vec());
    }
}
