//! The accounts page's local copy of server data.

use std::rc::Rc;

use yew::Reducible;

use crate::{
    cache::Cache,
    models::{Account, AccountId, Category, CategoryId, CategoryType},
};

/// Accounts plus the three category lists load in parallel on page start.
const INITIAL_LOADS: usize = 1 + CategoryType::ALL.len();

#[derive(Debug, Clone, PartialEq)]
pub struct FinanceState {
    accounts: Cache<Account>,
    income: Cache<Category>,
    expense: Cache<Category>,
    transfer: Cache<Category>,
    pending_loads: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinanceAction {
    AccountsLoaded(Vec<Account>),
    CategoriesLoaded(CategoryType, Vec<Category>),
    /// One of the initial loads failed; its list stays empty.
    LoadFailed,
    AccountSaved(Account),
    AccountDeleted(AccountId),
    CategorySaved(Category),
    CategoryDeleted(CategoryId),
}

impl Default for FinanceState {
    fn default() -> Self {
        Self {
            accounts: Cache::default(),
            income: Cache::default(),
            expense: Cache::default(),
            transfer: Cache::default(),
            pending_loads: INITIAL_LOADS,
        }
    }
}

impl FinanceState {
    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    pub fn accounts(&self) -> &Cache<Account> {
        &self.accounts
    }

    pub fn categories(&self, category_type: CategoryType) -> &Cache<Category> {
        match category_type {
            CategoryType::Income => &self.income,
            CategoryType::Expense => &self.expense,
            CategoryType::Transfer => &self.transfer,
        }
    }

    fn categories_mut(&mut self, category_type: CategoryType) -> &mut Cache<Category> {
        match category_type {
            CategoryType::Income => &mut self.income,
            CategoryType::Expense => &mut self.expense,
            CategoryType::Transfer => &mut self.transfer,
        }
    }

    /// The category transfers are tagged with.
    ///
    /// The server is expected to keep exactly one. If it returns several, the
    /// one with the smallest id is used so the choice is stable.
    pub fn transfer_category(&self) -> Option<&Category> {
        self.transfer.iter().min_by_key(|category| category.id)
    }

    pub fn apply(&mut self, action: FinanceAction) {
        match action {
            FinanceAction::AccountsLoaded(accounts) => {
                self.accounts.replace_all(accounts);
                self.settle_load();
            }
            FinanceAction::CategoriesLoaded(category_type, categories) => {
                let (matching, other): (Vec<_>, Vec<_>) = categories
                    .into_iter()
                    .partition(|category| category.category_type == category_type);
                if !other.is_empty() {
                    tracing::warn!(
                        "dropped {} categories of the wrong type from the {category_type} list",
                        other.len()
                    );
                }
                if category_type == CategoryType::Transfer && matching.len() > 1 {
                    tracing::warn!(
                        "expected one transfer category but the server returned {}",
                        matching.len()
                    );
                }
                self.categories_mut(category_type).replace_all(matching);
                self.settle_load();
            }
            FinanceAction::LoadFailed => self.settle_load(),
            FinanceAction::AccountSaved(account) => self.accounts.upsert(account),
            FinanceAction::AccountDeleted(id) => {
                self.accounts.remove(id);
            }
            FinanceAction::CategorySaved(category) => {
                self.categories_mut(category.category_type).upsert(category);
            }
            FinanceAction::CategoryDeleted(id) => {
                for category_type in CategoryType::ALL {
                    self.categories_mut(category_type).remove(id);
                }
            }
        }
    }

    fn settle_load(&mut self) {
        self.pending_loads = self.pending_loads.saturating_sub(1);
    }
}

impl Reducible for FinanceState {
    type Action = FinanceAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::{FinanceAction, FinanceState};
    use crate::models::{Account, Category, CategoryType};

    fn account(id: i64, name: &str, balance: f64) -> Account {
        Account {
            id,
            account_name: name.to_owned(),
            balance,
            creation_date: None,
        }
    }

    fn category(id: i64, description: &str, category_type: CategoryType) -> Category {
        Category {
            id,
            description: description.to_owned(),
            category_type,
        }
    }

    fn loaded_state() -> FinanceState {
        let mut state = FinanceState::default();
        state.apply(FinanceAction::AccountsLoaded(vec![
            account(1, "Cash", 10.0),
            account(2, "Card", 250.0),
        ]));
        for category_type in CategoryType::ALL {
            state.apply(FinanceAction::CategoriesLoaded(category_type, Vec::new()));
        }
        state
    }

    #[test]
    fn loading_until_every_initial_load_settles() {
        let mut state = FinanceState::default();
        assert!(state.is_loading());

        state.apply(FinanceAction::AccountsLoaded(Vec::new()));
        state.apply(FinanceAction::CategoriesLoaded(CategoryType::Income, Vec::new()));
        state.apply(FinanceAction::LoadFailed);
        assert!(state.is_loading());

        state.apply(FinanceAction::CategoriesLoaded(CategoryType::Transfer, Vec::new()));
        assert!(!state.is_loading());

        state.apply(FinanceAction::AccountsLoaded(Vec::new()));
        assert!(!state.is_loading());
    }

    #[test]
    fn saved_account_is_the_server_version() {
        let mut state = loaded_state();
        let from_server = Account {
            creation_date: Some("2024-03-01T09:00:00".to_owned()),
            ..account(2, "Credit card", 249.99)
        };

        state.apply(FinanceAction::AccountSaved(from_server.clone()));

        assert_eq!(state.accounts().get(2), Some(&from_server));
        assert_eq!(state.accounts().len(), 2);
    }

    #[test]
    fn deleting_unknown_account_changes_nothing() {
        let mut state = loaded_state();
        let before = state.clone();

        state.apply(FinanceAction::AccountDeleted(99));

        assert_eq!(state, before);
    }

    #[test]
    fn category_loads_fill_only_their_own_bucket() {
        let mut state = FinanceState::default();

        state.apply(FinanceAction::CategoriesLoaded(
            CategoryType::Income,
            vec![
                category(1, "Salary", CategoryType::Income),
                category(2, "Groceries", CategoryType::Expense),
            ],
        ));
        state.apply(FinanceAction::LoadFailed);

        let income: Vec<_> = state.categories(CategoryType::Income).iter().cloned().collect();
        assert_eq!(income, vec![category(1, "Salary", CategoryType::Income)]);
        assert!(state.categories(CategoryType::Expense).is_empty());
        assert!(state.categories(CategoryType::Transfer).is_empty());
    }

    #[test]
    fn saved_category_goes_to_its_type() {
        let mut state = loaded_state();

        state.apply(FinanceAction::CategorySaved(category(5, "Rent", CategoryType::Expense)));
        state.apply(FinanceAction::CategorySaved(category(5, "Rent & bills", CategoryType::Expense)));

        let expense: Vec<_> = state.categories(CategoryType::Expense).iter().cloned().collect();
        assert_eq!(expense, vec![category(5, "Rent & bills", CategoryType::Expense)]);
        assert!(state.categories(CategoryType::Income).is_empty());

        state.apply(FinanceAction::CategoryDeleted(5));
        assert!(state.categories(CategoryType::Expense).is_empty());
    }

    #[test]
    fn transfer_category_picks_smallest_id() {
        let mut state = loaded_state();
        assert_eq!(state.transfer_category(), None);

        state.apply(FinanceAction::CategoriesLoaded(
            CategoryType::Transfer,
            vec![
                category(9, "Transfer (dup)", CategoryType::Transfer),
                category(4, "Transfer", CategoryType::Transfer),
            ],
        ));

        assert_eq!(state.transfer_category().map(|c| c.id), Some(4));
    }
}
