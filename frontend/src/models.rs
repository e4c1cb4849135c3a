//! The records exchanged with the finance API.
//!
//! The server owns every entity; the client only reads and writes the fields
//! listed here and treats everything else as opaque.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cache::Identified;

pub type AccountId = i64;
pub type CategoryId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub account_name: String,
    pub balance: f64,
    #[serde(default)]
    pub creation_date: Option<String>,
}

impl Identified for Account {
    fn id(&self) -> i64 {
        self.id
    }
}

/// The payload for creating or editing an account.
///
/// `creation_date` is only sent on update, where the server expects the
/// original value echoed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountForm {
    pub account_name: String,
    pub balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
}

/// The kind of money movement a category (and a transaction) describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryType {
    Income,
    Expense,
    Transfer,
}

impl CategoryType {
    pub const ALL: [CategoryType; 3] = [
        CategoryType::Income,
        CategoryType::Expense,
        CategoryType::Transfer,
    ];

    /// The wire name, also used as the `<option>` value in forms.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryType::Income => "INCOME",
            CategoryType::Expense => "EXPENSE",
            CategoryType::Transfer => "TRANSFER",
        }
    }

    pub fn parse(value: &str) -> Option<CategoryType> {
        CategoryType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryType::Income => "Income",
            CategoryType::Expense => "Expense",
            CategoryType::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub description: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

impl Identified for Category {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryForm {
    pub description: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// A transaction as submitted by the client. Transactions are never read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub account_to: Option<AccountId>,
    pub account_from: Option<AccountId>,
    pub sum: f64,
    pub category_id_list: Vec<CategoryId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRequest {
    pub from: String,
    pub till: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportLine {
    pub description: String,
    pub sum: f64,
}

/// Every list endpoint wraps its items as `{"list": [...]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListResponse<T> {
    pub list: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUp {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub birth_date: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Account, CategoryType, ListResponse, NewTransaction};

    #[test]
    fn category_type_uses_upper_case_on_the_wire() {
        let value = serde_json::to_value(CategoryType::Transfer).unwrap();

        assert_eq!(value, json!("TRANSFER"));
        assert_eq!(CategoryType::parse("expense"), Some(CategoryType::Expense));
        assert_eq!(CategoryType::parse("refund"), None);
    }

    #[test]
    fn income_transaction_sends_null_source() {
        let transaction = NewTransaction {
            account_to: Some(3),
            account_from: None,
            sum: 12.5,
            category_id_list: vec![7],
        };

        let value = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            value,
            json!({"accountTo": 3, "accountFrom": null, "sum": 12.5, "categoryIdList": [7]})
        );
    }

    #[test]
    fn accounts_list_tolerates_missing_creation_date() {
        let body = json!({"list": [
            {"id": 1, "accountName": "Cash", "balance": 10.0, "creationDate": "2024-05-01T10:00:00"},
            {"id": 2, "accountName": "Card", "balance": 0}
        ]});

        let response: ListResponse<Account> = serde_json::from_value(body).unwrap();

        assert_eq!(response.list.len(), 2);
        assert_eq!(response.list[1].creation_date, None);
        assert_eq!(response.list[1].balance, 0.0);
    }
}
