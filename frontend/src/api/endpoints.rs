//! Typed wrappers for each endpoint the frontend uses.

use crate::{
    config,
    models::{
        Account, AccountForm, AccountId, Category, CategoryForm, CategoryId, CategoryType,
        Credentials, ListResponse, NewTransaction, ReportLine, ReportRequest, SignUp, UserInfo,
    },
};

use super::{ApiClient, ApiError, ApiRequest, Transport};

impl<T: Transport> ApiClient<T> {
    /// Log in with a url-encoded form. Any 2xx status counts as success.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.send(ApiRequest::post(config::API_LOGIN).form(credentials)?)
            .await?;
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.send(ApiRequest::post(config::API_LOGOUT)).await?;
        Ok(())
    }

    /// The identity probe used to check that the session is still valid.
    pub async fn user_info(&self) -> Result<UserInfo, ApiError> {
        self.fetch(ApiRequest::get(config::API_USER_INFO)).await
    }

    pub async fn sign_up(&self, sign_up: &SignUp) -> Result<(), ApiError> {
        self.send(ApiRequest::post(config::API_SIGN_UP).json(sign_up)?)
            .await?;
        Ok(())
    }

    pub async fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        let response: ListResponse<Account> =
            self.fetch(ApiRequest::get(config::API_ACCOUNTS)).await?;
        Ok(response.list)
    }

    pub async fn create_account(&self, form: &AccountForm) -> Result<Account, ApiError> {
        self.fetch(ApiRequest::post(config::API_ACCOUNTS).json(form)?)
            .await
    }

    pub async fn update_account(
        &self,
        id: AccountId,
        form: &AccountForm,
    ) -> Result<Account, ApiError> {
        self.fetch(ApiRequest::put(format!("{}/{id}", config::API_ACCOUNTS)).json(form)?)
            .await
    }

    pub async fn delete_account(&self, id: AccountId) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(format!("{}/{id}", config::API_ACCOUNTS)))
            .await?;
        Ok(())
    }

    pub async fn categories(&self, category_type: CategoryType) -> Result<Vec<Category>, ApiError> {
        let path = format!("{}?type={}", config::API_CATEGORIES, category_type.as_str());
        let response: ListResponse<Category> = self.fetch(ApiRequest::get(path)).await?;
        Ok(response.list)
    }

    pub async fn create_category(&self, form: &CategoryForm) -> Result<Category, ApiError> {
        self.fetch(ApiRequest::post(config::API_CATEGORIES).json(form)?)
            .await
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        form: &CategoryForm,
    ) -> Result<Category, ApiError> {
        self.fetch(ApiRequest::put(format!("{}/{id}", config::API_CATEGORIES)).json(form)?)
            .await
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(format!("{}/{id}", config::API_CATEGORIES)))
            .await?;
        Ok(())
    }

    pub async fn create_transaction(&self, transaction: &NewTransaction) -> Result<(), ApiError> {
        self.send(ApiRequest::post(config::API_TRANSACTIONS).json(transaction)?)
            .await?;
        Ok(())
    }

    pub async fn report(&self, request: &ReportRequest) -> Result<Vec<ReportLine>, ApiError> {
        let response: ListResponse<ReportLine> = self
            .fetch(ApiRequest::post(config::API_REPORT).json(request)?)
            .await?;
        Ok(response.list)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        api::{
            test_utils::{json_response, text_response, FakeTransport},
            ApiClient, ApiError, Method,
        },
        models::{AccountForm, CategoryType, Credentials, ReportLine, ReportRequest},
    };

    #[tokio::test]
    async fn login_posts_form_and_accepts_any_success_status() {
        let transport = FakeTransport::with_responses([text_response(204, "")]);
        let client = ApiClient::new("http://api.test", transport.clone());

        let result = client
            .login(&Credentials {
                email: "jo@example.com".to_owned(),
                password: "secret".to_owned(),
            })
            .await;

        assert_eq!(result, Ok(()));
        let sent = transport.last_request();
        assert_eq!(sent.url, "http://api.test/api/auth/login");
        assert_eq!(sent.header("content-type"), Some("application/x-www-form-urlencoded"));
        assert_eq!(sent.body.as_deref(), Some("email=jo%40example.com&password=secret"));
    }

    #[tokio::test]
    async fn failed_login_surfaces_typed_error() {
        let transport = FakeTransport::with_responses([json_response(
            401,
            json!({"message": "Bad credentials"}),
        )]);
        let client = ApiClient::new("", transport);

        let error = client
            .login(&Credentials {
                email: "jo@example.com".to_owned(),
                password: "wrong".to_owned(),
            })
            .await
            .unwrap_err();

        assert!(error.is_unauthorized());
        assert_eq!(error.to_string(), "Bad credentials");
    }

    #[tokio::test]
    async fn update_account_puts_to_account_path() {
        let transport = FakeTransport::with_responses([json_response(
            200,
            json!({"id": 5, "accountName": "Savings", "balance": 99.5, "creationDate": "2024-01-02"}),
        )]);
        let client = ApiClient::new("", transport.clone());

        let account = client
            .update_account(
                5,
                &AccountForm {
                    account_name: "Savings".to_owned(),
                    balance: 99.5,
                    creation_date: Some("2024-01-02".to_owned()),
                },
            )
            .await
            .unwrap();

        assert_eq!(account.id, 5);
        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.url, "/api/accounts/5");
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"accountName": "Savings", "balance": 99.5, "creationDate": "2024-01-02"})
        );
    }

    #[tokio::test]
    async fn categories_are_requested_by_type() {
        let transport = FakeTransport::with_responses([json_response(
            200,
            json!({"list": [{"id": 1, "description": "Salary", "type": "INCOME"}]}),
        )]);
        let client = ApiClient::new("", transport.clone());

        let categories = client.categories(CategoryType::Income).await.unwrap();

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].category_type, CategoryType::Income);
        assert_eq!(transport.last_request().url, "/api/categories?type=INCOME");
    }

    #[tokio::test]
    async fn delete_ignores_response_body() {
        let transport = FakeTransport::with_responses([text_response(200, "Deleted")]);
        let client = ApiClient::new("", transport.clone());

        assert_eq!(client.delete_category(8).await, Ok(()));
        assert_eq!(transport.requests()[0].method, Method::Delete);
        assert_eq!(transport.requests()[0].url, "/api/categories/8");
    }

    #[tokio::test]
    async fn report_unwraps_list() {
        let transport = FakeTransport::with_responses([json_response(
            200,
            json!({"list": [{"description": "Food", "sum": 42.0}]}),
        )]);
        let client = ApiClient::new("", transport.clone());

        let lines = client
            .report(&ReportRequest {
                from: "2024-01-01".to_owned(),
                till: "2024-01-31".to_owned(),
                category_type: CategoryType::Expense,
            })
            .await
            .unwrap();

        assert_eq!(
            lines,
            vec![ReportLine {
                description: "Food".to_owned(),
                sum: 42.0,
            }]
        );
        assert_eq!(
            transport.last_request().body.as_deref(),
            Some(r#"{"from":"2024-01-01","till":"2024-01-31","type":"EXPENSE"}"#)
        );
    }

    #[tokio::test]
    async fn list_without_envelope_is_a_decode_error() {
        let transport = FakeTransport::with_responses([json_response(200, json!([]))]);
        let client = ApiClient::new("", transport);

        let result = client.accounts().await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
