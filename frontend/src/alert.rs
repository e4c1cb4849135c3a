//! Status messages shown to the user, and the mapping from API errors to them.

use yew::prelude::*;

use crate::{api::ApiError, validation::ValidationError};

/// Alert message types for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Warning,
    Danger,
}

impl AlertKind {
    fn css_class(self) -> &'static str {
        match self {
            AlertKind::Success => "alert-success",
            AlertKind::Warning => "alert-warning",
            AlertKind::Danger => "alert-danger",
        }
    }
}

/// A rejected field with its human readable label.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMessage {
    pub label: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlertContent {
    Text(String),
    FieldErrors(Vec<FieldMessage>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub content: AlertContent,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self::text(AlertKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::text(AlertKind::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::text(AlertKind::Danger, message)
    }

    fn text(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            content: AlertContent::Text(message.into()),
        }
    }
}

impl From<ValidationError> for Alert {
    fn from(error: ValidationError) -> Self {
        Alert::warning(error.to_string())
    }
}

/// Human readable names for the API's field keys, e.g. `("till", "End date")`.
pub type FieldLabels = &'static [(&'static str, &'static str)];

/// The label for `field`, or the raw key if there is none.
pub fn label_for<'a>(labels: FieldLabels, field: &'a str) -> &'a str {
    labels
        .iter()
        .find(|(key, _)| *key == field)
        .map(|(_, label)| *label)
        .unwrap_or(field)
}

/// Turn a failed API call into an alert.
///
/// Field validation errors become an itemised list using `labels`. Otherwise
/// the body's `message` is shown, or `fallback` when there is none or the
/// call never reached the server.
pub fn api_error_alert(error: &ApiError, fallback: &str, labels: FieldLabels) -> Alert {
    let ApiError::Api { .. } = error else {
        return Alert::danger(fallback);
    };

    let body = error.error_body().unwrap_or_default();

    match body.errors {
        Some(errors) if !errors.is_empty() => Alert {
            kind: AlertKind::Danger,
            content: AlertContent::FieldErrors(
                errors
                    .into_iter()
                    .map(|error| FieldMessage {
                        label: label_for(labels, &error.field).to_owned(),
                        message: error.message,
                    })
                    .collect(),
            ),
        },
        _ => Alert::danger(
            body.message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| fallback.to_owned()),
        ),
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertBoxProps {
    #[prop_or_default]
    pub alert: Option<Alert>,
    #[prop_or_default]
    pub on_dismiss: Callback<()>,
}

/// Renders the current alert, replacing whatever was shown before.
#[function_component(AlertBox)]
pub fn alert_box(props: &AlertBoxProps) -> Html {
    let Some(alert) = &props.alert else {
        return html! {};
    };

    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(()))
    };

    let message = match &alert.content {
        AlertContent::Text(text) => html! { <div class="alert-message">{ text.clone() }</div> },
        AlertContent::FieldErrors(fields) => html! {
            <div class="alert-message">
                <div class="fw-semibold mb-1">{"Please fix:"}</div>
                <ul class="mb-0">
                    { for fields.iter().map(|field| html! {
                        <li><b>{ field.label.clone() }</b>{": "}{ field.message.clone() }</li>
                    }) }
                </ul>
            </div>
        },
    };

    html! {
        <div class={classes!("alert", alert.kind.css_class(), "alert-dismissible", "fade", "show")} role="alert">
            { message }
            <button type="button" class="btn-close" aria-label="Close" onclick={on_close}></button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use serde_json::json;
    use yew::{Callback, ServerRenderer};

    use super::{
        api_error_alert, Alert, AlertBox, AlertBoxProps, AlertContent, AlertKind, FieldLabels,
        FieldMessage,
    };
    use crate::api::{ApiError, ResponseBody};

    const LABELS: FieldLabels = &[("email", "Email"), ("birthDate", "Birth date")];

    fn api_error(body: serde_json::Value) -> ApiError {
        ApiError::api(400, ResponseBody::Json(body))
    }

    #[test]
    fn network_errors_use_fallback() {
        let alert = api_error_alert(
            &ApiError::Network("offline".to_owned()),
            "Unknown error",
            LABELS,
        );

        assert_eq!(alert, Alert::danger("Unknown error"));
    }

    #[test]
    fn field_errors_are_labelled() {
        let error = api_error(json!({
            "message": "Validation failed",
            "errors": [
                {"field": "email", "message": "taken"},
                {"field": "nickname", "message": "too long"}
            ]
        }));

        let alert = api_error_alert(&error, "Error during registration", LABELS);

        assert_eq!(
            alert,
            Alert {
                kind: AlertKind::Danger,
                content: AlertContent::FieldErrors(vec![
                    FieldMessage {
                        label: "Email".to_owned(),
                        message: "taken".to_owned(),
                    },
                    FieldMessage {
                        label: "nickname".to_owned(),
                        message: "too long".to_owned(),
                    },
                ]),
            }
        );
    }

    #[test]
    fn message_is_used_without_field_errors() {
        let error = api_error(json!({"message": "Account name already exists", "errors": []}));

        let alert = api_error_alert(&error, "Could not save account", LABELS);

        assert_eq!(alert, Alert::danger("Account name already exists"));
    }

    #[test]
    fn message_is_used_when_every_field_error_is_malformed() {
        let error = api_error(json!({
            "message": "Validation failed",
            "errors": [{"field": "email", "message": null}]
        }));

        let alert = api_error_alert(&error, "Fallback text", LABELS);

        assert_eq!(alert, Alert::danger("Validation failed"));
    }

    #[test]
    fn fallback_when_body_has_no_message() {
        let text = ApiError::api(500, ResponseBody::Text("Internal Server Error".to_owned()));
        assert_eq!(
            api_error_alert(&text, "Could not save account", LABELS),
            Alert::danger("Could not save account")
        );

        let null = ApiError::api(500, ResponseBody::Null);
        assert_eq!(
            api_error_alert(&null, "Could not save account", LABELS),
            Alert::danger("Could not save account")
        );
    }

    async fn render(alert: Option<Alert>) -> String {
        ServerRenderer::<AlertBox>::with_props(move || AlertBoxProps {
            alert,
            on_dismiss: Callback::noop(),
        })
        .hydratable(false)
        .render()
        .await
    }

    #[tokio::test]
    async fn field_errors_render_escaped() {
        let error = api_error(json!({"errors": [
            {"field": "email", "message": "taken"},
            {"field": "birthDate", "message": "<script>alert(1)</script>"}
        ]}));
        let alert = api_error_alert(&error, "Error during registration", LABELS);

        let rendered = render(Some(alert)).await;

        assert!(rendered.contains("Email"));
        assert!(rendered.contains("taken"));
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("&lt;script&gt;"));

        let document = Html::parse_fragment(&rendered);
        let items: Vec<String> = document
            .select(&Selector::parse("li").unwrap())
            .map(|item| item.text().collect())
            .collect();
        assert_eq!(
            items,
            ["Email: taken", "Birth date: <script>alert(1)</script>"]
        );
        let alert_box = document
            .select(&Selector::parse("div.alert").unwrap())
            .next()
            .expect("alert container not rendered");
        assert!(alert_box.value().classes().any(|class| class == "alert-danger"));
    }

    #[tokio::test]
    async fn no_alert_renders_nothing() {
        let rendered = render(None).await;

        assert!(rendered.trim().is_empty());
    }
}
