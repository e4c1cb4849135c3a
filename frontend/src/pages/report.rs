use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{bind_input, bind_select};
use crate::{
    alert::{api_error_alert, Alert, AlertBox, FieldLabels},
    api::ApiClient,
    auth,
    components::NavBar,
    format::format_amount,
    models::{CategoryType, ReportLine, ReportRequest, UserInfo},
    navigation::Route,
    validation::check_date_range,
};

const LABELS: FieldLabels = &[
    ("till", "End date"),
    ("from", "Start date"),
    ("type", "Transaction type"),
];

const DEFAULT_TYPE: CategoryType = CategoryType::Expense;

/// A report as returned for the request that produced it.
#[derive(Debug, Clone, PartialEq)]
struct Report {
    request: ReportRequest,
    lines: Vec<ReportLine>,
}

impl Report {
    fn heading(&self) -> String {
        format!(
            "{} ({} - {})",
            self.request.category_type, self.request.from, self.request.till
        )
    }
}

fn report_line(line: &ReportLine) -> String {
    format!("{} - {}", line.description, format_amount(line.sum))
}

#[function_component(ReportPage)]
pub fn report_page() -> Html {
    let user = use_state(|| None::<UserInfo>);
    let from = use_state(String::new);
    let till = use_state(String::new);
    let kind = use_state(|| DEFAULT_TYPE.as_str().to_owned());
    let alert = use_state(|| None::<Alert>);
    let report = use_state(|| None::<Report>);
    let loading = use_state(|| false);

    {
        let user = user.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Some(current_user) = auth::require_auth(&ApiClient::default()).await {
                    user.set(current_user);
                }
            });
            || ()
        });
    }

    let on_submit = {
        let from = from.clone();
        let till = till.clone();
        let kind = kind.clone();
        let alert = alert.clone();
        let report = report.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            alert.set(None);

            if let Err(error) = check_date_range(&from, &till) {
                alert.set(Some(Alert::danger(error.to_string())));
                report.set(None);
                return;
            }

            let request = ReportRequest {
                from: (*from).clone(),
                till: (*till).clone(),
                category_type: CategoryType::parse(&kind).unwrap_or(DEFAULT_TYPE),
            };

            loading.set(true);
            let from = from.clone();
            let till = till.clone();
            let kind = kind.clone();
            let alert = alert.clone();
            let report = report.clone();
            let loading = loading.clone();
            spawn_local(async move {
                match ApiClient::default().report(&request).await {
                    Ok(lines) => {
                        if lines.is_empty() {
                            alert.set(Some(Alert::warning("No transactions found")));
                            report.set(None);
                        } else {
                            report.set(Some(Report { request, lines }));
                        }
                        from.set(String::new());
                        till.set(String::new());
                        kind.set(DEFAULT_TYPE.as_str().to_owned());
                    }
                    Err(error) => {
                        alert.set(Some(api_error_alert(
                            &error,
                            "Error when loading report",
                            LABELS,
                        )));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_clear = {
        let report = report.clone();
        Callback::from(move |_| report.set(None))
    };

    let on_dismiss = {
        let alert = alert.clone();
        Callback::from(move |_| alert.set(None))
    };

    html! {
        <>
            <NavBar active={Route::Report} user={(*user).clone()} />
            <main class="container" style="max-width: 640px;">
                <h1 class="h4 mb-3">{"Report"}</h1>
                <AlertBox alert={(*alert).clone()} on_dismiss={on_dismiss} />
                <form id="reportForm" class="card card-body mb-4" onsubmit={on_submit}>
                    <div class="row">
                        <div class="col mb-3">
                            <label class="form-label" for="startDate">{"Start date"}</label>
                            <input id="startDate" name="startDate" type="date" class="form-control"
                                value={(*from).clone()} oninput={bind_input(&from)} />
                        </div>
                        <div class="col mb-3">
                            <label class="form-label" for="endDate">{"End date"}</label>
                            <input id="endDate" name="endDate" type="date" class="form-control"
                                value={(*till).clone()} oninput={bind_input(&till)} />
                        </div>
                    </div>
                    <div class="mb-3">
                        <label class="form-label" for="selectCategory">{"Transaction type"}</label>
                        <select id="selectCategory" name="selectCategory" class="form-select" onchange={bind_select(&kind)}>
                            { for CategoryType::ALL.into_iter().map(|option| html! {
                                <option value={option.as_str()} selected={option.as_str() == kind.as_str()}>
                                    { option.label() }
                                </option>
                            }) }
                        </select>
                    </div>
                    <button type="submit" class="btn btn-primary w-100" disabled={*loading}>
                        { if *loading { "Loading..." } else { "Show report" } }
                    </button>
                </form>
                if let Some(report) = &*report {
                    <div id="reportDiv">
                        <h5>{ report.heading() }</h5>
                        <ul class="list-group mb-3">
                            { for report.lines.iter().map(|line| html! {
                                <li class="list-group-item">{ report_line(line) }</li>
                            }) }
                        </ul>
                        <button class="btn btn-primary w-100" onclick={on_clear}>{"Clear"}</button>
                    </div>
                }
            </main>
        </>
    }
}
