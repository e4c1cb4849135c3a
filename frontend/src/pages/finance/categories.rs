use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::state::{FinanceAction, FinanceState};
use crate::{
    alert::{api_error_alert, Alert, AlertBox, FieldLabels},
    api::ApiClient,
    components::Modal,
    models::{Category, CategoryForm, CategoryId, CategoryType},
    pages::{bind_input, select_value},
    validation::require,
};

const LABELS: FieldLabels = &[("description", "Description"), ("type", "Type")];

#[derive(Debug, Clone, PartialEq)]
enum CategoryDialog {
    Create(CategoryType),
    /// Only the description can change; the type is fixed at creation.
    Edit(Category),
}

impl CategoryDialog {
    fn category_type(&self) -> CategoryType {
        match self {
            CategoryDialog::Create(category_type) => *category_type,
            CategoryDialog::Edit(category) => category.category_type,
        }
    }
}

/// Transfer categories are managed by the server.
fn is_editable(category_type: CategoryType) -> bool {
    category_type != CategoryType::Transfer
}

#[derive(Properties, PartialEq)]
pub struct CategoriesPanelProps {
    pub state: UseReducerHandle<FinanceState>,
}

#[function_component(CategoriesPanel)]
pub fn categories_panel(props: &CategoriesPanelProps) -> Html {
    let selected = use_state(|| CategoryType::Income);
    let dialog = use_state(|| None::<CategoryDialog>);
    let description = use_state(String::new);
    let dialog_alert = use_state(|| None::<Alert>);
    let panel_alert = use_state(|| None::<Alert>);
    let saving = use_state(|| false);

    let open = {
        let dialog = dialog.clone();
        let description = description.clone();
        let dialog_alert = dialog_alert.clone();
        move |next: CategoryDialog| {
            description.set(match &next {
                CategoryDialog::Create(_) => String::new(),
                CategoryDialog::Edit(category) => category.description.clone(),
            });
            dialog_alert.set(None);
            dialog.set(Some(next));
        }
    };

    let on_create = {
        let open = open.clone();
        let selected = selected.clone();
        Callback::from(move |_| open(CategoryDialog::Create(*selected)))
    };

    let on_type_change = {
        let dialog = dialog.clone();
        Callback::from(move |e: Event| {
            if let Some(category_type) = CategoryType::parse(&select_value(&e)) {
                dialog.set(Some(CategoryDialog::Create(category_type)));
            }
        })
    };

    let on_close = {
        let dialog = dialog.clone();
        Callback::from(move |_| dialog.set(None))
    };

    let on_submit = {
        let dialog = dialog.clone();
        let description = description.clone();
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
            let form = match require("Description", &description) {
                Ok(text) => CategoryForm {
                    description: text.to_owned(),
                    category_type: current.category_type(),
                },
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
                    CategoryDialog::Create(_) => client.create_category(&form).await,
                    CategoryDialog::Edit(category) => {
                        client.update_category(category.id, &form).await
                    }
                };

                match result {
                    Ok(category) => {
                        let message = format!("Category \"{}\" saved", category.description);
                        dispatcher.dispatch(FinanceAction::CategorySaved(category));
                        panel_alert.set(Some(Alert::success(message)));
                        dialog.set(None);
                    }
                    Err(error) => {
                        dialog_alert.set(Some(api_error_alert(
                            &error,
                            "Could not save the category",
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
        move |id: CategoryId| {
            panel_alert.set(None);
            let panel_alert = panel_alert.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                match ApiClient::default().delete_category(id).await {
                    Ok(()) => {
                        dispatcher.dispatch(FinanceAction::CategoryDeleted(id));
                        panel_alert.set(Some(Alert::success("Category deleted")));
                    }
                    Err(error) => {
                        panel_alert.set(Some(api_error_alert(
                            &error,
                            "Could not delete the category",
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

    let current_type = *selected;
    let categories = props.state.categories(current_type);
    let editable = is_editable(current_type);

    let dialog_title = match &*dialog {
        Some(CategoryDialog::Create(category_type)) => format!("New {} category", category_type.label().to_lowercase()),
        Some(CategoryDialog::Edit(_)) => "Edit category".to_owned(),
        None => String::new(),
    };

    html! {
        <div class="card mb-4">
            <div class="card-body">
                <div class="d-flex justify-content-between align-items-center mb-3">
                    <h2 class="h5 card-title mb-0">{"Categories"}</h2>
                    if editable {
                        <button class="btn btn-sm btn-primary" onclick={on_create}>{"Add category"}</button>
                    }
                </div>
                <ul class="nav nav-tabs mb-3">
                    { for CategoryType::ALL.into_iter().map(|category_type| {
                        let on_select = {
                            let selected = selected.clone();
                            let panel_alert = panel_alert.clone();
                            Callback::from(move |_| {
                                selected.set(category_type);
                                panel_alert.set(None);
                            })
                        };
                        let class = if category_type == current_type { "nav-link active" } else { "nav-link" };
                        html! {
                            <li class="nav-item">
                                <button type="button" class={class} onclick={on_select}>{ category_type.label() }</button>
                            </li>
                        }
                    }) }
                </ul>
                <AlertBox alert={(*panel_alert).clone()} on_dismiss={on_dismiss_panel} />
                if categories.is_empty() {
                    <p class="text-muted mb-0">{"No categories of this type."}</p>
                } else {
                    <ul class="list-group">
                        { for categories.iter().map(|category| {
                            let on_edit = {
                                let open = open.clone();
                                let category = category.clone();
                                Callback::from(move |_| open(CategoryDialog::Edit(category.clone())))
                            };
                            let on_delete = {
                                let delete = delete.clone();
                                let id = category.id;
                                Callback::from(move |_| delete(id))
                            };
                            html! {
                                <li key={category.id.to_string()} class="list-group-item d-flex justify-content-between align-items-center">
                                    <span>{ category.description.clone() }</span>
                                    if editable {
                                        <div class="d-flex gap-2">
                                            <button class="btn btn-sm btn-outline-secondary" onclick={on_edit}>{"Edit"}</button>
                                            <button class="btn btn-sm btn-outline-danger" onclick={on_delete}>{"Delete"}</button>
                                        </div>
                                    } else {
                                        <span class="badge text-bg-secondary">{"system"}</span>
                                    }
                                </li>
                            }
                        }) }
                    </ul>
                }
            </div>
            <Modal title={dialog_title} show={dialog.is_some()} on_close={on_close}>
                <AlertBox alert={(*dialog_alert).clone()} on_dismiss={on_dismiss_dialog} />
                <form onsubmit={on_submit}>
                    <div class="mb-3">
                        <label class="form-label" for="categoryType">{"Type"}</label>
                        if let Some(CategoryDialog::Create(current)) = &*dialog {
                            <select id="categoryType" class="form-select" onchange={on_type_change}>
                                { for CategoryType::ALL.into_iter().filter(|t| is_editable(*t)).map(|option| html! {
                                    <option value={option.as_str()} selected={option == *current}>
                                        { option.label() }
                                    </option>
                                }) }
                            </select>
                        } else {
                            <input id="categoryType" class="form-control" disabled=true
                                value={(*dialog).as_ref().map(|d| d.category_type().label()).unwrap_or_default()} />
                        }
                    </div>
                    <div class="mb-3">
                        <label class="form-label" for="description">{"Description"}</label>
                        <input id="description" class="form-control" value={(*description).clone()} oninput={bind_input(&description)} />
                    </div>
                    <button type="submit" class="btn btn-primary w-100" disabled={*saving}>
                        { if *saving { "Saving..." } else { "Save" } }
                    </button>
                </form>
            </Modal>
        </div>
    }
}
