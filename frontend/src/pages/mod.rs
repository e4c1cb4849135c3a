//! One controller component per screen.

pub mod finance;
pub mod login;
pub mod register;
pub mod report;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Keep `state` in sync with a text-like `<input>`.
pub(crate) fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

/// Keep `state` in sync with a `<select>`.
pub(crate) fn bind_select(state: &UseStateHandle<String>) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| state.set(select_value(&e)))
}

pub(crate) fn select_value(e: &Event) -> String {
    let select: HtmlSelectElement = e.target_unchecked_into();
    select.value()
}
