use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub show: bool,
    pub on_close: Callback<()>,
    pub children: Children,
}

/// A dialog that is rendered only while `show` is set.
///
/// Opening and closing is driven purely by the owner's state, so pages never
/// reach for a global modal object.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <>
            <div class="modal fade show d-block" tabindex="-1" role="dialog" aria-modal="true">
                <div class="modal-dialog">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title">{ props.title.clone() }</h5>
                            <button type="button" class="btn-close" aria-label="Close" onclick={on_close}></button>
                        </div>
                        <div class="modal-body">
                            { for props.children.iter() }
                        </div>
                    </div>
                </div>
            </div>
            <div class="modal-backdrop fade show"></div>
        </>
    }
}
