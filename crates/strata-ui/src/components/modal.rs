//! Dialog chrome plus the glue that keeps shown dialogs registered with the
//! session controller's modal registry.
//!
//! Every dialog is opened through [`open_dialog`], so reconciliation can
//! dismiss it with the registry's `close_all` before the login form appears.

use yew::prelude::*;
use yewdux::prelude::Dispatch;

use crate::app::SessionCtx;
use crate::components::use_bundle;
use crate::state::{AppStore, DialogKind};

/// Show `kind` unless it is already open.
pub(crate) fn open_dialog(ctx: &SessionCtx, kind: DialogKind) {
    let dispatch = Dispatch::<AppStore>::new();
    if dispatch.get().dialog(kind).is_some() {
        return;
    }
    let id = ctx.controller.modals().open(move || {
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            store.close_dialog(kind);
        });
    });
    dispatch.reduce_mut(|store| store.open_dialog(kind, id));
}

/// Dismiss `kind` through the registry.
pub(crate) fn close_dialog(ctx: &SessionCtx, kind: DialogKind) {
    let dispatch = Dispatch::<AppStore>::new();
    let Some(id) = dispatch.get().dialog(kind) else {
        return;
    };
    if !ctx.controller.modals().close(id) {
        dispatch.reduce_mut(|store| {
            store.close_dialog(kind);
        });
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct DialogProps {
    pub(crate) title: AttrValue,
    pub(crate) on_close: Callback<()>,
    #[prop_or_default]
    pub(crate) actions: Html,
    #[prop_or_default]
    pub(crate) children: Children,
}

#[function_component(Dialog)]
pub(crate) fn dialog(props: &DialogProps) -> Html {
    let bundle = use_bundle();
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    html! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog" aria-modal="true">
                <header>
                    <h3>{props.title.clone()}</h3>
                    <button class="ghost" aria-label={bundle.text("dialog.close", "Close")} onclick={close}>{"✕"}</button>
                </header>
                <div class="modal-body">
                    {for props.children.iter()}
                </div>
                <footer class="actions">
                    {props.actions.clone()}
                </footer>
            </div>
        </div>
    }
}
