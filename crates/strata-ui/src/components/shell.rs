use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::{Dispatch, use_selector};

use crate::app::{LocaleSwitch, Route, SessionCtx};
use crate::components::modal::{Dialog, close_dialog, open_dialog};
use crate::components::use_bundle;
use crate::i18n::{LocaleCode, TranslationBundle};
use crate::nav::{NavEntry, visible_entries};
use crate::state::{AppStore, DialogKind};

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub(crate) children: Children,
    pub(crate) active: Route,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let bundle = use_bundle();
    let ctx = use_context::<SessionCtx>();
    let locale = use_context::<LocaleSwitch>();
    let router = use_navigator();
    let session = use_selector(|store: &AppStore| store.session.clone());
    let notice = use_selector(|store: &AppStore| store.notice);
    let dialogs = use_selector(|store: &AppStore| store.dialogs.clone());

    let show = |kind: DialogKind| {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(ctx) = &ctx {
                open_dialog(ctx, kind);
            }
        })
    };
    let hide = |kind: DialogKind| {
        let ctx = ctx.clone();
        Callback::from(move |()| {
            if let Some(ctx) = &ctx {
                close_dialog(ctx, kind);
            }
        })
    };
    let confirm_logout = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(ctx) = &ctx {
                close_dialog(ctx, DialogKind::ConfirmLogout);
            }
            if let Some(router) = &router {
                router.replace(&Route::Logout);
            }
        })
    };
    let dismiss_notice = Callback::from(|_: MouseEvent| {
        Dispatch::<AppStore>::new().reduce_mut(|store| store.notice = None);
    });

    let dialog_views = dialogs.iter().map(|dialog| match dialog.kind {
        DialogKind::About => html! {
            <Dialog
                key={dialog.id.get()}
                title={bundle.text("dialog.about.title", "About Strata")}
                on_close={hide(DialogKind::About)}
            >
                <p>{bundle.text("dialog.about.body", "Management console for Strata storage clusters.")}</p>
            </Dialog>
        },
        DialogKind::ConfirmLogout => {
            let cancel = hide(DialogKind::ConfirmLogout);
            let on_cancel = {
                let cancel = cancel.clone();
                Callback::from(move |_: MouseEvent| cancel.emit(()))
            };
            html! {
                <Dialog
                    key={dialog.id.get()}
                    title={bundle.text("dialog.logout.title", "Sign out?")}
                    on_close={cancel}
                    actions={html! {
                        <>
                            <button class="ghost" onclick={on_cancel}>
                                {bundle.text("dialog.cancel", "Cancel")}
                            </button>
                            <button class="solid" onclick={confirm_logout.clone()}>
                                {bundle.text("dialog.logout.confirm", "Sign out")}
                            </button>
                        </>
                    }}
                >
                    <p>{bundle.text("dialog.logout.body", "You will need to sign in again to manage the cluster.")}</p>
                </Dialog>
            }
        }
    });

    html! {
        <div class="app-shell">
            <aside class="sidebar">
                <div class="brand">
                    <strong>{bundle.text("app.title", "Strata")}</strong>
                    <span class="muted">{bundle.text("app.subtitle", "Storage console")}</span>
                </div>
                <nav>
                    {for visible_entries(&session.permissions).map(|entry| nav_item(entry, &props.active, &bundle))}
                </nav>
                <div class="sidebar-footer">
                    {locale.map_or_else(Html::default, locale_picker)}
                    <button class="ghost" onclick={show(DialogKind::About)}>
                        {bundle.text("shell.about", "About")}
                    </button>
                </div>
            </aside>
            <div class="main">
                <header class="topbar">
                    <span class="muted">{bundle.text("shell.signed_in_as", "Signed in as")}</span>
                    <strong class="username">{session.username.clone().unwrap_or_default()}</strong>
                    <button
                        class="ghost"
                        disabled={session.logging_out}
                        onclick={show(DialogKind::ConfirmLogout)}
                    >
                        {bundle.text("shell.sign_out", "Sign out")}
                    </button>
                </header>
                {if let Some(notice) = *notice {
                    let (key, fallback) = notice.message();
                    html! {
                        <div class="notice error" role="alert">
                            <span>{bundle.text(key, fallback)}</span>
                            <button class="ghost" aria-label={bundle.text("dialog.close", "Close")} onclick={dismiss_notice}>{"✕"}</button>
                        </div>
                    }
                } else { html! {} }}
                <main>
                    {for props.children.iter()}
                </main>
            </div>
            {for dialog_views}
        </div>
    }
}

fn nav_item(entry: &NavEntry, active: &Route, bundle: &TranslationBundle) -> Html {
    let route = Route::from(entry.target);
    let classes = classes!("nav-item", (*active == route).then_some("active"));
    html! {
        <Link<Route> to={route} classes={classes}>
            {bundle.text(entry.label_key, entry.default_label)}
        </Link<Route>>
    }
}

fn locale_picker(locale: LocaleSwitch) -> Html {
    let on_change = {
        let set = locale.set.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                if let Some(next) = LocaleCode::from_lang_tag(&select.value()) {
                    set.emit(next);
                }
            }
        })
    };
    html! {
        <select class="locale-picker" onchange={on_change}>
            {for LocaleCode::all().into_iter().map(|code| html! {
                <option value={code.code()} selected={code == locale.current}>{code.label()}</option>
            })}
        </select>
    }
}
