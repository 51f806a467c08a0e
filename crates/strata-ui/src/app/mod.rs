//! Application root: session wiring, routing, and boot gating.
//!
//! # Design
//! - One controller per page load, created in a memo and shared by context.
//! - The session store pushes every transition into the yewdux [`AppStore`];
//!   components read the snapshot, never the store directly.
//! - Signing out closes open dialogs through the modal registry.
//! - Reconciliation runs once, after the router navigator is attached, and the
//!   boot state decides whether routes render at all.

use std::rc::Rc;

use gloo::console;
use gloo::utils::document;
use strata_auth::{AuthError, AuthSessionController, ModalRegistry, SessionStore};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::components::boot::{BootError, BootSplash};
use crate::components::dashboard::{DashboardPage, NotFoundPage, SectionPage};
use crate::components::login::LoginPage;
use crate::components::logout::LogoutPage;
use crate::components::password::PasswordPolicyPage;
use crate::components::shell::AppShell;
use crate::i18n::{LocaleCode, TranslationBundle};
use crate::services::api::GlooAuthApi;
use crate::state::{AppStore, BootState, dismiss_dialogs_on_sign_out};
use navigation::BrowserNavigator;
use preferences::{LocalUsernameStorage, api_base_url, load_locale, persist_locale};
pub(crate) use routes::Route;

mod navigation;
mod preferences;
mod routes;

pub(crate) type Controller = AuthSessionController<GlooAuthApi, BrowserNavigator>;

/// Shared session controller for components.
#[derive(Clone)]
pub(crate) struct SessionCtx {
    pub(crate) controller: Rc<Controller>,
}

impl SessionCtx {
    fn new() -> Self {
        let api_base = api_base_url();
        let session = Rc::new(SessionStore::new(LocalUsernameStorage));
        let modals = Rc::new(ModalRegistry::new());
        let dispatch = Dispatch::<AppStore>::new();
        dispatch.reduce_mut(|store| store.apply_session(&session.state()));
        {
            let modals = Rc::clone(&modals);
            session.subscribe(move |state| {
                dismiss_dialogs_on_sign_out(&modals, state);
                dispatch.reduce_mut(|store| store.apply_session(state));
            });
        }

        let controller = AuthSessionController::new(
            GlooAuthApi::new(api_base.clone()),
            BrowserNavigator::new(api_base),
            session,
            modals,
        );
        Self {
            controller: Rc::new(controller),
        }
    }
}

impl PartialEq for SessionCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
    }
}

/// Current locale plus a setter for the picker.
#[derive(Clone, PartialEq)]
pub(crate) struct LocaleSwitch {
    pub(crate) current: LocaleCode,
    pub(crate) set: Callback<LocaleCode>,
}

#[function_component(StrataApp)]
pub(crate) fn strata_app() -> Html {
    let locale = use_state(load_locale);
    let session_ctx = use_memo(|_| SessionCtx::new(), ());
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };

    {
        let locale = *locale;
        let rtl = bundle.rtl();
        use_effect_with_deps(
            move |_| {
                persist_locale(locale);
                if let Some(root) = document().document_element() {
                    let dir = if rtl { "rtl" } else { "ltr" };
                    if root.set_attribute("dir", dir).is_err()
                        || root.set_attribute("lang", locale.code()).is_err()
                    {
                        console::error!("failed to apply locale attributes", locale.code());
                    }
                }
                || ()
            },
            locale,
        );
    }

    let locale_switch = LocaleSwitch {
        current: *locale,
        set: {
            let locale = locale.clone();
            Callback::from(move |next: LocaleCode| locale.set(next))
        },
    };

    html! {
        <ContextProvider<SessionCtx> context={(*session_ctx).clone()}>
            <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                <ContextProvider<LocaleSwitch> context={locale_switch}>
                    <HashRouter>
                        <AppRoot />
                    </HashRouter>
                </ContextProvider<LocaleSwitch>>
            </ContextProvider<TranslationBundle>>
        </ContextProvider<SessionCtx>>
    }
}

#[function_component(AppRoot)]
fn app_root() -> Html {
    let ctx = use_context::<SessionCtx>();
    let router = use_navigator();
    let boot = use_selector(|store: &AppStore| store.boot.clone());

    {
        let ctx = ctx.clone();
        use_effect_with_deps(
            move |_| {
                if let (Some(ctx), Some(router)) = (ctx, router) {
                    ctx.controller.navigator().attach(router);
                }
                || ()
            },
            (),
        );
    }
    use_effect_with_deps(
        move |_| {
            if let Some(ctx) = ctx {
                spawn_local(async move {
                    let outcome = ctx.controller.bootstrap().await;
                    match &outcome {
                        Err(AuthError::AlreadyBootstrapped) => return,
                        Err(err) => console::error!("session reconciliation failed", err.to_string()),
                        Ok(_) => {}
                    }
                    Dispatch::<AppStore>::new()
                        .reduce_mut(|store| store.boot = BootState::from_outcome(&outcome));
                });
            }
            || ()
        },
        (),
    );

    match &*boot {
        BootState::Pending => html! { <BootSplash message_key="boot.loading" fallback="Connecting to the cluster…" /> },
        BootState::Redirecting => html! { <BootSplash message_key="boot.redirecting" fallback="Redirecting to your identity provider…" /> },
        BootState::Failed(detail) => html! { <BootError detail={detail.clone()} /> },
        BootState::LoginForm | BootState::Ready => html! { <Switch<Route> render={switch} /> },
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Login => html! { <LoginPage /> },
        Route::Logout => html! { <LogoutPage /> },
        other => html! { <Guarded route={other} /> },
    }
}

#[derive(Properties, PartialEq)]
struct GuardedProps {
    route: Route,
}

/// Renders console pages for signed-in operators and sends everyone else to
/// the login form.
#[function_component(Guarded)]
fn guarded(props: &GuardedProps) -> Html {
    let authenticated = use_selector(|store: &AppStore| store.session.is_authenticated());
    if !*authenticated {
        return html! { <Redirect<Route> to={Route::Login} /> };
    }

    let page = match &props.route {
        Route::Section { scope } => html! { <SectionPage scope={scope.clone()} /> },
        Route::Password => html! { <PasswordPolicyPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::NotFound | Route::Login | Route::Logout => html! { <NotFoundPage /> },
    };
    html! {
        <AppShell active={props.route.clone()}>
            {page}
        </AppShell>
    }
}

/// Mount the console into `#root`, or the document body when absent.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = document().get_element_by_id("root") {
        yew::Renderer::<StrataApp>::with_root(root).render();
    } else {
        yew::Renderer::<StrataApp>::new().render();
    }
}
