//! Transitional page that performs the logout request.

use gloo::console;
use strata_auth::AuthError;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::use_navigator;
use yewdux::prelude::Dispatch;

use crate::app::{Route, SessionCtx};
use crate::components::use_bundle;
use crate::state::{AppStore, Notice};

/// Starts the logout on mount. A failed request lands back on the dashboard
/// with the session intact; success ends in the controller's redirect.
#[function_component(LogoutPage)]
pub(crate) fn logout_page() -> Html {
    let bundle = use_bundle();
    let ctx = use_context::<SessionCtx>();
    let router = use_navigator();

    use_effect_with_deps(
        move |_| {
            match ctx {
                Some(ctx) if ctx.controller.session().is_authenticated() => {
                    spawn_local(async move {
                        match ctx.controller.logout().await {
                            Ok(_) | Err(AuthError::LogoutInProgress) => {}
                            Err(err) => {
                                console::error!("logout failed", err.to_string());
                                Dispatch::<AppStore>::new()
                                    .reduce_mut(|store| store.notice = Some(Notice::LogoutFailed));
                                if let Some(router) = router {
                                    router.replace(&Route::Dashboard);
                                }
                            }
                        }
                    });
                }
                Some(ctx) if ctx.controller.session().is_logging_out() => {}
                _ => {
                    if let Some(router) = router {
                        router.replace(&Route::Login);
                    }
                }
            }
            || ()
        },
        (),
    );

    html! {
        <div class="boot-splash" role="status" aria-live="polite">
            <span class="spinner" aria-hidden="true"></span>
            <p>{bundle.text("logout.title", "Signing out…")}</p>
        </div>
    }
}
