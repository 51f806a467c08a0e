//! Full-page views shown while the session is being reconciled.

use yew::prelude::*;

use crate::components::use_bundle;

#[derive(Properties, PartialEq)]
pub(crate) struct BootSplashProps {
    pub(crate) message_key: &'static str,
    pub(crate) fallback: &'static str,
}

#[function_component(BootSplash)]
pub(crate) fn boot_splash(props: &BootSplashProps) -> Html {
    let bundle = use_bundle();
    html! {
        <div class="boot-splash" role="status" aria-live="polite">
            <span class="spinner" aria-hidden="true"></span>
            <p>{bundle.text(props.message_key, props.fallback)}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct BootErrorProps {
    pub(crate) detail: String,
}

/// Shown when the `/auth` probe fails. Offers no way into the console.
#[function_component(BootError)]
pub(crate) fn boot_error(props: &BootErrorProps) -> Html {
    let bundle = use_bundle();
    html! {
        <div class="boot-error" role="alert">
            <h2>{bundle.text("boot.failed.title", "Console unavailable")}</h2>
            <p class="muted">
                {bundle.text(
                    "boot.failed.body",
                    "The session service could not be reached. Reload the page once the cluster is back.",
                )}
            </p>
            <pre class="detail">{&props.detail}</pre>
        </div>
    }
}
