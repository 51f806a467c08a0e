//! Local login form.

use gloo::console;
use strata_auth::Credentials;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Redirect;
use yewdux::prelude::use_selector;

use crate::app::{Route, SessionCtx};
use crate::components::use_bundle;
use crate::state::{AppStore, login_error_message};

type Message = (&'static str, &'static str);

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let bundle = use_bundle();
    let ctx = use_context::<SessionCtx>();
    let authenticated = use_selector(|store: &AppStore| store.session.is_authenticated());
    let username = {
        let ctx = ctx.clone();
        use_state(move || {
            ctx.and_then(|ctx| ctx.controller.session().last_known_username())
                .unwrap_or_default()
        })
    };
    let password = use_state(String::new);
    let stay_signed_in = use_state(|| false);
    let busy = use_state(|| false);
    let error = use_state(|| None::<Message>);

    if *authenticated {
        return html! { <Redirect<Route> to={Route::Dashboard} /> };
    }

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let stay_signed_in = stay_signed_in.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }
            let Some(ctx) = ctx.clone() else {
                return;
            };
            let name = username.trim().to_string();
            if name.is_empty() || password.is_empty() {
                error.set(Some((
                    "login.error.required",
                    "Enter your username and password.",
                )));
                return;
            }

            let credentials =
                Credentials::new(name, (*password).clone()).stay_signed_in(*stay_signed_in);
            busy.set(true);
            error.set(None);
            let busy = busy.clone();
            let error = error.clone();
            let password = password.clone();
            spawn_local(async move {
                let result = ctx.controller.login(&credentials).await;
                busy.set(false);
                if let Err(err) = result {
                    console::warn!("login failed", err.to_string());
                    password.set(String::new());
                    error.set(Some(login_error_message(&err)));
                }
            });
        })
    };

    let on_username = {
        let username = username.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                username.set(input.value());
            }
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(input.value());
            }
        })
    };
    let on_stay = {
        let stay_signed_in = stay_signed_in.clone();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                stay_signed_in.set(input.checked());
            }
        })
    };

    html! {
        <div class="login-page">
            <form class="card login-form" onsubmit={on_submit}>
                <header>
                    <h2>{bundle.text("app.title", "Strata")}</h2>
                    <p class="muted">{bundle.text("login.title", "Sign in")}</p>
                </header>
                <label class="stack">
                    <span>{bundle.text("login.username", "Username")}</span>
                    <input
                        type="text"
                        name="username"
                        autocomplete="username"
                        value={(*username).clone()}
                        oninput={on_username}
                        disabled={*busy}
                    />
                </label>
                <label class="stack">
                    <span>{bundle.text("login.password", "Password")}</span>
                    <input
                        type="password"
                        name="password"
                        autocomplete="current-password"
                        value={(*password).clone()}
                        oninput={on_password}
                        disabled={*busy}
                    />
                </label>
                <label class="inline">
                    <input type="checkbox" checked={*stay_signed_in} onchange={on_stay} disabled={*busy} />
                    <span>{bundle.text("login.stay_signed_in", "Keep me signed in")}</span>
                </label>
                {if let Some((key, fallback)) = *error {
                    html! { <p class="error-text" role="alert">{bundle.text(key, fallback)}</p> }
                } else { html! {} }}
                <div class="actions">
                    <button class="solid" type="submit" disabled={*busy}>
                        {if *busy {
                            bundle.text("login.busy", "Signing in…")
                        } else {
                            bundle.text("login.submit", "Log in")
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
