//! Landing page, permission-gated sections, and the not-found page.

use strata_auth::Action;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

use crate::app::Route;
use crate::components::use_bundle;
use crate::i18n::TranslationBundle;
use crate::nav::{SectionAccess, section, section_access};
use crate::state::AppStore;

fn action_label(bundle: &TranslationBundle, action: Action) -> String {
    let key = format!("action.{}", action.as_str());
    bundle.text(&key, action.as_str())
}

#[function_component(DashboardPage)]
pub(crate) fn dashboard_page() -> Html {
    let bundle = use_bundle();
    let session = use_selector(|store: &AppStore| store.session.clone());

    let rows = session
        .permissions
        .scopes()
        .map(|(scope, actions)| {
            let actions = actions
                .iter()
                .map(|action| action_label(&bundle, *action))
                .collect::<Vec<_>>()
                .join(", ");
            html! {
                <tr key={scope.to_string()}>
                    <td>{scope}</td>
                    <td>{actions}</td>
                </tr>
            }
        })
        .collect::<Html>();

    html! {
        <section class="dashboard">
            <h2>
                {format!(
                    "{}, {}",
                    bundle.text("dashboard.welcome", "Welcome"),
                    session.username.clone().unwrap_or_default()
                )}
            </h2>
            <h3>{bundle.text("dashboard.permissions", "Your permissions")}</h3>
            {if session.permissions.is_empty() {
                html! { <p class="muted">{bundle.text("dashboard.none", "No permissions have been granted to this account.")}</p> }
            } else {
                html! {
                    <table class="permissions">
                        <thead>
                            <tr>
                                <th>{bundle.text("dashboard.scope", "Scope")}</th>
                                <th>{bundle.text("dashboard.actions", "Actions")}</th>
                            </tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                }
            }}
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct SectionProps {
    pub(crate) scope: String,
}

#[function_component(SectionPage)]
pub(crate) fn section_page(props: &SectionProps) -> Html {
    let bundle = use_bundle();
    let permissions = use_selector(|store: &AppStore| store.session.permissions.clone());

    let Some(entry) = section(&props.scope) else {
        return html! { <NotFoundPage /> };
    };
    let title = bundle.text(entry.label_key, entry.default_label);
    let body = match section_access(&permissions, &props.scope) {
        SectionAccess::Hidden => html! {
            <p class="error-text" role="alert">
                {bundle.text("section.forbidden", "You do not have access to this section.")}
            </p>
        },
        SectionAccess::ReadOnly => html! {
            <p class="muted">{bundle.text("section.read_only", "You have read-only access to this section.")}</p>
        },
        SectionAccess::Editable(actions) => html! {
            <>
                <p>{bundle.text("section.editable", "You can make changes in this section.")}</p>
                <ul class="chips">
                    {for actions.into_iter().map(|action| html! {
                        <li class="pill">{action_label(&bundle, action)}</li>
                    })}
                </ul>
            </>
        },
    };

    html! {
        <section class="section-page">
            <h2>{title}</h2>
            {body}
        </section>
    }
}

#[function_component(NotFoundPage)]
pub(crate) fn not_found_page() -> Html {
    let bundle = use_bundle();
    html! {
        <section class="placeholder">
            <h2>{bundle.text("not_found.title", "Page not found")}</h2>
            <Link<Route> to={Route::Dashboard}>{bundle.text("not_found.back", "Back to dashboard")}</Link<Route>>
        </section>
    }
}
