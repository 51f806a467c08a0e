//! Password policy page with a live strength meter.

use strata_auth::score;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::use_bundle;
use crate::i18n::PASSWORD_RULES_DEFAULT;

const METER_SEGMENTS: u8 = 4;

#[function_component(PasswordPolicyPage)]
pub(crate) fn password_policy_page() -> Html {
    let bundle = use_bundle();
    let candidate = use_state(String::new);
    let on_input = {
        let candidate = candidate.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                candidate.set(input.value());
            }
        })
    };

    html! {
        <section class="password-policy">
            <h2>{bundle.text("password.title", "Password policy")}</h2>
            <p class="muted">
                {bundle.text("password.rules", PASSWORD_RULES_DEFAULT)}
            </p>
            <label class="stack">
                <span>{bundle.text("password.candidate", "New password")}</span>
                <input type="password" autocomplete="new-password" oninput={on_input} />
            </label>
            <PasswordStrength password={AttrValue::from((*candidate).clone())} />
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct PasswordStrengthProps {
    pub(crate) password: AttrValue,
}

/// Meter for a candidate password; renders nothing for an empty input.
#[function_component(PasswordStrength)]
pub(crate) fn password_strength(props: &PasswordStrengthProps) -> Html {
    let bundle = use_bundle();
    if props.password.is_empty() {
        return html! {};
    }
    let result = score(&props.password);
    html! {
        <div
            class={classes!("password-strength", result.css_class())}
            role="meter"
            aria-valuemin="0"
            aria-valuemax={METER_SEGMENTS.to_string()}
            aria-valuenow={result.tier.to_string()}
        >
            <span class="label">{bundle.text("password.strength.label", "Strength")}</span>
            <div class="bar">
                {for (0..METER_SEGMENTS).map(|segment| html! {
                    <span class={classes!("segment", (segment < result.tier).then_some("filled"))}></span>
                })}
            </div>
            <span class="descriptor">
                {bundle.text(result.descriptor.label_key(), result.descriptor.default_label())}
            </span>
        </div>
    }
}
