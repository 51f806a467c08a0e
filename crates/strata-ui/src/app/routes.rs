//! Routing definitions for the Strata console.
use strata_auth::View;
use yew_router::prelude::*;

use crate::nav::NavTarget;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Dashboard,
    #[at("/login")]
    Login,
    #[at("/logout")]
    Logout,
    #[at("/manage/:scope")]
    Section { scope: String },
    #[at("/user/password")]
    Password,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<View> for Route {
    fn from(view: View) -> Self {
        match view {
            View::Default => Self::Dashboard,
            View::Login => Self::Login,
            View::Logout => Self::Logout,
        }
    }
}

impl From<NavTarget> for Route {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::Dashboard => Self::Dashboard,
            NavTarget::Section(scope) => Self::Section {
                scope: scope.to_string(),
            },
            NavTarget::Password => Self::Password,
        }
    }
}
