//! Terminal stand-in for browser navigation.
//!
//! A CLI has no views to switch between, so view changes are only logged.
//! Redirects are resolved against the API base and kept for the command to
//! print, since the operator has to follow them in a browser.

use std::cell::{Cell, RefCell};

use reqwest::Url;
use strata_auth::{NavigationMode, Navigator, View};
use tracing::{debug, warn};

pub(crate) struct CliNavigator {
    base_url: Url,
    view: Cell<Option<View>>,
    redirect: RefCell<Option<Url>>,
}

impl CliNavigator {
    pub(crate) const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            view: Cell::new(None),
            redirect: RefCell::new(None),
        }
    }

    /// Last view the controller routed to.
    #[cfg(test)]
    pub(crate) fn view(&self) -> Option<View> {
        self.view.get()
    }

    /// Resolved target of the most recent redirect.
    pub(crate) fn redirect_target(&self) -> Option<Url> {
        self.redirect.borrow().clone()
    }
}

impl Navigator for CliNavigator {
    fn navigate(&self, view: View, mode: NavigationMode) {
        debug!(view = view.path(), replace = matches!(mode, NavigationMode::Replace), "navigate");
        self.view.set(Some(view));
    }

    fn redirect(&self, url: &str) {
        match self.base_url.join(url) {
            Ok(target) => {
                debug!(target = %target, "redirect");
                *self.redirect.borrow_mut() = Some(target);
            }
            Err(err) => warn!(location = url, error = %err, "unresolvable redirect location"),
        }
    }
}
