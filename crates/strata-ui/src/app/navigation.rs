//! Browser implementation of the controller's navigation seam.
//!
//! In-app views go through the Yew router once the router has mounted; before
//! that the hash is written directly. Redirects leave the app with
//! `location.replace`, so the console is not left in the history stack.

use std::cell::RefCell;

use gloo::console;
use gloo::utils::window;
use strata_auth::{NavigationMode, Navigator, View};
use web_sys::Url;
use yew_router::prelude::Navigator as RouterNavigator;

use crate::app::preferences::js_error;
use crate::app::routes::Route;

pub(crate) struct BrowserNavigator {
    api_base: String,
    router: RefCell<Option<RouterNavigator>>,
}

impl BrowserNavigator {
    pub(crate) const fn new(api_base: String) -> Self {
        Self {
            api_base,
            router: RefCell::new(None),
        }
    }

    /// Route through `router` from now on.
    pub(crate) fn attach(&self, router: RouterNavigator) {
        *self.router.borrow_mut() = Some(router);
    }

    fn resolve(&self, url: &str) -> anyhow::Result<String> {
        if url.starts_with('#') {
            let href = window().location().href().map_err(|err| js_error(&err))?;
            let document = href.split('#').next().unwrap_or_default();
            return Ok(format!("{document}{url}"));
        }
        let target = Url::new_with_base(url, &self.api_base).map_err(|err| js_error(&err))?;
        Ok(target.href())
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, view: View, mode: NavigationMode) {
        if let Some(router) = self.router.borrow().as_ref() {
            let route = Route::from(view);
            match mode {
                NavigationMode::Push => router.push(&route),
                NavigationMode::Replace => router.replace(&route),
            }
            return;
        }
        if let Err(err) = window().location().set_hash(view.path()) {
            console::error!("navigation failed", view.path(), js_error(&err).to_string());
        }
    }

    fn redirect(&self, url: &str) {
        let outcome = self.resolve(url).and_then(|target| {
            window()
                .location()
                .replace(&target)
                .map_err(|err| js_error(&err))
        });
        if let Err(err) = outcome {
            console::error!("redirect failed", url.to_string(), err.to_string());
        }
    }
}
