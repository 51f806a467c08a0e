//! Navigation seam between the controller and its host shell.

/// In-app views the controller can route to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    /// Landing view for authenticated operators.
    Default,
    /// Local login form.
    Login,
    /// Transitional view shown while leaving the console.
    Logout,
}

impl View {
    /// Hash-route path of the view.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Default => "/",
            Self::Login => "/login",
            Self::Logout => "/logout",
        }
    }
}

/// How an in-app navigation treats browser history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationMode {
    /// Add a history entry.
    Push,
    /// Replace the current entry.
    Replace,
}

/// Host-provided navigation: in-app routing plus full-page redirects.
pub trait Navigator {
    /// Route to an in-app view.
    fn navigate(&self, view: View, mode: NavigationMode);

    /// Leave the application for `url` (absolute or relative to the API origin).
    ///
    /// Irrevocable: nothing after a redirect is observable to the operator.
    fn redirect(&self, url: &str);
}
