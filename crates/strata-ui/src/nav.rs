//! Console navigation entries and their permission gates.
//!
//! An entry that declares a scope is only listed when the signed-in operator
//! can read that scope. Write access inside a section is derived from the same
//! [`PermissionSet`], so the shell never consults anything but the session.

use strata_auth::{Action, PermissionSet};

/// Destination of a navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavTarget {
    /// Landing dashboard.
    Dashboard,
    /// Scope-backed management section, keyed by its scope.
    Section(&'static str),
    /// Password change page.
    Password,
}

/// One item of the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavEntry {
    /// Where the entry leads.
    pub target: NavTarget,
    /// Translation key of the label.
    pub label_key: &'static str,
    /// English label when no translation is available.
    pub default_label: &'static str,
    /// Scope that must be readable for the entry to show.
    pub scope: Option<&'static str>,
}

impl NavEntry {
    /// Whether `permissions` unlock this entry.
    #[must_use]
    pub fn is_visible(&self, permissions: &PermissionSet) -> bool {
        self.scope.is_none_or(|scope| permissions.can_read(scope))
    }
}

/// Sidebar entries in display order.
pub const NAV_ENTRIES: [NavEntry; 5] = [
    NavEntry {
        target: NavTarget::Dashboard,
        label_key: "nav.dashboard",
        default_label: "Dashboard",
        scope: None,
    },
    NavEntry {
        target: NavTarget::Section("pool"),
        label_key: "nav.pools",
        default_label: "Pools",
        scope: Some("pool"),
    },
    NavEntry {
        target: NavTarget::Section("hosts"),
        label_key: "nav.hosts",
        default_label: "Hosts",
        scope: Some("hosts"),
    },
    NavEntry {
        target: NavTarget::Section("user"),
        label_key: "nav.users",
        default_label: "Users",
        scope: Some("user"),
    },
    NavEntry {
        target: NavTarget::Password,
        label_key: "nav.password",
        default_label: "Password",
        scope: None,
    },
];

/// Entries the operator may see.
#[must_use]
pub fn visible_entries(permissions: &PermissionSet) -> impl Iterator<Item = &'static NavEntry> {
    NAV_ENTRIES
        .iter()
        .filter(move |entry| entry.is_visible(permissions))
}

/// Section entry for `scope`, if the console has one.
#[must_use]
pub fn section(scope: &str) -> Option<&'static NavEntry> {
    NAV_ENTRIES
        .iter()
        .find(|entry| matches!(entry.target, NavTarget::Section(candidate) if candidate == scope))
}

/// What an operator may do inside a section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionAccess {
    /// The scope is not readable; the section must not render.
    Hidden,
    /// Readable only.
    ReadOnly,
    /// Readable plus the listed write actions.
    Editable(Vec<Action>),
}

/// Access level for `scope` under `permissions`.
#[must_use]
pub fn section_access(permissions: &PermissionSet, scope: &str) -> SectionAccess {
    if !permissions.can_read(scope) {
        return SectionAccess::Hidden;
    }
    let writes: Vec<Action> = Action::all()
        .into_iter()
        .filter(|action| *action != Action::Read && permissions.allows(scope, *action))
        .collect();
    if writes.is_empty() {
        SectionAccess::ReadOnly
    } else {
        SectionAccess::Editable(writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permissions() -> PermissionSet {
        [
            ("pool", vec![Action::Read, Action::Create, Action::Delete]),
            ("hosts", vec![Action::Read]),
            ("user", vec![Action::Update]),
        ]
        .into_iter()
        .collect()
    }

    fn labels(permissions: &PermissionSet) -> Vec<&'static str> {
        visible_entries(permissions)
            .map(|entry| entry.default_label)
            .collect()
    }

    #[test]
    fn unscoped_entries_are_always_visible() {
        assert_eq!(labels(&PermissionSet::empty()), ["Dashboard", "Password"]);
    }

    #[test]
    fn scoped_entries_require_read() {
        assert_eq!(
            labels(&permissions()),
            ["Dashboard", "Pools", "Hosts", "Password"]
        );
    }

    #[test]
    fn section_lookup_matches_scope() {
        assert_eq!(section("pool").map(|entry| entry.label_key), Some("nav.pools"));
        assert!(section("dashboard").is_none());
    }

    #[test]
    fn access_distinguishes_read_only_from_editable() {
        let permissions = permissions();
        assert_eq!(
            section_access(&permissions, "pool"),
            SectionAccess::Editable(vec![Action::Create, Action::Delete])
        );
        assert_eq!(section_access(&permissions, "hosts"), SectionAccess::ReadOnly);
        assert_eq!(section_access(&permissions, "user"), SectionAccess::Hidden);
        assert_eq!(section_access(&permissions, "cluster"), SectionAccess::Hidden);
    }
}
