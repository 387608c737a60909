//! Layered workspace-class restrictions.
//!
//! The installation publishes a list of classes. An organization may narrow
//! it with an allow-list, and a configuration may narrow it further with a
//! deny-list. Layers are applied in that order; a class keeps the label of
//! the first layer that disabled it.

use crate::settings::{Configuration, OrgSettings, Snapshot};
use crate::types::{AllowedWorkspaceClass, ClassState, DisableScope, Scope, WorkspaceClass};
use serde::Serialize;

// ---------------------------------------------------------------------------
// ResolveOptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Drop disabled classes from the result. The scope label is unaffected.
    pub filter_out_disabled: bool,
    /// Layers to skip even when they carry restrictions.
    pub ignore_scope: Vec<DisableScope>,
}

impl ResolveOptions {
    pub fn filtered() -> Self {
        Self {
            filter_out_disabled: true,
            ignore_scope: Vec::new(),
        }
    }

    pub fn ignoring(mut self, scope: DisableScope) -> Self {
        if !self.ignore_scope.contains(&scope) {
            self.ignore_scope.push(scope);
        }
        self
    }

    fn applies(&self, scope: DisableScope) -> bool {
        !self.ignore_scope.contains(&scope)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub data: Vec<AllowedWorkspaceClass>,
    /// Last layer that was evaluated, whether or not it disabled anything.
    pub scope: Scope,
}

impl Resolution {
    pub fn enabled(&self) -> impl Iterator<Item = &AllowedWorkspaceClass> {
        self.data.iter().filter(|c| !c.is_disabled_in_scope())
    }

    pub fn get(&self, id: &str) -> Option<&AllowedWorkspaceClass> {
        self.data.iter().find(|c| c.id() == id)
    }
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

/// Annotate every installation class with the layer that disables it.
///
/// Any input may be `None` while it is still loading; a missing or empty
/// restriction list means that layer restricts nothing.
pub fn resolve(
    installation: Option<&[WorkspaceClass]>,
    org_allowed: Option<&[String]>,
    config_restricted: Option<&[String]>,
    options: &ResolveOptions,
) -> Resolution {
    let installation = installation.unwrap_or(&[]);
    if installation.is_empty() {
        return Resolution {
            data: Vec::new(),
            scope: Scope::Installation,
        };
    }

    let mut data: Vec<AllowedWorkspaceClass> = installation
        .iter()
        .cloned()
        .map(AllowedWorkspaceClass::enabled)
        .collect();
    let mut scope = Scope::Installation;

    if let Some(allowed) = non_empty(org_allowed) {
        if options.applies(DisableScope::Organization) {
            for cls in data.iter_mut() {
                if !allowed.contains(&cls.class.id) {
                    cls.state = ClassState::DisabledBy(DisableScope::Organization);
                }
            }
            scope = Scope::Organization;
        }
    }

    if let Some(restricted) = non_empty(config_restricted) {
        if options.applies(DisableScope::Configuration) {
            for cls in data.iter_mut() {
                if cls.is_disabled_in_scope() {
                    continue;
                }
                if restricted.contains(&cls.class.id) {
                    cls.state = ClassState::DisabledBy(DisableScope::Configuration);
                }
            }
            scope = Scope::Configuration;
        }
    }

    if options.filter_out_disabled {
        data.retain(|c| !c.is_disabled_in_scope());
    }

    Resolution { data, scope }
}

/// [`resolve`] fed from the settings collaborators.
pub fn resolve_settings(
    installation: Option<&[WorkspaceClass]>,
    org: Option<&OrgSettings>,
    configuration: Option<&Configuration>,
    options: &ResolveOptions,
) -> Resolution {
    resolve(
        installation,
        org.map(|o| o.allowed_workspace_classes.as_slice()),
        configuration.map(|c| c.restricted_classes()),
        options,
    )
}

/// [`resolve`] for one configuration of a snapshot. An unknown or absent
/// configuration id resolves at organization level.
pub fn resolve_snapshot(
    snapshot: &Snapshot,
    configuration_id: Option<&str>,
    options: &ResolveOptions,
) -> Resolution {
    let configuration = configuration_id.and_then(|id| snapshot.configuration(id));
    resolve_settings(
        snapshot.installation.as_deref(),
        snapshot.organization.as_ref(),
        configuration,
        options,
    )
}

fn non_empty(ids: Option<&[String]>) -> Option<&[String]> {
    ids.filter(|ids| !ids.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(ids: &[&str]) -> Vec<WorkspaceClass> {
        ids.iter()
            .map(|id| WorkspaceClass::new(*id, format!("Class {id}"), ""))
            .collect()
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn state_of(res: &Resolution, id: &str) -> ClassState {
        res.get(id).map(|c| c.state).unwrap()
    }

    #[test]
    fn unloaded_installation_short_circuits() {
        let res = resolve(
            None,
            Some(ids(&["a"]).as_slice()),
            Some(ids(&["a"]).as_slice()),
            &Default::default(),
        );
        assert!(res.data.is_empty());
        assert_eq!(res.scope, Scope::Installation);
    }

    #[test]
    fn empty_installation_ignores_restrictions() {
        let res = resolve(
            Some(&[][..]),
            Some(ids(&["a"]).as_slice()),
            Some(ids(&["b"]).as_slice()),
            &ResolveOptions::filtered(),
        );
        assert!(res.data.is_empty());
        assert_eq!(res.scope, Scope::Installation);
    }

    #[test]
    fn no_restrictions_leaves_everything_enabled() {
        let installation = classes(&["a", "b", "c"]);
        let res = resolve(Some(installation.as_slice()), None, Some(&[][..]), &Default::default());
        assert_eq!(res.scope, Scope::Installation);
        assert_eq!(res.data.len(), 3);
        assert!(res.data.iter().all(|c| c.state == ClassState::Enabled));
    }

    #[test]
    fn org_allow_list_disables_everything_else() {
        let installation = classes(&["a", "b", "c"]);
        let res = resolve(
            Some(installation.as_slice()),
            Some(ids(&["b"]).as_slice()),
            None,
            &Default::default(),
        );
        assert_eq!(res.scope, Scope::Organization);
        assert_eq!(state_of(&res, "a"), ClassState::DisabledBy(DisableScope::Organization));
        assert_eq!(state_of(&res, "b"), ClassState::Enabled);
        assert_eq!(state_of(&res, "c"), ClassState::DisabledBy(DisableScope::Organization));
    }

    #[test]
    fn org_scope_set_even_when_nothing_disabled() {
        let installation = classes(&["a", "b"]);
        let res = resolve(
            Some(installation.as_slice()),
            Some(ids(&["a", "b"]).as_slice()),
            None,
            &Default::default(),
        );
        assert_eq!(res.scope, Scope::Organization);
        assert_eq!(res.enabled().count(), 2);
    }

    #[test]
    fn config_deny_list_disables_listed_classes() {
        let installation = classes(&["a", "b", "c"]);
        let res = resolve(
            Some(installation.as_slice()),
            None,
            Some(ids(&["c"]).as_slice()),
            &Default::default(),
        );
        assert_eq!(res.scope, Scope::Configuration);
        assert_eq!(state_of(&res, "a"), ClassState::Enabled);
        assert_eq!(state_of(&res, "c"), ClassState::DisabledBy(DisableScope::Configuration));
    }

    #[test]
    fn config_never_relabels_org_disabled_class() {
        let installation = classes(&["a", "b"]);
        let res = resolve(
            Some(installation.as_slice()),
            Some(ids(&["a"]).as_slice()),
            Some(ids(&["b"]).as_slice()),
            &Default::default(),
        );
        assert_eq!(state_of(&res, "b"), ClassState::DisabledBy(DisableScope::Organization));
        assert_eq!(res.scope, Scope::Configuration);
    }

    #[test]
    fn layered_restrictions_keep_first_disabling_layer() {
        let installation = classes(&["a", "b", "c"]);
        let res = resolve(
            Some(installation.as_slice()),
            Some(ids(&["a", "b"]).as_slice()),
            Some(ids(&["b"]).as_slice()),
            &Default::default(),
        );
        assert_eq!(state_of(&res, "a"), ClassState::Enabled);
        assert_eq!(state_of(&res, "b"), ClassState::DisabledBy(DisableScope::Configuration));
        assert_eq!(state_of(&res, "c"), ClassState::DisabledBy(DisableScope::Organization));
        assert_eq!(res.scope, Scope::Configuration);
    }

    // The label reports the last layer evaluated, not the layer that did the
    // most. Here the configuration layer changes nothing new.
    #[test]
    fn scope_label_is_last_layer_evaluated() {
        let installation = classes(&["a", "b", "c"]);
        let res = resolve(
            Some(installation.as_slice()),
            Some(ids(&["a"]).as_slice()),
            Some(ids(&["b", "c"]).as_slice()),
            &Default::default(),
        );
        assert!(res
            .data
            .iter()
            .filter(|c| c.is_disabled_in_scope())
            .all(|c| c.disable_scope() == Some(DisableScope::Organization)));
        assert_eq!(res.scope, Scope::Configuration);
    }

    #[test]
    fn filter_out_disabled_keeps_exactly_enabled_ids() {
        let installation = classes(&["a", "b", "c", "d"]);
        let unfiltered = resolve(
            Some(installation.as_slice()),
            Some(ids(&["a", "b", "c"]).as_slice()),
            Some(ids(&["c"]).as_slice()),
            &Default::default(),
        );
        let filtered = resolve(
            Some(installation.as_slice()),
            Some(ids(&["a", "b", "c"]).as_slice()),
            Some(ids(&["c"]).as_slice()),
            &ResolveOptions::filtered(),
        );
        let expected: Vec<&str> = unfiltered.enabled().map(|c| c.id()).collect();
        let got: Vec<&str> = filtered.data.iter().map(|c| c.id()).collect();
        assert_eq!(got, vec!["a", "b"]);
        assert_eq!(got, expected);
        assert_eq!(filtered.scope, unfiltered.scope);
    }

    #[test]
    fn ignoring_org_scope_matches_absent_allow_list() {
        let installation = classes(&["a", "b", "c"]);
        let restricted = ids(&["c"]);
        let ignored = resolve(
            Some(installation.as_slice()),
            Some(ids(&["a"]).as_slice()),
            Some(restricted.as_slice()),
            &ResolveOptions::default().ignoring(DisableScope::Organization),
        );
        let absent = resolve(
            Some(installation.as_slice()),
            None,
            Some(restricted.as_slice()),
            &Default::default(),
        );
        assert_eq!(ignored, absent);
    }

    #[test]
    fn ignoring_config_scope_stops_at_org() {
        let installation = classes(&["a", "b"]);
        let res = resolve(
            Some(installation.as_slice()),
            Some(ids(&["a", "b"]).as_slice()),
            Some(ids(&["a"]).as_slice()),
            &ResolveOptions::default().ignoring(DisableScope::Configuration),
        );
        assert_eq!(res.scope, Scope::Organization);
        assert_eq!(res.enabled().count(), 2);
    }

    #[test]
    fn input_order_is_preserved() {
        let installation = classes(&["z", "m", "a"]);
        let res = resolve(
            Some(installation.as_slice()),
            Some(ids(&["a", "z"]).as_slice()),
            None,
            &ResolveOptions::filtered(),
        );
        let got: Vec<&str> = res.data.iter().map(|c| c.id()).collect();
        assert_eq!(got, vec!["z", "a"]);
    }

    #[test]
    fn resolve_snapshot_uses_named_configuration() {
        let mut cfg = Configuration::new("repo-1");
        cfg.workspace_settings = Some(crate::settings::WorkspaceSettings {
            restricted_workspace_classes: ids(&["b"]),
            workspace_class: None,
        });
        let snapshot = Snapshot {
            installation: Some(classes(&["a", "b"])),
            organization: None,
            configurations: vec![cfg],
        };

        let res = resolve_snapshot(&snapshot, Some("repo-1"), &Default::default());
        assert_eq!(res.scope, Scope::Configuration);
        assert_eq!(state_of(&res, "b"), ClassState::DisabledBy(DisableScope::Configuration));

        let res = resolve_snapshot(&snapshot, Some("missing"), &Default::default());
        assert_eq!(res.scope, Scope::Installation);

        let res = resolve_snapshot(&snapshot, None, &Default::default());
        assert_eq!(res.enabled().count(), 2);
    }

    #[test]
    fn resolution_serializes_for_consumers() {
        let installation = classes(&["a", "b"]);
        let res = resolve(
            Some(installation.as_slice()),
            Some(ids(&["a"]).as_slice()),
            None,
            &Default::default(),
        );
        let value = serde_json::to_value(&res).unwrap();
        assert_eq!(value["scope"], "organization");
        assert_eq!(value["data"][1]["disableScope"], "organization");
        assert_eq!(value["data"][0]["isDisabledInScope"], false);
    }
}
