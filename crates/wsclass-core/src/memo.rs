use crate::resolve::{resolve_settings, ResolveOptions, Resolution};
use crate::settings::{Configuration, OrgSettings};
use crate::types::WorkspaceClass;
use std::sync::Arc;

/// Shared handles to the three resolver inputs. `None` = not loaded yet.
#[derive(Debug, Clone, Default)]
pub struct ResolverInputs {
    pub installation: Option<Arc<Vec<WorkspaceClass>>>,
    pub organization: Option<Arc<OrgSettings>>,
    pub configuration: Option<Arc<Configuration>>,
}

impl ResolverInputs {
    /// True when every input is the same allocation (or equally absent).
    fn same_as(&self, other: &ResolverInputs) -> bool {
        same(&self.installation, &other.installation)
            && same(&self.organization, &other.organization)
            && same(&self.configuration, &other.configuration)
    }
}

fn same<T>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

/// Caches the last resolution and recomputes only when an input handle is
/// replaced or the options change. Content equality is never consulted, so
/// callers signal a change by swapping in a new `Arc`.
#[derive(Debug, Default)]
pub struct ResolverMemo {
    last: Option<(ResolverInputs, ResolveOptions, Arc<Resolution>)>,
    computations: u64,
}

impl ResolverMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, inputs: &ResolverInputs, options: &ResolveOptions) -> Arc<Resolution> {
        if let Some((prev_inputs, prev_options, cached)) = &self.last {
            if prev_inputs.same_as(inputs) && prev_options == options {
                return Arc::clone(cached);
            }
        }

        let resolution = Arc::new(resolve_settings(
            inputs.installation.as_deref().map(|v| v.as_slice()),
            inputs.organization.as_deref(),
            inputs.configuration.as_deref(),
            options,
        ));
        self.computations += 1;
        tracing::trace!(
            scope = %resolution.scope,
            classes = resolution.data.len(),
            "recomputed workspace class resolution"
        );
        self.last = Some((inputs.clone(), options.clone(), Arc::clone(&resolution)));
        resolution
    }

    /// Number of times the resolver actually ran.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scope;

    fn installation() -> Arc<Vec<WorkspaceClass>> {
        Arc::new(vec![
            WorkspaceClass::new("a", "A", ""),
            WorkspaceClass::new("b", "B", ""),
        ])
    }

    fn org(ids: &[&str]) -> Arc<OrgSettings> {
        Arc::new(OrgSettings {
            allowed_workspace_classes: ids.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn unchanged_inputs_hit_the_cache() {
        let mut memo = ResolverMemo::new();
        let inputs = ResolverInputs {
            installation: Some(installation()),
            organization: Some(org(&["a"])),
            configuration: None,
        };
        let first = memo.resolve(&inputs, &ResolveOptions::default());
        let second = memo.resolve(&inputs.clone(), &ResolveOptions::default());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(memo.computations(), 1);
        assert_eq!(first.scope, Scope::Organization);
    }

    #[test]
    fn replaced_input_recomputes() {
        let mut memo = ResolverMemo::new();
        let mut inputs = ResolverInputs {
            installation: Some(installation()),
            ..Default::default()
        };
        let before = memo.resolve(&inputs, &ResolveOptions::default());
        assert_eq!(before.scope, Scope::Installation);

        inputs.organization = Some(org(&["b"]));
        let after = memo.resolve(&inputs, &ResolveOptions::default());
        assert_eq!(after.scope, Scope::Organization);
        assert_eq!(after.enabled().count(), 1);
        assert_eq!(memo.computations(), 2);
    }

    #[test]
    fn identity_not_content_is_the_key() {
        let mut memo = ResolverMemo::new();
        let first = ResolverInputs {
            installation: Some(installation()),
            ..Default::default()
        };
        let second = ResolverInputs {
            installation: Some(installation()),
            ..Default::default()
        };
        let a = memo.resolve(&first, &ResolveOptions::default());
        let b = memo.resolve(&second, &ResolveOptions::default());
        assert_eq!(a, b);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(memo.computations(), 2);
    }

    #[test]
    fn option_change_recomputes() {
        let mut memo = ResolverMemo::new();
        let inputs = ResolverInputs {
            installation: Some(installation()),
            organization: Some(org(&["a"])),
            configuration: None,
        };
        let full = memo.resolve(&inputs, &ResolveOptions::default());
        let filtered = memo.resolve(&inputs, &ResolveOptions::filtered());
        assert_eq!(full.data.len(), 2);
        assert_eq!(filtered.data.len(), 1);
        assert_eq!(memo.computations(), 2);

        memo.invalidate();
        memo.resolve(&inputs, &ResolveOptions::filtered());
        assert_eq!(memo.computations(), 3);
    }

    #[test]
    fn nothing_loaded_resolves_empty() {
        let mut memo = ResolverMemo::new();
        let res = memo.resolve(&ResolverInputs::default(), &ResolveOptions::default());
        assert!(res.data.is_empty());
        assert_eq!(res.scope, Scope::Installation);
    }
}
