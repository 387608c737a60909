pub mod check;
pub mod configuration;
pub mod init;
pub mod org;
pub mod resolve;
pub mod restrict;
pub mod validate;

use anyhow::Context;
use std::path::Path;
use wsclass_core::editor::ClassEditor;
use wsclass_core::resolve::{resolve_settings, ResolveOptions};
use wsclass_core::settings::Configuration;
use wsclass_core::store::{FileStore, SettingsStore};
use wsclass_core::types::DisableScope;

pub(crate) fn open_store(root: &Path) -> anyhow::Result<FileStore> {
    FileStore::open(root).with_context(|| format!("failed to open store at {}", root.display()))
}

pub(crate) fn parse_scopes(raw: &[String]) -> anyhow::Result<Vec<DisableScope>> {
    raw.iter()
        .map(|s| {
            s.parse::<DisableScope>()
                .with_context(|| format!("'{s}' is not one of: organization, configuration"))
        })
        .collect()
}

/// Load a configuration and an editor over its classes.
///
/// The configuration layer is ignored during resolution: the configuration's
/// own restrictions are what the editor changes, so they appear as toggles
/// rather than as scope-disabled classes.
pub(crate) fn load_editor(
    store: &FileStore,
    configuration_id: &str,
) -> anyhow::Result<(Configuration, ClassEditor)> {
    let configuration = store
        .configuration(configuration_id)
        .context("failed to load configuration")?;
    let installation = store
        .installation_classes()
        .context("failed to load installation classes")?;
    let org = store
        .org_settings()
        .context("failed to load organization settings")?;

    let options = ResolveOptions::default().ignoring(DisableScope::Configuration);
    let resolution = resolve_settings(
        installation.as_deref(),
        org.as_ref(),
        Some(&configuration),
        &options,
    );
    tracing::debug!(
        configuration = configuration_id,
        scope = %resolution.scope,
        "resolved classes for editing"
    );

    let editor = ClassEditor::new(
        resolution.data,
        configuration.restricted_classes().to_vec(),
        configuration.default_class().map(str::to_string),
    );
    Ok((configuration, editor))
}
