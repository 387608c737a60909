use super::{load_editor, open_store};
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use wsclass_core::store::SettingsStore;

pub fn run(
    root: &Path,
    configuration_id: &str,
    disable: &[String],
    enable: &[String],
    default: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let (_, mut editor) = load_editor(&store, configuration_id)?;

    for id in enable {
        editor.set_enabled(id, true)?;
    }
    for id in disable {
        editor.set_enabled(id, false)?;
    }
    if let Some(id) = default {
        editor.set_default(id)?;
    }

    let request = editor.submit()?;
    let updated = store
        .update_configuration(configuration_id, &request)
        .context("failed to update configuration")?;
    tracing::info!(configuration = configuration_id, "workspace classes updated");

    if json {
        print_json(&serde_json::json!({
            "configuration": updated,
            "update": request,
        }))?;
    } else {
        println!("Workspace class updated for configuration '{configuration_id}'.");
    }
    Ok(())
}
