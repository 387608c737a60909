use super::{load_editor, open_store};
use crate::output::print_json;
use std::path::Path;
use wsclass_core::editor::ClassEditor;

pub fn run(
    root: &Path,
    configuration_id: &str,
    restrict: Option<Vec<String>>,
    default: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let (_, current) = load_editor(&store, configuration_id)?;

    let restricted = restrict.unwrap_or_else(|| current.restricted().to_vec());
    let default = default.or_else(|| Some(current.default_class().to_string()));
    let proposed = ClassEditor::new(current.classes().to_vec(), restricted, default);
    let error = proposed.error();

    if json {
        print_json(&serde_json::json!({
            "configuration": configuration_id,
            "restrictedWorkspaceClasses": proposed.restricted(),
            "defaultClass": proposed.default_class(),
            "valid": error.is_none(),
            "error": error.map(|e| e.message()),
        }))?;
    } else if error.is_none() {
        println!(
            "Selection is valid (default: {}).",
            proposed.default_class()
        );
    }

    if let Some(err) = error {
        anyhow::bail!("{err}");
    }
    Ok(())
}
