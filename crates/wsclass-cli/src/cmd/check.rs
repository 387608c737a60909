use super::open_store;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use wsclass_core::settings::WarnLevel;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let snapshot = store.snapshot().context("failed to load settings")?;
    let warnings = snapshot.check();

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Settings are consistent. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("settings check found errors");
    }
    Ok(())
}
