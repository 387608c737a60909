use super::{open_store, parse_scopes};
use crate::output::{print_json, print_table};
use anyhow::Context;
use std::path::Path;
use wsclass_core::resolve::{resolve_snapshot, ResolveOptions};
use wsclass_core::types::DEFAULT_WS_CLASS;

pub fn run(
    root: &Path,
    configuration: Option<&str>,
    filter_out_disabled: bool,
    ignore_scope: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let snapshot = store.snapshot().context("failed to load settings")?;

    let default_class = match configuration {
        Some(id) => {
            let cfg = snapshot
                .configuration(id)
                .with_context(|| format!("configuration not found: {id}"))?;
            cfg.default_class().unwrap_or(DEFAULT_WS_CLASS).to_string()
        }
        None => DEFAULT_WS_CLASS.to_string(),
    };

    let options = ResolveOptions {
        filter_out_disabled,
        ignore_scope: parse_scopes(ignore_scope)?,
    };
    let resolution = resolve_snapshot(&snapshot, configuration, &options);
    tracing::debug!(scope = %resolution.scope, classes = resolution.data.len(), "resolved");

    if json {
        print_json(&resolution)?;
        return Ok(());
    }

    println!("Scope: {}", resolution.scope);
    if resolution.data.is_empty() {
        println!("No workspace classes.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = resolution
        .data
        .iter()
        .map(|c| {
            let status = match c.disable_scope() {
                Some(scope) => format!("disabled ({scope})"),
                None => "enabled".to_string(),
            };
            let default = if c.id() == default_class { "*" } else { "" };
            vec![
                c.id().to_string(),
                c.class.display_name.clone(),
                status,
                default.to_string(),
                c.class.description.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "STATUS", "DEFAULT", "DESCRIPTION"], &rows);
    Ok(())
}
