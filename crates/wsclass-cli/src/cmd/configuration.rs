use super::open_store;
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use wsclass_core::settings::{Configuration, WorkspaceSettings};
use wsclass_core::store::SettingsStore;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigurationSubcommand {
    /// Register a configuration
    Create {
        /// Configuration id
        id: String,
        /// Human-readable name
        #[arg(long)]
        name: Option<String>,
        /// Initial default class
        #[arg(long)]
        default: Option<String>,
    },

    /// List configurations
    List,

    /// Show one configuration's workspace settings
    Show {
        /// Configuration id
        id: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigurationSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigurationSubcommand::Create { id, name, default } => {
            create(root, id, name, default, json)
        }
        ConfigurationSubcommand::List => list(root, json),
        ConfigurationSubcommand::Show { id } => show(root, &id, json),
    }
}

fn create(
    root: &Path,
    id: String,
    name: Option<String>,
    default: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let configuration = Configuration {
        id,
        name,
        workspace_settings: default.map(|d| WorkspaceSettings {
            restricted_workspace_classes: Vec::new(),
            workspace_class: Some(d),
        }),
    };
    store
        .create_configuration(&configuration)
        .context("failed to create configuration")?;

    if json {
        print_json(&configuration)?;
    } else {
        println!("Created configuration '{}'.", configuration.id);
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let configurations = store
        .list_configurations()
        .context("failed to list configurations")?;

    if json {
        print_json(&configurations)?;
        return Ok(());
    }
    if configurations.is_empty() {
        println!("No configurations.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = configurations
        .iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.name.clone().unwrap_or_default(),
                c.default_class().unwrap_or("-").to_string(),
                c.restricted_classes().join(","),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "DEFAULT", "RESTRICTED"], &rows);
    Ok(())
}

fn show(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    let configuration = store.configuration(id)?;

    if json {
        print_json(&configuration)?;
        return Ok(());
    }
    println!("Configuration: {}", configuration.id);
    if let Some(name) = &configuration.name {
        println!("Name:          {name}");
    }
    println!(
        "Default class: {}",
        configuration.default_class().unwrap_or("(installation default)")
    );
    let restricted = configuration.restricted_classes();
    if restricted.is_empty() {
        println!("Restricted:    (none)");
    } else {
        println!("Restricted:    {}", restricted.join(", "));
    }
    Ok(())
}
