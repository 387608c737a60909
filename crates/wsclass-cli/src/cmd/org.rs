use super::open_store;
use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use wsclass_core::settings::OrgSettings;
use wsclass_core::store::SettingsStore;

#[derive(Subcommand)]
pub enum OrgSubcommand {
    /// Show the organization allow-list
    Show,

    /// Replace the organization allow-list (no ids clears it)
    Allow {
        /// Class ids the organization permits
        ids: Vec<String>,
    },
}

pub fn run(root: &Path, subcmd: OrgSubcommand, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;
    match subcmd {
        OrgSubcommand::Show => {
            let settings = store
                .org_settings()
                .context("failed to load organization settings")?
                .unwrap_or_default();
            if json {
                print_json(&settings)?;
            } else if settings.allowed_workspace_classes.is_empty() {
                println!("Allowed: (all installation classes)");
            } else {
                println!("Allowed: {}", settings.allowed_workspace_classes.join(", "));
            }
        }
        OrgSubcommand::Allow { ids } => {
            let settings = OrgSettings {
                allowed_workspace_classes: ids,
            };
            store
                .save_org_settings(&settings)
                .context("failed to save organization settings")?;
            if json {
                print_json(&settings)?;
            } else {
                println!("Organization settings updated.");
            }
        }
    }
    Ok(())
}
