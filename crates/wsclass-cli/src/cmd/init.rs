use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use wsclass_core::paths;
use wsclass_core::store::FileStore;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    FileStore::init(root).context("failed to initialize .wsclass/")?;
    let dir = paths::wsclass_dir(root);
    if json {
        print_json(&serde_json::json!({ "root": dir }))?;
    } else {
        println!("Initialized {}", dir.display());
    }
    Ok(())
}
