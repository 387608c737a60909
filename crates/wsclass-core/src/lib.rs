pub mod editor;
pub mod error;
pub mod io;
pub mod memo;
pub mod paths;
pub mod resolve;
pub mod settings;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{Result, WsClassError};
pub use resolve::{resolve, ResolveOptions, Resolution};
pub use types::{AllowedWorkspaceClass, ClassState, DisableScope, Scope, WorkspaceClass};
