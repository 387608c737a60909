mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{configuration::ConfigurationSubcommand, org::OrgSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wsclass",
    about = "Workspace-class restrictions: resolve what each configuration may use",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory containing .wsclass/ (default: auto-detect upward from cwd)
    #[arg(long, global = true, env = "WSCLASS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .wsclass/ with the default installation classes
    Init,

    /// Show which workspace classes are available and at which scope
    Resolve {
        /// Configuration to resolve for (omit for organization level)
        #[arg(long)]
        configuration: Option<String>,

        /// Leave disabled classes out of the output
        #[arg(long)]
        filter_out_disabled: bool,

        /// Skip a restriction layer: organization or configuration
        #[arg(long = "ignore-scope", value_name = "SCOPE")]
        ignore_scope: Vec<String>,
    },

    /// Check a restricted-classes / default-class selection without saving it
    Validate {
        #[arg(long)]
        configuration: String,

        /// Restricted class ids (default: the configuration's current list;
        /// pass the flag with no ids to restrict nothing)
        #[arg(long = "restrict", value_name = "ID", num_args = 0..)]
        restrict: Option<Vec<String>>,

        /// Proposed default class (default: the configuration's current default)
        #[arg(long)]
        default: Option<String>,
    },

    /// Edit a configuration's restricted classes and default class
    Restrict {
        #[arg(long)]
        configuration: String,

        /// Class id to disable (repeatable)
        #[arg(long, value_name = "ID")]
        disable: Vec<String>,

        /// Class id to re-enable (repeatable)
        #[arg(long, value_name = "ID")]
        enable: Vec<String>,

        /// New default class
        #[arg(long)]
        default: Option<String>,
    },

    /// Manage configurations
    Configuration {
        #[command(subcommand)]
        subcommand: ConfigurationSubcommand,
    },

    /// Manage organization settings
    Org {
        #[command(subcommand)]
        subcommand: OrgSubcommand,
    },

    /// Check stored settings for unknown or duplicate class ids
    Check,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Resolve {
            configuration,
            filter_out_disabled,
            ignore_scope,
        } => cmd::resolve::run(
            &root,
            configuration.as_deref(),
            filter_out_disabled,
            &ignore_scope,
            cli.json,
        ),
        Commands::Validate {
            configuration,
            restrict,
            default,
        } => cmd::validate::run(&root, &configuration, restrict, default, cli.json),
        Commands::Restrict {
            configuration,
            disable,
            enable,
            default,
        } => cmd::restrict::run(
            &root,
            &configuration,
            &disable,
            &enable,
            default.as_deref(),
            cli.json,
        ),
        Commands::Configuration { subcommand } => {
            cmd::configuration::run(&root, subcommand, cli.json)
        }
        Commands::Org { subcommand } => cmd::org::run(&root, subcommand, cli.json),
        Commands::Check => cmd::check::run(&root, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
