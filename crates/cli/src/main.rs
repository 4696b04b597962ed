mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mtag", version, about = "Render HTML email templates with typed merge tags")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// List logical template names discovered under templates_dir
    ListTemplates,

    /// Print the merge tags used by a template or file
    Tags(TagsArgs),

    /// Render a template with variable values
    Render(RenderArgs),

    /// Check variable declarations against template content
    Check(CheckArgs),

    /// Re-derive a template's variable declarations from its content
    Sync(SyncArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct TagsArgs {
    /// Logical template name (e.g. "welcome" or "orders/shipped")
    #[arg(long)]
    pub template: Option<String>,

    /// Any file to scan for merge tags
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Logical template name
    #[arg(long)]
    pub template: String,

    /// JSON file with an object of typed values
    #[arg(long)]
    pub vars: Option<PathBuf>,

    /// String value as KEY=VALUE (repeatable, overrides --vars)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub var: Vec<String>,

    /// Write the rendered HTML here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print the result or error as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Only check this template
    #[arg(long)]
    pub template: Option<String>,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Logical template name
    #[arg(long)]
    pub template: String,
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::ListTemplates => cmd::list_templates::run(config, profile),
        Commands::Tags(args) => cmd::tags::run(config, profile, &args),
        Commands::Render(args) => cmd::render::run(config, profile, &args),
        Commands::Check(args) => cmd::check::run(config, profile, &args),
        Commands::Sync(args) => cmd::sync::run(config, profile, &args),
    }

    logging::flush();
}
