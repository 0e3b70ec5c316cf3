pub mod commands;
pub mod dispatch;
pub mod registry;

use anyhow::{Context, Result};
use uedt_app::App;
use uedt_core::config::{config_path, load_config};
use uedt_core::process::SystemProcessRunner;
use uedt_core::project::Project;
use uedt_core::registry_lookup::SystemRegistryLookup;

pub fn run() -> Result<()> {
    init_logging();

    let command_registry = registry::CommandRegistry::build()?;
    let matches = dispatch::build_cli(&command_registry).get_matches();

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let project = Project::locate(&cwd)
        .context("no .uproject found; run uedt from the project directory")?;
    let config = load_config(&config_path(project.root()))?;

    let runner = SystemProcessRunner::new();
    let lookup = SystemRegistryLookup::new(&runner);
    let app = App::new(&runner, &lookup, config, project);

    dispatch::dispatch(&command_registry, &app, &matches)
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("UEDT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
