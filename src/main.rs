#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli;

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
use cli::{Cli, Commands, SiteArg};
#[cfg(not(target_arch = "wasm32"))]
use veezie::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    veezie::logging::init("warn");
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Configure { server, sites, copy, install } => configure(config, &server, &sites, copy, install).await,
        Commands::InstallLink { addon_url } => {
            if addon_url.is_empty() {
                TerminalPlatform.notify(&Notice::GenerateFirst, config.locale);
                return Ok(ExitCode::FAILURE);
            }
            TerminalPlatform.open_url(&config.install_link(&addon_url));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Types => {
            for t in ContentType::ALL {
                let marker = if t.is_default() { " (default)" } else { "" };
                println!("{:<8} {}{}", t.as_str(), t.label(), marker);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn configure(config: FormConfig, server: &url::Url, sites: &[SiteArg], copy: bool, install: bool) -> Result<ExitCode> {
    let transport = HttpTransport::new(server, &config.endpoint)?;
    let controller = FormController::new(MemoryForm::new(), transport, TerminalPlatform, config);
    for site in sites {
        let row = controller.add_entry()?;
        controller.form().set_domain(row, &site.domain);
        if let Some(types) = &site.types { controller.form().set_types(row, types); }
    }

    match controller.submit().await {
        SubmitOutcome::Generated(url) => {
            println!("{}", url);
            if copy { controller.copy_url(); }
            if install { controller.install_addon(); }
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Rejected(_) | SubmitOutcome::Failed(_) => Ok(ExitCode::FAILURE),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(explicit: Option<&std::path::Path>) -> Result<FormConfig> {
    let config = match explicit {
        Some(path) => {
            if !path.exists() { anyhow::bail!("config file does not exist: {}", path.display()); }
            FormConfig::load(path)?
        }
        None => match directories::ProjectDirs::from("", "", "veezie") {
            Some(dirs) => FormConfig::load(&dirs.config_dir().join("veezie.toml")).context("failed to load user config")?,
            None => FormConfig::default(),
        },
    };
    Ok(config.with_env_overrides())
}
