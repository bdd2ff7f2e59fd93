//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::report::{GAMER_BUNDLE, SHIPPING_CRATE};
use crate::application::{demo_catalog, describe, leaf_paths, price_list};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{Catalog, Item, Sellable, TreeRender};
use crate::infrastructure::di::ServiceContainer;

/// Load settings, then run the parsed command against real services.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    if !settings.color {
        colored::control::set_override(false);
    }
    let container = ServiceContainer::new(settings);
    run(&container, cli.command.as_ref())
}

/// Dispatch a command to its handler.
pub fn run(container: &ServiceContainer, command: Option<&Commands>) -> CliResult<()> {
    match command {
        Some(Commands::Price { manifest, bundle }) => {
            cmd_price(container, manifest.as_deref(), bundle.as_deref())
        }
        Some(Commands::Tree { manifest }) => cmd_tree(container, manifest.as_deref()),
        Some(Commands::Leaves {
            manifest,
            bundle,
            paths,
        }) => cmd_leaves(container, manifest.as_deref(), bundle.as_deref(), *paths),
        Some(Commands::Describe { name, manifest }) => {
            cmd_describe(container, manifest.as_deref(), name)
        }
        Some(Commands::Demo) => cmd_demo(container),
        Some(Commands::Config { command }) => cmd_config(container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `parcel --help`".to_string(),
        )),
    }
}

/// Explicit `--manifest` wins over the configured default.
pub fn resolve_manifest(
    container: &ServiceContainer,
    manifest: Option<&Path>,
) -> CliResult<PathBuf> {
    manifest
        .map(Path::to_path_buf)
        .or_else(|| container.settings.manifest.clone())
        .ok_or_else(|| {
            CliError::Usage(
                "no manifest given: pass --manifest or set `manifest` in the config".to_string(),
            )
        })
}

fn load_catalog(container: &ServiceContainer, manifest: Option<&Path>) -> CliResult<Catalog> {
    let path = resolve_manifest(container, manifest)?;
    debug!("manifest: {}", path.display());
    Ok(container.manifest_service().load(&path)?)
}

/// The named item, or every top-level item.
fn select(catalog: &Catalog, name: Option<&str>) -> CliResult<Vec<Item>> {
    match name {
        Some(name) => Ok(vec![catalog.require(name)?]),
        None => Ok(catalog.roots()),
    }
}

#[instrument(skip(container))]
fn cmd_price(
    container: &ServiceContainer,
    manifest: Option<&Path>,
    bundle: Option<&str>,
) -> CliResult<()> {
    let catalog = load_catalog(container, manifest)?;
    let items = select(&catalog, bundle)?;
    output::info(&price_list(&items, &container.settings.currency_symbol)?);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, manifest: Option<&Path>) -> CliResult<()> {
    let catalog = load_catalog(container, manifest)?;
    for root in catalog.roots() {
        output::info(&root.to_tree(&container.settings.currency_symbol));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_leaves(
    container: &ServiceContainer,
    manifest: Option<&Path>,
    bundle: Option<&str>,
    paths: bool,
) -> CliResult<()> {
    let catalog = load_catalog(container, manifest)?;
    let symbol = &container.settings.currency_symbol;
    for item in select(&catalog, bundle)? {
        if paths {
            for path in leaf_paths(&item) {
                output::info(&path);
            }
        } else {
            for product in item.leaf_products() {
                output::priced(&product.name(), &product.price().with_symbol(symbol));
            }
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_describe(container: &ServiceContainer, manifest: Option<&Path>, name: &str) -> CliResult<()> {
    let catalog = load_catalog(container, manifest)?;
    let item = catalog.require(name)?;
    output::info(&describe(&item, &container.settings.currency_symbol));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_demo(container: &ServiceContainer) -> CliResult<()> {
    let symbol = &container.settings.currency_symbol;
    let catalog = demo_catalog()?;
    let shipping = catalog.require(SHIPPING_CRATE)?;

    output::rule();
    output::header("Calculating Total Price...");
    output::rule();
    output::info(&shipping.to_tree(symbol));
    output::rule();
    output::priced("Total Crate Price", &shipping.try_price()?.with_symbol(symbol));
    output::rule();

    for name in [GAMER_BUNDLE, SHIPPING_CRATE] {
        output::detail(&describe(&catalog.require(name)?, symbol));
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => {
                return Err(CliError::InvalidArgs(
                    "cannot determine config directory on this platform".to_string(),
                ))
            }
        },
    }
    Ok(())
}
