//! # CLI Layer
//!
//! This module is **one possible UI client** for the countdown core. It stands in
//! for the browser page: the address bar becomes a [`MemoryLocation`] built from the
//! configured base URL, and tab-scoped session storage becomes the `session/`
//! directory next to the countdown storage.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call the API and format output

use super::print::{
    print_config, print_countdowns, print_details, print_messages, print_remaining, print_share,
    print_usage,
};
use super::setup::{Cli, Commands, PhotoCommands, SetArgs};
use chrono::Utc;
use clap::Parser;
use countdown::api::{ConfigAction, ConfigEdit, CountdownApi, CountdownPaths};
use countdown::clock::SystemClock;
use countdown::commands::photos::data_url_from_file;
use countdown::config::AppConfig;
use countdown::error::{CountdownError, Result};
use countdown::model::Configuration;
use countdown::store::fs_backend::FsBackend;
use countdown::store::{CountdownStore, StoreOptions};
use countdown::url::MemoryLocation;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing::{debug, warn};
use tracing_subscriber::FmtSubscriber;

/// Overrides the platform data directory.
const HOME_ENV: &str = "COUNTDOWN_HOME";

struct AppContext {
    api: CountdownApi<FsBackend, MemoryLocation>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Show) => handle_show(&ctx),
        Some(Commands::Create { name }) => handle_simple(ctx.api.create(&name)),
        Some(Commands::Delete { selector }) => handle_simple(ctx.api.delete(&selector)),
        Some(Commands::Rename { selector, name }) => {
            handle_simple(ctx.api.rename(&selector, &name))
        }
        Some(Commands::Switch { selector }) => handle_simple(ctx.api.switch(&selector)),
        Some(Commands::Duplicate { selector }) => handle_simple(ctx.api.duplicate(&selector)),
        Some(Commands::Set(args)) => handle_set(&mut ctx, args),
        Some(Commands::Photo { action }) => handle_photo(&mut ctx, action),
        Some(Commands::Share) => handle_share(&mut ctx),
        Some(Commands::Open { url }) => handle_simple(ctx.api.open(&url)),
        Some(Commands::Usage) => handle_usage(&ctx),
        Some(Commands::Status) => handle_status(&ctx),
        Some(Commands::Reset { yes }) => handle_reset(&mut ctx, yes),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        match std::env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "warn".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info" => LevelFilter::INFO,
            "error" => LevelFilter::ERROR,
            "off" => LevelFilter::OFF,
            _ => LevelFilter::WARN,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not install logger: {}", e);
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "countdown", "countdown")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CountdownError::Api("Could not determine data directory".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let config = AppConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "unreadable config, using defaults");
        AppConfig::default()
    });
    debug!(data_dir = %data_dir.display(), "using data directory");

    let paths = CountdownPaths { data_dir };
    let backend = FsBackend::new(paths.storage_dir()).with_quota(config.storage_quota_bytes);
    let session = FsBackend::new(paths.session_dir());

    let defaults = Configuration::with_lead(Utc::now(), config.default_lead_days);
    let store = CountdownStore::with_options(
        backend,
        defaults,
        SystemClock,
        StoreOptions {
            default_name: config.default_name.clone(),
            storage_limit: config.storage_limit_bytes,
        },
    );

    let api = CountdownApi::new(store, MemoryLocation::new(config.base_url), session, paths);
    Ok(AppContext { api })
}

fn handle_simple(result: Result<countdown::api::CmdResult>) -> Result<()> {
    print_messages(&result?.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list()?;
    print_countdowns(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.status()?;
    if let Some(active) = result.affected.first() {
        print_details(active, result.remaining.as_ref());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(ctx: &mut AppContext, args: SetArgs) -> Result<()> {
    let result = ctx.api.edit(ConfigEdit::from(args))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_photo(ctx: &mut AppContext, action: PhotoCommands) -> Result<()> {
    let result = match action {
        PhotoCommands::Add { file, thumbnail } => {
            let data = data_url_from_file(&file)?;
            let thumbnail = thumbnail.map(|t| data_url_from_file(&t)).transpose()?;
            ctx.api.add_photo(data, thumbnail)?
        }
        PhotoCommands::Rm { photo } => ctx.api.remove_photo(&photo)?,
        PhotoCommands::Select { position } => ctx.api.select_photo(position)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_share(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.share()?;
    let photo_count = ctx
        .api
        .store()
        .active()
        .map(|c| c.settings.photos.len())
        .unwrap_or(0);
    print_messages(&result.messages);
    if let Some(size) = &result.share_size {
        print_share(size, photo_count, result.share_url.as_deref());
    }
    Ok(())
}

fn handle_usage(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.usage()?;
    if let Some(usage) = &result.usage {
        print_usage(usage);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.status()?;
    if let (Some(active), Some(remaining)) = (result.affected.first(), &result.remaining) {
        print_remaining(&active.name, remaining);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        println!("This deletes every countdown. Run again with --yes to confirm.");
        return Ok(());
    }
    let result = ctx.api.reset()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if let (true, Some(config)) = (show_all, &result.config) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}
