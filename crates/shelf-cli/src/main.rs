//! Shelf browser CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use shelf_cli::logging::{LogConfig, LogFormat, init_logging};
use shelf_cli::settings::{Settings, load_settings, resolve_settings_path};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_book, run_browse, run_config, run_shelves};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let settings_path = resolve_settings_path(cli.config.as_deref());
    let settings = settings_from_cli(&cli, load_settings(settings_path.as_deref()));

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("error: failed to start async runtime: {error}");
            std::process::exit(1);
        }
    };

    let result = match &cli.command {
        Command::Shelves(args) => runtime.block_on(run_shelves(&settings, args)),
        Command::Browse(args) => runtime.block_on(run_browse(&settings, args)),
        Command::Book(args) => runtime.block_on(run_book(&settings, args)),
        Command::Config(args) => run_config(&settings, settings_path.as_deref(), args),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = format!("{error:#}"), "command failed");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Apply command-line overrides on top of the settings file.
fn settings_from_cli(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(base_url) = &cli.base_url {
        settings.api = settings.api.with_base_url(base_url);
    }
    if let Some(user_id) = &cli.user_id {
        settings.api = settings.api.with_user_id(user_id);
    }
    if let Command::Browse(args) = &cli.command {
        if let Some(batch_size) = args.batch_size {
            settings.loader.batch_size = batch_size;
        }
        if let Some(delay_ms) = args.delay_ms {
            settings.loader.inter_batch_delay_ms = delay_ms;
        }
        if let Some(page_size) = args.page_size {
            settings.display.page_size = page_size;
        }
    }
    settings
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
