pub mod cli;
pub mod commands;
pub mod config;
pub mod file_store;
pub mod render;

use std::ffi::OsString;
use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tasklet_core::{FilterMode, Session, TaskStore};
use tracing::{debug, info};

pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(raw_args, &mut out)
}

#[tracing::instrument(skip_all)]
pub fn run_with_output<W: Write>(raw_args: Vec<OsString>, out: &mut W) -> anyhow::Result<()> {
    let pre = cli::preprocess_args(&raw_args);
    let cli = cli::GlobalCli::parse_from(pre.cleaned_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(verbose = cli.verbose, quiet = cli.quiet, "starting tasklet CLI");
    debug!(?pre.rc_overrides, "preprocessed rc overrides");

    let mut cfg = config::Config::load(cli.rc_file.as_deref())?;
    cfg.apply_overrides(
        pre.rc_overrides
            .into_iter()
            .chain(cli.rc_overrides.into_iter().map(|kv| (kv.key, kv.value))),
    );

    let data_dir = config::resolve_data_dir(&cfg, cli.data.as_deref())
        .context("failed to resolve data directory")?;

    let backend = file_store::FileStore::open(&data_dir)
        .with_context(|| format!("failed to open file store at {}", data_dir.display()))?;

    let renderer = render::Renderer::new(&cfg)?;
    let mut session = Session::open(TaskStore::with_keys(backend, cfg.storage_keys()));

    let command = cli.command.unwrap_or(cli::Command::List {
        filter: FilterMode::All,
    });
    commands::dispatch(&mut session, &renderer, command, out)?;
    out.flush()?;

    info!("done");
    Ok(())
}
