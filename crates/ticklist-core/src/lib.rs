pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod render;

use std::ffi::OsString;
use std::io;

use anyhow::Context;
use clap::Parser;
use ticklist_model::{
  Store,
  filter
};
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting ticklist CLI"
  );

  let cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  debug!(?cfg, "loaded config");

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let backend =
    datastore::FileStore::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open data \
         directory {}",
        data_dir.display()
      )
    })?;
  let mut store = Store::open(backend);

  let renderer =
    render::Renderer::new(&cfg);
  let command =
    cli.command.unwrap_or(
      cli::Command::Show {
        search: String::new()
      }
    );
  let today = filter::current_date();

  commands::dispatch(
    &mut store,
    &renderer,
    command,
    today,
    &mut io::stdin().lock()
  )?;

  info!("done");
  Ok(())
}
