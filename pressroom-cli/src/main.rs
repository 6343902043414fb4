mod cli;

use crate::cli::{Cli, Command};
use clap::Parser;
use pressroom_common::{
    model::{Id, state::State},
    views::{Getters, ViewConfig},
};
use pressroom_store::{StoreError, snapshot::SnapshotStore};
use serde::Deserialize;
use std::{io, path::PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
enum CliError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("No snapshot given; pass --state or set PRESSROOM_STATE_PATH")]
    MissingStatePath,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Error writing output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("Error writing to stdout: {0}")]
    Stdout(#[from] io::Error),
}

/// `PRESSROOM_*` environment variables.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
struct Env {
    state_path: Option<PathBuf>,
    origin: Option<String>,
    current_user_id: Option<u64>,
    avatar_base_url: Option<String>,
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pressroom_cli=debug,\
                pressroom_common=debug,\
                pressroom_store=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn get_env() -> Result<Env, CliError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .env file found");
        } else {
            return Err(e.into());
        }
    }

    envy::prefixed("PRESSROOM_")
        .from_env()
        .map_err(CliError::from)
}

fn view_config(env: &Env, state: &State) -> ViewConfig {
    let mut config = ViewConfig::for_state(state);
    if let Some(id) = env.current_user_id {
        config.current_user_id = Id::new(id);
    }
    if let Some(avatar_base_url) = &env.avatar_base_url {
        config.avatar_base_url.clone_from(avatar_base_url);
    }
    config
}

fn main() -> Result<(), CliError> {
    install_tracing();
    let cli = Cli::parse();
    let env = get_env()?;

    let stdout = io::stdout().lock();

    if let Command::Routes = cli.command {
        return cli::write_routes(stdout);
    }

    let path = cli
        .state
        .or_else(|| env.state_path.clone())
        .ok_or(CliError::MissingStatePath)?;
    let store = SnapshotStore::new(path);
    info!(path = %store.path().display(), "Reading snapshot");

    let mut state = store.load()?;
    if let Some(origin) = &env.origin {
        state.origin.clone_from(origin);
    }
    let config = view_config(&env, &state);

    cli::execute(&cli.command, Getters::new(&state, &config), stdout)
}
