use crate::CliError;
use clap::{Parser, Subcommand};
use pressroom_common::{
    model::{Id, user::UserMarker},
    routes::ROUTES,
    views::{Getters, filter::ArticleFilter, search::SearchSort},
};
use serde::Serialize;
use std::{io::Write, path::PathBuf};

/// Query the article views of a blog store snapshot.
#[derive(Debug, Parser)]
#[command(name = "pressroom", version)]
pub(crate) struct Cli {
    /// Snapshot JSON file, instead of `PRESSROOM_STATE_PATH`.
    #[arg(long, short)]
    pub state: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub(crate) enum Command {
    /// All articles with author info attached.
    Articles,
    /// Articles of one author, by id or display name.
    ByOwner {
        /// Author id; defaults to the current user.
        #[arg(long)]
        uid: Option<Id<UserMarker>>,
        /// Display name, looked up among the article authors. Wins over `--uid` on a match.
        #[arg(long)]
        name: Option<String>,
    },
    /// Articles narrowed down or reordered by `excellent`, `vote`, `recent` or `noreply`.
    /// Anything else orders by latest reply.
    Filter { kind: Option<ArticleFilter> },
    /// Articles containing a keyword, with matches highlighted.
    Search {
        keyword: String,
        /// `vote` to order by likes; relevance otherwise.
        #[arg(long)]
        sort: Option<SearchSort>,
    },
    /// The route table of the client.
    Routes,
}

fn write_json<T: Serialize>(mut out: impl Write, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn write_routes(out: impl Write) -> Result<(), CliError> {
    write_json(out, &ROUTES)
}

pub(crate) fn execute(
    command: &Command,
    getters: Getters<'_>,
    out: impl Write,
) -> Result<(), CliError> {
    match command {
        Command::Articles => write_json(out, &getters.computed_articles()),
        Command::ByOwner { uid, name } => {
            let owner_id = uid.unwrap_or(getters.current_user_id());
            write_json(out, &getters.articles_by_owner(owner_id, name.as_deref()))
        }
        Command::Filter { kind } => {
            write_json(out, &getters.articles_by_filter(kind.unwrap_or_default()))
        }
        Command::Search { keyword, sort } => write_json(
            out,
            &getters.articles_by_keyword(keyword, sort.unwrap_or_default()),
        ),
        Command::Routes => write_routes(out),
    }
}
