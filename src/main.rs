//! Collect GitHub repository and account metrics from the command line.
//!
//! # Overview
//!
//! `gitstats` resolves metric namespaces such as `repo/grafana/grafana/stars` against the
//! GitHub API and prints one timestamped record per resolved value. Namespaces may contain
//! `*` wildcards: a wildcard owner stands for the account the token belongs to, and a
//! wildcard repository stands for every repository the owner has.
//!
//! # Quick Start
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_...
//! gitstats collect 'repo/grafana/grafana/stars' 'user/*/followers'
//! ```
//!
//! # Namespaces
//!
//! Namespaces may be given in full (`raintank/apps/gitstats/repo/...`) or relative to the
//! `raintank/apps/gitstats` prefix:
//!
//! | Namespace | Value |
//! |-----------|-------|
//! | `repo/{owner}/{repo}/{forks,issues,network,stars,subscribers,watches,size}` | repository counter |
//! | `repo/{owner}/{repo}/issuesbylabel/{label}/{status}/count` | open and closed issues per label |
//! | `user/{user}/{public_repos,public_gists,followers,following,...}` | account counter |
//!
//! Run `gitstats catalog` for the full list.
//!
//! # Output
//!
//! ```bash
//! gitstats collect --format json 'repo/acme/*/issuesbylabel/*/*/count'
//! ```
//!
//! # Configuration
//!
//! Settings come from a TOML, YAML or JSON file passed with `--config`, overridden by flags:
//!
//! ```toml
//! access_token = "ghp_..."
//! user = "grafana"   # replaces a wildcard owner
//! repo = ""          # replaces a wildcard repository when set
//! ```

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use gitstats::Result;

mod commands;

use crate::commands::{CatalogArgs, CollectArgs, process_collect, show_catalog};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "gitstats", version, about, long_about = None)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve metric namespaces against GitHub and print the records
    Collect(Box<CollectArgs>),
    /// List the supported metric namespaces and configuration options
    Catalog(CatalogArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        Command::Collect(collect_args) => process_collect(collect_args).await,
        Command::Catalog(catalog_args) => show_catalog(catalog_args),
    }
}
