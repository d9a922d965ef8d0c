use super::common::{ColorMode, LogLevel, init_logging};
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use core::fmt::Write;
use gitstats::Result;
use gitstats::config::Config;
use gitstats::metrics::{MetricRecord, MetricRequest};
use gitstats::plugin::{PLUGIN_VERSION, collect_metrics};
use ohno::IntoAppError;
use owo_colors::OwoColorize;

/// How collected records are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One aligned line per record
    Text,

    /// A JSON array of records
    Json,
}

#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Metric namespaces to resolve, e.g. `repo/grafana/*/stars` or `user/*/followers`
    #[arg(value_name = "NAMESPACE", required = true)]
    pub namespaces: Vec<String>,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// Account that replaces a wildcard owner
    #[arg(long, value_name = "LOGIN")]
    pub user: Option<String>,

    /// Repository that replaces a wildcard repository
    #[arg(long, value_name = "NAME")]
    pub repo: Option<String>,

    /// GitHub API endpoint, for GitHub Enterprise servers
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to a TOML, YAML or JSON configuration file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Schema version stamped on every record
    #[arg(long, value_name = "VERSION", default_value_t = PLUGIN_VERSION)]
    pub schema_version: u32,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl CollectArgs {
    /// Merge the configuration file, if any, with the flags given on the command line. Flags win.
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(token) = &self.github_token {
            config.access_token.clone_from(token);
        }
        if let Some(user) = &self.user {
            config.user.clone_from(user);
        }
        if let Some(repo) = &self.repo {
            config.repo.clone_from(repo);
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = Some(api_url.clone());
        }

        Ok(config)
    }
}

pub async fn process_collect(args: &CollectArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = args.config()?;
    let requests = args
        .namespaces
        .iter()
        .map(|ns| MetricRequest::parse(ns, args.schema_version))
        .collect::<Result<Vec<_>>>()?;

    let records = collect_metrics(&requests, &config).await?;

    let mut output = String::new();
    write_records(&records, args.format, args.color.use_colors(), &mut output)?;
    print!("{output}");

    Ok(())
}

pub fn write_records<W: Write>(records: &[MetricRecord], format: OutputFormat, use_colors: bool, writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(records).into_app_err("serializing metric records")?;
            writeln!(writer, "{json}")?;
        }
        OutputFormat::Text => {
            let names: Vec<String> = records.iter().map(|r| r.namespace.to_string()).collect();
            let width = names.iter().map(String::len).max().unwrap_or(0);

            for (record, name) in records.iter().zip(&names) {
                let timestamp = record.timestamp.to_rfc3339();
                if use_colors {
                    writeln!(
                        writer,
                        "{:<width$}  {:>10}  {}",
                        name.cyan(),
                        record.value.bold(),
                        timestamp.dimmed()
                    )?;
                } else {
                    writeln!(writer, "{name:<width$}  {:>10}  {timestamp}", record.value)?;
                }
            }
        }
    }

    Ok(())
}
