//! Command parsing and execution for the `fuzzmatch` binary.
//!
//! [`Cli`] is the clap definition; [`run`] executes one parsed command and
//! writes its output to any [`Write`]r, so tests can capture it.
//!
//! | Command     | Output                                   |
//! |-------------|------------------------------------------|
//! | `expand`    | the variant set, one per line            |
//! | `predicate` | the predicate tree as JSON               |
//! | `search`    | matching records from a JSON file        |
//! | `sql`       | a `WHERE` fragment and its parameters    |

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use fuzzmatch_core::{config::Config, Composer, Expand, Relation, SearchScope, TermExpander};
use fuzzmatch_store::{
    sql::{Join, SqlSchema},
    MemoryStore, RecordStore,
};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "fuzzmatch", about = "Typo-tolerant search predicates for admin list screens")]
pub struct Cli {
    /// Write debug logs to stderr (filter with RUST_LOG).
    #[arg(long)]
    pub debug: bool,

    /// Config file layered over the built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the variant set of a query, one per line.
    Expand { query: String },

    /// Print the predicate tree of a query as JSON.
    Predicate {
        query: String,
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Run a query against a JSON array of records and print the matches.
    Search {
        query: String,
        /// JSON file holding an array of record objects.
        #[arg(long)]
        data: PathBuf,
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Render a query as a parameterised SQL WHERE fragment.
    Sql {
        query: String,
        /// Table the searched fields live on.
        #[arg(long)]
        table: String,
        /// Relation join as NAME=TABLE.KEY=PARENT_KEY, e.g. user=users.id=user_id.
        #[arg(long = "join", value_parser = parse_join)]
        joins: Vec<(String, Join)>,
        #[command(flatten)]
        scope: ScopeArgs,
    },
}

/// Where to search: a configured screen, or explicit fields and relations.
#[derive(Debug, Args)]
pub struct ScopeArgs {
    /// Admin screen from the config (ads, users, banners, …).
    #[arg(long, conflicts_with_all = ["fields", "relations"])]
    pub screen: Option<String>,

    /// Field on the searched record; repeatable.
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// Related fields as NAME=F1,F2; repeatable.
    #[arg(long = "relation", value_parser = parse_relation)]
    pub relations: Vec<Relation>,
}

impl ScopeArgs {
    fn resolve(&self, config: &Config) -> anyhow::Result<SearchScope> {
        if let Some(name) = &self.screen {
            return config
                .screen(name)
                .cloned()
                .with_context(|| format!("unknown screen `{name}`"));
        }
        let scope = SearchScope {
            fields: self.fields.clone(),
            relations: self.relations.clone(),
        };
        if scope.is_empty() {
            bail!("nothing to search: pass --screen, --field or --relation");
        }
        Ok(scope)
    }
}

// ---------------------------------------------------------------------------
// Argument parsers
// ---------------------------------------------------------------------------

/// Parse `NAME=F1,F2`.
pub fn parse_relation(input: &str) -> Result<Relation, String> {
    let (name, fields) = input
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=F1,F2, got `{input}`"))?;
    let fields: Vec<&str> = fields
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();
    if name.trim().is_empty() || fields.is_empty() {
        return Err(format!("expected NAME=F1,F2, got `{input}`"));
    }
    Ok(Relation::new(name.trim(), fields))
}

/// Parse `NAME=TABLE.KEY=PARENT_KEY`.
pub fn parse_join(input: &str) -> Result<(String, Join), String> {
    let usage = || format!("expected NAME=TABLE.KEY=PARENT_KEY, got `{input}`");
    let (name, rest) = input.split_once('=').ok_or_else(usage)?;
    let (target, parent_key) = rest.split_once('=').ok_or_else(usage)?;
    let (table, key) = target.split_once('.').ok_or_else(usage)?;
    if [name, table, key, parent_key].iter().any(|s| s.is_empty()) {
        return Err(usage());
    }
    Ok((
        name.to_string(),
        Join {
            table: table.to_string(),
            key: key.to_string(),
            parent_key: parent_key.to_string(),
        },
    ))
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Load config from an explicit path, or from the user config directory
/// falling back to the built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default config");
            Config::defaults()
        })),
    }
}

/// Execute a parsed command line, writing results to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let composer = Composer::with_settings(&config.search);

    match cli.command {
        Command::Expand { query } => {
            let variants = TermExpander::with_limit(config.search.max_variants).expand(&query);
            for variant in &variants {
                writeln!(out, "{variant}")?;
            }
        }
        Command::Predicate { query, scope } => {
            let scope = scope.resolve(&config)?;
            let predicate = composer.build_scoped(&query, &scope);
            serde_json::to_writer_pretty(&mut *out, &predicate)?;
            writeln!(out)?;
        }
        Command::Search { query, data, scope } => {
            let scope = scope.resolve(&config)?;
            let json = std::fs::read_to_string(&data)
                .with_context(|| format!("reading records from {}", data.display()))?;
            let store = MemoryStore::from_json(&json)
                .with_context(|| format!("parsing records in {}", data.display()))?;
            let predicate = composer.build_scoped(&query, &scope);
            let hits = store.filter(&predicate)?;
            tracing::info!(query = %query, hits = hits.len(), total = store.len(), "search finished");
            for record in hits {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
        Command::Sql { query, table, joins, scope } => {
            let scope = scope.resolve(&config)?;
            let schema = SqlSchema {
                table,
                joins: joins.into_iter().collect(),
            };
            let predicate = composer.build_scoped(&query, &scope);
            let rendered = schema.render(&predicate)?;
            serde_json::to_writer_pretty(&mut *out, &rendered)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
