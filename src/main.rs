//! rootseek — concurrent local file and folder search.
//!
//! Thin binary entry point. All search logic lives in `rootseek-core`;
//! this file only turns command-line flags into anchors and targets, runs
//! the search to completion, and prints a summary.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rootseek_core::consumer::{ConsoleConsumer, CsvConsumer, OutputConsumer};
use rootseek_core::model::{FileAttributes, MatchStyle, SearchAnchor, SearchTarget};
use rootseek_core::pattern::{GlobCompiler, PatternCompiler, RegexCompiler};
use rootseek_core::profile::SearchProfile;
use rootseek_core::SearchEngine;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AttrStyle {
    Any,
    All,
    Skip,
}

#[derive(Debug, Parser)]
#[command(name = "rootseek", version, about = "Search local folders for matching files and directories")]
struct Cli {
    /// Directories to search. Defaults to every local filesystem root.
    roots: Vec<PathBuf>,

    /// Descend into subdirectories.
    #[arg(short, long)]
    recurse: bool,

    /// Name pattern; repeat for several. No pattern matches every name.
    #[arg(short = 'n', long = "name", value_name = "PATTERN")]
    names: Vec<String>,

    /// Require every name pattern to match instead of any.
    #[arg(long)]
    all: bool,

    /// Invert name matching.
    #[arg(long)]
    invert: bool,

    /// Treat name patterns as regular expressions instead of globs.
    #[arg(long)]
    regex: bool,

    /// Case-insensitive name matching.
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Attribute mask, e.g. `hidden,readonly` or `directory`.
    #[arg(long, value_name = "LIST", value_parser = parse_attributes)]
    attr: Option<FileAttributes>,

    /// How the attribute mask is applied.
    #[arg(long, value_enum, default_value = "any")]
    attr_style: AttrStyle,

    /// Invert attribute matching.
    #[arg(long)]
    attr_invert: bool,

    /// Load anchors and targets from a JSON search profile (added to any
    /// given on the command line).
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Write matches to a CSV file instead of the console.
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Let workers report matches concurrently, without the results lock.
    #[arg(long)]
    no_sync: bool,

    /// Verbosity: -v for debug, -vv for trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parse `hidden,readonly` / `HIDDEN | READ_ONLY` style attribute lists.
fn parse_attributes(list: &str) -> Result<FileAttributes, String> {
    list.split([',', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .try_fold(FileAttributes::empty(), |acc, raw| {
            let name = raw.to_ascii_uppercase().replace('-', "_");
            let name = match name.as_str() {
                "READONLY" => "READ_ONLY",
                "DIR" => "DIRECTORY",
                other => other,
            };
            FileAttributes::from_name(name)
                .map(|flag| acc | flag)
                .ok_or_else(|| format!("unknown attribute '{raw}'"))
        })
}

impl Cli {
    fn compiler(&self) -> Arc<dyn PatternCompiler> {
        match (self.regex, self.ignore_case) {
            (true, true) => Arc::new(RegexCompiler::case_insensitive()),
            (true, false) => Arc::new(RegexCompiler::new()),
            (false, true) => Arc::new(GlobCompiler::case_insensitive()),
            (false, false) => Arc::new(GlobCompiler::new()),
        }
    }

    fn target(&self) -> SearchTarget {
        let mut name_style = if self.all {
            MatchStyle::MATCH_ALL
        } else {
            MatchStyle::MATCH_ANY
        };
        if self.invert {
            name_style |= MatchStyle::INVERT;
        }

        let mut attr_style = match self.attr_style {
            AttrStyle::Any => MatchStyle::MATCH_ANY,
            AttrStyle::All => MatchStyle::MATCH_ALL,
            AttrStyle::Skip => MatchStyle::SKIP,
        };
        if self.attr_invert {
            attr_style |= MatchStyle::INVERT;
        }
        let mask = self.attr.unwrap_or_else(FileAttributes::empty);
        if mask.is_empty() {
            attr_style = MatchStyle::SKIP;
        }

        SearchTarget {
            name_patterns: self.names.clone(),
            name_match_style: name_style,
            attribute_mask: mask,
            attribute_match_style: attr_style,
        }
    }

    fn anchor(&self) -> SearchAnchor {
        if self.roots.is_empty() {
            SearchAnchor::local_roots(self.recurse)
        } else {
            SearchAnchor {
                roots: self.roots.clone(),
                recurse_subfolders: self.recurse,
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging on stderr so stdout stays clean for results.
    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut engine = SearchEngine::with_compiler(cli.compiler());
    engine.set_sync_results(!cli.no_sync);

    let profile = cli
        .profile
        .as_deref()
        .map(SearchProfile::load)
        .transpose()?;

    match &profile {
        Some(profile) => {
            profile.apply(&mut engine);
            // Flags only add to a profile when they say something.
            if !cli.roots.is_empty() {
                engine.add_anchor(cli.anchor());
            }
            if !cli.names.is_empty() || cli.attr.is_some() {
                engine.add_target(cli.target());
            }
            if cli.no_sync {
                engine.set_sync_results(false);
            }
        }
        None => {
            engine.add_anchor(cli.anchor());
            engine.add_target(cli.target());
        }
    }

    if let Some(csv_path) = &cli.csv {
        let file = File::create(csv_path)
            .with_context(|| format!("creating {}", csv_path.display()))?;
        let csv = Arc::new(CsvConsumer::new(BufWriter::new(file)));
        run(&mut engine, csv.clone())?;
        csv.flush()
            .with_context(|| format!("writing {}", csv_path.display()))?;
        println!(
            "{} files and folders matched, {} folders could not be read.",
            csv.row_count(),
            csv.blocked_count()
        );
    } else {
        let console = Arc::new(ConsoleConsumer::new());
        run(&mut engine, console.clone())?;
        println!(
            "{} files and folders matched, {} folders could not be read.",
            console.match_count(),
            console.blocked_count()
        );
    }

    Ok(())
}

fn run(engine: &mut SearchEngine, consumer: Arc<dyn OutputConsumer>) -> anyhow::Result<()> {
    let workers = engine.search(consumer)?;
    tracing::info!("Searching with {workers} worker(s)");
    engine.join_all();
    Ok(())
}
