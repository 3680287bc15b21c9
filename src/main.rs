use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use text_rules::table::{pack_file, Format};
use text_rules::{load_from_path, registry, ApplyOptions, Pipeline, RuleSet, RuleTable};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const TABLE_ENV: &str = "TEXT_RULES_TABLE";
const LOG_ENV: &str = "TEXT_RULES_LOG";

#[derive(Parser)]
#[command(name = "text-rules")]
#[command(about = "Apply regex rule pipelines to Arabic and English text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a pipeline (or named rules) over some text
    Format {
        /// Text to format (read from --file or stdin if omitted)
        text: Option<String>,

        /// Rule table to use instead of the bundled one (.json or .toml)
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// Pipeline name, e.g. arabic-formatting or english-on-blur
        #[arg(short, long, conflicts_with = "rule")]
        pipeline: Option<Pipeline>,

        /// Run only the rules with these names, in table order
        #[arg(short, long = "rule", value_name = "NAME")]
        rule: Vec<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the text after every rule to stderr
        #[arg(long)]
        trace: bool,

        /// Show a unified diff instead of the formatted text
        #[arg(short, long)]
        diff: bool,

        /// Abort if a rule grows the text past this many bytes
        #[arg(long, value_name = "BYTES")]
        max_len: Option<usize>,
    },

    /// List the rules of a table or a pipeline
    List {
        /// Rule table to use instead of the bundled one (.json or .toml)
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// Only list the rules of this pipeline, in pipeline order
        #[arg(short, long)]
        pipeline: Option<Pipeline>,

        /// Only list rules whose name contains this text
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List pipeline names
    Pipelines,

    /// Validate and compile rule tables
    Check {
        /// Table files, or directories to search for .json and .toml tables
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Strip authoring-only fields from a JSON table for distribution
    Pack {
        /// Authored table
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the packed table
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Format {
            text,
            table,
            pipeline,
            rule,
            file,
            trace,
            diff,
            max_len,
        } => cmd_format(FormatArgs {
            text,
            table,
            pipeline,
            rules: rule,
            file,
            trace,
            diff,
            max_len,
        }),

        Commands::List {
            table,
            pipeline,
            name,
        } => cmd_list(table, pipeline, name),

        Commands::Pipelines => cmd_pipelines(),

        Commands::Check { paths } => cmd_check(&paths),

        Commands::Pack { input, output } => cmd_pack(&input, &output),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Resolve the rule table using multiple sources
///
/// Priority order:
/// 1. Explicit --table flag
/// 2. TEXT_RULES_TABLE environment variable
/// 3. Bundled table
fn resolve_table(cli_table: Option<PathBuf>) -> Result<RuleTable> {
    // 1. Explicit flag (highest priority)
    if let Some(path) = cli_table {
        return load_from_path(&path)
            .with_context(|| format!("could not load rule table {}", path.display()));
    }

    // 2. Environment variable
    if let Ok(env_path) = env::var(TABLE_ENV) {
        let path = PathBuf::from(&env_path);
        if path.exists() {
            return load_from_path(&path)
                .with_context(|| format!("could not load rule table from {TABLE_ENV}"));
        }
        eprintln!(
            "{}",
            format!("Warning: {TABLE_ENV} is set but path doesn't exist: {env_path}").yellow()
        );
    }

    // 3. Bundled table
    Ok(registry::global()?.clone())
}

/// Rules by name, refusing names the table does not know.
fn select_by_name(table: &RuleTable, names: &[String]) -> Result<RuleSet> {
    let known = table.names();
    for name in names {
        if !known.contains(&name.as_str()) {
            match suggest(name, &known) {
                Some(close) => anyhow::bail!("unknown rule '{name}' (did you mean '{close}'?)"),
                None => anyhow::bail!("unknown rule '{name}'"),
            }
        }
    }
    Ok(table.by_name(names))
}

fn suggest<'a>(name: &str, known: &[&'a str]) -> Option<&'a str> {
    known
        .iter()
        .map(|candidate| (strsim::jaro_winkler(name, candidate), *candidate))
        .filter(|(score, _)| *score > 0.8)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate)
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return fs::read_to_string(&path)
            .with_context(|| format!("could not read {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("could not read stdin")?;
    Ok(buf)
}

/// Helper: Show unified diff between original and formatted text
fn display_diff(original: &str, modified: &str) {
    println!("{}", "--- original".dimmed());
    println!("{}", "+++ formatted".dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", sign);
        if change.missing_newline() {
            println!();
        }
    }
}

struct FormatArgs {
    text: Option<String>,
    table: Option<PathBuf>,
    pipeline: Option<Pipeline>,
    rules: Vec<String>,
    file: Option<PathBuf>,
    trace: bool,
    diff: bool,
    max_len: Option<usize>,
}

fn cmd_format(args: FormatArgs) -> Result<()> {
    let table = resolve_table(args.table)?;

    let rules = match args.pipeline {
        Some(pipeline) => table.pipeline(pipeline),
        None if !args.rules.is_empty() => select_by_name(&table, &args.rules)?,
        None => anyhow::bail!("nothing to run: pass --pipeline or at least one --rule"),
    };

    let input = read_input(args.text, args.file)?;

    let mut sink = |line: &str| eprintln!("{}", line.dimmed());
    let mut options = ApplyOptions::new();
    if args.trace {
        options = options.with_trace(&mut sink);
    }
    if let Some(max_len) = args.max_len {
        options = options.with_max_len(max_len);
    }

    let output = rules.apply_with(&input, options)?;

    if args.diff {
        if input == output {
            println!("{}", "No changes".dimmed());
        } else {
            display_diff(&input, &output);
        }
    } else {
        print!("{output}");
        if !output.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

fn cmd_list(table: Option<PathBuf>, pipeline: Option<Pipeline>, name: Option<String>) -> Result<()> {
    let table = resolve_table(table)?;
    let rules = match pipeline {
        Some(pipeline) => table.pipeline(pipeline),
        None => table.all(),
    };
    let rules = match &name {
        Some(needle) => rules.select(|rule| rule.name().contains(needle.as_str())),
        None => rules,
    };

    if rules.is_empty() {
        println!("{}", "No rules".yellow());
        return Ok(());
    }

    for rule in rules.iter() {
        let axes: Vec<&str> = rule.metadata().enabled().collect();
        println!(
            "{:>4}  {}  {}",
            rule.id(),
            rule.name().bold(),
            format!("[{}]", axes.join(", ")).dimmed()
        );
        if let Some(description) = rule.description() {
            println!("      {}", description.dimmed());
        }
    }

    println!();
    println!(
        "{} rules, {} names",
        format!("{}", rules.len()).green(),
        rules.names().len()
    );
    Ok(())
}

fn cmd_pipelines() -> Result<()> {
    for pipeline in Pipeline::all() {
        println!("{pipeline}");
    }
    Ok(())
}

/// Helper: Collect rule table files under the given paths.
fn discover_table_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.exists() {
            anyhow::bail!("no such file or directory: {}", path.display());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry?;
            if entry.file_type().is_file() && Format::from_path(entry.path()).is_some() {
                found.push(entry.path().to_path_buf());
            }
        }
        found.sort();
        files.extend(found);
    }
    Ok(files)
}

fn cmd_check(paths: &[PathBuf]) -> Result<()> {
    let files = discover_table_files(paths)?;
    if files.is_empty() {
        anyhow::bail!("no .json or .toml rule tables found");
    }

    let mut passed = 0;
    let mut failed = 0;

    for file in &files {
        match load_from_path(file) {
            Ok(table) => {
                println!(
                    "{} {}: {} rules",
                    "✓".green(),
                    file.display(),
                    table.len()
                );
                passed += 1;
            }
            Err(e) => {
                eprintln!("{} {}", "✗".red(), file.display());
                for line in e.to_string().lines() {
                    eprintln!("  {line}");
                }
                failed += 1;
            }
        }
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("  {} valid", format!("{}", passed).green());
    println!("  {} invalid", format!("{}", failed).red());

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_pack(input: &Path, output: &Path) -> Result<()> {
    let count = pack_file(input, output)
        .with_context(|| format!("could not pack {}", input.display()))?;
    println!(
        "{} Packed {} rules into {}",
        "✓".green(),
        count,
        output.display()
    );
    Ok(())
}
