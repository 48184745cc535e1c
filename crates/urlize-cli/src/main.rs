mod config;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use urlize_core::{Link, Linkified, Source, linkify, linkify_sanitized, whitelineless};

use crate::config::Config;

/// Turns URLs and email addresses in IRC log text into HTML links.
#[derive(Parser, Debug)]
#[command(name = "urlize", version)]
struct Cli {
    /// Log file to read; stdin when omitted.
    input: Option<PathBuf>,

    /// TOML config file (defaults to ./urlize.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Truncate link text to this many characters.
    #[arg(long, value_name = "N")]
    trim: Option<usize>,

    /// Do not add rel="nofollow".
    #[arg(long)]
    no_follow: bool,

    /// Do not HTML-escape text outside links.
    #[arg(long)]
    no_escape: bool,

    /// Treat the input as already-safe HTML.
    #[arg(long)]
    trusted: bool,

    /// Pass the output through the anchor-only HTML allow-list.
    #[arg(long)]
    sanitized: bool,

    /// Render the input as a template with {% whitelineless %} blocks instead.
    #[arg(long)]
    whitelineless: bool,

    /// Print link classification as JSON on stderr.
    #[arg(long)]
    links: bool,
}

fn main() {
    init_tracing();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("URLIZE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let source = read_input(cli.input.as_ref())?;

    if cli.whitelineless {
        let html = whitelineless(&source).context("failed to render template")?;
        print!("{}", html);
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let mut options = config.linkify;
    if cli.trim.is_some() {
        options.trim_url_limit = cli.trim;
    }
    if cli.no_follow {
        options.nofollow = false;
    }
    if cli.no_escape {
        options.autoescape = false;
    }
    tracing::debug!(?options, "linkify options");

    let mut lines = Vec::new();
    let mut links: Vec<Link> = Vec::new();
    // One call per line: control-character stripping would otherwise eat the newlines.
    for line in source.lines() {
        let line_source = if cli.trusted {
            Source::Trusted(line)
        } else {
            Source::Untrusted(line)
        };
        let Linkified {
            markup,
            links: line_links,
        } = if cli.sanitized {
            linkify_sanitized(line_source, &options)
        } else {
            linkify(line_source, &options)
        };
        lines.push(markup.into_string());
        links.extend(line_links);
    }

    println!("{}", lines.join("\n"));

    if cli.links {
        let json = serde_json::to_string_pretty(&links).context("failed to encode links")?;
        eprintln!("{}", json);
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
