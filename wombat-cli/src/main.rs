//! Wombat CLI - streaming HTML minifier
//!
//! Reads a document from a file, an inline string or stdin, and writes the
//! minified markup to stdout or a file.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use wombat_html::HTMLTokenizer;
use wombat_minify::{
    Minifier, MinifyConfig, MinifyStats, Options, PassthroughScripts, minify_to_writer,
};

/// Wombat - streaming, token-level HTML minifier
#[derive(Parser, Debug)]
#[command(name = "wombat")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Minify a file to stdout
    wombat index.html

    # Minify stdin to a file
    cat index.html | wombat -o index.min.html

    # Minify inline HTML and show the savings
    wombat --html '<p>  Hello   <b>world</b>  </p>' --stats

    # Show the minified token stream
    wombat -t index.html

    # Use custom tag classification
    wombat --print-config > wombat.json
    wombat -c wombat.json index.html
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// HTML file to minify; reads stdin when omitted or "-"
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Minify an HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Write the minified document to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Load tag classification from a JSON file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Copy script elements through without minifying them
    #[arg(long)]
    keep_scripts: bool,

    /// Print the minified token stream instead of markup
    #[arg(short, long)]
    tokens: bool,

    /// Print size and token statistics to stderr
    #[arg(short, long)]
    stats: bool,
}

const MINIFY_FAILED: &str = "failed to minify document \
    (scripts that are not JavaScript need --keep-scripts)";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let html = read_input(&cli)?;
    let options = Options::new().with_config(config);
    let options = if cli.keep_scripts {
        options.with_scripts(&PassthroughScripts)
    } else {
        options
    };

    if cli.tokens {
        return print_tokens(&html, &options);
    }

    let result = if let Some(path) = &cli.output {
        let file = File::create(path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        minify_to_writer(&html, &mut BufWriter::new(file), &options)
    } else {
        minify_to_writer(&html, &mut BufWriter::new(io::stdout().lock()), &options)
    };
    let stats = result.context(MINIFY_FAILED)?;

    if cli.stats {
        print_stats(&stats);
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<MinifyConfig> {
    let Some(path) = path else {
        return Ok(MinifyConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    MinifyConfig::from_json(&json)
        .with_context(|| format!("failed to load config '{}'", path.display()))
}

fn read_input(cli: &Cli) -> Result<String> {
    if let Some(html) = &cli.html {
        return Ok(html.clone());
    }
    match cli.path.as_deref() {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        _ => {
            let mut html = String::new();
            let _ = io::stdin()
                .read_to_string(&mut html)
                .context("failed to read stdin")?;
            Ok(html)
        }
    }
}

fn print_tokens(html: &str, options: &Options<'_>) -> Result<()> {
    let mut minifier = Minifier::new(HTMLTokenizer::new(html), options);
    let tokens = minifier
        .by_ref()
        .collect::<Result<Vec<_>, _>>()
        .context(MINIFY_FAILED)?;

    println!("=== Minified Tokens ({}) ===", tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        println!("  {i:3}: {token:?}");
    }
    println!();
    println!(
        "{} tokens read, final state {}, region {}",
        minifier.tokens_read(),
        minifier.state(),
        minifier.region()
    );
    Ok(())
}

fn print_stats(stats: &MinifyStats) {
    eprintln!(
        "{} {} -> {} bytes, {} saved ({:.1}%)",
        "size:".bold(),
        stats.input_bytes,
        stats.output_bytes,
        stats.saved_bytes().green(),
        stats.ratio() * 100.0
    );
    eprintln!(
        "{} {} in, {} out",
        "tokens:".bold(),
        stats.tokens_in,
        stats.tokens_out
    );
}
