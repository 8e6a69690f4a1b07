//! Sieve CLI
//!
//! Filters HTML against a tag whitelist and prints what survives.

mod config;

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use sieve_common::warning::{clear_warnings, warn_once};
use sieve_dom::print_tree;
use sieve_html::{HtmlFilter, IssueKind, ParseReport};
use strum::IntoEnumIterator;

use config::RuleFile;

/// Sieve — whitelist-driven HTML filter
#[derive(Parser, Debug)]
#[command(name = "sieve")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Filter a file
    sieve ./comment.html

    # Filter stdin
    cat comment.html | sieve

    # Filter inline HTML and explain what was dropped
    sieve --report --html '<span>ok</span><blink>gone</blink>'

    # Extend the whitelist from a rule file
    sieve --rules rules.json ./comment.html
"#)]
struct Cli {
    /// Path to an HTML file; stdin is read when omitted
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Filter this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// JSON rule file extending the default whitelist
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Start from an empty whitelist (only tags from --rules are kept)
    #[arg(long, requires = "rules")]
    replace_rules: bool,

    /// Print the filtered node tree before the markup
    #[arg(long)]
    tree: bool,

    /// Print what was dropped, and why, to stderr
    #[arg(long)]
    report: bool,

    /// Print the whitelisted tag names and exit
    #[arg(long)]
    list_tags: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = build_filter(&cli)?;

    if cli.list_tags {
        for name in filter.registry().tag_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let input = read_input(&cli)?;
    let report = filter.parse_with_report(&input);

    if cli.tree {
        println!("=== Filtered Tree ===");
        print_tree(&report.nodes);
        println!("\n=== Markup ===");
    }
    println!("{}", report.text());

    if cli.report {
        print_report(&report);
    }
    Ok(())
}

/// Build the filter, applying the rule file if one was given
fn build_filter(cli: &Cli) -> Result<HtmlFilter> {
    let mut filter = HtmlFilter::new();
    if let Some(ref path) = cli.rules {
        let mut rules = RuleFile::load(path)
            .with_context(|| format!("failed to load rules from '{}'", path.display()))?;
        rules.replace |= cli.replace_rules;
        rules
            .apply(filter.registry_mut())
            .with_context(|| format!("invalid rules in '{}'", path.display()))?;
    }
    Ok(filter)
}

/// Read markup from --html, a file, or stdin
fn read_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))
    } else {
        io::read_to_string(io::stdin()).context("failed to read stdin")
    }
}

/// Print each filter decision once, then a per-kind summary
fn print_report(report: &ParseReport) {
    clear_warnings();
    for issue in &report.issues {
        warn_once("Filter", &issue.to_string());
    }

    let summary: Vec<String> = IssueKind::iter()
        .filter_map(|kind| {
            let count = report.issues.iter().filter(|issue| issue.kind == kind).count();
            (count > 0).then(|| format!("{kind}: {count}"))
        })
        .collect();
    if summary.is_empty() {
        eprintln!("{}", "nothing dropped".green());
    } else {
        eprintln!("{}", summary.join(", ").dimmed());
    }
    if report.halted {
        eprintln!("{}", "input truncated at a malformed tag".red().bold());
    }
}
