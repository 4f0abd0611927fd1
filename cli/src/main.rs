//! `loquat` - highlight a search sequence in a .docx document.
//!
//! The search term comes from one of three places, checked in order:
//! `--term` (free-form text), `--sequence` (a built-in label whose text is
//! read from the sequences directory), or an interactive menu mirroring the
//! two. Configuration problems abort before the document is opened.

use clap::Parser;
use log::info;
use loquat::docx::HighlightColor;
use loquat::sequences::{MENU_LABELS, SequenceRule, output_path};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "loquat",
    version,
    about = "Highlight every occurrence of a search sequence in a .docx document"
)]
struct Cli {
    /// Input .docx file
    input: PathBuf,

    /// Built-in sequence label (e.g. egfp, AmpR); its text is read from the
    /// sequences directory
    #[arg(long, conflicts_with = "term")]
    sequence: Option<String>,

    /// Free-form search text (defaults the highlight to yellow)
    #[arg(long)]
    term: Option<String>,

    /// Highlight color override (yellow, bright_green, pink, red,
    /// dark_blue, ...)
    #[arg(long)]
    color: Option<String>,

    /// Output file path; defaults to <input>_output_<label>.docx next to
    /// the input
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory holding <label>.txt sequence definition files
    #[arg(long, default_value = "sequences")]
    sequences_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut rule = if let Some(label) = &cli.sequence {
        SequenceRule::builtin(label)?
    } else if let Some(term) = &cli.term {
        SequenceRule::inline(term.clone())
    } else {
        prompt_rule()?
    };

    if let Some(color) = &cli.color {
        rule.color = color.parse::<HighlightColor>()?;
    }

    // Everything up to here is configuration; fail before touching the
    // document
    let needle = rule.resolve_needle(&cli.sequences_dir)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| output_path(&cli.input, rule.label()));

    info!(
        "highlighting '{}' ({}) in {}",
        needle,
        rule.color,
        cli.input.display()
    );
    let stats = loquat::highlight_file(&cli.input, &output, &needle, rule.color)?;

    println!(
        "{} match(es) highlighted in {} paragraph(s); output: {}",
        stats.matches,
        stats.paragraphs_rewritten,
        output.display()
    );
    Ok(())
}

/// Interactive fallback: the numbered sequence menu.
fn prompt_rule() -> Result<SequenceRule, Box<dyn std::error::Error>> {
    println!("Select a sequence to search:");
    for (i, label) in MENU_LABELS.iter().enumerate() {
        let rule = SequenceRule::builtin(label)?;
        println!("  {}) {} ({})", i + 1, label, rule.color);
    }
    println!("  {}) other (yellow)", MENU_LABELS.len() + 1);
    print!("> ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let choice: usize = line.trim().parse().map_err(|_| "invalid menu choice")?;

    if choice >= 1 && choice <= MENU_LABELS.len() {
        Ok(SequenceRule::builtin(MENU_LABELS[choice - 1])?)
    } else if choice == MENU_LABELS.len() + 1 {
        print!("Enter sequence to search: ");
        std::io::stdout().flush()?;
        let mut term = String::new();
        std::io::stdin().lock().read_line(&mut term)?;
        Ok(SequenceRule::inline(term.trim().to_string()))
    } else {
        Err("invalid menu choice".into())
    }
}
