//! Deckdiff - decklist comparison CLI
//!
//! Compares two decklist files and prints what changed.
//!
//! ## Usage
//!
//! ```
//! deckdiff <old-file> <new-file> [OPTIONS]
//!
//! Options:
//!   --sort <strategy>   Row order for --aligned/--json output
//!   --aligned           Print both decks side by side with gap rows
//!   --json              Emit the full comparison as JSON
//! ```

use std::env;
use std::fs;
use std::process;

use deckdiff::{
    AlignedDecks, CardWithChange, Comparison, DiffSection, DiffSummary, SortStrategy,
    align_changes, compare, format_section, sort_changes, summarize,
};

struct CliArgs {
    old_file: String,
    new_file: String,
    strategy: SortStrategy,
    aligned: bool,
    json: bool,
}

fn print_help() {
    println!("Deckdiff - decklist comparison");
    println!();
    println!("Usage: deckdiff <old-file> <new-file> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --sort <strategy>   Row order: input, alphabetical-asc, alphabetical-desc,");
    println!("                      alphabetical-aligned, changeType-asc, changeType-desc,");
    println!("                      alignment (default: changeType-asc)");
    println!("  --aligned           Print both decks side by side with gap rows");
    println!("  --json              Emit the full comparison as JSON");
    println!("  --help, -h          Show this help message");
}

fn parse_args() -> Result<CliArgs, String> {
    let args: Vec<String> = env::args().collect();
    let mut files: Vec<String> = Vec::new();
    let mut strategy = SortStrategy::ChangeAsc;
    let mut aligned = false;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--sort" => {
                if i + 1 < args.len() {
                    strategy = args[i + 1].parse().map_err(|e| format!("Error: {e}"))?;
                    i += 2;
                } else {
                    return Err("Error: --sort requires a strategy name".to_string());
                }
            }
            "--aligned" => {
                aligned = true;
                i += 1;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            other if other.starts_with("--") => {
                return Err(format!("Unknown argument: {other}"));
            }
            other => {
                files.push(other.to_string());
                i += 1;
            }
        }
    }

    if files.len() != 2 {
        return Err("Error: expected exactly two decklist files (see --help)".to_string());
    }
    let mut files = files.into_iter();
    Ok(CliArgs {
        old_file: files.next().unwrap(),
        new_file: files.next().unwrap(),
        strategy,
        aligned,
        json,
    })
}

fn read_deck_file(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Error reading {path}: {e}"))
}

fn print_summary(summary: &DiffSummary) {
    if summary.is_empty() {
        println!("Both decklists are empty.");
        return;
    }
    for (title, section) in [
        ("ADDED", DiffSection::Added),
        ("REMOVED", DiffSection::Removed),
        ("UNCHANGED", DiffSection::Unchanged),
    ] {
        let text = format_section(title, summary.section(section), section);
        if !text.is_empty() {
            println!("{text}");
        }
    }
}

fn render_slot(slot: &Option<CardWithChange>) -> String {
    match slot {
        Some(card) => format!("{} {}", card.quantity, card.name),
        None => String::new(),
    }
}

fn print_aligned(aligned: &AlignedDecks) {
    let width = aligned
        .old
        .iter()
        .map(|slot| render_slot(slot).len())
        .max()
        .unwrap_or(0);
    for (old, new) in aligned.rows() {
        println!("{:<width$} | {}", render_slot(old), render_slot(new));
    }
}

fn print_json(
    comparison: &Comparison,
    aligned: &AlignedDecks,
    summary: &DiffSummary,
) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct Report<'a> {
        old_changes: &'a [CardWithChange],
        new_changes: &'a [CardWithChange],
        aligned: &'a AlignedDecks,
        summary: &'a DiffSummary,
    }
    let report = Report {
        old_changes: &comparison.old_changes,
        new_changes: &comparison.new_changes,
        aligned,
        summary,
    };
    let json =
        serde_json::to_string_pretty(&report).map_err(|e| format!("Error encoding JSON: {e}"))?;
    println!("{json}");
    Ok(())
}

fn run(args: &CliArgs) -> Result<(), String> {
    let old_text = read_deck_file(&args.old_file)?;
    let new_text = read_deck_file(&args.new_file)?;

    let mut comparison = compare(&old_text, &new_text);
    comparison.old_changes = sort_changes(&comparison.old_changes, args.strategy);
    comparison.new_changes = sort_changes(&comparison.new_changes, args.strategy);
    let aligned = align_changes(
        &comparison.old_changes,
        &comparison.new_changes,
        args.strategy == SortStrategy::AlphaAligned,
    );
    let summary = summarize(&old_text, &new_text);

    if args.json {
        print_json(&comparison, &aligned, &summary)
    } else if args.aligned {
        print_aligned(&aligned);
        Ok(())
    } else {
        print_summary(&summary);
        Ok(())
    }
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    if let Err(err) = run(&args) {
        eprintln!("{err}");
        process::exit(1);
    }
}
