use crate::core::decode;
use crate::error::{DecodeFailure, PrintoutError, PrintoutResult};
use crate::excel::{PrintoutExporter, DAY_PRINTOUT_SHEET};
use crate::printout::Printout;
use crate::session::{CommitOutcome, Session};
use crate::types::DaySheet;
use clap::ValueEnum;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// How `show` writes the printout to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Document types `export` can write, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Xlsx,
    Json,
    Yaml,
}

impl ExportFormat {
    fn from_path(path: &Path) -> PrintoutResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("xlsx") => Ok(ExportFormat::Xlsx),
            Some("json") => Ok(ExportFormat::Json),
            Some("yaml") | Some("yml") => Ok(ExportFormat::Yaml),
            _ => Err(PrintoutError::Validation(format!(
                "Unsupported export format for {} (use .xlsx, .json or .yaml)",
                path.display()
            ))),
        }
    }
}

/// Read and decode a workbook, folding read errors into a decode failure
fn load_sheet(file: &Path) -> Result<DaySheet, DecodeFailure> {
    let bytes = fs::read(file)
        .map_err(|e| DecodeFailure::Decode(format!("{}: {}", file.display(), e)))?;
    decode(&bytes, DAY_PRINTOUT_SHEET)
}

/// Execute the show command
pub fn show(file: PathBuf, format: OutputFormat, verbose: bool) -> PrintoutResult<()> {
    let sheet = load_sheet(&file)?;
    let printout = Printout::render(&sheet);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&printout)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&printout)?),
        OutputFormat::Text => {
            println!("{}", "🎉 Party Printout".bold().green());
            println!("   File: {}", file.display());
            if verbose {
                println!("   Sheet: {}", DAY_PRINTOUT_SHEET.cyan());
                println!("   Parties: {}", printout.parties.len());
            }
            println!();
            print_printout(&printout);
        }
    }

    Ok(())
}

/// Execute the export command
pub fn export(input: PathBuf, output: PathBuf, verbose: bool) -> PrintoutResult<()> {
    let format = ExportFormat::from_path(&output)?;

    println!("{}", "🎉 Party Printout - Export".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "📖 Reading workbook...".cyan());
    }

    let sheet = load_sheet(&input)?;
    if sheet.is_empty() {
        return Err(PrintoutError::Validation(format!(
            "No parties found in {} - nothing to export",
            input.display()
        )));
    }
    let printout = Printout::render(&sheet);

    if verbose {
        println!("   Found {} parties", printout.parties.len());
        println!("{}", "💾 Writing printout...".cyan());
    }

    match format {
        ExportFormat::Xlsx => PrintoutExporter::new(&printout).export(&output)?,
        ExportFormat::Json => fs::write(&output, serde_json::to_string_pretty(&printout)?)?,
        ExportFormat::Yaml => fs::write(&output, serde_yaml::to_string(&printout)?)?,
    }

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   {} parties written to {}\n", printout.parties.len(), output.display());

    Ok(())
}

/// Execute the watch command
pub fn watch(file: PathBuf, verbose: bool) -> PrintoutResult<()> {
    println!("{}", "👁️  Party Printout - Watch Mode".bold().green());
    println!("   Watching: {}", file.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    if !file.exists() {
        return Err(PrintoutError::Validation(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let canonical_path = file.canonicalize()?;
    let parent_dir = canonical_path
        .parent()
        .ok_or_else(|| PrintoutError::Validation("Cannot determine parent directory".to_string()))?;

    let (tx, rx) = channel();

    // Debounce so a single save does not trigger several decodes
    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)
        .map_err(|e| PrintoutError::Watch(format!("Failed to create file watcher: {}", e)))?;

    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| PrintoutError::Watch(format!("Failed to watch directory: {}", e)))?;

    if verbose {
        println!(
            "   {} {}",
            "Watching directory:".cyan(),
            parent_dir.display()
        );
    }

    let mut session = Session::new();

    println!("{}", "🔄 Initial load...".cyan());
    run_watch_action(&mut session, &file, verbose);
    println!();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|event| {
                    event.kind == DebouncedEventKind::Any
                        && is_same_file(&event.path, &canonical_path)
                });

                if relevant {
                    if verbose {
                        print!("\x1B[2J\x1B[1;1H"); // ANSI clear screen
                    }
                    println!(
                        "\n{} {}",
                        "🔄 Change detected at".cyan(),
                        timestamp().cyan()
                    );
                    run_watch_action(&mut session, &file, verbose);
                    println!();
                }
            }
            Ok(Err(error)) => {
                eprintln!("{} Watch error: {}", "❌".red(), error);
            }
            Err(e) => {
                eprintln!("{} Channel error: {}", "❌".red(), e);
                break;
            }
        }
    }

    Ok(())
}

/// Whether a watcher event path refers to the watched file
fn is_same_file(event_path: &Path, canonical_path: &Path) -> bool {
    if let Ok(event_canonical) = event_path.canonicalize() {
        if event_canonical == canonical_path {
            return true;
        }
    }
    // The file may be mid-replace and not canonicalize; fall back to the name
    match (event_path.file_name(), canonical_path.file_name()) {
        (Some(changed), Some(watched)) => changed == watched,
        _ => false,
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Decode the file once and commit the result to the watch session
fn run_watch_action(session: &mut Session, file: &Path, verbose: bool) {
    let ticket = session.begin_upload();
    let result = load_sheet(file);

    match session.commit(ticket, result) {
        CommitOutcome::Loaded => {
            if let Some(sheet) = session.sheet() {
                let printout = Printout::render(sheet);
                if verbose {
                    println!("   Parties: {}", printout.parties.len());
                }
                print_printout(&printout);
                println!("{}", "✅ Printout updated".bold().green());
            }
        }
        CommitOutcome::Failed(failure) => {
            println!("{} {}", "❌ Load failed:".bold().red(), failure);
            if session.sheet().is_some() {
                println!("{}", "   Keeping the previous printout".yellow());
            }
        }
        CommitOutcome::Superseded => {}
    }
}

/// Print a rendered printout with colored block labels
fn print_printout(printout: &Printout) {
    if !printout.date_label.is_empty() {
        println!("{}\n", printout.date_label.bold());
    }
    if printout.is_empty() {
        println!("{}", "No parties found.".yellow());
        return;
    }
    for (idx, party) in printout.parties.iter().enumerate() {
        let rule = if idx % 2 == 0 {
            "────────".blue()
        } else {
            "────────".green()
        };
        println!("{}", rule);
        for (label, value) in party.blocks() {
            println!("{} {}", label.bold(), value);
        }
    }
    println!();
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
