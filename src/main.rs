use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use local_actions_lsp::analysis::{self, FileReport, Settings};
use local_actions_lsp::lsp;

#[derive(Parser)]
#[command(name = "local-actions-lsp")]
#[command(about = "Editor support for local GitHub Actions references", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the LSP server on stdio
    Serve,

    /// Check local `uses:` references in workflow and action file(s)
    Check {
        /// File or directory to check
        path: PathBuf,

        /// Do not report references to files that do not exist
        #[arg(long)]
        no_exist_errors: bool,

        /// Do not report references stored under unconventional folders
        #[arg(long)]
        no_placement_errors: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            lsp::start_server().await?;
        }

        Commands::Check {
            path,
            no_exist_errors,
            no_placement_errors,
        } => {
            let settings = Settings {
                file_exist_errors: !no_exist_errors,
                file_placement_errors: !no_placement_errors,
            };

            if path.is_file() {
                println!("{} Checking {}...\n", "🔍".blue(), path.display());

                if analysis::base_dir(&path).is_none() {
                    println!(
                        "{} No `.github` directory above {}; references were not validated",
                        "⚠️ ".yellow(),
                        path.display()
                    );
                }

                let source = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))?;
                let report = check_source(&path, &source, &settings);
                report.print(&source);

                if report.has_errors() {
                    std::process::exit(1);
                }
            } else if path.is_dir() {
                println!("{} Checking directory {}...\n", "🔍".blue(), path.display());

                let files = analysis::workspace::find_definition_files(&path);

                let mut checked = 0usize;
                let mut total_errors = 0usize;
                let mut total_warnings = 0usize;

                for file in &files {
                    let Ok(source) = std::fs::read_to_string(file) else {
                        continue;
                    };
                    let report = check_source(file, &source, &settings);
                    checked += 1;

                    if !report.issues.is_empty() {
                        println!("\n{} {}", "File:".bold(), file.display());
                        report.print(&source);

                        total_errors += report.error_count();
                        total_warnings += report.warning_count();
                    }
                }

                // Overall summary
                println!("\n{}", "=".repeat(60));
                println!("{} Checked {} file(s)", "Summary:".bold(), checked);
                println!("  {} error(s)", total_errors.to_string().red());
                println!("  {} warning(s)", total_warnings.to_string().yellow());

                if total_errors > 0 {
                    std::process::exit(1);
                }
            } else {
                anyhow::bail!("Path does not exist: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Extract and validate references for one document.
fn check_source(path: &Path, source: &str, settings: &Settings) -> FileReport {
    let references = analysis::extract_from_source(source);
    let issues = analysis::validate(path, &references, settings)
        .map(|validation| validation.issues)
        .unwrap_or_default();
    FileReport::new(path, issues)
}
