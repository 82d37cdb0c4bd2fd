use clap::{Parser, Subcommand};
use formbook::config::{ExportConfig, STOCK_CONFIG};
use formbook::export::generate_all_round_html;
use formbook::pager::TablePage;
use formbook::snapshot::{RoundStore, Snapshot};
use formbook::types::Locale;
use serde::Serialize;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "formbook")]
#[command(about = "Static HTML exporter for grant application form definitions")]
#[command(long_about = "\
Static HTML exporter for grant application form definitions

A form snapshot is a JSON document holding the flat record collections of an
application form: funds, rounds, pages, sections, and components. formbook
flattens a round into a static, numbered 'all questions' HTML artifact per
locale, suitable for publication.

Output structure:

  output/
  └── R1/                                  # Round short name
      └── html/
          ├── cof_r1_all_questions_en.html # English artifact
          └── cof_r1_all_questions_cy.html # Welsh artifact (if configured)

Run 'formbook gen-config' to generate a documented formbook.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file
    #[arg(long, default_value = "formbook.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export one round's full question list to static HTML
    Export {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,
        /// Round id to export
        #[arg(long)]
        round: String,
        /// Override the configured output root
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the rounds in a snapshot, one page at a time
    ListRounds {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Validate a snapshot's referential integrity without writing anything
    Check {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,
    },
    /// Print a stock formbook.toml with all options documented
    GenConfig,
}

#[derive(Debug, Clone, Serialize)]
struct RoundRow {
    application_name: String,
    grant: String,
    round: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ExportConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Export {
            snapshot,
            round,
            output,
        } => {
            let store = Snapshot::load(&snapshot)?;
            let config = match output {
                Some(output_root) => ExportConfig {
                    output_root,
                    ..config
                },
                None => config,
            };
            let paths = generate_all_round_html(&store, Some(&round), &config)?;
            for path in &paths {
                println!("Generated {}", path.display());
            }
        }
        Command::ListRounds { snapshot, page } => {
            let store = Snapshot::load(&snapshot)?;
            let rows: Vec<RoundRow> = store
                .rounds()
                .into_iter()
                .map(|round| RoundRow {
                    application_name: round.title.text(Locale::En).to_string(),
                    grant: store
                        .fund(&round.fund_id)
                        .map(|f| f.title.text(Locale::En).to_string())
                        .unwrap_or_else(|| format!("<missing fund {}>", round.fund_id)),
                    round: round.short_name.clone(),
                })
                .collect();

            let table = TablePage::new(
                vec![
                    "Application name".to_string(),
                    "Grant".to_string(),
                    "Round".to_string(),
                ],
                rows,
                page,
                config.rows_per_page,
            );
            print_round_table(&table);
        }
        Command::Check { snapshot } => {
            let store = Snapshot::load(&snapshot)?;
            let errors = store.integrity_errors();
            if errors.is_empty() {
                println!("Snapshot OK: {} round(s), {} component(s)",
                    store.rounds.len(),
                    store.components.len());
            } else {
                for error in &errors {
                    eprintln!("error: {error}");
                }
                return Err(format!("{} integrity error(s)", errors.len()).into());
            }
        }
        Command::GenConfig => {
            print!("{STOCK_CONFIG}");
        }
    }

    Ok(())
}

fn print_round_table(table: &TablePage<RoundRow>) {
    println!("{}", table.table_header.join(" | "));
    for row in &table.table_rows {
        println!("{} | {} | {}", row.application_name, row.grant, row.round);
    }
    if let Some(pagination) = &table.pagination {
        let mut parts: Vec<String> = Vec::new();
        if let Some(previous) = &pagination.previous {
            parts.push(format!("prev {}", previous.href));
        }
        for item in &pagination.items {
            if item.current {
                parts.push(format!("[{}]", item.number));
            } else {
                parts.push(item.number.to_string());
            }
        }
        if let Some(next) = &pagination.next {
            parts.push(format!("next {}", next.href));
        }
        println!("{}", parts.join(" "));
    }
}
