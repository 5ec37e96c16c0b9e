use anyhow::Result;
use card_sheets::{PageSizeOption, SheetStatistics};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardcopy", about = "ID card copy sheet generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a copy-sheet PDF from a CSV manifest
    Generate {
        /// Input CSV manifest (columns: name, copies, front, back)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Output PDF file
        #[arg(short, long, default_value = card_sheets::DEFAULT_FILENAME)]
        output: PathBuf,

        /// Output page size
        #[arg(long, default_value = "a4", value_enum)]
        page_size: PageSizeArg,

        /// Show statistics only, don't generate the PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Print layout statistics for a manifest
    Stats {
        /// Input CSV manifest (columns: name, copies, front, back)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Output page size
        #[arg(long, default_value = "a4", value_enum)]
        page_size: PageSizeArg,

        /// Emit statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PageSizeArg {
    A4,
    A5,
}

impl From<PageSizeArg> for PageSizeOption {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::A4 => Self::A4,
            PageSizeArg::A5 => Self::A5,
        }
    }
}

fn print_statistics(stats: &SheetStatistics) {
    println!("Sheet Statistics:");
    println!("  Entries: {}", stats.entries);
    println!("  Total copies: {}", stats.total_copies);
    println!("  Image placements: {}", stats.placements);
    println!("  Cards per page: {}", stats.cards_per_page);
    println!("  Pages before duplication: {}", stats.pages);
    println!("  Output pages: {}", stats.output_pages);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            manifest,
            output,
            page_size,
            stats_only,
        } => {
            let entries = card_sheets::load_manifest(&manifest).await?;
            let stats = card_sheets::calculate_statistics(&entries, page_size.into())?;
            print_statistics(&stats);

            if stats_only {
                return Ok(());
            }

            card_sheets::generate_to_file(&entries, page_size.into(), &output).await?;
            println!(
                "Generated {} copy sheets for {} entries → {}",
                stats.output_pages,
                entries.len(),
                output.display()
            );
        }

        Commands::Stats {
            manifest,
            page_size,
            json,
        } => {
            let entries = card_sheets::load_manifest(&manifest).await?;
            let stats = card_sheets::calculate_statistics(&entries, page_size.into())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_statistics(&stats);
            }
        }
    }

    Ok(())
}
