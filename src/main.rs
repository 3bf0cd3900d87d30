//! # Pinfeed CLI
//!
//! Command-line interface for printing documents on ESC/P2 dot-matrix
//! printers.
//!
//! ## Usage
//!
//! ```bash
//! # Print a document to a USB printer
//! pinfeed print -o /dev/usb/lp0 letter.json
//!
//! # Write the byte stream to stdout
//! pinfeed print letter.json > letter.prn
//!
//! # Print only even pages from page 3, Cyrillic table
//! pinfeed print -o /dev/lp0 -c PC1251 -p 3 --even letter.json
//!
//! # Print the font sample page
//! pinfeed testpage -o /dev/lp0
//! ```
//!
//! Set `RUST_LOG=debug` to trace page and paragraph progress.

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use pinfeed::{
    PinfeedError,
    document::Document,
    engine::Engine,
    printer::{PageSelection, Parity, PrinterConfig},
    protocol::codepage::CharacterTable,
    transport::{DeviceTransport, Sink, WriteSink},
};

/// Pinfeed - print documents on ESC/P2 dot-matrix printers
#[derive(Parser, Debug)]
#[command(name = "pinfeed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a JSON document
    Print {
        /// Path to the document
        path: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        /// First page to print
        #[arg(short, long, value_name = "N", default_value = "1")]
        page: u32,

        /// Print only odd pages
        #[arg(short = 'd', long, conflicts_with = "even")]
        odd: bool,

        /// Print only even pages
        #[arg(short, long)]
        even: bool,
    },

    /// Print a test page with font samples
    Testpage {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output device (defaults to stdout)
    #[arg(short, long, value_name = "DEVICE")]
    output: Option<PathBuf>,

    /// Character table, for example PC437, PC1250 or PC1251
    #[arg(short, long, value_name = "TABLE", default_value = "PC1250")]
    character_table: String,
}

impl OutputArgs {
    fn config(&self) -> Result<PrinterConfig, PinfeedError> {
        let table: CharacterTable = self.character_table.parse()?;
        Ok(PrinterConfig::default().with_character_table(table))
    }

    fn sink(&self) -> Result<Box<dyn Sink>, PinfeedError> {
        Ok(match &self.output {
            Some(device) => Box::new(DeviceTransport::open(device)?),
            None => Box::new(WriteSink::new(io::stdout().lock())),
        })
    }
}

fn main() {
    pretty_env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PinfeedError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Print {
            path,
            output,
            page,
            odd,
            even,
        } => {
            if page == 0 {
                return Err(PinfeedError::InvalidOption(
                    "page numbers start at 1".to_string(),
                ));
            }
            let selection = PageSelection {
                first_page: page,
                parity: match (odd, even) {
                    (true, _) => Some(Parity::Odd),
                    (_, true) => Some(Parity::Even),
                    _ => None,
                },
            };

            let file = File::open(&path).map_err(|e| {
                PinfeedError::Document(format!("Failed to open {}: {}", path.display(), e))
            })?;
            let doc = Document::from_reader(BufReader::new(file))?;

            let config = output.config()?;
            let mut engine = Engine::new(output.sink()?, config).with_selection(selection);
            engine.print_document(&doc)
        }

        Commands::Testpage { output } => {
            let config = output.config()?;
            let mut engine = Engine::new(output.sink()?, config);
            engine.print_document(&Document::font_test_page())
        }
    }
}
