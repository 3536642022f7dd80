use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Download the export, normalize it and publish it to the spreadsheet
    Run {
        #[arg(
            long,
            help = "Print the grid to stdout instead of writing the spreadsheet"
        )]
        dry_run: bool,
    },
    /// Normalize a local export file without contacting the portal or the spreadsheet
    Normalize {
        #[arg(help = "Raw export file (Shift_JIS CSV)")]
        file: PathBuf,

        #[arg(
            long,
            help = "If specified, writes the normalized CSV to this file instead of stdout"
        )]
        output: Option<PathBuf>,
    },
}
