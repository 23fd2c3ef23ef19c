use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "agridesk")]
#[command(about = "Terminal admin console for browsing FPO and farmer onboarding records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List FPOs from the directory
    Fpos {
        /// Number of records to skip
        #[arg(long, default_value = "0")]
        skip: usize,

        /// Maximum number of records to fetch
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show one FPO, located by id within the fetched page
    Fpo {
        /// FPO record id
        #[arg(short, long)]
        id: String,

        /// Page size to search within
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show a farmer dossier (profile, KYC, POI, POA)
    Farmer {
        /// Farmer record id
        #[arg(short, long)]
        id: String,
    },

    /// List a farmer's loan applications
    Applications {
        /// Platform farmer id
        #[arg(short, long)]
        farmer_id: String,

        /// Number of records to skip
        #[arg(long, default_value = "0")]
        skip: usize,

        /// Maximum number of records to fetch
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Launch the interactive terminal UI
    Tui,
}
