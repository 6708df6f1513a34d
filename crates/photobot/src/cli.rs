use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "photobot")]
#[command(author, version, about = "Telegram bot that turns one photo into a printable passport-photo collage", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Build a collage from a local file without Telegram
    Compose {
        /// Source photo
        #[arg(short, long)]
        input: PathBuf,

        /// Number of copies: 2, 4, 6 or 8
        #[arg(short, long, default_value = "4")]
        copies: String,

        /// Where to write the JPEG
        #[arg(short, long, default_value = "collage.jpg")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
