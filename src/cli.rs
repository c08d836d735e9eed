use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trickplay")]
#[command(author, version, about = "Inspect, build and fetch BIF trickplay thumbnail files")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the header and frame index of a BIF file
    Inspect {
        /// BIF file to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract the thumbnail shown at a playback position
    Extract {
        /// BIF file to read
        #[arg(required = true)]
        file: PathBuf,

        /// Playback position in milliseconds
        #[arg(short, long)]
        position: u64,

        /// Write the JPEG here instead of printing a data URI
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Download and parse a BIF file
    Fetch {
        /// URL of the BIF file
        #[arg(required = true)]
        url: String,
    },

    /// Print the server-rendered thumbnail URL for a video second
    ThumbnailUrl {
        /// Position in seconds
        #[arg(allow_negative_numbers = true)]
        second: f64,

        /// Thumbnail base URL (defaults to thumbnails.base_url from config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Build a BIF file from JPEG images, one frame per interval
    Pack {
        /// BIF file to write
        #[arg(required = true)]
        output: PathBuf,

        /// JPEG images in playback order
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Seconds between frames
        #[arg(long, default_value = "10")]
        interval: u32,
    },

    /// Display version information
    Version,
}
