use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI for running node operations against an Invidious instance
#[derive(Parser)]
#[command(name = "ytnode")]
#[command(about = "Fetch YouTube metadata as flat workflow records", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the first page of a channel's videos
    ChannelVideos {
        channel_id: String,
    },
    /// Load a playlist's videos (initial items plus one page)
    PlaylistVideos {
        playlist_id: String,
    },
    /// Search videos by keyword
    Search {
        keywords: String,
        /// Additional result pages to fetch after the first
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Get a single video's details
    Video {
        video_id: String,
    },
    /// Get a single channel's details
    Channel {
        channel_id: String,
    },
    /// Get a playlist's id and title
    Playlist {
        playlist_id: String,
    },
    /// Run a batch of input records from a JSON file through the node
    Run {
        /// JSON file holding an array of input records
        items: PathBuf,
        /// Downgrade per-item failures to placeholder records
        #[arg(long)]
        continue_on_fail: bool,
    },
}
