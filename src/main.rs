mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use ytnode::config::NodeConfig;
use ytnode::node::YtNode;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = NodeConfig::load(cli.config.as_deref())?;
    let node = YtNode::connect(&config)?;

    // Every subcommand is one input record; `run` feeds a whole batch.
    let (items, continue_on_fail): (Vec<Value>, bool) = match cli.command {
        Commands::ChannelVideos { channel_id } => {
            (vec![json!({"operation": "channel", "channel_id": channel_id})], false)
        }
        Commands::PlaylistVideos { playlist_id } => {
            (vec![json!({"operation": "playlist", "playlist_id": playlist_id})], false)
        }
        Commands::Search { keywords, pages } => (
            vec![json!({"operation": "search", "keywords": keywords, "pageCount": pages})],
            false,
        ),
        Commands::Video { video_id } => {
            (vec![json!({"operation": "get_video", "video_id": video_id})], false)
        }
        Commands::Channel { channel_id } => {
            (vec![json!({"operation": "get_channel", "channel_id": channel_id})], false)
        }
        Commands::Playlist { playlist_id } => {
            (vec![json!({"operation": "get_playlist", "playlist_id": playlist_id})], false)
        }
        Commands::Run { items, continue_on_fail } => {
            let raw = std::fs::read_to_string(&items)
                .with_context(|| format!("reading items file: {}", items.display()))?;
            let parsed: Vec<Value> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing items file: {}", items.display()))?;
            (parsed, continue_on_fail)
        }
    };

    let records = node.execute(&items, continue_on_fail).await?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
