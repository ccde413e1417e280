use anyhow::Result;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::NodeConfig;
use crate::invidious::InvidiousClient;
use crate::mapping::{channel_record, playlist_record, video_detail_record, video_record};
use crate::ops::Operation;
use crate::source::{collect_videos, VideoSource};

/// One flattened result, tagged with the input item it came from.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    pub json: Value,
    #[serde(rename = "pairedItem")]
    pub paired_item: usize,
    /// Set on placeholder records emitted for failed items in continue mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OutputRecord {
    fn new(json: Value, paired_item: usize) -> Self {
        Self { json, paired_item, error: None }
    }

    fn failure(description: String, paired_item: usize) -> Self {
        Self { json: json!({ "error": &description }), paired_item, error: Some(description) }
    }
}

/// The node. Owns one source handle for the whole run and processes items
/// strictly in index order, one source call in flight at a time.
pub struct YtNode<S> {
    source: S,
}

impl YtNode<InvidiousClient> {
    /// Node backed by the configured Invidious instance.
    pub fn connect(config: &NodeConfig) -> Result<Self> {
        Ok(Self::with_source(InvidiousClient::new(config)?))
    }
}

impl<S: VideoSource> YtNode<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Process `items` in order and return the flattened records.
    ///
    /// With `continue_on_fail`, a failing item is downgraded to one
    /// placeholder record carrying the error description and the run goes
    /// on; otherwise the first failure aborts the run with an error
    /// annotated with the item index, operation and parameters.
    pub async fn execute(&self, items: &[Value], continue_on_fail: bool) -> Result<Vec<OutputRecord>> {
        let mut records = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match self.run_item(index, item).await {
                Ok(mut out) => records.append(&mut out),
                Err(err) => {
                    let detail = match Operation::from_item(item) {
                        Ok(op) => {
                            format!("operation '{}' with parameters [{}]", op.name(), op.describe())
                        }
                        Err(_) => "unresolvable operation".to_string(),
                    };
                    if continue_on_fail {
                        let description = format!("{detail}: {err:#}");
                        tracing::warn!(item = index, "{description}");
                        records.push(OutputRecord::failure(description, index));
                    } else {
                        return Err(err.context(format!("item {index}: {detail}")));
                    }
                }
            }
        }
        Ok(records)
    }

    async fn run_item(&self, index: usize, item: &Value) -> Result<Vec<OutputRecord>> {
        let mut out = Vec::new();
        match Operation::from_item(item)? {
            Operation::ChannelVideos { channel_id } => {
                let Some(channel) = self.source.resolve_channel(&channel_id).await? else {
                    return Ok(out);
                };
                // first page only
                let page = self.source.channel_videos(&channel.id).await?;
                out.extend(page.items.iter().map(|v| OutputRecord::new(video_record(v), index)));
            }
            Operation::PlaylistVideos { playlist_id } => {
                let Some(playlist) = self.source.resolve_playlist(&playlist_id).await? else {
                    return Ok(out);
                };
                let first = self.source.playlist_videos(&playlist.id).await?;
                let videos = collect_videos(&self.source, first, 1).await?;
                out.extend(videos.iter().map(|v| OutputRecord::new(video_record(v), index)));
            }
            Operation::SearchVideos { keywords, page_count } => {
                let first = self.source.search_videos(&keywords).await?;
                let videos = collect_videos(&self.source, first, page_count).await?;
                out.extend(videos.iter().map(|v| OutputRecord::new(video_record(v), index)));
            }
            Operation::GetVideo { video_id } => {
                if let Some(video) = self.source.resolve_video(&video_id).await? {
                    out.push(OutputRecord::new(video_detail_record(&video), index));
                }
            }
            Operation::GetChannel { channel_id } => {
                if let Some(channel) = self.source.resolve_channel(&channel_id).await? {
                    out.push(OutputRecord::new(channel_record(&channel), index));
                }
            }
            Operation::GetPlaylist { playlist_id } => {
                if let Some(playlist) = self.source.resolve_playlist(&playlist_id).await? {
                    out.push(OutputRecord::new(playlist_record(&playlist), index));
                }
            }
        }
        Ok(out)
    }
}
