use anyhow::Result;
use async_trait::async_trait;

use crate::types::{Channel, Playlist, Video, VideoDetail, VideoPage};

/// Boundary to the external metadata service. All network access, response
/// parsing and pagination cursors live behind this trait; the node only
/// sequences calls and flattens results.
///
/// Resolve methods return `Ok(None)` for ids the service does not know;
/// that is not an error.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn resolve_channel(&self, channel_id: &str) -> Result<Option<Channel>>;
    async fn resolve_playlist(&self, playlist_id: &str) -> Result<Option<Playlist>>;
    async fn resolve_video(&self, video_id: &str) -> Result<Option<VideoDetail>>;

    /// First page of a keyword video search.
    async fn search_videos(&self, keywords: &str) -> Result<VideoPage>;

    /// First page of a channel's uploads.
    async fn channel_videos(&self, channel_id: &str) -> Result<VideoPage>;

    /// Initial items of a playlist.
    async fn playlist_videos(&self, playlist_id: &str) -> Result<VideoPage>;

    /// Next batch for a continuation token previously handed out by this source.
    async fn more_videos(&self, continuation: &str) -> Result<VideoPage>;
}

/// Drain up to `extra_pages` pages after `first`, in fetch order, stopping
/// early once the source reports no continuation.
pub async fn collect_videos<S: VideoSource + ?Sized>(
    source: &S,
    first: VideoPage,
    extra_pages: u32,
) -> Result<Vec<Video>> {
    let mut videos = first.items;
    let mut continuation = first.continuation;
    for _ in 0..extra_pages {
        let Some(token) = continuation else { break };
        let page = source.more_videos(&token).await?;
        videos.extend(page.items);
        continuation = page.continuation;
    }
    Ok(videos)
}
