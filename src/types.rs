use serde::{Deserialize, Serialize};

/// One thumbnail or banner variant as reported by the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Largest variant by area; the counterpart of the upstream `thumbnails.best`.
pub fn best_thumbnail(thumbs: &[Thumbnail]) -> Option<&Thumbnail> {
    thumbs.iter().max_by_key(|t| t.width as u64 * t.height as u64)
}

/// Owning channel of a video. Either field may be missing in list results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Video summary as returned by the list operations (channel, playlist, search).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
    pub channel: Option<ChannelRef>,
    pub view_count: Option<u64>,
    pub upload_date: Option<String>,
    /// Length in seconds.
    pub duration: Option<u64>,
}

/// Full video detail for single-video lookups: adds likes and tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDetail {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
    pub channel: Option<ChannelRef>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub upload_date: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub thumbnails: Vec<Thumbnail>,
    pub url: Option<String>,
    pub banners: Vec<Thumbnail>,
    pub subscriber_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub title: String,
}

/// One batch of videos plus an opaque token for the next batch.
/// Tokens are minted and consumed by the source; the node never inspects them.
#[derive(Debug, Clone, Default)]
pub struct VideoPage {
    pub items: Vec<Video>,
    pub continuation: Option<String>,
}
