use serde_json::{json, Value};

use crate::types::{best_thumbnail, Channel, ChannelRef, Playlist, Thumbnail, Video, VideoDetail};

fn best_url(thumbs: &[Thumbnail]) -> Option<&str> {
    best_thumbnail(thumbs).map(|t| t.url.as_str())
}

fn channel_ref(c: &Option<ChannelRef>) -> Value {
    json!({
        "id": c.as_ref().and_then(|c| c.id.as_deref()),
        "name": c.as_ref().and_then(|c| c.name.as_deref()),
    })
}

/// Summary shape shared by the three list operations.
pub fn video_record(v: &Video) -> Value {
    json!({
        "id": v.id,
        "title": v.title,
        "description": v.description,
        "thumbnail": best_url(&v.thumbnails),
        "channel": channel_ref(&v.channel),
        "viewCount": v.view_count,
        "uploadDate": v.upload_date,
        "duration": v.duration,
    })
}

/// Single-video shape: like count and tags, no duration.
pub fn video_detail_record(v: &VideoDetail) -> Value {
    json!({
        "id": v.id,
        "title": v.title,
        "description": v.description,
        "thumbnail": best_url(&v.thumbnails),
        "channel": channel_ref(&v.channel),
        "viewCount": v.view_count,
        "likeCount": v.like_count,
        "uploadDate": v.upload_date,
        "tags": v.tags,
    })
}

pub fn channel_record(c: &Channel) -> Value {
    json!({
        "id": c.id,
        "name": c.name,
        "thumbnail": best_url(&c.thumbnails),
        "url": c.url,
        "banner": best_url(&c.banners),
        "subscriberCount": c.subscriber_count,
    })
}

/// Playlist stub: identifier and title only.
pub fn playlist_record(p: &Playlist) -> Value {
    json!({ "id": p.id, "title": p.title })
}
