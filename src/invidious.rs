use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::NodeConfig;
use crate::source::VideoSource;
use crate::types::{Channel, ChannelRef, Playlist, Thumbnail, Video, VideoDetail, VideoPage};

/// Client for one Invidious instance (`/api/v1`). Requires no API key.
///
/// Continuation tokens handed out by this client are self-contained: they
/// encode the endpoint kind and cursor, so `more_videos` needs no other
/// state.
pub struct InvidiousClient {
    http: reqwest::Client,
    base: Url,
}

impl InvidiousClient {
    pub fn new(config: &NodeConfig) -> Result<Self> {
        let base = Url::parse(&config.instance)
            .with_context(|| format!("invalid instance URL: {}", config.instance))?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("building HTTP client")?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base.join(path).with_context(|| format!("invalid endpoint path: {path}"))
    }

    /// GET a JSON endpoint. `None` on 404 (id unknown to the instance).
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        tracing::debug!("GET {url}");
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp
            .error_for_status()
            .with_context(|| format!("request to {url} was rejected"))?;
        let body = resp
            .json::<T>()
            .await
            .with_context(|| format!("decoding response from {url}"))?;
        Ok(Some(body))
    }

    async fn search_page(&self, keywords: &str, page: u32) -> Result<VideoPage> {
        let mut url = self.endpoint("api/v1/search")?;
        url.query_pairs_mut()
            .append_pair("q", keywords)
            .append_pair("type", "video")
            .append_pair("page", &page.to_string());
        let items = self.get_json::<Vec<WireSearchItem>>(url).await?.unwrap_or_default();
        // An empty result page means the search ran dry.
        let ran_dry = items.is_empty();
        let videos: Vec<Video> = items
            .into_iter()
            .filter_map(|item| match item {
                WireSearchItem::Video(v) => Some(v.into()),
                WireSearchItem::Other => None,
            })
            .collect();
        let continuation = if ran_dry {
            None
        } else {
            Some(Continuation::Search { query: keywords.to_string(), page: page + 1 }.encode()?)
        };
        Ok(VideoPage { items: videos, continuation })
    }

    async fn playlist_page(&self, playlist_id: &str, page: u32) -> Result<VideoPage> {
        let mut url = self.endpoint(&format!("api/v1/playlists/{playlist_id}"))?;
        url.query_pairs_mut().append_pair("page", &page.to_string());
        let Some(body) = self.get_json::<WirePlaylist>(url).await? else {
            return Ok(VideoPage::default());
        };
        let items: Vec<Video> = body.videos.into_iter().map(Into::into).collect();
        let continuation = if items.is_empty() {
            None
        } else {
            Some(Continuation::Playlist { id: playlist_id.to_string(), page: page + 1 }.encode()?)
        };
        Ok(VideoPage { items, continuation })
    }

    async fn channel_videos_page(&self, channel_id: &str, token: Option<&str>) -> Result<VideoPage> {
        let mut url = self.endpoint(&format!("api/v1/channels/{channel_id}/videos"))?;
        if let Some(token) = token {
            url.query_pairs_mut().append_pair("continuation", token);
        }
        let Some(body) = self.get_json::<WireChannelVideos>(url).await? else {
            return Ok(VideoPage::default());
        };
        let continuation = match body.continuation {
            Some(token) => {
                Some(Continuation::Channel { id: channel_id.to_string(), token }.encode()?)
            }
            None => None,
        };
        Ok(VideoPage { items: body.videos.into_iter().map(Into::into).collect(), continuation })
    }
}

#[async_trait]
impl VideoSource for InvidiousClient {
    async fn resolve_channel(&self, channel_id: &str) -> Result<Option<Channel>> {
        let url = self.endpoint(&format!("api/v1/channels/{channel_id}"))?;
        Ok(self.get_json::<WireChannel>(url).await?.map(Into::into))
    }

    async fn resolve_playlist(&self, playlist_id: &str) -> Result<Option<Playlist>> {
        let url = self.endpoint(&format!("api/v1/playlists/{playlist_id}"))?;
        Ok(self
            .get_json::<WirePlaylist>(url)
            .await?
            .map(|p| Playlist { id: p.playlist_id, title: p.title }))
    }

    async fn resolve_video(&self, video_id: &str) -> Result<Option<VideoDetail>> {
        let url = self.endpoint(&format!("api/v1/videos/{video_id}"))?;
        Ok(self.get_json::<WireVideoDetail>(url).await?.map(Into::into))
    }

    async fn search_videos(&self, keywords: &str) -> Result<VideoPage> {
        self.search_page(keywords, 1).await
    }

    async fn channel_videos(&self, channel_id: &str) -> Result<VideoPage> {
        self.channel_videos_page(channel_id, None).await
    }

    async fn playlist_videos(&self, playlist_id: &str) -> Result<VideoPage> {
        self.playlist_page(playlist_id, 1).await
    }

    async fn more_videos(&self, continuation: &str) -> Result<VideoPage> {
        match Continuation::decode(continuation)? {
            Continuation::Search { query, page } => self.search_page(&query, page).await,
            Continuation::Playlist { id, page } => self.playlist_page(&id, page).await,
            Continuation::Channel { id, token } => {
                self.channel_videos_page(&id, Some(&token)).await
            }
        }
    }
}

/// Self-contained continuation token, serialized to JSON and treated as an
/// opaque string by callers.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Continuation {
    Search { query: String, page: u32 },
    Playlist { id: String, page: u32 },
    Channel { id: String, token: String },
}

impl Continuation {
    fn encode(&self) -> Result<String> {
        serde_json::to_string(self).context("encoding continuation token")
    }

    fn decode(token: &str) -> Result<Self> {
        serde_json::from_str(token).context("malformed continuation token")
    }
}

// --- Invidious wire shapes ---

#[derive(Debug, Deserialize)]
struct WireThumbnail {
    url: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

impl From<WireThumbnail> for Thumbnail {
    fn from(t: WireThumbnail) -> Self {
        Thumbnail { url: t.url, width: t.width, height: t.height }
    }
}

fn thumbnails(wire: Vec<WireThumbnail>) -> Vec<Thumbnail> {
    wire.into_iter().map(Into::into).collect()
}

fn channel_ref(id: Option<String>, name: Option<String>) -> Option<ChannelRef> {
    if id.is_none() && name.is_none() {
        None
    } else {
        Some(ChannelRef { id, name })
    }
}

/// Video entry as it appears in search results, channel uploads and
/// playlists. Playlist entries omit most counters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVideo {
    video_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    video_thumbnails: Vec<WireThumbnail>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    author_id: Option<String>,
    #[serde(default)]
    view_count: Option<u64>,
    #[serde(default)]
    published_text: Option<String>,
    #[serde(default)]
    length_seconds: Option<u64>,
}

impl From<WireVideo> for Video {
    fn from(v: WireVideo) -> Self {
        Video {
            id: v.video_id,
            title: v.title,
            description: v.description,
            thumbnails: thumbnails(v.video_thumbnails),
            channel: channel_ref(v.author_id, v.author),
            view_count: v.view_count,
            upload_date: v.published_text,
            duration: v.length_seconds,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVideoDetail {
    video_id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    video_thumbnails: Vec<WireThumbnail>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    author_id: Option<String>,
    #[serde(default)]
    view_count: Option<u64>,
    #[serde(default)]
    like_count: Option<u64>,
    #[serde(default)]
    published_text: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
}

impl From<WireVideoDetail> for VideoDetail {
    fn from(v: WireVideoDetail) -> Self {
        VideoDetail {
            id: v.video_id,
            title: v.title,
            description: v.description,
            thumbnails: thumbnails(v.video_thumbnails),
            channel: channel_ref(v.author_id, v.author),
            view_count: v.view_count,
            like_count: v.like_count,
            upload_date: v.published_text,
            tags: v.keywords,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireChannel {
    author_id: String,
    author: String,
    #[serde(default)]
    author_thumbnails: Vec<WireThumbnail>,
    #[serde(default)]
    author_url: Option<String>,
    #[serde(default)]
    author_banners: Vec<WireThumbnail>,
    #[serde(default)]
    sub_count: Option<u64>,
}

impl From<WireChannel> for Channel {
    fn from(c: WireChannel) -> Self {
        Channel {
            id: c.author_id,
            name: c.author,
            thumbnails: thumbnails(c.author_thumbnails),
            url: c.author_url,
            banners: thumbnails(c.author_banners),
            subscriber_count: c.sub_count,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePlaylist {
    playlist_id: String,
    title: String,
    #[serde(default)]
    videos: Vec<WireVideo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireChannelVideos {
    #[serde(default)]
    videos: Vec<WireVideo>,
    #[serde(default)]
    continuation: Option<String>,
}

/// Search results mix videos, channels and playlists; only videos are kept.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum WireSearchItem {
    Video(WireVideo),
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> InvidiousClient {
        InvidiousClient::new(&NodeConfig::default()).unwrap()
    }

    #[test]
    fn endpoint_joins_against_the_instance() {
        let url = client().endpoint("api/v1/videos/abc").unwrap();
        assert!(url.as_str().ends_with("/api/v1/videos/abc"));
    }

    #[test]
    fn continuation_round_trips() {
        for token in [
            Continuation::Search { query: "cats: the movie".into(), page: 3 },
            Continuation::Playlist { id: "PL1".into(), page: 2 },
            Continuation::Channel { id: "UC1".into(), token: "opaque==".into() },
        ] {
            let encoded = token.encode().unwrap();
            assert_eq!(Continuation::decode(&encoded).unwrap(), token);
        }
        assert!(Continuation::decode("not json").is_err());
    }

    #[test]
    fn decodes_a_video_detail() {
        let raw = r#"{
            "videoId": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "description": "classic",
            "videoThumbnails": [
                {"quality": "default", "url": "https://i/img.jpg", "width": 120, "height": 90},
                {"quality": "maxres", "url": "https://i/max.jpg", "width": 1280, "height": 720}
            ],
            "author": "Rick Astley",
            "authorId": "UCuAXFkgsw1L7xaCfnd5JJOw",
            "viewCount": 1400000000,
            "likeCount": 16000000,
            "publishedText": "14 years ago",
            "keywords": ["rick", "astley"],
            "lengthSeconds": 212
        }"#;
        let detail: VideoDetail = serde_json::from_str::<WireVideoDetail>(raw).unwrap().into();
        assert_eq!(detail.id, "dQw4w9WgXcQ");
        assert_eq!(detail.like_count, Some(16_000_000));
        assert_eq!(detail.tags, vec!["rick", "astley"]);
        assert_eq!(detail.channel.as_ref().and_then(|c| c.name.as_deref()), Some("Rick Astley"));
        assert_eq!(crate::types::best_thumbnail(&detail.thumbnails).map(|t| t.url.as_str()),
            Some("https://i/max.jpg"));
    }

    #[test]
    fn decodes_a_channel() {
        let raw = r#"{
            "author": "Rick Astley",
            "authorId": "UCuAXFkgsw1L7xaCfnd5JJOw",
            "authorUrl": "/channel/UCuAXFkgsw1L7xaCfnd5JJOw",
            "authorBanners": [{"url": "https://i/banner.jpg", "width": 2560, "height": 424}],
            "authorThumbnails": [{"url": "https://i/avatar.jpg", "width": 176, "height": 176}],
            "subCount": 4000000
        }"#;
        let channel: Channel = serde_json::from_str::<WireChannel>(raw).unwrap().into();
        assert_eq!(channel.name, "Rick Astley");
        assert_eq!(channel.subscriber_count, Some(4_000_000));
        assert_eq!(channel.banners.len(), 1);
    }

    #[test]
    fn search_results_keep_videos_only() {
        let raw = r#"[
            {"type": "video", "videoId": "a", "title": "A", "viewCount": 1},
            {"type": "channel", "author": "someone", "authorId": "UC9"},
            {"type": "playlist", "playlistId": "PL9", "title": "Mix"},
            {"type": "video", "videoId": "b", "title": "B"}
        ]"#;
        let items: Vec<WireSearchItem> = serde_json::from_str(raw).unwrap();
        let ids: Vec<String> = items
            .into_iter()
            .filter_map(|i| match i {
                WireSearchItem::Video(v) => Some(v.video_id),
                WireSearchItem::Other => None,
            })
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn playlist_entries_tolerate_missing_counters() {
        let raw = r#"{
            "playlistId": "PL1",
            "title": "Mix",
            "videos": [{"videoId": "a", "title": "A", "lengthSeconds": 10, "index": 0}]
        }"#;
        let playlist: WirePlaylist = serde_json::from_str(raw).unwrap();
        let video: Video = playlist.videos.into_iter().next().map(Into::into).unwrap();
        assert_eq!(video.id, "a");
        assert_eq!(video.duration, Some(10));
        assert!(video.view_count.is_none());
    }

    #[test]
    fn channel_videos_carry_the_upstream_continuation() {
        let raw = r#"{
            "videos": [{"videoId": "a", "title": "A"}],
            "continuation": "tok"
        }"#;
        let body: WireChannelVideos = serde_json::from_str(raw).unwrap();
        assert_eq!(body.continuation.as_deref(), Some("tok"));
        assert_eq!(body.videos.len(), 1);
    }

    #[test]
    fn rejects_a_bad_instance_url() {
        let config = NodeConfig { instance: "not a url".into(), ..NodeConfig::default() };
        assert!(InvidiousClient::new(&config).is_err());
    }
}
