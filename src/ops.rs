use anyhow::{bail, Result};
use serde_json::Value;

/// One retrieval operation, carrying exactly the parameters it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// First page of a channel's uploads.
    ChannelVideos { channel_id: String },
    /// Playlist videos: initial items plus one additional page.
    PlaylistVideos { playlist_id: String },
    /// Keyword search: initial page plus `page_count` additional pages.
    SearchVideos { keywords: String, page_count: u32 },
    GetVideo { video_id: String },
    GetChannel { channel_id: String },
    GetPlaylist { playlist_id: String },
}

impl Operation {
    /// Resolve the operation and its parameters from one input record.
    /// Missing parameters fall back to the host defaults (empty string,
    /// page count 1). An absent or unrecognized operation is an error.
    pub fn from_item(item: &Value) -> Result<Self> {
        let name = str_param(item, "operation");
        match name.as_str() {
            "channel" => Ok(Self::ChannelVideos { channel_id: str_param(item, "channel_id") }),
            "playlist" => Ok(Self::PlaylistVideos { playlist_id: str_param(item, "playlist_id") }),
            "search" => Ok(Self::SearchVideos {
                keywords: str_param(item, "keywords"),
                page_count: int_param(item, "pageCount", 1),
            }),
            "get_video" => Ok(Self::GetVideo { video_id: str_param(item, "video_id") }),
            "get_channel" => Ok(Self::GetChannel { channel_id: str_param(item, "channel_id") }),
            "get_playlist" => Ok(Self::GetPlaylist { playlist_id: str_param(item, "playlist_id") }),
            "" => bail!("item has no operation"),
            other => bail!("unknown operation '{other}'"),
        }
    }

    /// Wire name, as the host enum spells it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChannelVideos { .. } => "channel",
            Self::PlaylistVideos { .. } => "playlist",
            Self::SearchVideos { .. } => "search",
            Self::GetVideo { .. } => "get_video",
            Self::GetChannel { .. } => "get_channel",
            Self::GetPlaylist { .. } => "get_playlist",
        }
    }

    /// `name: value` pairs of the resolved parameters, for error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::ChannelVideos { channel_id } | Self::GetChannel { channel_id } => {
                format!("channel_id: {channel_id}")
            }
            Self::PlaylistVideos { playlist_id } | Self::GetPlaylist { playlist_id } => {
                format!("playlist_id: {playlist_id}")
            }
            Self::SearchVideos { keywords, page_count } => {
                format!("keywords: {keywords}, pageCount: {page_count}")
            }
            Self::GetVideo { video_id } => format!("video_id: {video_id}"),
        }
    }
}

fn str_param(item: &Value, name: &str) -> String {
    item.get(name).and_then(Value::as_str).unwrap_or_default().to_string()
}

// Clamped at zero; the page count is an integer >= 0.
fn int_param(item: &Value, name: &str, default: i64) -> u32 {
    item.get(name).and_then(Value::as_i64).unwrap_or(default).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_each_operation() {
        let cases = vec![
            (
                json!({"operation": "channel", "channel_id": "UC1"}),
                Operation::ChannelVideos { channel_id: "UC1".into() },
            ),
            (
                json!({"operation": "playlist", "playlist_id": "PL1"}),
                Operation::PlaylistVideos { playlist_id: "PL1".into() },
            ),
            (
                json!({"operation": "search", "keywords": "cats", "pageCount": 3}),
                Operation::SearchVideos { keywords: "cats".into(), page_count: 3 },
            ),
            (
                json!({"operation": "get_video", "video_id": "abc"}),
                Operation::GetVideo { video_id: "abc".into() },
            ),
            (
                json!({"operation": "get_channel", "channel_id": "UC1"}),
                Operation::GetChannel { channel_id: "UC1".into() },
            ),
            (
                json!({"operation": "get_playlist", "playlist_id": "PL1"}),
                Operation::GetPlaylist { playlist_id: "PL1".into() },
            ),
        ];
        for (item, expected) in cases {
            assert_eq!(Operation::from_item(&item).unwrap(), expected);
        }
    }

    #[test]
    fn missing_parameters_fall_back_to_defaults() {
        let op = Operation::from_item(&json!({"operation": "search"})).unwrap();
        assert_eq!(op, Operation::SearchVideos { keywords: String::new(), page_count: 1 });

        let op = Operation::from_item(&json!({"operation": "get_video"})).unwrap();
        assert_eq!(op, Operation::GetVideo { video_id: String::new() });
    }

    #[test]
    fn negative_page_count_clamps_to_zero() {
        let op = Operation::from_item(&json!({"operation": "search", "keywords": "x", "pageCount": -5}))
            .unwrap();
        assert_eq!(op, Operation::SearchVideos { keywords: "x".into(), page_count: 0 });
    }

    #[test]
    fn unknown_operation_is_an_error() {
        let err = Operation::from_item(&json!({"operation": "explode"})).unwrap_err();
        assert!(err.to_string().contains("unknown operation 'explode'"));
    }

    #[test]
    fn missing_operation_is_an_error() {
        assert!(Operation::from_item(&json!({"channel_id": "UC1"})).is_err());
    }

    #[test]
    fn describe_lists_resolved_parameters() {
        let op = Operation::SearchVideos { keywords: "cats".into(), page_count: 2 };
        assert_eq!(op.describe(), "keywords: cats, pageCount: 2");
        assert_eq!(op.name(), "search");
    }
}
