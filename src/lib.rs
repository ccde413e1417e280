//! YouTube metadata node for workflow automation: dispatches retrieval
//! operations against a pluggable metadata source and flattens the results
//! into index-tagged JSON records.

pub mod config;
pub mod invidious;
pub mod mapping;
pub mod node;
pub mod ops;
pub mod source;
pub mod types;

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::config::NodeConfig;
    pub use crate::invidious::InvidiousClient;
    pub use crate::node::{OutputRecord, YtNode};
    pub use crate::ops::Operation;
    pub use crate::source::{collect_videos, VideoSource};
    pub use crate::types::{
        Channel, ChannelRef, Playlist, Thumbnail, Video, VideoDetail, VideoPage,
    };
}

pub use node::{OutputRecord, YtNode};
