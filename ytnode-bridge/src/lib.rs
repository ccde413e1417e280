//! Host bridge for the ytnode library API.
//! Exposes a thin JSON-string wrapper around YtNode suitable for embedding
//! in a workflow runtime.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use ytnode::prelude::*;

pub struct NodeBridge {
    inner: Arc<YtNode<InvidiousClient>>,
}

impl NodeBridge {
    /// Create the node. If config_path is None, use the default location.
    pub fn new(config_path: Option<String>) -> Result<Self> {
        let config = NodeConfig::load(config_path.as_deref().map(Path::new))?;
        let node = YtNode::connect(&config)?;
        Ok(Self { inner: Arc::new(node) })
    }

    /// Run a JSON array of input records through the node; returns the
    /// output records as a JSON string.
    pub async fn execute(&self, items_json: String, continue_on_fail: bool) -> Result<String> {
        let items: Vec<serde_json::Value> = serde_json::from_str(&items_json)?;
        let records = self.inner.execute(&items, continue_on_fail).await?;
        Ok(serde_json::to_string(&records)?)
    }

    /// Blocking variant for hosts without an async runtime of their own.
    pub fn execute_blocking(&self, items_json: String, continue_on_fail: bool) -> Result<String> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.execute(items_json, continue_on_fail))
    }

    pub async fn search(&self, keywords: String, pages: u32) -> Result<String> {
        self.run_one(json!({"operation": "search", "keywords": keywords, "pageCount": pages})).await
    }

    pub async fn channel_videos(&self, channel_id: String) -> Result<String> {
        self.run_one(json!({"operation": "channel", "channel_id": channel_id})).await
    }

    pub async fn playlist_videos(&self, playlist_id: String) -> Result<String> {
        self.run_one(json!({"operation": "playlist", "playlist_id": playlist_id})).await
    }

    pub async fn get_video(&self, video_id: String) -> Result<String> {
        self.run_one(json!({"operation": "get_video", "video_id": video_id})).await
    }

    pub async fn get_channel(&self, channel_id: String) -> Result<String> {
        self.run_one(json!({"operation": "get_channel", "channel_id": channel_id})).await
    }

    pub async fn get_playlist(&self, playlist_id: String) -> Result<String> {
        self.run_one(json!({"operation": "get_playlist", "playlist_id": playlist_id})).await
    }

    async fn run_one(&self, item: serde_json::Value) -> Result<String> {
        let records = self.inner.execute(std::slice::from_ref(&item), false).await?;
        Ok(serde_json::to_string(&records)?)
    }
}
