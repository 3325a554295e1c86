//! Durable topic containers.
//!
//! [`TopicStore`] maps each topic name to one JSON file under the storage
//! root holding the topic's full ordered message sequence. It provides
//! atomic whole-container load and replace; atomicity of replace comes
//! from writing a sibling temp file and renaming it over the container,
//! so a concurrent load never observes a partial write and a failed
//! store leaves the previous durable state intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{Error, Result};
use crate::model::Message;
use crate::topic::TopicName;

/// Suffix of the temp file a store writes before the atomic rename.
const TMP_SUFFIX: &str = ".tmp";

/// File-backed persistence for topic containers.
pub(crate) struct TopicStore {
    root: PathBuf,
}

impl TopicStore {
    /// Opens a store rooted at `root`, creating the directory if absent.
    pub(crate) async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| Error::Storage(format!("create storage root {}: {e}", root.display())))?;
        Ok(Self { root })
    }

    fn container_path(&self, topic: &TopicName) -> PathBuf {
        self.root.join(topic.container_file_name())
    }

    /// Loads the full message sequence for a topic.
    ///
    /// Returns `None` when no container exists — callers must distinguish
    /// "topic never used" from "topic exists". A corrupt container is a
    /// storage error, not an empty topic.
    pub(crate) async fn load(&self, topic: &TopicName) -> Result<Option<Vec<Message>>> {
        let path = self.container_path(topic);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::Storage(format!("read {}: {e}", path.display())));
            }
        };
        let messages = serde_json::from_slice(&bytes)?;
        Ok(Some(messages))
    }

    /// Durably replaces a topic's container with the given sequence.
    ///
    /// Writes to `<container>.tmp` and renames over the container. Appends
    /// to the same topic are serialized by the facade's per-topic lock, so
    /// the fixed temp name cannot collide.
    pub(crate) async fn store(&self, topic: &TopicName, messages: &[Message]) -> Result<()> {
        let path = self.container_path(topic);
        let tmp = tmp_path(&path);

        let bytes = serde_json::to_vec(messages)
            .map_err(|e| Error::Storage(format!("serialize topic '{topic}': {e}")))?;

        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| Error::Storage(format!("write {}: {e}", tmp.display())))?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            // Previous container is untouched; clean up the orphan.
            let _ = fs::remove_file(&tmp).await;
            return Err(Error::Storage(format!(
                "replace {}: {e}",
                path.display()
            )));
        }
        Ok(())
    }

    /// Lists topic names that have a persisted container, sorted ascending.
    ///
    /// Temp files and foreign files are skipped, so an in-flight store is
    /// never visible as a topic.
    pub(crate) async fn list(&self) -> Result<Vec<String>> {
        let mut dir = fs::read_dir(&self.root)
            .await
            .map_err(|e| Error::Storage(format!("list {}: {e}", self.root.display())))?;

        let mut topics = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| Error::Storage(e.to_string()))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(topic) = name.strip_suffix(".json") {
                if !topic.is_empty() {
                    topics.push(topic.to_string());
                }
            }
        }
        topics.sort();
        Ok(topics)
    }
}

fn tmp_path(container: &Path) -> PathBuf {
    let mut os = container.as_os_str().to_owned();
    os.push(TMP_SUFFIX);
    PathBuf::from(os)
}
