//! Storage sinks. Accepted records append to either a local JSONL file or
//! an Apify dataset; both are append-only, at-least-once.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use apify_client::ApifyClient;
use leadscout_common::{LeadScoutError, OutputRecord};

use crate::traits::StorageSink;

fn storage_err(e: impl std::fmt::Display) -> LeadScoutError {
    LeadScoutError::Storage(e.to_string())
}

/// One JSON object per line, flushed per record so a fatal abort keeps
/// everything emitted so far.
#[derive(Debug)]
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| storage_err(format!("cannot open output file {}: {e}", path.display())))?;
        Ok(Self { file })
    }
}

#[async_trait]
impl StorageSink for JsonlSink {
    async fn append(&mut self, record: &OutputRecord) -> Result<()> {
        let line = serde_json::to_string(record).map_err(storage_err)?;
        writeln!(self.file, "{line}").map_err(storage_err)?;
        self.file.flush().map_err(storage_err)?;
        Ok(())
    }
}

/// Pushes each record to an Apify dataset.
pub struct ApifyDatasetSink {
    client: Arc<ApifyClient>,
    dataset_id: String,
}

impl ApifyDatasetSink {
    pub fn new(client: Arc<ApifyClient>, dataset_id: String) -> Self {
        Self { client, dataset_id }
    }
}

#[async_trait]
impl StorageSink for ApifyDatasetSink {
    async fn append(&mut self, record: &OutputRecord) -> Result<()> {
        self.client
            .push_items(&self.dataset_id, std::slice::from_ref(record))
            .await
            .map_err(storage_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadscout_common::{profile_url, CompactRecord};

    fn record(handle: &str) -> OutputRecord {
        OutputRecord::Compact(CompactRecord {
            username: handle.to_string(),
            primary_hashtag: Some("travel".to_string()),
            followers: 1500,
            category: None,
            profile_url: profile_url(handle),
        })
    }

    #[tokio::test]
    async fn test_jsonl_sink_appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.jsonl");

        let mut sink = JsonlSink::create(&path).unwrap();
        sink.append(&record("a")).await.unwrap();
        sink.append(&record("b")).await.unwrap();
        drop(sink);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["username"], "a");
        assert_eq!(first["profile_url"], "https://www.instagram.com/a/");
    }

    #[test]
    fn test_unopenable_output_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        // the directory itself is not a writable file
        let err = JsonlSink::create(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LeadScoutError>(),
            Some(LeadScoutError::Storage(_))
        ));
    }
}
