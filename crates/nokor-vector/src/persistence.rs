//! Persistence layer for nokor-vector.
//!
//! A persisted index named `N` is an artifact triple under one directory:
//!
//! - `{N}.index.json` - vector structure (dimension, vectors, build info)
//! - `{N}.texts.json` - parallel source texts
//! - `{N}.metadata.json` - parallel metadata entries
//!
//! The three files must be read and written as a unit. Every save stamps all
//! three with the same freshly generated UUID; a load that observes two
//! different stamps (or disagreeing lengths) refuses to assemble the index.
//! Each file is written to a temporary sibling and renamed into place, so a
//! crash mid-save leaves either the old triple or a detectable mix, never a
//! silently misaligned index.

use crate::error::{Error, Result};
use crate::index::FlatIndex;
use crate::types::VectorMetadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Vector-structure blob stored on disk.
#[derive(Debug, Serialize, Deserialize)]
struct IndexArtifact {
    stamp: String,
    dimension: usize,
    count: usize,
    created_at: DateTime<Utc>,
    vectors: Vec<Vec<f32>>,
}

/// Parallel texts blob.
#[derive(Debug, Serialize, Deserialize)]
struct TextsArtifact {
    stamp: String,
    texts: Vec<String>,
}

/// Parallel metadata blob.
#[derive(Debug, Serialize, Deserialize)]
struct MetadataArtifact {
    stamp: String,
    entries: Vec<VectorMetadata>,
}

fn artifact_paths(dir: &Path, name: &str) -> [PathBuf; 3] {
    [
        dir.join(format!("{name}.index.json")),
        dir.join(format!("{name}.texts.json")),
        dir.join(format!("{name}.metadata.json")),
    ]
}

/// Save an index as a named artifact triple under `dir`.
///
/// Overwrites any previous triple with the same name. All three payloads are
/// written to temporary files first and only then renamed into place.
pub async fn save_index(dir: &Path, name: &str, index: &FlatIndex) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;

    let stamp = Uuid::new_v4().to_string();

    let index_blob = IndexArtifact {
        stamp: stamp.clone(),
        dimension: index.dimension(),
        count: index.len(),
        created_at: Utc::now(),
        vectors: index.vectors().to_vec(),
    };
    let texts_blob = TextsArtifact {
        stamp: stamp.clone(),
        texts: index.texts().to_vec(),
    };
    let metadata_blob = MetadataArtifact {
        stamp: stamp.clone(),
        entries: index.metadata().to_vec(),
    };

    let payloads = [
        serialize(&index_blob)?,
        serialize(&texts_blob)?,
        serialize(&metadata_blob)?,
    ];
    let paths = artifact_paths(dir, name);

    // Stage all three before swapping any of them in.
    let mut staged = Vec::with_capacity(3);
    for (path, payload) in paths.iter().zip(payloads) {
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, payload).await?;
        staged.push((tmp, path.clone()));
    }
    for (tmp, path) in staged {
        tokio::fs::rename(&tmp, &path).await?;
    }

    info!(name, count = index.len(), path = ?dir, "Saved index");
    Ok(())
}

/// Load a previously saved index.
///
/// Returns `Ok(None)` when any of the three expected artifacts does not
/// exist - the caller can treat that as "no index built yet". A triple that
/// is present but unparseable, stamped inconsistently, or misaligned in
/// length fails with `Error::Persistence` rather than producing an index
/// whose texts and metadata no longer line up with its vectors.
pub async fn load_index(dir: &Path, name: &str) -> Result<Option<FlatIndex>> {
    let [index_path, texts_path, metadata_path] = artifact_paths(dir, name);

    for path in [&index_path, &texts_path, &metadata_path] {
        if !path.exists() {
            debug!(name, missing = ?path, "Index artifact absent");
            return Ok(None);
        }
    }

    let index_blob: IndexArtifact = parse(&tokio::fs::read_to_string(&index_path).await?)?;
    let texts_blob: TextsArtifact = parse(&tokio::fs::read_to_string(&texts_path).await?)?;
    let metadata_blob: MetadataArtifact =
        parse(&tokio::fs::read_to_string(&metadata_path).await?)?;

    if texts_blob.stamp != index_blob.stamp || metadata_blob.stamp != index_blob.stamp {
        return Err(Error::Persistence(format!(
            "Artifact triple '{name}' carries mixed build stamps; refusing to load"
        )));
    }

    let count = index_blob.count;
    if index_blob.vectors.len() != count
        || texts_blob.texts.len() != count
        || metadata_blob.entries.len() != count
    {
        return Err(Error::Persistence(format!(
            "Artifact triple '{name}' is misaligned: expected {count} entries, \
             found {} vectors / {} texts / {} metadata",
            index_blob.vectors.len(),
            texts_blob.texts.len(),
            metadata_blob.entries.len()
        )));
    }

    if index_blob.dimension == 0 {
        return Err(Error::Persistence(format!(
            "Artifact triple '{name}' declares zero dimensions"
        )));
    }
    if let Some(v) = index_blob
        .vectors
        .iter()
        .find(|v| v.len() != index_blob.dimension)
    {
        return Err(Error::Persistence(format!(
            "Artifact triple '{name}' holds a {}-dimensional vector in a \
             {}-dimensional index",
            v.len(),
            index_blob.dimension
        )));
    }

    info!(name, count, dimension = index_blob.dimension, "Loaded index");
    Ok(Some(FlatIndex::from_parts(
        index_blob.dimension,
        index_blob.vectors,
        texts_blob.texts,
        metadata_blob.entries,
    )))
}

fn serialize<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| Error::Persistence(format!("Failed to serialize artifact: {}", e)))
}

fn parse<'a, T: Deserialize<'a>>(data: &'a str) -> Result<T> {
    serde_json::from_str(data)
        .map_err(|e| Error::Persistence(format!("Failed to parse artifact: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetadataValue;
    use tempfile::TempDir;

    fn sample_index() -> FlatIndex {
        let mut index = FlatIndex::new(3).unwrap();
        index
            .append(
                vec![1.0, 0.0, 0.0],
                "leasehold terms".to_string(),
                VectorMetadata::from_pairs([
                    ("source", MetadataValue::String("villa_leasehold".to_string())),
                    ("chunk_id", MetadataValue::Int(0)),
                ]),
            )
            .unwrap();
        index
            .append(
                vec![0.0, 1.0, 0.0],
                "strata title rules".to_string(),
                VectorMetadata::from_pairs([
                    ("source", MetadataValue::String("condo_rules".to_string())),
                    ("chunk_id", MetadataValue::Int(0)),
                ]),
            )
            .unwrap();
        index
    }

    #[tokio::test]
    async fn test_round_trip_preserves_search() {
        let dir = TempDir::new().unwrap();
        let index = sample_index();

        save_index(dir.path(), "kb", &index).await.unwrap();
        let restored = load_index(dir.path(), "kb").await.unwrap().unwrap();

        assert_eq!(restored.len(), index.len());
        assert_eq!(restored.dimension(), index.dimension());

        let query = [0.9, 0.1, 0.0];
        let before = index.search(&query, 2).unwrap();
        let after = restored.search(&query, 2).unwrap();

        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.metadata, b.metadata);
            assert_eq!(a.distance, b.distance);
        }
    }

    #[tokio::test]
    async fn test_missing_artifacts_load_as_none() {
        let dir = TempDir::new().unwrap();
        let loaded = load_index(dir.path(), "missing").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_partial_triple_loads_as_none() {
        let dir = TempDir::new().unwrap();
        save_index(dir.path(), "kb", &sample_index()).await.unwrap();

        tokio::fs::remove_file(dir.path().join("kb.texts.json"))
            .await
            .unwrap();

        let loaded = load_index(dir.path(), "kb").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_artifact_fails_loudly() {
        let dir = TempDir::new().unwrap();
        save_index(dir.path(), "kb", &sample_index()).await.unwrap();

        tokio::fs::write(dir.path().join("kb.metadata.json"), "not json")
            .await
            .unwrap();

        let result = load_index(dir.path(), "kb").await;
        assert!(matches!(result, Err(Error::Persistence(_))));
    }

    #[tokio::test]
    async fn test_mixed_stamps_fail_loudly() {
        let dir = TempDir::new().unwrap();
        save_index(dir.path(), "old", &sample_index()).await.unwrap();
        save_index(dir.path(), "new", &sample_index()).await.unwrap();

        // Simulate a crash that swapped in only one file of a newer build.
        tokio::fs::copy(
            dir.path().join("new.texts.json"),
            dir.path().join("old.texts.json"),
        )
        .await
        .unwrap();

        let result = load_index(dir.path(), "old").await;
        assert!(matches!(result, Err(Error::Persistence(_))));
    }

    #[tokio::test]
    async fn test_rerun_replaces_previous_index() {
        let dir = TempDir::new().unwrap();
        save_index(dir.path(), "kb", &sample_index()).await.unwrap();

        let mut smaller = FlatIndex::new(3).unwrap();
        smaller
            .append(vec![0.5, 0.5, 0.0], "only".to_string(), VectorMetadata::new())
            .unwrap();
        save_index(dir.path(), "kb", &smaller).await.unwrap();

        let restored = load_index(dir.path(), "kb").await.unwrap().unwrap();
        assert_eq!(restored.len(), 1);
    }
}
