//! JSON digest output.
//!
//! Each category's results are written to
//! `{json_output_dir}/{YYYY-MM-DD}/{category}.json`, where the date is the
//! digest's UTC generation date. A later run on the same day replaces the file.

use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

use crate::models::NewsDigest;
use crate::utils::slugify;

/// Path a digest will be written to under `json_output_dir`.
pub fn digest_path(digest: &NewsDigest, json_output_dir: &str) -> PathBuf {
    PathBuf::from(json_output_dir)
        .join(digest.generated_at.date_naive().to_string())
        .join(format!("{}.json", slugify(&digest.category)))
}

/// Serialize a [`NewsDigest`] and write it to its dated path.
///
/// # Returns
///
/// The path written, or an error if directory creation or the write fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, category = %digest.category))]
pub async fn write_digest(
    digest: &NewsDigest,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(digest)?;
    let path = digest_path(digest, json_output_dir);

    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), items = digest.items.len(), "Wrote JSON digest");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn digest(category: &str) -> NewsDigest {
        NewsDigest {
            category: category.to_string(),
            generated_at: Utc.with_ymd_and_hms(2025, 5, 6, 23, 30, 0).unwrap(),
            items: vec![],
        }
    }

    #[test]
    fn test_digest_path() {
        let path = digest_path(&digest("AI"), "/srv/json");
        assert_eq!(path, PathBuf::from("/srv/json/2025-05-06/ai.json"));
    }

    #[tokio::test]
    async fn test_write_digest_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().to_str().unwrap();

        let path = write_digest(&digest("tech"), out).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: NewsDigest = serde_json::from_str(&written).unwrap();

        assert_eq!(parsed.category, "tech");
        assert!(parsed.items.is_empty());
        assert!(path.ends_with("2025-05-06/tech.json"));
    }
}
