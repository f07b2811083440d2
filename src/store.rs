// src/store.rs
//! JSON persistence of the feed: a single array of records at a fixed path.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::feed::record::HighlightRecord;

/// Strict load: a missing file is an empty feed; an unreadable file or a
/// non-array top level is an error. Undecodable elements are skipped.
pub fn try_load_records(path: &Path) -> Result<Vec<HighlightRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = fs::read(path).with_context(|| format!("reading feed {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing feed {}", path.display()))?;
    let serde_json::Value::Array(items) = value else {
        return Err(anyhow!("feed {} is not a JSON array", path.display()));
    };

    // A bad element costs only itself, never the rest of the feed.
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<HighlightRecord>(item) {
            Ok(rec) => records.push(rec),
            Err(e) => tracing::warn!(
                target: "ingest",
                index,
                error = %e,
                file = %path.display(),
                "skipping undecodable feed record"
            ),
        }
    }
    Ok(records)
}

/// Best-effort load used by the pipeline: malformed state resets to empty.
pub fn load_records(path: &Path) -> Vec<HighlightRecord> {
    match try_load_records(path) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(target: "ingest", error = ?e, "persisted feed unreadable; starting empty");
            Vec::new()
        }
    }
}

/// Overwrite the feed with pretty-printed JSON (UTF-8 kept as is).
///
/// Writes to a sibling temp file first and renames it over the target.
pub fn save_records(path: &Path, records: &[HighlightRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let mut body = serde_json::to_vec_pretty(records).context("serializing feed")?;
    body.push(b'\n');

    let tmp = path.with_extension("json.tmp");
    {
        let mut f =
            fs::File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
        f.write_all(&body)
            .with_context(|| format!("writing {}", tmp.display()))?;
        f.sync_all().ok();
    }
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let v = try_load_records(&dir.path().join("nope.json")).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn object_at_top_level_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("feed.json");
        fs::write(&p, r#"{"items": []}"#).unwrap();
        assert!(try_load_records(&p).is_err());
        assert!(load_records(&p).is_empty());
    }
}
