//! Persistence of captured blob payloads
//!
//! Payloads are written byte-for-byte, named by the capture timestamp in UTC
//! with millisecond precision and a literal `Z` suffix
//! (`YYYY-MM-DDTHH-MM-SS-mmmZ`), followed by the blob's format tag.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use crate::error::Result;
use crate::widget::BlobWidget;

/// Filename stem for a capture instant: `2024-03-01T21-14-07-042Z`.
///
/// Derived from RFC 3339 with colons and the fractional dot replaced so the
/// name is portable across filesystems.
pub fn timestamp_name(instant: DateTime<Utc>) -> String {
    instant
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// Write a blob's payload under `dir`, named by the current UTC instant plus
/// the blob's format tag (e.g. `2024-03-01T21-14-07-042Z.fits`).
///
/// The payload is written verbatim, with no transformation or framing.
pub fn save_blob(dir: &Path, blob: &BlobWidget) -> Result<PathBuf> {
    save_blob_at(dir, blob, Utc::now())
}

/// As [`save_blob`], with the capture instant supplied by the caller.
pub fn save_blob_at(dir: &Path, blob: &BlobWidget, instant: DateTime<Utc>) -> Result<PathBuf> {
    let path = dir.join(format!("{}{}", timestamp_name(instant), blob.format));
    fs::write(&path, &blob.data)?;
    info!(
        blob = %blob.name,
        bytes = blob.size(),
        path = %path.display(),
        "blob captured"
    );
    Ok(path)
}
