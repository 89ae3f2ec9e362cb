//! Master-table persistence: a JSON-lines file, merged with dedup on the
//! scrape identity keys. The enricher does not depend on this format.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::warn;

use adpulse_common::{content_hash, AdPulseError, AdRecord};

/// Identity key for master-table dedup. Rows that never got an archive id
/// fall back to a hash of their body text so distinct ads don't collide.
fn identity_key(record: &AdRecord) -> (String, String, String) {
    let id = if record.ad_archive_id.is_empty() {
        format!("text:{:x}", content_hash(&record.text))
    } else {
        record.ad_archive_id.clone()
    };
    (id, record.page_id.clone(), record.start_date.clone())
}

/// Load the master table. A missing file is an empty table; malformed rows
/// are skipped with a warning rather than failing the load.
pub fn load_master(path: &Path) -> Result<Vec<AdRecord>, AdPulseError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| AdPulseError::Storage(format!("read {}: {e}", path.display())))?;

    let mut records = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!(line = line_no + 1, error = %e, "Skipping malformed master row"),
        }
    }
    Ok(records)
}

/// Write the master table, creating parent directories as needed.
pub fn save_master(path: &Path, records: &[AdRecord]) -> Result<(), AdPulseError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AdPulseError::Storage(format!("mkdir {}: {e}", parent.display())))?;
    }
    let mut out = String::new();
    for record in records {
        let line = serde_json::to_string(record)
            .map_err(|e| AdPulseError::Storage(format!("serialize row: {e}")))?;
        out.push_str(&line);
        out.push('\n');
    }
    fs::write(path, out)
        .map_err(|e| AdPulseError::Storage(format!("write {}: {e}", path.display())))
}

/// Append fresh rows to the master and drop duplicate identities, first
/// occurrence wins (existing master rows beat re-scraped ones).
pub fn merge_dedup(master: Vec<AdRecord>, fresh: Vec<AdRecord>) -> Vec<AdRecord> {
    let mut seen = HashSet::new();
    master
        .into_iter()
        .chain(fresh)
        .filter(|r| seen.insert(identity_key(r)))
        .collect()
}
