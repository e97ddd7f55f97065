// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Record-set files. `.json` is JSON; every other extension is CBOR.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mapstudio_codec::{decode_record_set, encode_record_set, RecordSet};
use mapstudio_core::schema_for;
use tracing::debug;

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Reads a record set and checks every record against its kind's schema.
pub fn load(path: &Path) -> Result<RecordSet> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let set = if is_json(path) {
        let set: RecordSet = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing JSON record set {}", path.display()))?;
        // The CBOR decoder checks schemas on the way in; JSON has to be checked here.
        for record in &set.records {
            schema_for(record.kind)
                .check(record)
                .with_context(|| format!("record `{}` ({})", record.name, record.kind))?;
        }
        set
    } else {
        decode_record_set(&bytes)
            .with_context(|| format!("decoding CBOR record set {}", path.display()))?
    };
    debug!(path = %path.display(), scope = %set.scope, records = set.records.len(), "record set loaded");
    Ok(set)
}

/// Writes a record set in the format implied by `path`.
pub fn save(path: &Path, set: &RecordSet) -> Result<()> {
    let bytes = if is_json(path) {
        let mut bytes = serde_json::to_vec_pretty(set).context("serializing JSON record set")?;
        bytes.push(b'\n');
        bytes
    } else {
        encode_record_set(set).context("encoding CBOR record set")?
    };
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), records = set.records.len(), "record set written");
    Ok(())
}
