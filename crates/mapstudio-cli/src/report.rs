// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Table rendering for command output.
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use mapstudio_core::adapter::Arity;
use mapstudio_core::{DescriptorRegistry, Diagnostic, ExportFailure, ImportStats, Record, Scope};

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn slot(slot: Option<usize>) -> String {
    slot.map_or_else(String::new, |s| s.to_string())
}

/// Every registered kind with its field count and reference fields.
pub fn kinds(registry: &DescriptorRegistry) -> Table {
    let mut out = table(&["kind", "tags", "fields", "references"]);
    for kind in registry.kinds() {
        let Some(descriptor) = registry.get(kind) else {
            continue;
        };
        let references: Vec<String> = descriptor
            .reference_fields()
            .map(|r| match r.arity {
                Arity::Single => format!("{} -> {}", r.record_field, r.target),
                Arity::Array(n) => format!("{}[{n}] -> {}", r.record_field, r.target),
            })
            .collect();
        out.add_row(vec![
            kind.to_string(),
            format!("{}/{}", kind.family().tag(), kind.subtype_tag()),
            descriptor.adapters().len().to_string(),
            references.join("\n"),
        ]);
    }
    out
}

/// Import counters plus the scope identity.
pub fn import_summary(scope: &Scope, stats: &ImportStats) -> Table {
    let mut out = table(&[
        "scope",
        "id",
        "records",
        "created",
        "skipped",
        "linked",
        "placeholders",
        "ambiguous",
    ]);
    out.add_row(vec![
        scope.label().to_owned(),
        scope.id().short_hex(),
        stats.records.to_string(),
        stats.created.to_string(),
        stats.skipped.to_string(),
        stats.linked.to_string(),
        stats.placeholders.to_string(),
        stats.ambiguous.to_string(),
    ]);
    out
}

/// One row per diagnostic, in discovery order.
pub fn diagnostics(items: &[Diagnostic]) -> Table {
    let mut out = table(&["severity", "referrer", "field", "slot", "message"]);
    for d in items {
        out.add_row(vec![
            format!("{:?}", d.severity).to_lowercase(),
            d.referrer.clone(),
            d.field.clone().unwrap_or_default(),
            slot(d.slot),
            d.message.clone(),
        ]);
    }
    out
}

/// One row per export failure.
pub fn failures(items: &[ExportFailure]) -> Table {
    let mut out = table(&["#", "failure"]);
    for (i, failure) in items.iter().enumerate() {
        out.add_row(vec![(i + 1).to_string(), failure.to_string()]);
    }
    out
}

/// Records whose exported form differs from the input, matched by position.
pub fn differences(before: &[Record], after: &[Record]) -> Vec<String> {
    let mut out = Vec::new();
    for (a, b) in before.iter().zip(after) {
        if a.kind != b.kind || a.name != b.name {
            out.push(format!("`{}` exported as `{}` ({})", a.name, b.name, b.kind));
            continue;
        }
        for (field, value) in &a.fields {
            if b.fields.get(field) != Some(value) {
                out.push(format!("`{}`.{field} changed", a.name));
            }
        }
    }
    if before.len() != after.len() {
        out.push(format!("{} records in, {} out", before.len(), after.len()));
    }
    out
}
