//! JSONL writers for report artifacts.
//!
//! One compact JSON object per line; grep-friendly and easy to stream.

use crate::{
    errors::Result,
    export::report::{DetailRecord, QualityReport},
};
use serde::Serialize;
use serde_json::json;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

/// Write one line per unit (`matrix.jsonl`): identity plus `rule name → cell text`.
pub fn write_matrix_jsonl(path: &Path, report: &QualityReport) -> Result<()> {
    let f = File::create(path)?;
    let mut w = BufWriter::new(f);

    for row in &report.rows {
        let cells: serde_json::Map<String, serde_json::Value> = report
            .rules
            .iter()
            .zip(&row.cells)
            .map(|(col, cell)| (col.name.clone(), json!(cell.text)))
            .collect();
        let line = json!({
            "index": row.index,
            "id": row.id,
            "module": row.module,
            "layer": row.layer,
            "category": row.category,
            "source": row.source,
            "path": row.path,
            "total_violations": row.total_violations,
            "cells": cells,
        });
        serde_json::to_writer(&mut w, &line)?;
        w.write_all(b"\n")?;
    }

    w.flush()?;
    info!(path = %path.display(), rows = report.rows.len(), "jsonl: matrix written");
    Ok(())
}

/// Write field-level detail records (`details.jsonl`).
pub fn write_details_jsonl(path: &Path, details: &[DetailRecord]) -> Result<()> {
    write_records(path, details)?;
    info!(path = %path.display(), records = details.len(), "jsonl: details written");
    Ok(())
}

fn write_records<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let f = File::create(path)?;
    let mut w = BufWriter::new(f);
    for item in items {
        serde_json::to_writer(&mut w, item)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}
