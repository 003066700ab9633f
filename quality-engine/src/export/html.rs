//! HTML exporter: a spreadsheet-like view of the matrix.
//!
//! Three sections mirror the sheets of a workbook: the matrix itself (sticky
//! header row and identity columns, colour-coded cells), a summary with the
//! legend, and the field-level detail table.

use crate::{
    errors::Result,
    export::report::{MatrixRow, QualityReport},
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

const STYLE: &str = r#"
body { font-family: sans-serif; font-size: 12px; margin: 0; }
h2 { margin: 16px 8px 8px; }
.wrap { overflow: auto; max-height: 80vh; }
table { border-collapse: collapse; }
th, td { border: 1px solid #999; padding: 2px 4px; }
thead th { position: sticky; top: 0; background: #366092; color: #fff; z-index: 2; }
th.rule { writing-mode: vertical-rl; transform: rotate(180deg); max-height: 180px; }
td.id { position: sticky; left: 0; background: #fff; z-index: 1; white-space: nowrap; }
td.c { text-align: center; min-width: 24px; }
"#;

/// Write the report as a single self-contained HTML page.
pub fn write_html(path: &Path, report: &QualityReport) -> Result<()> {
    let f = File::create(path)?;
    let mut w = BufWriter::new(f);

    writeln!(w, "<!DOCTYPE html>")?;
    writeln!(w, r#"<html lang="en"><head><meta charset="utf-8">"#)?;
    writeln!(w, "<title>Code Quality Matrix</title>")?;
    writeln!(w, "<style>{STYLE}</style></head><body>")?;

    // Matrix
    writeln!(w, "<h2>Code Quality Matrix</h2>")?;
    writeln!(w, r#"<div class="wrap"><table><thead><tr>"#)?;
    for h in ["Class Name", "Module", "Layer", "File Path", "Category"] {
        writeln!(w, "<th>{h}</th>")?;
    }
    for col in &report.rules {
        writeln!(
            w,
            r#"<th class="rule" title="{}">{}</th>"#,
            escape(&col.intent),
            escape(&col.name)
        )?;
    }
    writeln!(w, "<th>Total</th></tr></thead><tbody>")?;
    for row in &report.rows {
        write_row(&mut w, row)?;
    }
    writeln!(w, "</tbody></table></div>")?;

    // Summary + legend
    let s = &report.summary;
    writeln!(w, "<h2>Summary</h2><table>")?;
    let facts: [(&str, String); 7] = [
        ("Generated", s.generated_at.to_rfc3339()),
        ("Total classes", s.total_units.to_string()),
        ("Quality rules", s.total_rules.to_string()),
        ("Files present", s.files_present.to_string()),
        ("Files absent", s.files_absent.to_string()),
        ("Files unreadable", s.files_unreadable.to_string()),
        ("Total violations", s.total_violations.to_string()),
    ];
    for (k, v) in facts {
        writeln!(w, "<tr><th>{k}</th><td>{}</td></tr>", escape(&v))?;
    }
    writeln!(w, "</table><h2>Legend</h2><table>")?;
    for entry in &report.legend {
        let cells = s.bands.get(entry.band.key()).copied().unwrap_or(0);
        writeln!(
            w,
            r##"<tr><td class="c" style="background:#{}">{}</td><td>{}</td><td>{cells} cells</td></tr>"##,
            entry.color,
            escape(&entry.sample),
            escape(&entry.meaning)
        )?;
    }
    writeln!(w, "</table>")?;

    // Details
    writeln!(w, "<h2>Field Details</h2>")?;
    if report.details.is_empty() {
        writeln!(w, "<p>No rule reached the detail threshold.</p>")?;
    } else {
        writeln!(
            w,
            "<table><thead><tr><th>Class</th><th>Rule</th><th>Field</th><th>Type</th><th>Line</th><th>Comment</th></tr></thead><tbody>"
        )?;
        for d in &report.details {
            writeln!(
                w,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&d.unit),
                escape(&d.rule_name),
                escape(&d.field),
                escape(&d.field_type),
                d.line,
                escape(&d.comment)
            )?;
        }
        writeln!(w, "</tbody></table>")?;
    }

    writeln!(w, "</body></html>")?;
    w.flush()?;
    info!(path = %path.display(), rows = report.rows.len(), "html: matrix written");
    Ok(())
}

fn write_row<W: Write>(w: &mut W, row: &MatrixRow) -> std::io::Result<()> {
    write!(
        w,
        r#"<tr><td class="id" title="{}">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>"#,
        escape(&row.id),
        escape(&row.short_name),
        escape(&row.module),
        escape(&row.layer),
        escape(row.path.as_deref().unwrap_or("N/A")),
        escape(&row.category)
    )?;
    for cell in &row.cells {
        write!(
            w,
            r##"<td class="c" style="background:#{}">{}</td>"##,
            cell.band.color(),
            escape(&cell.text)
        )?;
    }
    writeln!(w, r#"<td class="c">{}</td></tr>"#, row.total_violations)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
