//! Field-Level Violation Extractor.
//!
//! Approximates field declarations with a regular expression: an annotation-like
//! token on the previous line, an access modifier, optional modifiers, a type
//! (optionally generic, one level) and a name terminated by `=` or `;`.
//!
//! Tuned to under-report: a violation is recorded only when the marker is
//! textually absent from the look-back window. Declarations without any
//! annotation, multi-line annotations and nested generics are simply not matched.

use crate::core::text::line_of;
use crate::model::facts::{FieldRecord, FieldScan};
use regex::Regex;
use std::sync::LazyLock;

/// Marker every persisted field must carry.
pub const METADATA_MARKER: &str = "@AMetaData";

/// Any of these satisfies the validation rule for scalar fields.
pub const VALIDATION_MARKERS: [&str; 3] = ["@NotNull", "@NotBlank", "@Size"];

/// Conventional logger field name, never treated as a data field.
pub const LOGGER_FIELD: &str = "LOGGER";

static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)@\w+[^\n]*\n\s*(?P<vis>private|protected|public)\s+(?P<mods>(?:(?:static|final|transient|volatile)\s+)*)(?P<ty>\w+(?:<[^>]+>)?)\s+(?P<name>\w+)\s*[;=]",
    )
    .expect("field regex is valid")
});

/// Scan `code` for annotated field declarations lacking metadata/validation markers.
///
/// `window` is the number of characters before the match start searched for
/// markers (the window always extends to the end of the declaration).
pub fn extract_fields(code: &str, window: usize) -> FieldScan {
    let mut scan = FieldScan::default();

    for cap in FIELD_RE.captures_iter(code) {
        let (Some(whole), Some(vis), Some(ty), Some(name)) =
            (cap.get(0), cap.name("vis"), cap.name("ty"), cap.name("name"))
        else {
            continue;
        };
        let mods = cap.name("mods").map(|m| m.as_str()).unwrap_or_default();
        if mods.contains("static") || name.as_str() == LOGGER_FIELD {
            continue;
        }
        scan.fields_seen += 1;

        let start = chars_before(code, whole.start(), window);
        let section = &code[start..whole.end()];

        let record = FieldRecord {
            name: name.as_str().to_string(),
            ty: ty.as_str().to_string(),
            line: line_of(code, whole.start()),
            fragment: code[vis.start()..name.end()].to_string(),
        };

        if !section.contains(METADATA_MARKER) {
            scan.missing_metadata.push(record.clone());
        }
        if is_scalar(ty.as_str()) && !VALIDATION_MARKERS.iter().any(|m| section.contains(m)) {
            scan.missing_validation.push(record);
        }
    }

    scan
}

/// Byte offset `chars` characters before `end`, or 0 when the text is shorter.
fn chars_before(code: &str, end: usize, chars: usize) -> usize {
    if chars == 0 {
        return end;
    }
    code[..end]
        .char_indices()
        .rev()
        .nth(chars - 1)
        .map_or(0, |(i, _)| i)
}

/// String/Integer/Long-like types; generic (collection) types never qualify.
pub fn is_scalar(ty: &str) -> bool {
    !ty.contains('<') && (ty.contains("String") || ty.contains("Integer") || ty.contains("Long"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn annotated_field_without_metadata_is_reported_with_line() {
        let code = "class CFoo {\n\n    @Column(nullable = false)\n    private String name;\n}\n";
        let scan = extract_fields(code, 500);
        assert_eq!(scan.fields_seen, 1);
        assert_eq!(scan.missing_metadata.len(), 1);
        let rec = &scan.missing_metadata[0];
        assert_eq!(rec.name, "name");
        assert_eq!(rec.ty, "String");
        assert_eq!(rec.line, 3);
        assert_eq!(rec.fragment, "private String name");
        assert_eq!(scan.missing_validation.len(), 1);
    }

    #[test]
    fn marker_in_window_suppresses_violation() {
        let code = "class CFoo {\n    @AMetaData(displayName = \"Name\")\n    @NotBlank\n    private String name;\n}\n";
        let scan = extract_fields(code, 500);
        assert_eq!(scan.fields_seen, 1);
        assert!(scan.missing_metadata.is_empty());
        assert!(scan.missing_validation.is_empty());
    }

    #[test]
    fn marker_beyond_window_does_not_count() {
        let padding = "x".repeat(600);
        let code = format!(
            "class CFoo {{\n    @AMetaData\n    // {padding}\n    @Column\n    private Long amount;\n}}\n"
        );
        let scan = extract_fields(&code, 500);
        assert_eq!(scan.missing_metadata.len(), 1);
        assert_eq!(scan.missing_metadata[0].name, "amount");
    }

    #[test]
    fn window_is_measured_in_characters() {
        let near = "д".repeat(330);
        let code = format!(
            "class CFoo {{\n    @AMetaData\n    // {near}\n    @Column\n    private Long amount;\n}}\n"
        );
        assert!(code.find("@Column").unwrap() - code.find("@AMetaData").unwrap() > 500);
        let scan = extract_fields(&code, 500);
        assert_eq!(scan.fields_seen, 1);
        assert!(scan.missing_metadata.is_empty());

        let far = "д".repeat(600);
        let code = format!(
            "class CFoo {{\n    @AMetaData\n    // {far}\n    @Column\n    private Long amount;\n}}\n"
        );
        let scan = extract_fields(&code, 500);
        assert_eq!(scan.missing_metadata.len(), 1);
    }

    #[test]
    fn chars_before_clamps_to_start() {
        assert_eq!(chars_before("abc", 3, 10), 0);
        assert_eq!(chars_before("абв", 6, 1), 4);
        assert_eq!(chars_before("abc", 2, 0), 2);
    }

    #[test]
    fn static_and_logger_fields_are_excluded() {
        let code = "class CFoo {\n    @Deprecated\n    private static final String KEY = \"k\";\n    @SuppressWarnings\n    private final Logger LOGGER = null;\n}\n";
        let scan = extract_fields(code, 500);
        assert_eq!(scan.fields_seen, 0);
        assert!(scan.missing_metadata.is_empty());
    }

    #[test]
    fn collections_skip_validation_but_need_metadata() {
        let code = "class CFoo {\n    @OneToMany\n    private List<String> tags = new ArrayList<>();\n}\n";
        let scan = extract_fields(code, 500);
        assert_eq!(scan.missing_metadata.len(), 1);
        assert_eq!(scan.missing_metadata[0].ty, "List<String>");
        assert!(scan.missing_validation.is_empty());
    }

    #[test]
    fn methods_are_not_fields() {
        let code = "class CFoo {\n    @Override\n    public String getName() { return name; }\n}\n";
        let scan = extract_fields(code, 500);
        assert_eq!(scan.fields_seen, 0);
    }

    #[test]
    fn scalar_detection() {
        assert!(is_scalar("String"));
        assert!(is_scalar("Integer"));
        assert!(is_scalar("Long"));
        assert!(!is_scalar("List<String>"));
        assert!(!is_scalar("CProject"));
    }
}
