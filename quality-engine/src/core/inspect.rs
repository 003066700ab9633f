//! Content Inspector: raw text → [`FactSet`].
//!
//! All structural knowledge about the target language lives behind [`Inspector`].
//! [`TextInspector`] answers with substring and bounded-regex searches over raw text;
//! a parser-backed inspector could replace it without touching the evaluator or sinks.
//!
//! Every check is total: a missing token yields the "absent" value, never an error.
//! Tokens inside comments and string literals count as present (accepted limitation),
//! except marker lines written by the annotator, which are masked beforehand.

use crate::core::{
    fields::extract_fields,
    text::{line_of, mask_markers, occurrence_before, preview},
};
use crate::model::facts::{ConstantFact, Declaration, FactSet, LineFact, Marker, QueryBlock};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Per-unit inputs an inspector needs besides the text.
#[derive(Debug, Clone)]
pub struct InspectContext<'a> {
    pub short_name: &'a str,
    /// Filesystem fact gathered by the pipeline (a `*Test` file exists).
    pub has_test: bool,
    /// Field look-back window in characters.
    pub field_window: usize,
}

/// Extracts structural facts from file text.
pub trait Inspector: Send + Sync {
    fn inspect(&self, text: &str, ctx: &InspectContext<'_>) -> FactSet;
}

/// Regex/substring implementation of [`Inspector`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextInspector;

enum Needle {
    Literal(&'static str),
    Pattern(&'static LazyLock<Regex>),
}

macro_rules! lazy_re {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect(concat!(stringify!($name), " is valid")));
    };
}

lazy_re!(LOGGER_RE, r"Logger\s+LOGGER");
lazy_re!(EXTENDS_RE, r"\bextends\s+\w+");
lazy_re!(EXTENDS_SERVICE_RE, r"\bextends\s+\w*Service\w*");
lazy_re!(EXTENDS_INIT_BASE_RE, r"\bextends\s+CInitializerServiceBase\b");
lazy_re!(IMPLEMENTS_RE, r"\bimplements\b");
lazy_re!(INITIALIZE_RE, r"\binitialize\s*\(");
lazy_re!(SUPER_COPY_RE, r"super\.copyEntityTo\s*\(\s*target\s*,\s*options\s*\)");
lazy_re!(HAS_ATTACHMENTS_RE, r"\bimplements\b[^{]*\bIHasAttachments\b");
lazy_re!(HAS_COMMENTS_RE, r"\bimplements\b[^{]*\bIHasComments\b");
lazy_re!(
    DECLARATION_RE,
    r"(?m)^[^\n/*]*?\b(?P<kw>class|interface|enum|record)\s+(?P<name>[A-Za-z_]\w*)"
);
lazy_re!(
    QUERY_RE,
    r#"(?s)@Query\s*\(\s*(?:value\s*=\s*)?(?:(?P<triple>""")|")(?P<body>.*?)(?:"""|"\s*[,)])"#
);
lazy_re!(WILDCARD_IMPORT_RE, r"^\s*import\s+(?:static\s+)?[\w.]+\.\*\s*;");
lazy_re!(
    CONSTANT_RE,
    r"\b(?:static\s+final|final\s+static)\s+[\w<>\[\],.? ]+?\s+(?P<name>\w+)\s*="
);
lazy_re!(SCREAMING_RE, r"^[A-Z][A-Z0-9_]*$");

static MARKERS: &[(Marker, Needle)] = &[
    (Marker::EntityAnnotation, Needle::Literal("@Entity")),
    (Marker::TableAnnotation, Needle::Literal("@Table")),
    (Marker::DefaultColor, Needle::Literal("DEFAULT_COLOR")),
    (Marker::DefaultIcon, Needle::Literal("DEFAULT_ICON")),
    (Marker::EntityTitleSingular, Needle::Literal("ENTITY_TITLE_SINGULAR")),
    (Marker::EntityTitlePlural, Needle::Literal("ENTITY_TITLE_PLURAL")),
    (Marker::ViewName, Needle::Literal("VIEW_NAME")),
    (Marker::ServiceAnnotation, Needle::Literal("@Service")),
    (Marker::PreAuthorize, Needle::Literal("@PreAuthorize")),
    (Marker::PermitAll, Needle::Literal("@PermitAll")),
    (Marker::InitializeDefaults, Needle::Literal("initializeDefaults()")),
    (Marker::GetEntityClass, Needle::Literal("getEntityClass()")),
    (Marker::GetInitializerService, Needle::Literal("getInitializerService()")),
    (Marker::CreateBasicView, Needle::Literal("createBasicView")),
    (Marker::CreateGridEntity, Needle::Literal("createGridEntity")),
    (Marker::InitializeCall, Needle::Pattern(&INITIALIZE_RE)),
    (Marker::InitializeSample, Needle::Literal("initializeSample")),
    (Marker::LoggerField, Needle::Pattern(&LOGGER_RE)),
    (Marker::ExtendsClause, Needle::Pattern(&EXTENDS_RE)),
    (Marker::ExtendsService, Needle::Pattern(&EXTENDS_SERVICE_RE)),
    (Marker::ExtendsInitializerBase, Needle::Pattern(&EXTENDS_INIT_BASE_RE)),
    (Marker::ImplementsClause, Needle::Pattern(&IMPLEMENTS_RE)),
    (Marker::DocBlock, Needle::Literal("/**")),
    (Marker::CopyEntityTo, Needle::Literal("copyEntityTo")),
    (Marker::SuperCopyEntityTo, Needle::Pattern(&SUPER_COPY_RE)),
    (Marker::ImplementsHasAttachments, Needle::Pattern(&HAS_ATTACHMENTS_RE)),
    (Marker::GetAttachments, Needle::Literal("getAttachments(")),
    (Marker::SetAttachments, Needle::Literal("setAttachments(")),
    (Marker::ImplementsHasComments, Needle::Pattern(&HAS_COMMENTS_RE)),
    (Marker::GetComments, Needle::Literal("getComments(")),
    (Marker::SetComments, Needle::Literal("setComments(")),
];

/// Query previews are cut to this many characters.
const QUERY_PREVIEW_CHARS: usize = 50;

impl Inspector for TextInspector {
    fn inspect(&self, text: &str, ctx: &InspectContext<'_>) -> FactSet {
        let masked = mask_markers(text);
        let code: &str = &masked;
        let lines: Vec<&str> = code.lines().collect();

        FactSet {
            markers: find_markers(code),
            declaration: find_declaration(code, ctx.short_name),
            declares_named_interface: find_named_interface(code, ctx.short_name),
            has_default_constructor: find_default_constructor(code, ctx.short_name),
            query_blocks: find_queries(code, &lines),
            wildcard_imports: find_lines(&lines, |l| WILDCARD_IMPORT_RE.is_match(l)),
            tab_indented_lines: find_lines(&lines, |l| l.starts_with('\t')),
            bad_constants: find_constants(&lines),
            fields: extract_fields(code, ctx.field_window),
            has_test: ctx.has_test,
        }
    }
}

fn find_markers(code: &str) -> BTreeSet<Marker> {
    MARKERS
        .iter()
        .filter(|(_, needle)| match needle {
            Needle::Literal(s) => code.contains(s),
            Needle::Pattern(re) => re.is_match(code),
        })
        .map(|(m, _)| *m)
        .collect()
}

/// The declaration named like the unit wins; otherwise the first one found.
fn find_declaration(code: &str, short_name: &str) -> Option<Declaration> {
    let mut first = None;
    for cap in DECLARATION_RE.captures_iter(code) {
        let (Some(kw), Some(name)) = (cap.name("kw"), cap.name("name")) else {
            continue;
        };
        let decl = Declaration {
            keyword: kw.as_str().to_string(),
            name: name.as_str().to_string(),
            line: line_of(code, kw.start()),
        };
        if decl.name == short_name {
            return Some(decl);
        }
        if first.is_none() {
            first = Some(decl);
        }
    }
    first
}

fn find_named_interface(code: &str, short_name: &str) -> bool {
    if short_name.is_empty() {
        return false;
    }
    let pattern = format!(r"\binterface\s+{}\b", regex::escape(short_name));
    Regex::new(&pattern).is_ok_and(|re| re.is_match(code))
}

fn find_default_constructor(code: &str, short_name: &str) -> bool {
    if short_name.is_empty() {
        return false;
    }
    let pattern = format!(
        r"\b(?:public|protected)\s+{}\s*\(\s*\)",
        regex::escape(short_name)
    );
    Regex::new(&pattern).is_ok_and(|re| re.is_match(code))
}

fn find_queries(code: &str, lines: &[&str]) -> Vec<QueryBlock> {
    QUERY_RE
        .captures_iter(code)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let body = cap.name("body").map(|m| m.as_str()).unwrap_or_default();
            let line = line_of(code, whole.start());
            let upper = body.to_uppercase();
            Some(QueryBlock {
                line,
                occurrence: occurrence_before(lines, line - 1, "@Query"),
                triple_quoted: cap.name("triple").is_some(),
                preview: preview(body, QUERY_PREVIEW_CHARS),
                has_select: upper.contains("SELECT"),
                has_order_by: upper.contains("ORDER BY"),
                has_join_fetch: upper.contains("JOIN FETCH"),
                uses_entity_name: body.contains("#{#entityName}"),
            })
        })
        .collect()
}

fn find_lines<F>(lines: &[&str], pred: F) -> Vec<LineFact>
where
    F: Fn(&str) -> bool,
{
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| pred(l) && !l.trim().is_empty())
        .map(|(i, l)| line_fact(lines, i, l))
        .collect()
}

fn find_constants(lines: &[&str]) -> Vec<ConstantFact> {
    let mut out = Vec::new();
    for (i, l) in lines.iter().enumerate() {
        for cap in CONSTANT_RE.captures_iter(l) {
            let Some(name) = cap.name("name") else {
                continue;
            };
            let name = name.as_str();
            if name == "serialVersionUID" || SCREAMING_RE.is_match(name) {
                continue;
            }
            out.push(ConstantFact {
                name: name.to_string(),
                at: line_fact(lines, i, l),
            });
        }
    }
    out
}

fn line_fact(lines: &[&str], idx: usize, line: &str) -> LineFact {
    let text = line.trim().to_string();
    LineFact {
        line: idx + 1,
        occurrence: occurrence_before(lines, idx, &text),
        text,
    }
}
