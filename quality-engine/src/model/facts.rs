//! Fact Set: per-unit structural facts extracted from raw text.
//!
//! Facts are ephemeral. They are recomputed on every run and never persisted.
//! Every list carries 1-based line numbers and enough anchor information for the
//! injector to find the construct again in the file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Literal or bounded-regex tokens whose presence rules check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    EntityAnnotation,
    TableAnnotation,
    DefaultColor,
    DefaultIcon,
    EntityTitleSingular,
    EntityTitlePlural,
    ViewName,
    ServiceAnnotation,
    PreAuthorize,
    PermitAll,
    InitializeDefaults,
    GetEntityClass,
    GetInitializerService,
    CreateBasicView,
    CreateGridEntity,
    InitializeCall,
    InitializeSample,
    LoggerField,
    ExtendsClause,
    ExtendsService,
    ExtendsInitializerBase,
    ImplementsClause,
    DocBlock,
    CopyEntityTo,
    SuperCopyEntityTo,
    ImplementsHasAttachments,
    GetAttachments,
    SetAttachments,
    ImplementsHasComments,
    GetComments,
    SetComments,
}

/// A flagged source line, addressable as "the n-th line containing `text`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFact {
    /// 1-based line number.
    pub line: usize,
    /// Trimmed line text.
    pub text: String,
    /// How many earlier lines also contain `text` (0 for the first).
    pub occurrence: usize,
}

/// One `@Query(...)` annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBlock {
    /// 1-based line of the `@Query` token.
    pub line: usize,
    /// Index of this `@Query` among all `@Query` lines of the file.
    pub occurrence: usize,
    /// Whether the query text is triple-quoted.
    pub triple_quoted: bool,
    /// First characters of the query, whitespace collapsed.
    pub preview: String,
    pub has_select: bool,
    pub has_order_by: bool,
    pub has_join_fetch: bool,
    pub uses_entity_name: bool,
}

/// A `static final` constant whose name is not SCREAMING_SNAKE_CASE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantFact {
    pub name: String,
    pub at: LineFact,
}

/// A field declaration flagged by the field-level extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    pub ty: String,
    /// 1-based line of the match start (the annotation preceding the field).
    pub line: usize,
    /// Literal declaration fragment (`private String name`) used as anchor.
    pub fragment: String,
}

/// Output of the field-level extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldScan {
    /// Number of non-excluded declarations matched.
    pub fields_seen: usize,
    /// Fields with no metadata marker in their window.
    pub missing_metadata: Vec<FieldRecord>,
    /// Scalar fields with no validation marker in their window.
    pub missing_validation: Vec<FieldRecord>,
}

/// Type declaration of the unit (`class CFoo`, `interface IBar`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub keyword: String,
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSet {
    pub markers: BTreeSet<Marker>,
    pub declaration: Option<Declaration>,
    /// `interface <ShortName>` is declared.
    pub declares_named_interface: bool,
    /// `public|protected <ShortName>()` is declared.
    pub has_default_constructor: bool,
    pub query_blocks: Vec<QueryBlock>,
    pub wildcard_imports: Vec<LineFact>,
    pub tab_indented_lines: Vec<LineFact>,
    pub bad_constants: Vec<ConstantFact>,
    pub fields: FieldScan,
    /// A matching `*Test` source exists.
    pub has_test: bool,
}

impl FactSet {
    pub fn has(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }
}
