//! Fix suggestions and marker text.
//!
//! A marker is a single comment line:
//! `// TODO: [<rule name>] - <location>[ (<detail>)] - <fix>`.
//! Its text is fully determined by the rule and the finding, which is what makes
//! "an equivalent marker is already present" decidable.

use quality_engine::{
    core::text::MARKER_PREFIX,
    model::{outcome::Finding, rule::RuleId},
    rules::rule_by_id,
};

/// Used when a rule has no dedicated template.
pub const FALLBACK_FIX: &str = "Review and fix this quality gate violation";

/// Query details are cut to this many characters inside a fix.
const QUERY_CHARS: usize = 50;

/// Fix template for a rule. Placeholders: `{field}`, `{constant}`, `{class}`, `{query}`.
pub fn fix_template(id: RuleId) -> Option<&'static str> {
    let t = match id {
        RuleId::CPrefixNaming => "Rename class to start with 'C' prefix (e.g., CMyClass)",
        RuleId::PackageStructure => "Move class into a standard layer package (domain/service/view)",
        RuleId::EntityAnnotations => "Add @Entity, @Table, and @AttributeOverride annotations",
        RuleId::EntityConstants => "Add missing constant: {constant}",
        RuleId::ExtendsBaseClass => "Extend appropriate base class (CEntityDB, CProjectItem, etc.)",
        RuleId::MetaDataAnnotations => "Add @AMetaData annotation to field: {field}",
        RuleId::ValidationAnnotations => {
            "Add validation annotation (@NotNull, @NotBlank, @Size) to field: {field}"
        }
        RuleId::DefaultConstructor => "Add a protected no-arg constructor for JPA",
        RuleId::InitializeDefaults => "Implement initializeDefaults() method in entity",
        RuleId::RepositoryInterface => "Declare the repository as an interface extending the correct base",
        RuleId::FindByIdOverride => "Override findById with JOIN FETCH for lazy relationships",
        RuleId::QueryPatterns => "Use a triple-quoted query with #{#entityName}: {query}",
        RuleId::OrderByClause => "Add ORDER BY clause to query: {query}",
        RuleId::ServiceAnnotations => "Add @Service and @PreAuthorize annotations to class",
        RuleId::ServiceBaseClass => "Extend the appropriate service base class",
        RuleId::GetEntityClass => "Implement getEntityClass() method in service",
        RuleId::GetInitializerService => "Implement getInitializerService() method in service",
        RuleId::InitializerStructure => "Extend CInitializerServiceBase",
        RuleId::CreateBasicView => "Implement createBasicView() method in initializer",
        RuleId::CreateGridEntity => "Implement createGridEntity() method in initializer",
        RuleId::Initialize => "Implement initialize() method in initializer",
        RuleId::InitializeSample => "Implement initializeSample() method in initializer",
        RuleId::LoggerField => {
            "Add static final Logger LOGGER = LoggerFactory.getLogger({class}.class)"
        }
        RuleId::HasAttachments => "Implement IHasAttachments method: {field}",
        RuleId::HasComments => "Implement IHasComments method: {field}",
        RuleId::ConstantsNaming => "Rename constant to SCREAMING_SNAKE_CASE: {constant}",
        RuleId::UnitTests => "Create corresponding *Test class with unit tests",
        RuleId::JavaDoc => "Add JavaDoc comments to class and public methods",
        RuleId::CodeFormatting => "Indent with spaces instead of tabs",
        RuleId::ImportOrganization => "Replace wildcard import with explicit imports",
        RuleId::CallsSuperCopyEntityTo => {
            "Call super.copyEntityTo(target, options) at start of method"
        }
        _ => return None,
    };
    Some(t)
}

/// Fix text with placeholders substituted.
pub fn render_fix(id: RuleId, finding: &Finding, class_name: &str) -> String {
    let template = fix_template(id).unwrap_or(FALLBACK_FIX);
    let query: String = finding.detail.chars().take(QUERY_CHARS).collect();
    template
        .replace("{constant}", &finding.detail)
        .replace("{field}", &finding.detail)
        .replace("{class}", class_name)
        .replace("{query}", &query)
}

/// Full marker text, without indentation or line terminator.
pub fn marker_text(id: RuleId, finding: &Finding, class_name: &str) -> String {
    let name = rule_by_id(id).map(|r| r.name).unwrap_or("Quality Gate");
    let mut out = format!("{MARKER_PREFIX}{name}] - {}", finding.location);
    if !finding.detail.is_empty() {
        out.push_str(&format!(" ({})", finding.detail));
    }
    out.push_str(" - ");
    out.push_str(&render_fix(id, finding, class_name));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quality_engine::model::outcome::Anchor;

    #[test]
    fn marker_with_detail() {
        let f = Finding::new("field: name", "name", Anchor::fragment("private String name"));
        assert_eq!(
            marker_text(RuleId::MetaDataAnnotations, &f, "CFoo"),
            "// TODO: [@AMetaData Annotations] - field: name (name) - Add @AMetaData annotation to field: name"
        );
    }

    #[test]
    fn marker_without_detail_and_class_substitution() {
        let f = Finding::new("class fields", "", Anchor::Declaration);
        assert_eq!(
            marker_text(RuleId::LoggerField, &f, "CFoo"),
            "// TODO: [Logger Field] - class fields - Add static final Logger LOGGER = LoggerFactory.getLogger(CFoo.class)"
        );
    }

    #[test]
    fn query_is_truncated_in_fix_only() {
        let long = "SELECT e FROM #{#entityName} e WHERE e.project = :project AND e.x = 1";
        let f = Finding::new("query #1", long, Anchor::nth("@Query", 0));
        let text = marker_text(RuleId::OrderByClause, &f, "CFooRepository");
        assert!(text.contains(&format!("({long})")));
        let fix = text.rsplit(" - ").next().unwrap();
        assert_eq!(fix, format!("Add ORDER BY clause to query: {}", &long[..50]));
    }

    #[test]
    fn rules_without_template_fall_back() {
        assert!(fix_template(RuleId::FetchStrategy).is_none());
        let f = Finding::new("somewhere", "", Anchor::Declaration);
        assert!(render_fix(RuleId::FetchStrategy, &f, "CFoo").ends_with(FALLBACK_FIX));
    }
}
