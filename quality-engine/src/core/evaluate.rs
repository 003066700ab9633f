//! Violation Evaluator: (unit, role, facts) × catalog → per-rule outcomes.
//!
//! Each [`RuleId`] maps to exactly one [`RuleCheck`] through [`check_for`]. The match
//! is exhaustive, so a new rule without a check does not compile.
//!
//! Outcome selection, in order:
//! 1. rule does not apply to the role → `NotApplicable`;
//! 2. name check → evaluated from the identifier alone, even without a file;
//! 3. no file content → `NotApplicable`;
//! 4. review check → `ReviewNeeded`;
//! 5. content check → capped count, or `ReviewNeeded` when the check cannot decide.

use crate::{
    config::model::{AuditConfig, PathConfig},
    model::{
        facts::{FactSet, FieldRecord, LineFact, Marker, QueryBlock},
        outcome::{Anchor, Finding, RuleOutcome, RuleResult, UnitEvaluation},
        role::Role,
        rule::{Rule, RuleId},
        unit::{SourceStatus, Unit},
    },
    rules::CATALOG,
};

/// Everything a check may look at.
#[derive(Debug, Clone, Copy)]
pub struct EvalInput<'a> {
    pub unit: &'a Unit,
    pub role: Role,
    pub paths: &'a PathConfig,
}

/// Result of a content check that may be undecidable from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Findings(Vec<Finding>),
    Review,
}

type NameCheck = fn(&EvalInput<'_>) -> Vec<Finding>;
type ContentCheck = fn(&EvalInput<'_>, &FactSet) -> Verdict;

/// How a rule is decided.
#[derive(Clone, Copy)]
pub enum RuleCheck {
    /// Identifier only.
    Name(NameCheck),
    /// Needs the fact set.
    Content(ContentCheck),
    /// Requires human judgement.
    Review,
}

/// Dispatch table.
pub fn check_for(id: RuleId) -> RuleCheck {
    use RuleCheck::{Content, Name, Review};
    match id {
        RuleId::CPrefixNaming => Name(c_prefix_naming),
        RuleId::PackageStructure => Name(package_structure),
        RuleId::EntityAnnotations => Content(entity_annotations),
        RuleId::EntityConstants => Content(entity_constants),
        RuleId::ExtendsBaseClass => Content(extends_base_class),
        RuleId::InterfaceImplementation => Content(interface_implementation),
        RuleId::MetaDataAnnotations => Content(metadata_annotations),
        RuleId::ValidationAnnotations => Content(validation_annotations),
        RuleId::ColumnAnnotations => Review,
        RuleId::FetchStrategy => Review,
        RuleId::DefaultConstructor => Content(default_constructor),
        RuleId::NamedConstructor => Review,
        RuleId::InitializeDefaults => Content(initialize_defaults),
        RuleId::RepositoryInterface => Content(repository_interface),
        RuleId::FindByIdOverride => Content(find_by_id_override),
        RuleId::QueryPatterns => Content(query_patterns),
        RuleId::OrderByClause => Content(order_by_clause),
        RuleId::ServiceAnnotations => Content(service_annotations),
        RuleId::ServiceBaseClass => Content(service_base_class),
        RuleId::StatelessService => Review,
        RuleId::GetEntityClass => Content(get_entity_class),
        RuleId::GetInitializerService => Content(get_initializer_service),
        RuleId::InitializerStructure => Content(initializer_structure),
        RuleId::CreateBasicView => Content(create_basic_view),
        RuleId::CreateGridEntity => Content(create_grid_entity),
        RuleId::Initialize => Content(initialize),
        RuleId::InitializeSample => Content(initialize_sample),
        RuleId::DataInitializerRegistration => Review,
        RuleId::PageService => Review,
        RuleId::PageServiceInterfaces => Review,
        RuleId::ExceptionPattern => Review,
        RuleId::UserExceptionHandling => Review,
        RuleId::LoggerField => Content(logger_field),
        RuleId::LoggingPattern => Review,
        RuleId::LogLevels => Review,
        RuleId::HasAttachments => Content(has_attachments),
        RuleId::HasComments => Content(has_comments),
        RuleId::HasStatusAndWorkflow => Review,
        RuleId::GetterSetterPattern => Review,
        RuleId::NoRawTypes => Review,
        RuleId::ConstantsNaming => Content(constants_naming),
        RuleId::UnitTests => Content(unit_tests),
        RuleId::IntegrationTests => Review,
        RuleId::UiTests => Review,
        RuleId::JavaDoc => Content(java_doc),
        RuleId::MethodDocumentation => Review,
        RuleId::ImplementationDoc => Review,
        RuleId::AccessControl => Review,
        RuleId::TenantContext => Review,
        RuleId::CodeFormatting => Content(code_formatting),
        RuleId::ImportOrganization => Content(import_organization),
        RuleId::CallsSuperCopyEntityTo => Content(calls_super_copy_entity_to),
    }
}

/// Evaluate one rule. `facts` is `None` when the unit has no readable file.
pub fn evaluate_rule(rule: &Rule, input: &EvalInput<'_>, facts: Option<&FactSet>, cap: u8) -> RuleResult {
    let (outcome, findings) = if !rule.applies_to(input.role) {
        (RuleOutcome::NotApplicable, Vec::new())
    } else {
        match (check_for(rule.id), facts) {
            (RuleCheck::Name(check), _) => counted(check(input), rule.weight, cap),
            (_, None) => (RuleOutcome::NotApplicable, Vec::new()),
            (RuleCheck::Review, Some(_)) => (RuleOutcome::ReviewNeeded, Vec::new()),
            (RuleCheck::Content(check), Some(facts)) => match check(input, facts) {
                Verdict::Findings(found) => counted(found, rule.weight, cap),
                Verdict::Review => (RuleOutcome::ReviewNeeded, Vec::new()),
            },
        }
    };
    RuleResult {
        rule: rule.id,
        outcome,
        findings,
    }
}

fn counted(findings: Vec<Finding>, weight: u8, cap: u8) -> (RuleOutcome, Vec<Finding>) {
    let raw = findings.len().saturating_mul(usize::from(weight));
    let capped = u8::try_from(raw.min(usize::from(cap))).unwrap_or(cap);
    (RuleOutcome::Count(capped), findings)
}

/// Evaluate the full catalog for one unit.
pub fn evaluate_unit(
    unit: Unit,
    role: Role,
    source: SourceStatus,
    facts: Option<FactSet>,
    cfg: &AuditConfig,
) -> UnitEvaluation {
    let input = EvalInput {
        unit: &unit,
        role,
        paths: &cfg.paths,
    };
    let results = CATALOG
        .iter()
        .map(|rule| evaluate_rule(rule, &input, facts.as_ref(), cfg.limits.count_cap))
        .collect();
    let fields = facts.map(|f| f.fields).unwrap_or_default();
    UnitEvaluation {
        unit,
        role,
        source,
        results,
        fields,
    }
}

// ---------------------------------------------------------------------------
// anchors and small helpers

/// `class CFoo` style anchor from the detected declaration; the declaration
/// fallback when the file has none.
fn class_anchor(facts: &FactSet) -> (Anchor, Option<usize>) {
    match &facts.declaration {
        Some(d) => (Anchor::fragment(format!("{} {}", d.keyword, d.name)), Some(d.line)),
        None => (Anchor::Declaration, None),
    }
}

fn class_finding(location: &str, detail: impl Into<String>, facts: &FactSet) -> Finding {
    let (anchor, line) = class_anchor(facts);
    let finding = Finding::new(location, detail, anchor);
    match line {
        Some(l) => finding.at_line(l),
        None => finding,
    }
}

fn line_finding(location: impl Into<String>, detail: impl Into<String>, at: &LineFact) -> Finding {
    Finding::new(location, detail, Anchor::nth(at.text.clone(), at.occurrence)).at_line(at.line)
}

fn field_finding(rec: &FieldRecord) -> Finding {
    Finding::new(
        format!("field: {}", rec.name),
        rec.name.clone(),
        Anchor::fragment(rec.fragment.clone()),
    )
    .at_line(rec.line)
}

/// One finding when `marker` is absent.
fn require(facts: &FactSet, marker: Marker, finding: impl FnOnce() -> Finding) -> Verdict {
    if facts.has(marker) {
        Verdict::Findings(Vec::new())
    } else {
        Verdict::Findings(vec![finding()])
    }
}

fn methods_finding(location: &str, hint: &str) -> Finding {
    Finding::new(location, "", Anchor::fragment(hint))
}

// ---------------------------------------------------------------------------
// name checks

fn c_prefix_naming(input: &EvalInput<'_>) -> Vec<Finding> {
    let mut chars = input.unit.short_name.chars();
    let ok = matches!(
        (chars.next(), chars.next()),
        (Some('C' | 'I'), Some(second)) if second.is_ascii_uppercase()
    );
    if ok {
        Vec::new()
    } else {
        vec![Finding::new("class declaration", "", Anchor::Declaration)]
    }
}

fn package_structure(input: &EvalInput<'_>) -> Vec<Finding> {
    let layer = &input.unit.layer;
    if input.paths.known_layers.iter().any(|k| k == layer) {
        Vec::new()
    } else {
        vec![Finding::new("package declaration", layer.clone(), Anchor::fragment("package "))]
    }
}

// ---------------------------------------------------------------------------
// content checks: entity

const ENTITY_CONSTANTS: [(Marker, &str); 5] = [
    (Marker::DefaultColor, "DEFAULT_COLOR"),
    (Marker::DefaultIcon, "DEFAULT_ICON"),
    (Marker::EntityTitleSingular, "ENTITY_TITLE_SINGULAR"),
    (Marker::EntityTitlePlural, "ENTITY_TITLE_PLURAL"),
    (Marker::ViewName, "VIEW_NAME"),
];

fn entity_annotations(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    let found = [
        (Marker::EntityAnnotation, "@Entity"),
        (Marker::TableAnnotation, "@Table"),
    ]
    .into_iter()
    .filter(|(m, _)| !facts.has(*m))
    .map(|(_, token)| class_finding("class declaration", token, facts))
    .collect();
    Verdict::Findings(found)
}

fn entity_constants(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    let found = ENTITY_CONSTANTS
        .into_iter()
        .filter(|(m, _)| !facts.has(*m))
        .map(|(_, name)| Finding::new("class constants", name, Anchor::fragment("public static final")))
        .collect();
    Verdict::Findings(found)
}

fn extends_base_class(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::ExtendsClause, || {
        class_finding("class declaration", "", facts)
    })
}

fn interface_implementation(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    if facts.has(Marker::ImplementsClause) {
        Verdict::Findings(Vec::new())
    } else {
        Verdict::Review
    }
}

fn metadata_annotations(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    Verdict::Findings(facts.fields.missing_metadata.iter().map(field_finding).collect())
}

fn validation_annotations(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    Verdict::Findings(facts.fields.missing_validation.iter().map(field_finding).collect())
}

fn default_constructor(input: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    if facts.has_default_constructor {
        Verdict::Findings(Vec::new())
    } else {
        Verdict::Findings(vec![class_finding(
            "constructors",
            format!("{}()", input.unit.short_name),
            facts,
        )])
    }
}

fn initialize_defaults(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::InitializeDefaults, || {
        methods_finding("entity methods", "@Override")
    })
}

fn interface_methods(facts: &FactSet, implemented: Marker, methods: [(Marker, &str); 2]) -> Verdict {
    if !facts.has(implemented) {
        return Verdict::Findings(Vec::new());
    }
    let found = methods
        .into_iter()
        .filter(|(m, _)| !facts.has(*m))
        .map(|(_, name)| class_finding("interface methods", name, facts))
        .collect();
    Verdict::Findings(found)
}

fn has_attachments(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    interface_methods(
        facts,
        Marker::ImplementsHasAttachments,
        [
            (Marker::GetAttachments, "getAttachments()"),
            (Marker::SetAttachments, "setAttachments()"),
        ],
    )
}

fn has_comments(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    interface_methods(
        facts,
        Marker::ImplementsHasComments,
        [
            (Marker::GetComments, "getComments()"),
            (Marker::SetComments, "setComments()"),
        ],
    )
}

fn calls_super_copy_entity_to(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    if facts.has(Marker::CopyEntityTo) && !facts.has(Marker::SuperCopyEntityTo) {
        Verdict::Findings(vec![methods_finding("copyEntityTo method", "void copyEntityTo")])
    } else {
        Verdict::Findings(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// content checks: repository

fn repository_interface(input: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    if facts.declares_named_interface {
        Verdict::Findings(Vec::new())
    } else {
        Verdict::Findings(vec![class_finding(
            "interface declaration",
            input.unit.short_name.clone(),
            facts,
        )])
    }
}

fn find_by_id_override(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    if facts.query_blocks.iter().any(|q| q.has_join_fetch) {
        Verdict::Findings(Vec::new())
    } else {
        Verdict::Findings(vec![methods_finding("repository methods", "@Override")])
    }
}

fn query_finding(idx: usize, q: &QueryBlock) -> Finding {
    Finding::new(
        format!("query #{}", idx + 1),
        q.preview.clone(),
        Anchor::nth("@Query", q.occurrence),
    )
    .at_line(q.line)
}

fn query_patterns(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    let found = facts
        .query_blocks
        .iter()
        .enumerate()
        .filter(|(_, q)| !q.triple_quoted || !q.uses_entity_name)
        .map(|(i, q)| query_finding(i, q))
        .collect();
    Verdict::Findings(found)
}

fn order_by_clause(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    let found = facts
        .query_blocks
        .iter()
        .enumerate()
        .filter(|(_, q)| q.triple_quoted && q.has_select && !q.has_order_by)
        .map(|(i, q)| query_finding(i, q))
        .collect();
    Verdict::Findings(found)
}

// ---------------------------------------------------------------------------
// content checks: service and initializer

fn service_annotations(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    let mut found = Vec::new();
    if !facts.has(Marker::ServiceAnnotation) {
        found.push(class_finding("class declaration", "@Service", facts));
    }
    if !facts.has(Marker::PreAuthorize) && !facts.has(Marker::PermitAll) {
        found.push(class_finding(
            "class declaration",
            "@PreAuthorize or @PermitAll",
            facts,
        ));
    }
    Verdict::Findings(found)
}

fn service_base_class(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::ExtendsService, || {
        class_finding("class declaration", "", facts)
    })
}

fn get_entity_class(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::GetEntityClass, || {
        methods_finding("service methods", "@Override")
    })
}

fn get_initializer_service(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::GetInitializerService, || {
        methods_finding("service methods", "@Override")
    })
}

fn initializer_structure(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::ExtendsInitializerBase, || {
        class_finding("class declaration", "", facts)
    })
}

fn create_basic_view(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::CreateBasicView, || {
        methods_finding("initializer methods", "private static")
    })
}

fn create_grid_entity(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::CreateGridEntity, || {
        methods_finding("initializer methods", "private static")
    })
}

fn initialize(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::InitializeCall, || {
        methods_finding("initializer methods", "public")
    })
}

fn initialize_sample(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::InitializeSample, || {
        methods_finding("initializer methods", "public")
    })
}

// ---------------------------------------------------------------------------
// content checks: cross-cutting

fn logger_field(input: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::LoggerField, || {
        Finding::new(
            "class fields",
            input.unit.short_name.clone(),
            Anchor::fragment("private static final Logger"),
        )
    })
}

fn constants_naming(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    let found = facts
        .bad_constants
        .iter()
        .map(|c| line_finding(format!("constant: {}", c.name), c.name.clone(), &c.at))
        .collect();
    Verdict::Findings(found)
}

fn unit_tests(input: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    if facts.has_test {
        return Verdict::Findings(Vec::new());
    }
    let detail = format!("{}Test.{}", input.unit.short_name, input.paths.extension);
    Verdict::Findings(vec![Finding::new("test file", detail, Anchor::Declaration)])
}

fn java_doc(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    require(facts, Marker::DocBlock, || {
        class_finding("class documentation", "", facts)
    })
}

fn code_formatting(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    let found = facts
        .tab_indented_lines
        .iter()
        .map(|l| line_finding("tab-indented line", l.text.clone(), l))
        .collect();
    Verdict::Findings(found)
}

fn import_organization(_: &EvalInput<'_>, facts: &FactSet) -> Verdict {
    let found = facts
        .wildcard_imports
        .iter()
        .map(|l| line_finding("wildcard import", l.text.clone(), l))
        .collect();
    Verdict::Findings(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        classify::classify,
        inspect::{Inspector, InspectContext, TextInspector},
        resolve::split_identifier,
    };
    use pretty_assertions::assert_eq;

    fn unit(id: &str) -> Unit {
        let (module, layer, short_name) = split_identifier(id, 2);
        Unit {
            index: 0,
            id: id.to_string(),
            module,
            layer,
            short_name,
            location: Some("/virtual/file.java".into()),
        }
    }

    fn run(id: &str, code: Option<&str>) -> UnitEvaluation {
        let cfg = AuditConfig::default();
        let u = unit(id);
        let role = classify(&u);
        let facts = code.map(|c| {
            TextInspector.inspect(
                c,
                &InspectContext {
                    short_name: &u.short_name,
                    has_test: false,
                    field_window: cfg.limits.field_window_chars,
                },
            )
        });
        let source = if code.is_some() {
            SourceStatus::Present
        } else {
            SourceStatus::Absent
        };
        evaluate_unit(u, role, source, facts, &cfg)
    }

    #[test]
    fn every_rule_has_an_outcome_in_catalog_order() {
        let eval = run("tech.derbent.foo.domain.CFoo", Some("class CFoo {}"));
        assert_eq!(eval.results.len(), CATALOG.len());
        for (r, rule) in eval.results.iter().zip(CATALOG) {
            assert_eq!(r.rule, rule.id);
        }
    }

    #[test]
    fn absent_file_keeps_name_rules_only() {
        let eval = run("tech.derbent.foo.domain.Foo", None);
        assert_eq!(eval.outcome(RuleId::CPrefixNaming), Some(RuleOutcome::Count(1)));
        assert_eq!(eval.outcome(RuleId::PackageStructure), Some(RuleOutcome::Count(0)));
        assert_eq!(eval.outcome(RuleId::EntityConstants), Some(RuleOutcome::NotApplicable));
        assert_eq!(eval.outcome(RuleId::ColumnAnnotations), Some(RuleOutcome::NotApplicable));
        assert_eq!(eval.outcome(RuleId::JavaDoc), Some(RuleOutcome::NotApplicable));
    }

    #[test]
    fn counts_are_capped() {
        let mut code = String::from("class CFoo {\n");
        for i in 0..15 {
            code.push_str(&format!("    @Column\n    private Long amount{i};\n"));
        }
        code.push_str("}\n");
        let eval = run("tech.derbent.foo.domain.CFoo", Some(&code));
        let r = eval.result(RuleId::MetaDataAnnotations).unwrap();
        assert_eq!(r.outcome, RuleOutcome::Count(10));
        assert_eq!(r.findings.len(), 15);
    }

    #[test]
    fn review_rules_need_a_file() {
        let present = run("tech.derbent.foo.domain.CFoo", Some("class CFoo {}"));
        assert_eq!(present.outcome(RuleId::FetchStrategy), Some(RuleOutcome::ReviewNeeded));
        assert_eq!(
            present.outcome(RuleId::InterfaceImplementation),
            Some(RuleOutcome::ReviewNeeded)
        );
    }

    #[test]
    fn service_rules_on_service() {
        let code = "@Service\n@PermitAll\npublic class CFooService extends CAbstractService<CFoo> {\n    @Override\n    protected Class<CFoo> getEntityClass() { return CFoo.class; }\n}\n";
        let eval = run("tech.derbent.foo.service.CFooService", Some(code));
        assert_eq!(eval.role, Role::Service);
        assert_eq!(eval.outcome(RuleId::ServiceAnnotations), Some(RuleOutcome::Count(0)));
        assert_eq!(eval.outcome(RuleId::ServiceBaseClass), Some(RuleOutcome::Count(0)));
        assert_eq!(eval.outcome(RuleId::GetEntityClass), Some(RuleOutcome::Count(0)));
        assert_eq!(eval.outcome(RuleId::GetInitializerService), Some(RuleOutcome::Count(1)));
        assert_eq!(eval.outcome(RuleId::EntityConstants), Some(RuleOutcome::NotApplicable));
    }

    #[test]
    fn copy_entity_to_without_super_call() {
        let code = "/** doc */\npublic class CFoo extends CEntityDB<CFoo> {\n    @Override\n    protected void copyEntityTo(CEntityDB<?> target, CCloneOptions options) {\n    }\n}\n";
        let eval = run("tech.derbent.foo.domain.CFoo", Some(code));
        assert_eq!(
            eval.outcome(RuleId::CallsSuperCopyEntityTo),
            Some(RuleOutcome::Count(1))
        );
        let with_super = code.replace("    }\n}", "        super.copyEntityTo(target, options);\n    }\n}");
        let eval = run("tech.derbent.foo.domain.CFoo", Some(&with_super));
        assert_eq!(
            eval.outcome(RuleId::CallsSuperCopyEntityTo),
            Some(RuleOutcome::Count(0))
        );
    }

    #[test]
    fn class_level_findings_anchor_on_declaration_text() {
        let code = "package a;\n\npublic class CFoo {\n}\n";
        let eval = run("tech.derbent.foo.domain.CFoo", Some(code));
        let r = eval.result(RuleId::EntityAnnotations).unwrap();
        assert_eq!(r.findings.len(), 2);
        assert_eq!(r.findings[0].anchor, Anchor::fragment("class CFoo"));
        assert_eq!(r.findings[0].line, Some(3));
        assert_eq!(r.findings[0].detail, "@Entity");
    }

    #[test]
    fn name_rule_rejects_lowercase_second_letter() {
        assert_eq!(
            run("tech.derbent.foo.domain.Config", None).outcome(RuleId::CPrefixNaming),
            Some(RuleOutcome::Count(1))
        );
        assert_eq!(
            run("tech.derbent.foo.domain.IHasName", None).outcome(RuleId::CPrefixNaming),
            Some(RuleOutcome::Count(0))
        );
    }

    #[test]
    fn line_findings_do_not_depend_on_line_numbers() {
        let code = "import java.util.*;\nimport jakarta.persistence.*;\n\npublic class CFoo {\n\tint weight;\n}\n";
        let shifted = format!("\n\n\n{code}");
        let a = run("tech.derbent.foo.domain.CFoo", Some(code));
        let b = run("tech.derbent.foo.domain.CFoo", Some(&shifted));

        for rule in [RuleId::ImportOrganization, RuleId::CodeFormatting] {
            let (fa, fb) = (&a.result(rule).unwrap().findings, &b.result(rule).unwrap().findings);
            assert_eq!(fa.len(), fb.len());
            for (x, y) in fa.iter().zip(fb) {
                assert_eq!((&x.location, &x.detail, &x.anchor), (&y.location, &y.detail, &y.anchor));
                assert_eq!(x.line.map(|l| l + 3), y.line);
            }
        }
        let imports = &a.result(RuleId::ImportOrganization).unwrap().findings;
        assert_eq!(imports[1].location, "wildcard import");
        assert_eq!(imports[1].detail, "import jakarta.persistence.*;");
        let tabs = &a.result(RuleId::CodeFormatting).unwrap().findings;
        assert_eq!(tabs[0].location, "tab-indented line");
        assert_eq!(tabs[0].detail, "int weight;");
    }
}
