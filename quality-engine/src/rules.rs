//! The rule catalog, in report column order.
//!
//! Loaded once (it is a `static`), never mutated. Adding a rule means adding a
//! [`RuleId`] variant, a row here and an arm in the evaluator's dispatch table;
//! the exhaustive `match` there keeps the three in sync.

use crate::model::{
    role::Role,
    rule::{Applicability, Rule, RuleId},
};

const NOT_EXCEPTION_OR_CONFIG: &[Role] = &[Role::Exception, Role::Configuration];

const fn rule(id: RuleId, name: &'static str, intent: &'static str, applies: Applicability) -> Rule {
    Rule {
        id,
        name,
        intent,
        applies,
        weight: 1,
    }
}

pub static CATALOG: &[Rule] = &[
    // Naming and structure
    rule(
        RuleId::CPrefixNaming,
        "C-Prefix Naming",
        "Class name follows C-prefix convention",
        Applicability::All,
    ),
    rule(
        RuleId::PackageStructure,
        "Package Structure",
        "Correct package structure (domain/service/view)",
        Applicability::All,
    ),
    // Entity patterns
    rule(
        RuleId::EntityAnnotations,
        "Entity Annotations",
        "Has @Entity, @Table, @AttributeOverride (for entities)",
        Applicability::Only(&[Role::Entity]),
    ),
    rule(
        RuleId::EntityConstants,
        "Entity Constants",
        "Has all 5 required constants (DEFAULT_COLOR, DEFAULT_ICON, etc.)",
        Applicability::Only(&[Role::Entity]),
    ),
    rule(
        RuleId::ExtendsBaseClass,
        "Extends Base Class",
        "Extends appropriate base class (CEntityDB, CProjectItem, etc.)",
        Applicability::AllExcept(NOT_EXCEPTION_OR_CONFIG),
    ),
    rule(
        RuleId::InterfaceImplementation,
        "Interface Implementation",
        "Implements required interfaces correctly",
        Applicability::Only(&[Role::Entity, Role::Service, Role::PageService]),
    ),
    // Field annotations and validation
    rule(
        RuleId::MetaDataAnnotations,
        "@AMetaData Annotations",
        "All fields have @AMetaData with proper attributes",
        Applicability::Only(&[Role::Entity]),
    ),
    rule(
        RuleId::ValidationAnnotations,
        "Validation Annotations",
        "Has @NotNull, @NotBlank, @Size where appropriate",
        Applicability::Only(&[Role::Entity]),
    ),
    rule(
        RuleId::ColumnAnnotations,
        "Column Annotations",
        "Proper @Column, @JoinColumn annotations",
        Applicability::Only(&[Role::Entity]),
    ),
    rule(
        RuleId::FetchStrategy,
        "Fetch Strategy",
        "Uses LAZY fetch for collections/relationships",
        Applicability::Only(&[Role::Entity]),
    ),
    // Constructors and initialization
    rule(
        RuleId::DefaultConstructor,
        "Default Constructor",
        "Has no-arg constructor for JPA",
        Applicability::Only(&[Role::Entity]),
    ),
    rule(
        RuleId::NamedConstructor,
        "Named Constructor",
        "Has constructor(name, project) for creation",
        Applicability::Only(&[Role::Entity]),
    ),
    rule(
        RuleId::InitializeDefaults,
        "initializeDefaults()",
        "Implements initializeDefaults() method",
        Applicability::Only(&[Role::Entity]),
    ),
    // Repository patterns
    rule(
        RuleId::RepositoryInterface,
        "Repository Interface",
        "Has repository interface extending correct base",
        Applicability::Only(&[Role::Repository]),
    ),
    rule(
        RuleId::FindByIdOverride,
        "findById Override",
        "Overrides findById with JOIN FETCH for lazy fields",
        Applicability::Only(&[Role::Repository]),
    ),
    rule(
        RuleId::QueryPatterns,
        "Query Patterns",
        "Uses triple-quoted queries with #{#entityName}",
        Applicability::Only(&[Role::Repository]),
    ),
    rule(
        RuleId::OrderByClause,
        "ORDER BY Clause",
        "All list queries have ORDER BY",
        Applicability::Only(&[Role::Repository]),
    ),
    // Service patterns
    rule(
        RuleId::ServiceAnnotations,
        "Service Annotations",
        "Has @Service, @PreAuthorize, @PermitAll",
        Applicability::Only(&[Role::Service]),
    ),
    rule(
        RuleId::ServiceBaseClass,
        "Service Base Class",
        "Extends appropriate service base class",
        Applicability::Only(&[Role::Service]),
    ),
    rule(
        RuleId::StatelessService,
        "Stateless Service",
        "No instance state (multi-user safe)",
        Applicability::Only(&[Role::Service]),
    ),
    rule(
        RuleId::GetEntityClass,
        "getEntityClass()",
        "Implements getEntityClass() method",
        Applicability::Only(&[Role::Service]),
    ),
    rule(
        RuleId::GetInitializerService,
        "getInitializerService()",
        "Implements getInitializerService() method",
        Applicability::Only(&[Role::Service]),
    ),
    // Initializer patterns
    rule(
        RuleId::InitializerStructure,
        "Initializer Structure",
        "Has InitializerService extending CInitializerServiceBase",
        Applicability::Only(&[Role::Initializer]),
    ),
    rule(
        RuleId::CreateBasicView,
        "createBasicView()",
        "Implements createBasicView() method",
        Applicability::Only(&[Role::Initializer]),
    ),
    rule(
        RuleId::CreateGridEntity,
        "createGridEntity()",
        "Implements createGridEntity() method",
        Applicability::Only(&[Role::Initializer]),
    ),
    rule(
        RuleId::Initialize,
        "initialize()",
        "Implements initialize() method",
        Applicability::Only(&[Role::Initializer]),
    ),
    rule(
        RuleId::InitializeSample,
        "initializeSample()",
        "Implements initializeSample() method",
        Applicability::Only(&[Role::Initializer]),
    ),
    rule(
        RuleId::DataInitializerRegistration,
        "CDataInitializer Registration",
        "Registered in CDataInitializer",
        Applicability::Only(&[Role::Initializer]),
    ),
    // Page service patterns
    rule(
        RuleId::PageService,
        "Page Service",
        "Has CPageService if needed (workflow/sprint)",
        Applicability::Only(&[Role::PageService]),
    ),
    rule(
        RuleId::PageServiceInterfaces,
        "Page Service Interfaces",
        "Implements correct page service interfaces",
        Applicability::Only(&[Role::PageService]),
    ),
    // Exception handling
    rule(
        RuleId::ExceptionPattern,
        "Exception Pattern",
        "Uses Check.notNull, proper exception handling",
        Applicability::AllExcept(NOT_EXCEPTION_OR_CONFIG),
    ),
    rule(
        RuleId::UserExceptionHandling,
        "User Exception Handling",
        "UI handlers use CNotificationService.showException",
        Applicability::Only(&[Role::View]),
    ),
    // Logging
    rule(
        RuleId::LoggerField,
        "Logger Field",
        "Has static final Logger with correct class",
        Applicability::AllExcept(NOT_EXCEPTION_OR_CONFIG),
    ),
    rule(
        RuleId::LoggingPattern,
        "Logging Pattern",
        "Follows ANSI logging format standards",
        Applicability::AllExcept(NOT_EXCEPTION_OR_CONFIG),
    ),
    rule(
        RuleId::LogLevels,
        "Log Levels",
        "Appropriate log levels (DEBUG, INFO, WARN, ERROR)",
        Applicability::AllExcept(NOT_EXCEPTION_OR_CONFIG),
    ),
    // Interface implementations
    rule(
        RuleId::HasAttachments,
        "IHasAttachments",
        "Proper getAttachments/setAttachments if applicable",
        Applicability::Only(&[Role::Entity]),
    ),
    rule(
        RuleId::HasComments,
        "IHasComments",
        "Proper getComments/setComments if applicable",
        Applicability::Only(&[Role::Entity]),
    ),
    rule(
        RuleId::HasStatusAndWorkflow,
        "IHasStatusAndWorkflow",
        "Proper workflow methods if applicable",
        Applicability::Only(&[Role::Entity]),
    ),
    // Code quality
    rule(
        RuleId::GetterSetterPattern,
        "Getter/Setter Pattern",
        "Setters call updateLastModified()",
        Applicability::Only(&[Role::Entity]),
    ),
    rule(
        RuleId::NoRawTypes,
        "No Raw Types",
        "All generic types properly parameterized",
        Applicability::All,
    ),
    rule(
        RuleId::ConstantsNaming,
        "Constants Naming",
        "Constants are static final SCREAMING_SNAKE_CASE",
        Applicability::All,
    ),
    // Testing
    rule(
        RuleId::UnitTests,
        "Unit Tests",
        "Has corresponding *Test class",
        Applicability::AllExcept(NOT_EXCEPTION_OR_CONFIG),
    ),
    rule(
        RuleId::IntegrationTests,
        "Integration Tests",
        "Has service/repository tests",
        Applicability::Only(&[Role::Service, Role::Repository]),
    ),
    rule(
        RuleId::UiTests,
        "UI Tests",
        "Has Playwright tests if has view",
        Applicability::Only(&[Role::View]),
    ),
    // Documentation
    rule(
        RuleId::JavaDoc,
        "JavaDoc",
        "Has class-level JavaDoc",
        Applicability::All,
    ),
    rule(
        RuleId::MethodDocumentation,
        "Method Documentation",
        "Complex methods documented",
        Applicability::All,
    ),
    rule(
        RuleId::ImplementationDoc,
        "Implementation Doc",
        "Has implementation markdown if complex",
        Applicability::All,
    ),
    // Security
    rule(
        RuleId::AccessControl,
        "Access Control",
        "Proper @PreAuthorize/@RolesAllowed annotations",
        Applicability::Only(&[Role::Service, Role::View]),
    ),
    rule(
        RuleId::TenantContext,
        "Tenant Context",
        "Uses session service for company/project context",
        Applicability::Only(&[Role::Service]),
    ),
    // Formatting
    rule(
        RuleId::CodeFormatting,
        "Code Formatting",
        "Follows eclipse-formatter.xml (4 spaces)",
        Applicability::All,
    ),
    rule(
        RuleId::ImportOrganization,
        "Import Organization",
        "Clean imports, no wildcards",
        Applicability::All,
    ),
    // Copy pattern
    rule(
        RuleId::CallsSuperCopyEntityTo,
        "Calls super.copyEntityTo()",
        "copyEntityTo overrides call super.copyEntityTo(target, options)",
        Applicability::Only(&[Role::Entity]),
    ),
];

/// Look a rule up by id.
pub fn rule_by_id(id: RuleId) -> Option<&'static Rule> {
    CATALOG.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_and_names_are_unique() {
        let ids: HashSet<RuleId> = CATALOG.iter().map(|r| r.id).collect();
        let names: HashSet<&str> = CATALOG.iter().map(|r| r.name).collect();
        assert_eq!(ids.len(), CATALOG.len());
        assert_eq!(names.len(), CATALOG.len());
        assert_eq!(CATALOG.len(), 52);
    }

    #[test]
    fn order_by_rule_is_repository_only() {
        let rule = rule_by_id(RuleId::OrderByClause).unwrap();
        assert!(rule.applies_to(Role::Repository));
        assert!(!rule.applies_to(Role::Entity));
        assert!(!rule.applies_to(Role::Service));
    }

    #[test]
    fn logger_rule_skips_exceptions_and_configuration() {
        let rule = rule_by_id(RuleId::LoggerField).unwrap();
        assert!(!rule.applies_to(Role::Exception));
        assert!(!rule.applies_to(Role::Configuration));
        assert!(rule.applies_to(Role::Other));
    }
}
