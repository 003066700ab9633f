//! Rule identity and applicability.
//!
//! A rule is static data: a stable [`RuleId`], a display name, an intent string and
//! the set of roles it applies to. How a rule is evaluated is selected from
//! [`RuleId`] by the evaluator's dispatch table, never by comparing names.

use crate::model::role::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    CPrefixNaming,
    PackageStructure,
    EntityAnnotations,
    EntityConstants,
    ExtendsBaseClass,
    InterfaceImplementation,
    MetaDataAnnotations,
    ValidationAnnotations,
    ColumnAnnotations,
    FetchStrategy,
    DefaultConstructor,
    NamedConstructor,
    InitializeDefaults,
    RepositoryInterface,
    FindByIdOverride,
    QueryPatterns,
    OrderByClause,
    ServiceAnnotations,
    ServiceBaseClass,
    StatelessService,
    GetEntityClass,
    GetInitializerService,
    InitializerStructure,
    CreateBasicView,
    CreateGridEntity,
    Initialize,
    InitializeSample,
    DataInitializerRegistration,
    PageService,
    PageServiceInterfaces,
    ExceptionPattern,
    UserExceptionHandling,
    LoggerField,
    LoggingPattern,
    LogLevels,
    HasAttachments,
    HasComments,
    HasStatusAndWorkflow,
    GetterSetterPattern,
    NoRawTypes,
    ConstantsNaming,
    UnitTests,
    IntegrationTests,
    UiTests,
    JavaDoc,
    MethodDocumentation,
    ImplementationDoc,
    AccessControl,
    TenantContext,
    CodeFormatting,
    ImportOrganization,
    CallsSuperCopyEntityTo,
}

/// Which roles a rule is evaluated for.
#[derive(Debug, Clone, Copy)]
pub enum Applicability {
    All,
    AllExcept(&'static [Role]),
    Only(&'static [Role]),
}

impl Applicability {
    pub fn contains(&self, role: Role) -> bool {
        match self {
            Applicability::All => true,
            Applicability::AllExcept(excluded) => !excluded.contains(&role),
            Applicability::Only(included) => included.contains(&role),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    /// Column header and marker tag, e.g. `ORDER BY Clause`.
    pub name: &'static str,
    /// What compliance looks like.
    pub intent: &'static str,
    pub applies: Applicability,
    /// Weight of one sub-violation. Uniform today.
    pub weight: u8,
}

impl Rule {
    pub fn applies_to(&self, role: Role) -> bool {
        self.applies.contains(role)
    }
}
