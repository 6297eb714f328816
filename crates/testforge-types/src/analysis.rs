//! Code analysis records
//!
//! An [`AnalysisResult`] is produced exactly once per pipeline run by one
//! analyzer and is never modified afterwards.

use crate::key::Framework;
use serde::{Deserialize, Serialize};

/// Coarse complexity rating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    /// Low
    Low,
    /// Medium
    #[default]
    Medium,
    /// High
    High,
}

impl ComplexityLevel {
    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ComplexityLevel::Low => "low",
            ComplexityLevel::Medium => "medium",
            ComplexityLevel::High => "high",
        }
    }
}

/// Normalized analysis of a codebase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Detected components (names may repeat)
    #[serde(default)]
    pub components: Vec<ComponentInfo>,
    /// Detected network call sites
    #[serde(default)]
    pub apis: Vec<ApiEndpoint>,
    /// External imports, deduplicated
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Heuristic risk areas
    #[serde(default)]
    pub risk_areas: Vec<RiskArea>,
    /// Overall complexity
    #[serde(default)]
    pub complexity: ComplexityLevel,
    /// Existing test coverage estimate (percent)
    #[serde(default)]
    pub coverage: u8,
    /// Framework the analyzer was written for
    pub framework: Framework,
    /// Recognized idioms, informational only
    #[serde(default)]
    pub patterns: Vec<CodePattern>,
    /// Declarative route paths
    #[serde(default)]
    pub routes: Vec<String>,
}

impl AnalysisResult {
    /// Empty but well-formed result for a framework
    #[inline]
    #[must_use]
    pub fn empty(framework: Framework) -> Self {
        Self {
            components: Vec::new(),
            apis: Vec::new(),
            dependencies: Vec::new(),
            risk_areas: Vec::new(),
            complexity: ComplexityLevel::Medium,
            coverage: 0,
            framework,
            patterns: Vec::new(),
            routes: Vec::new(),
        }
    }

    /// Names of detected components, in detection order
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name.as_str())
    }
}

/// Kind of UI component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Function or arrow-function component
    #[default]
    Functional,
    /// Class component
    Class,
    /// Custom hook
    Hook,
}

/// A component found in source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    /// Identifier
    pub name: String,
    /// Component kind
    #[serde(default, rename = "type")]
    pub kind: ComponentKind,
    /// Declared props
    #[serde(default)]
    pub props: Vec<String>,
    /// Declared methods
    #[serde(default)]
    pub methods: Vec<String>,
    /// Per-component complexity
    #[serde(default)]
    pub complexity: ComplexityLevel,
}

impl ComponentInfo {
    /// Create a component with defaults
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            kind,
            props: Vec::new(),
            methods: Vec::new(),
            complexity: ComplexityLevel::Medium,
        }
    }
}

/// Authentication scheme guarding an endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    /// Unauthenticated
    #[default]
    None,
    /// HTTP basic
    Basic,
    /// Bearer token
    Bearer,
    /// OAuth
    OAuth,
}

/// Endpoint parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Name
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the parameter is mandatory
    #[serde(default)]
    pub required: bool,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A network call site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    /// Request path or URL
    pub path: String,
    /// HTTP method, uppercase
    #[serde(default = "default_method")]
    pub method: String,
    /// Known parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Security scheme
    #[serde(default, alias = "security")]
    pub security_level: SecurityLevel,
}

fn default_method() -> String {
    "GET".to_string()
}

impl ApiEndpoint {
    /// Create an endpoint with no parameters and no security
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            parameters: Vec::new(),
            security_level: SecurityLevel::None,
        }
    }
}

/// Risk severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
    /// Critical
    Critical,
}

impl Severity {
    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// An area of the codebase that deserves extra testing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskArea {
    /// Area label
    pub area: String,
    /// Severity
    pub severity: Severity,
    /// Rationale
    pub description: String,
}

/// A recognized idiom and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodePattern {
    /// Human-readable name
    pub name: String,
    /// Idiom family
    #[serde(rename = "type")]
    pub kind: String,
    /// Occurrence count
    pub frequency: usize,
}

/// Role of a file in the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// UI component
    Component,
    /// Service module
    Service,
    /// Utility module
    Utility,
    /// Test file
    Test,
    /// Configuration
    Config,
}

/// File entry in a pre-extracted project structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStructure {
    /// Path relative to the project root
    pub path: String,
    /// File role
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Size in bytes
    pub size: u64,
}

/// Pre-extracted structural information, an alternative to raw source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodebaseInfo {
    /// Known components
    #[serde(default)]
    pub components: Vec<ComponentInfo>,
    /// Known endpoints
    #[serde(default)]
    pub apis: Vec<ApiEndpoint>,
    /// Known dependencies
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// File layout
    #[serde(default)]
    pub structure: Vec<FileStructure>,
}
