//! Keyword risk rules
//!
//! A fixed, extensible table. Each rule fires at most once per analysis,
//! when any component name or endpoint path contains one of its keywords
//! (case-insensitive). Rules fire in table order.

use testforge_types::{ApiEndpoint, ComponentInfo, RiskArea, Severity};

/// What a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTarget {
    /// Component identifiers
    ComponentNames,
    /// Endpoint paths
    EndpointPaths,
}

/// One keyword rule
#[derive(Debug, Clone, Copy)]
pub struct RiskRule {
    /// Emitted area label
    pub area: &'static str,
    /// Emitted severity
    pub severity: Severity,
    /// Emitted description
    pub description: &'static str,
    /// Inspected names
    pub target: RiskTarget,
    /// Lowercase keywords
    pub keywords: &'static [&'static str],
}

impl RiskRule {
    fn matches(&self, components: &[ComponentInfo], apis: &[ApiEndpoint]) -> bool {
        let hit = |text: &str| {
            let lower = text.to_lowercase();
            self.keywords.iter().any(|k| lower.contains(k))
        };
        match self.target {
            RiskTarget::ComponentNames => components.iter().any(|c| hit(&c.name)),
            RiskTarget::EndpointPaths => apis.iter().any(|a| hit(&a.path)),
        }
    }

    fn to_area(self) -> RiskArea {
        RiskArea {
            area: self.area.to_string(),
            severity: self.severity,
            description: self.description.to_string(),
        }
    }
}

/// Built-in rules
pub const DEFAULT_RISK_RULES: &[RiskRule] = &[
    RiskRule {
        area: "Authentication",
        severity: Severity::High,
        description: "Authentication components require thorough security testing",
        target: RiskTarget::ComponentNames,
        keywords: &["login", "auth"],
    },
    RiskRule {
        area: "Payment Processing",
        severity: Severity::Critical,
        description: "Payment endpoints need comprehensive testing",
        target: RiskTarget::EndpointPaths,
        keywords: &["payment", "billing"],
    },
];

/// Apply rules to detected components and endpoints
#[must_use]
pub fn identify_risk_areas(
    components: &[ComponentInfo],
    apis: &[ApiEndpoint],
    rules: &[RiskRule],
) -> Vec<RiskArea> {
    rules
        .iter()
        .filter(|rule| rule.matches(components, apis))
        .map(|rule| rule.to_area())
        .collect()
}
