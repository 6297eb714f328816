//! Generation configuration
//!
//! [`GenerationConfig`] is owned by the caller; engines keep their own copy.
//! Missing keys in TOML or JSON input take the factory defaults.

use crate::error::ConfigError;
use crate::key::{Framework, ModelId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Requested depth of generated scenarios
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    /// Basic
    Basic,
    /// Medium
    #[default]
    Medium,
    /// Advanced
    Advanced,
}

impl ComplexityTier {
    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ComplexityTier::Basic => "basic",
            ComplexityTier::Medium => "medium",
            ComplexityTier::Advanced => "advanced",
        }
    }
}

impl std::str::FromStr for ComplexityTier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(ComplexityTier::Basic),
            "medium" => Ok(ComplexityTier::Medium),
            "advanced" => Ok(ComplexityTier::Advanced),
            other => Err(ConfigError::invalid(
                "complexity",
                format!("expected basic, medium or advanced, got {other:?}"),
            )),
        }
    }
}

/// Timeout and retry settings for model bridges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResilienceSettings {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// First backoff delay in milliseconds
    pub initial_backoff_ms: u64,
    /// Backoff ceiling in milliseconds
    pub max_backoff_ms: u64,
    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ResilienceSettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff_ms: 250,
            max_backoff_ms: 5_000,
            timeout_secs: 60,
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    /// Selects analyzer and case generators
    pub framework: Framework,
    /// Requested scenario depth
    pub complexity: ComplexityTier,
    /// Tags echoed into the prompt
    pub focus_areas: Vec<String>,
    /// Ask the model for edge cases
    pub include_edge_cases: bool,
    /// Ask the model for performance tests
    pub include_performance_tests: bool,
    /// Ask the model for security tests
    pub include_security_tests: bool,
    /// Advisory per-category cap, communicated to the model only
    pub max_scenarios_per_category: u32,
    /// Selects the model bridge
    pub model_id: ModelId,
    /// Per-category prompt additions
    pub custom_prompts: BTreeMap<String, String>,
    /// Optional execution-time budget for the performance optimizer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_budget_minutes: Option<u32>,
    /// Bridge timeout and retry settings
    pub resilience: ResilienceSettings,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::for_framework(Framework::React)
    }
}

impl GenerationConfig {
    /// Factory defaults for a framework
    #[must_use]
    pub fn for_framework(framework: impl Into<Framework>) -> Self {
        Self {
            framework: framework.into(),
            complexity: ComplexityTier::Medium,
            focus_areas: vec![
                "functionality".to_string(),
                "security".to_string(),
                "performance".to_string(),
            ],
            include_edge_cases: true,
            include_performance_tests: true,
            include_security_tests: true,
            max_scenarios_per_category: 10,
            model_id: ModelId::Gpt4,
            custom_prompts: BTreeMap::new(),
            time_budget_minutes: None,
            resilience: ResilienceSettings::default(),
        }
    }

    /// With model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<ModelId>) -> Self {
        self.model_id = model.into();
        self
    }

    /// With complexity tier
    #[inline]
    #[must_use]
    pub fn with_complexity(mut self, complexity: ComplexityTier) -> Self {
        self.complexity = complexity;
        self
    }

    /// With focus areas
    #[inline]
    #[must_use]
    pub fn with_focus_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.focus_areas = areas.into_iter().map(Into::into).collect();
        self
    }

    /// With execution-time budget
    #[inline]
    #[must_use]
    pub fn with_time_budget(mut self, minutes: u32) -> Self {
        self.time_budget_minutes = Some(minutes);
        self
    }

    /// With a custom prompt for a category
    #[inline]
    #[must_use]
    pub fn with_custom_prompt(
        mut self,
        category: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        self.custom_prompts.insert(category.into(), prompt.into());
        self
    }

    /// Check value domains
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] for a zero category cap or a zero budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_scenarios_per_category == 0 {
            return Err(ConfigError::invalid(
                "maxScenariosPerCategory",
                "must be at least 1",
            ));
        }
        if self.time_budget_minutes == Some(0) {
            return Err(ConfigError::invalid(
                "timeBudgetMinutes",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }

    /// Decode from TOML text
    ///
    /// # Errors
    /// [`ConfigError::Parse`] on malformed input, or any validation error.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and decode a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, then as [`Self::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Apply a partial override, returning a new config
    #[must_use]
    pub fn merged(&self, overrides: &ConfigOverrides) -> Self {
        let mut next = self.clone();
        if let Some(framework) = &overrides.framework {
            next.framework = framework.clone();
        }
        if let Some(complexity) = overrides.complexity {
            next.complexity = complexity;
        }
        if let Some(areas) = &overrides.focus_areas {
            next.focus_areas.clone_from(areas);
        }
        if let Some(flag) = overrides.include_edge_cases {
            next.include_edge_cases = flag;
        }
        if let Some(flag) = overrides.include_performance_tests {
            next.include_performance_tests = flag;
        }
        if let Some(flag) = overrides.include_security_tests {
            next.include_security_tests = flag;
        }
        if let Some(cap) = overrides.max_scenarios_per_category {
            next.max_scenarios_per_category = cap;
        }
        if let Some(model) = &overrides.model_id {
            next.model_id = model.clone();
        }
        if let Some(prompts) = &overrides.custom_prompts {
            next.custom_prompts.clone_from(prompts);
        }
        if let Some(budget) = overrides.time_budget_minutes {
            next.time_budget_minutes = Some(budget);
        }
        next
    }
}

/// Partial configuration; `None` keeps the base value
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    pub framework: Option<Framework>,
    pub complexity: Option<ComplexityTier>,
    pub focus_areas: Option<Vec<String>>,
    pub include_edge_cases: Option<bool>,
    pub include_performance_tests: Option<bool>,
    pub include_security_tests: Option<bool>,
    pub max_scenarios_per_category: Option<u32>,
    pub model_id: Option<ModelId>,
    pub custom_prompts: Option<BTreeMap<String, String>>,
    pub time_budget_minutes: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn factory_defaults() {
        let config = GenerationConfig::for_framework("vue");
        assert_eq!(config.framework, Framework::Vue);
        assert_eq!(config.complexity, ComplexityTier::Medium);
        assert_eq!(config.focus_areas, vec!["functionality", "security", "performance"]);
        assert!(config.include_edge_cases);
        assert!(config.include_performance_tests);
        assert!(config.include_security_tests);
        assert_eq!(config.max_scenarios_per_category, 10);
        assert_eq!(config.model_id, ModelId::Gpt4);
        assert!(config.custom_prompts.is_empty());
        assert_eq!(config.time_budget_minutes, None);
    }

    #[test]
    fn toml_partial_uses_defaults() {
        let config = GenerationConfig::from_toml_str(
            r#"
framework = "angular"
complexity = "advanced"
modelId = "claude"

[customPrompts]
security = "Check for XSS"
"#,
        )
        .unwrap();

        assert_eq!(config.framework, Framework::Angular);
        assert_eq!(config.complexity, ComplexityTier::Advanced);
        assert_eq!(config.model_id, ModelId::Claude);
        assert_eq!(config.max_scenarios_per_category, 10);
        assert_eq!(config.custom_prompts["security"], "Check for XSS");
    }

    #[test]
    fn toml_rejects_zero_cap() {
        let err = GenerationConfig::from_toml_str("maxScenariosPerCategory = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "maxScenariosPerCategory", .. }));
    }

    #[test]
    fn toml_rejects_garbage() {
        let err = GenerationConfig::from_toml_str("framework = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "framework = \"python\"\ntimeBudgetMinutes = 30").unwrap();

        let config = GenerationConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.framework, Framework::Python);
        assert_eq!(config.time_budget_minutes, Some(30));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GenerationConfig::from_toml_file("/nonexistent/testforge.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn merged_applies_only_present_fields() {
        let base = GenerationConfig::for_framework("react");
        let overrides = ConfigOverrides {
            model_id: Some(ModelId::Local),
            include_security_tests: Some(false),
            ..ConfigOverrides::default()
        };

        let next = base.merged(&overrides);
        assert_eq!(next.model_id, ModelId::Local);
        assert!(!next.include_security_tests);
        assert_eq!(next.framework, Framework::React);
        // base untouched
        assert_eq!(base.model_id, ModelId::Gpt4);
    }

    #[test]
    fn complexity_tier_parse() {
        assert_eq!("Advanced".parse::<ComplexityTier>().unwrap(), ComplexityTier::Advanced);
        assert!("extreme".parse::<ComplexityTier>().is_err());
    }
}
