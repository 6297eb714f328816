//! Caller-facing service
//!
//! Owns at most one engine. Accepts either source text or a list of files,
//! which are joined into one blob with a `// File: <name>` marker line ahead
//! of each file's content.

use crate::engine::TestEngine;
use serde::{Deserialize, Serialize};
use testforge_types::{
    ConfigError, ConfigOverrides, GenerationConfig, GenerationResult, PipelineStage,
    ProgressEvent, ProgressSender,
};

/// One named source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// File name as shown in the marker line
    pub name: String,
    /// File contents
    pub content: String,
}

impl SourceFile {
    /// Create source file
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Service input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CodeInput {
    /// Source text used as-is
    Text(String),
    /// Files joined with marker lines
    Files(Vec<SourceFile>),
}

impl CodeInput {
    /// Single source blob
    #[must_use]
    pub fn into_source(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Files(files) => files
                .iter()
                .map(|f| format!("// File: {}\n{}", f.name, f.content))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

impl From<String> for CodeInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for CodeInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<SourceFile>> for CodeInput {
    fn from(files: Vec<SourceFile>) -> Self {
        Self::Files(files)
    }
}

/// Test generation service
///
/// Remembers the last configuration error so a run without an engine
/// reports why the engine is missing.
#[derive(Debug, Clone, Default)]
pub struct TestGenerationService {
    engine: Option<TestEngine>,
    last_error: Option<ConfigError>,
}

impl TestGenerationService {
    /// Create uninitialized service
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Service around an existing engine
    #[inline]
    #[must_use]
    pub fn with_engine(engine: TestEngine) -> Self {
        Self {
            engine: Some(engine),
            last_error: None,
        }
    }

    /// Build the engine for `config`, replacing any previous one
    ///
    /// # Errors
    /// [`ConfigError`] if the engine cannot be built; the previous engine is
    /// kept in that case.
    pub fn initialize(&mut self, config: GenerationConfig) -> Result<(), ConfigError> {
        match TestEngine::new(config) {
            Ok(engine) => {
                self.engine = Some(engine);
                self.last_error = None;
                tracing::info!("test generation service initialized");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "engine construction failed");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Rebuild the engine with overrides applied
    ///
    /// Does nothing when the service is not initialized.
    ///
    /// # Errors
    /// [`ConfigError`] if the merged config cannot be resolved; the current
    /// engine is kept in that case.
    pub fn update_config(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        let Some(engine) = &self.engine else {
            return Ok(());
        };
        match engine.reconfigure(overrides) {
            Ok(next) => {
                self.engine = Some(next);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "engine reconfiguration failed");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> Option<&GenerationConfig> {
        self.engine.as_ref().map(TestEngine::config)
    }

    /// Check whether an engine is present
    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Error from the last failed `initialize` or `update_config`
    #[inline]
    #[must_use]
    pub fn last_error(&self) -> Option<&ConfigError> {
        self.last_error.as_ref()
    }

    /// Run generation over text or files
    ///
    /// Without an engine the result fails with the last configuration
    /// error, or with "engine not initialized" if there was none.
    pub async fn generate_tests(
        &self,
        input: impl Into<CodeInput>,
        context: Option<&str>,
        progress: Option<&ProgressSender>,
    ) -> GenerationResult {
        if let Some(sender) = progress {
            let _ = sender.send(ProgressEvent::entering(PipelineStage::Preparing));
        }

        let Some(engine) = &self.engine else {
            return match &self.last_error {
                Some(e) => GenerationResult::failed(e.to_string()),
                None => {
                    tracing::warn!("generate_tests called before initialize");
                    GenerationResult::failed("engine not initialized")
                }
            };
        };

        engine
            .generate_tests(input.into().into_source(), context, progress)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testforge_types::Framework;

    #[test]
    fn files_are_joined_with_markers() {
        let input = CodeInput::from(vec![
            SourceFile::new("App.jsx", "function App() {}"),
            SourceFile::new("Login.jsx", "function LoginForm() {}"),
        ]);
        assert_eq!(
            input.into_source(),
            "// File: App.jsx\nfunction App() {}\n\n// File: Login.jsx\nfunction LoginForm() {}"
        );
    }

    #[test]
    fn text_is_unchanged() {
        assert_eq!(CodeInput::from("abc").into_source(), "abc");
        assert_eq!(CodeInput::Files(Vec::new()).into_source(), "");
    }

    #[test]
    fn failed_initialize_keeps_previous_engine() {
        let mut service = TestGenerationService::new();
        service.initialize(GenerationConfig::default()).unwrap();
        assert!(service
            .initialize(GenerationConfig::for_framework("cobol"))
            .is_err());
        assert_eq!(service.config().map(|c| c.framework.clone()), Some(Framework::React));
    }

    #[test]
    fn failed_initialize_is_remembered() {
        let mut service = TestGenerationService::new();
        let err = service
            .initialize(GenerationConfig::for_framework("cobol"))
            .unwrap_err();
        assert_eq!(service.last_error(), Some(&err));

        service.initialize(GenerationConfig::default()).unwrap();
        assert!(service.last_error().is_none());
    }

    #[test]
    fn update_before_initialize_is_noop() {
        let mut service = TestGenerationService::new();
        service.update_config(&ConfigOverrides::default()).unwrap();
        assert!(!service.is_initialized());
        assert!(service.config().is_none());
    }

    #[test]
    fn update_config_rebuilds() {
        let mut service = TestGenerationService::new();
        service.initialize(GenerationConfig::default()).unwrap();
        let overrides = ConfigOverrides {
            time_budget_minutes: Some(30),
            ..ConfigOverrides::default()
        };
        service.update_config(&overrides).unwrap();
        assert_eq!(service.config().and_then(|c| c.time_budget_minutes), Some(30));
    }
}
