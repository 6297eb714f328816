//! Pipeline orchestrator
//!
//! [`TestEngine`] runs one analysis → scenarios → cases → optimize → validate
//! pass per [`TestEngine::generate_tests`] call. Stages run sequentially
//! except case generation, which fans out one task per scenario and joins
//! before optimizing. Any stage error is caught once, here, and returned as
//! a failed [`GenerationResult`].

use crate::error::EngineError;
use crate::metadata::{coverage_percent, total_duration};
use crate::plugin::TestPlugin;
use crate::registry::Registries;
use crate::validate::{validate, Validated};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use testforge_analyzer::CodeAnalyzer;
use testforge_generator::{build_prompt, enhance_context, ModelBridge};
use testforge_optimizer::OptimizerChain;
use testforge_types::{
    AnalysisResult, CodebaseInfo, ConfigError, ConfigOverrides, GenerationConfig,
    GenerationMetadata, GenerationResult, PipelineStage, ProgressEvent, ProgressSender, RunId,
    TestScenario,
};
use tracing::Instrument;

/// What the analyzer runs on
#[derive(Debug, Clone, PartialEq)]
pub enum CodebaseInput {
    /// Raw source text
    Source(String),
    /// Pre-extracted structure
    Structure(CodebaseInfo),
}

impl From<String> for CodebaseInput {
    fn from(source: String) -> Self {
        Self::Source(source)
    }
}

impl From<&str> for CodebaseInput {
    fn from(source: &str) -> Self {
        Self::Source(source.to_string())
    }
}

impl From<CodebaseInfo> for CodebaseInput {
    fn from(info: CodebaseInfo) -> Self {
        Self::Structure(info)
    }
}

/// Sends stage-entry events and remembers the last percent
struct ProgressReporter<'a> {
    sender: Option<&'a ProgressSender>,
    last_percent: u8,
}

impl<'a> ProgressReporter<'a> {
    fn new(sender: Option<&'a ProgressSender>) -> Self {
        Self {
            sender,
            last_percent: 0,
        }
    }

    fn send(&self, event: ProgressEvent) {
        if let Some(sender) = self.sender {
            // closed receiver disables reporting
            let _ = sender.send(event);
        }
    }

    fn enter(&mut self, stage: PipelineStage) {
        let event = ProgressEvent::entering(stage);
        self.last_percent = event.percent;
        tracing::debug!(stage = stage.name(), percent = event.percent, "entering stage");
        self.send(event);
    }

    fn failed(&self) {
        self.send(ProgressEvent {
            stage: PipelineStage::Failed,
            label: PipelineStage::Failed.label().to_string(),
            percent: self.last_percent,
        });
    }
}

/// Test generation engine
///
/// Analyzer and bridge are resolved at construction, so an unknown
/// framework or model fails in [`TestEngine::new`] rather than mid-run.
/// The engine holds no per-run state and may be reused for sequential runs.
#[derive(Debug, Clone)]
pub struct TestEngine {
    config: GenerationConfig,
    registries: Registries,
    analyzer: Arc<dyn CodeAnalyzer>,
    bridge: Arc<dyn ModelBridge>,
    chain: OptimizerChain,
    plugins: Vec<String>,
}

impl TestEngine {
    /// Create engine over the builtin registries
    ///
    /// # Errors
    /// [`ConfigError`] if the config is invalid or its framework or model
    /// has no registered implementation.
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigError> {
        let registries = Registries::with_defaults(config.resilience);
        Self::with_registries(config, registries)
    }

    /// Create engine over the given registries
    ///
    /// # Errors
    /// As [`TestEngine::new`].
    pub fn with_registries(
        config: GenerationConfig,
        registries: Registries,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let analyzer = registries.analyzers.resolve(&config.framework)?;
        let bridge = registries.bridges.resolve(&config.model_id)?;

        if !registries.generators.contains(&config.framework) {
            tracing::warn!(
                framework = %config.framework,
                "no case generator registered; scenarios will have no test cases"
            );
        }

        tracing::debug!(framework = %config.framework, model = %config.model_id, "engine resolved");

        Ok(Self {
            chain: OptimizerChain::standard(config.time_budget_minutes),
            config,
            registries,
            analyzer,
            bridge,
            plugins: Vec::new(),
        })
    }

    /// Create engine over the builtin registries plus plugins
    ///
    /// Needed when the configured framework or model only exists in a plugin.
    ///
    /// # Errors
    /// As [`TestEngine::new`].
    pub fn with_plugins(
        config: GenerationConfig,
        plugins: &[&dyn TestPlugin],
    ) -> Result<Self, ConfigError> {
        let mut registries = Registries::with_defaults(config.resilience);
        for plugin in plugins {
            plugin.install(&mut registries);
        }
        let mut engine = Self::with_registries(config, registries)?;
        engine.plugins = plugins.iter().map(|p| plugin_label(*p)).collect();
        Ok(engine)
    }

    /// New engine with the plugin installed; `self` is unchanged
    ///
    /// # Errors
    /// As [`TestEngine::new`], if the plugin replaced a component the
    /// config depends on with an unusable one.
    pub fn with_plugin(&self, plugin: &dyn TestPlugin) -> Result<Self, ConfigError> {
        let mut registries = self.registries.clone();
        plugin.install(&mut registries);

        let mut engine = Self::with_registries(self.config.clone(), registries)?;
        engine.plugins.clone_from(&self.plugins);
        engine.plugins.push(plugin_label(plugin));

        tracing::info!(plugin = plugin.name(), version = plugin.version(), "plugin installed");
        Ok(engine)
    }

    /// New engine with the overrides applied, keeping installed plugins
    ///
    /// # Errors
    /// As [`TestEngine::new`], for the merged config.
    pub fn reconfigure(&self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let config = self.config.merged(overrides);
        let mut engine = Self::with_registries(config, self.registries.clone())?;
        engine.plugins.clone_from(&self.plugins);
        Ok(engine)
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Registries the engine resolved from
    #[inline]
    #[must_use]
    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Installed plugins as `name@version`
    #[inline]
    #[must_use]
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// Run the full pipeline
    ///
    /// Never fails: errors surface as `success == false` with a message.
    /// When `progress` is given, one event is sent on entering each stage
    /// with non-decreasing percentages, ending at 100 on success or with a
    /// `Failed` event on error.
    pub async fn generate_tests(
        &self,
        input: impl Into<CodebaseInput>,
        context: Option<&str>,
        progress: Option<&ProgressSender>,
    ) -> GenerationResult {
        let run_id = RunId::new();
        let span = tracing::info_span!(
            "generate_tests",
            %run_id,
            framework = %self.config.framework,
            model = %self.config.model_id,
        );
        let input = input.into();

        async move {
            let mut reporter = ProgressReporter::new(progress);
            tracing::info!("starting test generation");

            match self.run(run_id, &input, context, &mut reporter).await {
                Ok(result) => {
                    reporter.enter(PipelineStage::Complete);
                    tracing::info!(
                        scenarios = result.scenarios.len(),
                        cases = result.total_cases(),
                        "test generation complete"
                    );
                    result
                }
                Err(e) => {
                    tracing::error!(error = %e, stage = ?e.stage(), "test generation failed");
                    reporter.failed();
                    GenerationResult::failed(e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        run_id: RunId,
        input: &CodebaseInput,
        context: Option<&str>,
        reporter: &mut ProgressReporter<'_>,
    ) -> Result<GenerationResult, EngineError> {
        reporter.enter(PipelineStage::Analyzing);
        let analysis = self.analyze(input);

        reporter.enter(PipelineStage::EnhancingContext);
        let enhanced = enhance_context(&analysis, context);

        reporter.enter(PipelineStage::GeneratingScenarios);
        let scenarios = self.generate_scenarios(&analysis, &enhanced).await?;

        reporter.enter(PipelineStage::GeneratingCases);
        let scenarios = self.generate_cases(scenarios).await?;

        reporter.enter(PipelineStage::Optimizing);
        let scenarios = self.chain.run(scenarios);

        reporter.enter(PipelineStage::Validating);
        let Validated {
            scenarios,
            warnings,
        } = validate(scenarios);

        let metadata = GenerationMetadata {
            run_id,
            generated_at: Utc::now(),
            total_scenarios: scenarios.len(),
            estimated_duration: total_duration(&scenarios),
            coverage_percent: coverage_percent(scenarios.len(), analysis.components.len()),
            warnings,
        };
        Ok(GenerationResult::completed(scenarios, analysis, metadata))
    }

    fn analyze(&self, input: &CodebaseInput) -> AnalysisResult {
        let analysis = match input {
            CodebaseInput::Source(source) => self.analyzer.analyze_code(source),
            CodebaseInput::Structure(info) => self.analyzer.analyze_structure(info),
        };
        tracing::debug!(
            components = analysis.components.len(),
            apis = analysis.apis.len(),
            risks = analysis.risk_areas.len(),
            complexity = analysis.complexity.as_str(),
            "analysis complete"
        );
        analysis
    }

    async fn generate_scenarios(
        &self,
        analysis: &AnalysisResult,
        context: &str,
    ) -> Result<Vec<TestScenario>, EngineError> {
        let prompt = build_prompt(analysis, context, &self.config);
        tracing::debug!(prompt_len = prompt.len(), "invoking model bridge");

        let raw = self.bridge.invoke(&prompt).await?;
        let scenarios = self.registries.parser.parse(&raw, &self.config.framework);
        tracing::debug!(scenarios = scenarios.len(), "scenarios generated");
        Ok(scenarios)
    }

    /// One task per scenario; the stage completes when all have joined
    async fn generate_cases(
        &self,
        scenarios: Vec<TestScenario>,
    ) -> Result<Vec<TestScenario>, EngineError> {
        let generators = &self.registries.generators;
        let handles: Vec<_> = scenarios
            .into_iter()
            .map(|mut scenario| {
                let generator = generators
                    .get(&scenario.framework)
                    .or_else(|| generators.get(&self.config.framework));
                tokio::spawn(async move {
                    scenario.test_cases = match generator {
                        Some(generator) => generator.generate_test_cases(&scenario).await,
                        None => Vec::new(),
                    };
                    scenario
                })
            })
            .collect();

        let scenarios = join_all(handles)
            .await
            .into_iter()
            .map(|joined| {
                joined.map_err(|e| {
                    EngineError::stage_failed(PipelineStage::GeneratingCases, e.to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            cases = scenarios.iter().map(|s| s.test_cases.len()).sum::<usize>(),
            "test cases generated"
        );
        Ok(scenarios)
    }
}

fn plugin_label(plugin: &dyn TestPlugin) -> String {
    format!("{}@{}", plugin.name(), plugin.version())
}
