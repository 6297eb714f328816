//! End-to-end pipeline runs against scripted bridges

use pretty_assertions::assert_eq;
use testforge_engine::{Registries, TestEngine};
use testforge_test_utils::{
    scenario_entry, scenarios_response, FailingBridge, ScriptedBridge, LOGIN_FORM, SHOP_APP,
};
use testforge_types::{
    BridgeError, CodebaseInfo, ComponentInfo, ComponentKind, GenerationConfig, GenerationResult,
    ModelId, PipelineStage, ProgressEvent, ScenarioType,
};
use tokio::sync::mpsc;

fn engine_answering(config: GenerationConfig, response: impl Into<String>) -> TestEngine {
    let mut registries = Registries::with_defaults(config.resilience);
    registries
        .bridges
        .register(ScriptedBridge::arc(config.model_id.clone(), response));
    TestEngine::with_registries(config, registries).unwrap()
}

fn shop_response() -> String {
    let mut cart = scenario_entry("cart", "unit", "Cart lists items", "high");
    cart["dependencies"] = serde_json::json!(["checkout"]);
    scenarios_response(vec![
        scenario_entry("checkout", "integration", "Checkout charges card", "medium"),
        cart,
        scenario_entry("login", "e2e", "User logs in", "critical"),
    ])
}

fn ids(result: &GenerationResult) -> Vec<&str> {
    result.scenarios.iter().map(|s| s.id.as_str()).collect()
}

async fn run_with_events(
    engine: &TestEngine,
    source: &str,
) -> (GenerationResult, Vec<ProgressEvent>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let result = engine.generate_tests(source, Some("Online shop"), Some(&tx)).await;
    drop(tx);
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    (result, events)
}

#[tokio::test]
async fn offline_engine_completes_with_no_scenarios() {
    let engine = TestEngine::new(GenerationConfig::default()).unwrap();
    let result = engine.generate_tests(LOGIN_FORM, None, None).await;

    assert!(result.success);
    assert!(result.scenarios.is_empty());
    let analysis = result.analysis.unwrap();
    assert_eq!(analysis.components[0].name, "LoginForm");
    assert_eq!(result.metadata.unwrap().coverage_percent, 0);
}

#[tokio::test]
async fn non_json_response_degrades_to_empty() {
    let engine = engine_answering(GenerationConfig::default(), "not json");
    let result = engine.generate_tests(LOGIN_FORM, None, None).await;

    assert!(result.success);
    assert!(result.scenarios.is_empty());
    assert!(result.error.is_none());
}

#[tokio::test]
async fn scenarios_are_ordered_and_cased() {
    let engine = engine_answering(GenerationConfig::default(), shop_response());
    let result = engine.generate_tests(SHOP_APP, None, None).await;

    assert!(result.success, "{:?}", result.error);
    // priority first, then cart moves after the checkout it depends on
    assert_eq!(ids(&result), vec!["login", "checkout", "cart"]);

    let case_ids: Vec<_> = result
        .scenarios
        .iter()
        .flat_map(|s| s.test_cases.iter().map(|c| c.id.as_str()))
        .collect();
    assert_eq!(
        case_ids,
        vec!["login_e2e_1", "checkout_integration_1", "cart_unit_1"]
    );

    let metadata = result.metadata.unwrap();
    assert_eq!(metadata.total_scenarios, 3);
    assert_eq!(metadata.estimated_duration, 15);
    // 3 scenarios over LoginForm, Cart, Checkout, App
    assert_eq!(metadata.coverage_percent, 75);
    assert!(metadata.warnings.is_empty());
}

#[tokio::test]
async fn every_case_is_owned_by_its_scenario() {
    let engine = engine_answering(GenerationConfig::default(), shop_response());
    let result = engine.generate_tests(SHOP_APP, None, None).await;

    for scenario in &result.scenarios {
        for case in &scenario.test_cases {
            assert!(case.id.starts_with(&scenario.id), "{} in {}", case.id, scenario.id);
        }
    }
}

#[tokio::test]
async fn time_budget_trims_scenarios() {
    let config = GenerationConfig::default().with_time_budget(10);
    let engine = engine_answering(config, shop_response());
    let result = engine.generate_tests(SHOP_APP, None, None).await;

    assert_eq!(ids(&result), vec!["login", "checkout"]);
    assert_eq!(result.metadata.unwrap().estimated_duration, 10);
}

#[tokio::test]
async fn duplicate_scenarios_are_folded() {
    let response = scenarios_response(vec![
        scenario_entry("login", "e2e", "User logs in", "critical"),
        scenario_entry("login", "e2e", "User logs in", "high"),
    ]);
    let engine = engine_answering(GenerationConfig::default(), response);
    let result = engine.generate_tests(LOGIN_FORM, None, None).await;

    assert_eq!(ids(&result), vec!["login"]);
    assert_eq!(result.total_cases(), 1);
}

#[tokio::test]
async fn types_without_templates_are_kept_with_warning() {
    let entry = scenario_entry("perf", "performance", "Loads fast", "low");
    let response = scenarios_response(vec![entry]);
    let engine = engine_answering(GenerationConfig::default(), response);
    let result = engine.generate_tests(LOGIN_FORM, None, None).await;

    assert!(result.success);
    assert_eq!(ids(&result), vec!["perf"]);
    assert!(result.scenarios[0].test_cases.is_empty());
    assert_eq!(
        result.metadata.unwrap().warnings,
        vec!["scenario 'perf' has no test cases"]
    );
}

#[tokio::test]
async fn stub_framework_yields_zero_cases() {
    let config = GenerationConfig::for_framework("vue");
    let response = scenarios_response(vec![scenario_entry("s1", "unit", "Renders", "medium")]);
    let engine = engine_answering(config, response);
    let result = engine.generate_tests("<template></template>", None, None).await;

    assert!(result.success);
    assert_eq!(result.scenarios.len(), 1);
    assert_eq!(result.scenarios[0].kind, ScenarioType::Unit);
    assert_eq!(result.total_cases(), 0);
}

#[tokio::test]
async fn structured_input_skips_source_scan() {
    let info = CodebaseInfo {
        components: vec![ComponentInfo::new("LoginPage", ComponentKind::Functional)],
        ..CodebaseInfo::default()
    };
    let engine = TestEngine::new(GenerationConfig::default()).unwrap();
    let result = engine.generate_tests(info, None, None).await;

    let analysis = result.analysis.unwrap();
    assert_eq!(analysis.components[0].name, "LoginPage");
    assert_eq!(analysis.risk_areas[0].area, "Authentication");
}

#[tokio::test]
async fn progress_is_monotonic_and_ends_at_100() {
    let engine = engine_answering(GenerationConfig::default(), shop_response());
    let (result, events) = run_with_events(&engine, SHOP_APP).await;

    assert!(result.success);
    let stages: Vec<_> = events.iter().map(|e| e.stage).collect();
    assert_eq!(
        stages,
        vec![
            PipelineStage::Analyzing,
            PipelineStage::EnhancingContext,
            PipelineStage::GeneratingScenarios,
            PipelineStage::GeneratingCases,
            PipelineStage::Optimizing,
            PipelineStage::Validating,
            PipelineStage::Complete,
        ]
    );
    assert!(events.windows(2).all(|w| w[0].percent <= w[1].percent));
    assert_eq!(events.last().map(|e| e.percent), Some(100));
}

#[tokio::test]
async fn bridge_failure_is_reported_not_thrown() {
    let config = GenerationConfig::default();
    let mut registries = Registries::with_defaults(config.resilience);
    registries.bridges.register(std::sync::Arc::new(FailingBridge::new(
        ModelId::Gpt4,
        BridgeError::InvalidResponse("boom".into()),
    )));
    let engine = TestEngine::with_registries(config, registries).unwrap();

    let (result, events) = run_with_events(&engine, LOGIN_FORM).await;

    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some("model bridge error: invalid model response: boom")
    );
    assert!(result.scenarios.is_empty());
    assert!(result.analysis.is_none());
    assert!(result.metadata.is_none());

    let last = events.last().unwrap();
    assert_eq!(last.stage, PipelineStage::Failed);
    assert_eq!(last.percent, PipelineStage::GeneratingScenarios.percent());
}

#[tokio::test]
async fn dropped_receiver_does_not_fail_run() {
    let engine = TestEngine::new(GenerationConfig::default()).unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    let result = engine.generate_tests(LOGIN_FORM, None, Some(&tx)).await;
    assert!(result.success);
}

#[tokio::test]
async fn engine_is_reusable_across_runs() {
    let engine = engine_answering(GenerationConfig::default(), shop_response());
    let first = engine.generate_tests(SHOP_APP, None, None).await;
    let second = engine.generate_tests(SHOP_APP, None, None).await;

    assert_eq!(first.scenarios, second.scenarios);
    assert_ne!(
        first.metadata.map(|m| m.run_id),
        second.metadata.map(|m| m.run_id)
    );
}

#[tokio::test]
async fn prefix_sharing_ids_keep_their_own_cases() {
    let response = scenarios_response(vec![
        scenario_entry("login", "unit", "Login renders", "high"),
        scenario_entry("login_unit", "e2e", "Login flow", "high"),
    ]);
    let engine = engine_answering(GenerationConfig::default(), response);
    let result = engine.generate_tests(LOGIN_FORM, None, None).await;

    let cases: Vec<(&str, Vec<&str>)> = result
        .scenarios
        .iter()
        .map(|s| (s.id.as_str(), s.test_cases.iter().map(|c| c.id.as_str()).collect()))
        .collect();
    assert_eq!(
        cases,
        vec![
            ("login", vec!["login_unit_1"]),
            ("login_unit", vec!["login_unit_e2e_1"]),
        ]
    );
    assert!(result.metadata.unwrap().warnings.is_empty());
}
