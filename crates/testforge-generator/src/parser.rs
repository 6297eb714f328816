//! Scenario decoding from raw model text
//!
//! Strict decoding of `{"scenarios": [...]}` comes first. When the text is
//! not JSON, the best-effort path looks for a fenced ```json block, then any
//! fenced block, then the first embedded JSON value. Text with no usable JSON
//! yields zero scenarios; that is the degraded path, not an error.
//!
//! Entries are decoded one by one so a single malformed entry does not cost
//! the rest of the response.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use testforge_types::{CoverageArea, Framework, Priority, ScenarioType, TestScenario};
use tracing::{debug, warn};

/// Turns raw model text into scenarios
pub trait ScenarioParser: Send + Sync + std::fmt::Debug {
    /// Decode scenarios; `framework` fills entries that do not name one
    ///
    /// Never fails. Unusable text yields an empty list.
    fn parse(&self, raw: &str, framework: &Framework) -> Vec<TestScenario>;
}

/// Lenient JSON scenario parser
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonScenarioParser;

impl JsonScenarioParser {
    /// Create parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// One scenario as a model writes it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScenario {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    category: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default, alias = "estimatedDurationMinutes")]
    estimated_duration: Option<f64>,
    #[serde(default)]
    framework: Option<String>,
    #[serde(default)]
    coverage: Vec<CoverageArea>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    dependencies: Vec<String>,
}

fn parse_priority(value: Option<&str>) -> Priority {
    match value.map(|p| p.trim().to_ascii_lowercase()).as_deref() {
        Some("critical") => Priority::Critical,
        Some("high") => Priority::High,
        Some("low") => Priority::Low,
        _ => Priority::Medium,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_confidence(value: Option<f64>) -> u8 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 100.0).round() as u8,
        _ => 0,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_minutes(value: Option<f64>) -> Option<u32> {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, f64::from(u32::MAX)).round() as u32)
}

/// Scenario entries of a decoded value
///
/// Objects yield their `scenarios` array (empty when absent), arrays are
/// taken as-is, anything else is unusable.
fn scenario_entries(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Object(mut map) => match map.remove("scenarios") {
            Some(Value::Array(entries)) => Some(entries),
            Some(_) => None,
            None => Some(Vec::new()),
        },
        Value::Array(entries) => Some(entries),
        _ => None,
    }
}

/// JSON candidates in the order they are tried
///
/// The trimmed text itself, a ```json fenced block, any fenced block, then
/// the first embedded object or array.
#[must_use]
pub fn extract_json_candidates(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let mut candidates = vec![trimmed.to_string()];
    candidates.extend(extract_fenced_block(trimmed, Some("json")));
    candidates.extend(extract_fenced_block(trimmed, None));
    candidates.extend(extract_first_json_value(trimmed));
    candidates
}

fn extract_fenced_block(content: &str, language: Option<&str>) -> Option<String> {
    const FENCE: &str = "```";
    let mut search = content;

    loop {
        let start = search.find(FENCE)?;
        let after_start = &search[start + FENCE.len()..];
        let line_end = after_start.find('\n')?;
        let tag = after_start[..line_end].trim();
        let rest = &after_start[line_end + 1..];

        if let Some(expected) = language {
            if !tag.eq_ignore_ascii_case(expected) {
                search = after_start;
                continue;
            }
        }

        let end = rest.find(FENCE)?;
        return Some(rest[..end].trim().to_string());
    }
}

fn extract_first_json_value(content: &str) -> Option<String> {
    for (idx, ch) in content.char_indices() {
        if ch != '{' && ch != '[' {
            continue;
        }
        let candidate = &content[idx..];
        let mut stream = serde_json::Deserializer::from_str(candidate).into_iter::<Value>();
        if let Some(Ok(_)) = stream.next() {
            let end = stream.byte_offset();
            if end > 0 && end <= candidate.len() {
                return Some(candidate[..end].to_string());
            }
        }
    }
    None
}

impl JsonScenarioParser {
    fn entries(raw: &str) -> Vec<Value> {
        for (attempt, candidate) in extract_json_candidates(raw).into_iter().enumerate() {
            let Ok(value) = serde_json::from_str::<Value>(&candidate) else {
                continue;
            };
            if let Some(entries) = scenario_entries(value) {
                if attempt > 0 {
                    debug!(attempt, "scenarios recovered from embedded JSON");
                }
                return entries;
            }
        }

        warn!(len = raw.len(), "model response contained no scenario JSON");
        Vec::new()
    }
}

impl ScenarioParser for JsonScenarioParser {
    fn parse(&self, raw: &str, framework: &Framework) -> Vec<TestScenario> {
        let mut scenarios: Vec<TestScenario> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (index, entry) in Self::entries(raw).into_iter().enumerate() {
            let raw_scenario = match serde_json::from_value::<RawScenario>(entry) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed scenario entry");
                    continue;
                }
            };

            let base_id = raw_scenario
                .id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map_or_else(|| format!("scenario_{}", index + 1), str::to_string);
            let mut id = base_id.clone();
            let mut suffix = 2;
            while seen.contains(&id) {
                id = format!("{base_id}-{suffix}");
                suffix += 1;
            }
            if id != base_id {
                warn!(original = %base_id, renamed = %id, "duplicate scenario id");
            }
            seen.insert(id.clone());

            let mut scenario = TestScenario::new(
                id,
                ScenarioType::from(raw_scenario.kind),
                raw_scenario.title,
                raw_scenario
                    .framework
                    .map_or_else(|| framework.clone(), Framework::from),
            )
            .with_category(raw_scenario.category)
            .with_priority(parse_priority(raw_scenario.priority.as_deref()))
            .with_confidence(clamp_confidence(raw_scenario.confidence));
            scenario.description = raw_scenario.description;
            scenario.estimated_duration_minutes = whole_minutes(raw_scenario.estimated_duration);
            scenario.coverage = raw_scenario.coverage;
            scenario.tags = raw_scenario.tags;
            scenario.dependencies = raw_scenario.dependencies;

            scenarios.push(scenario);
        }

        debug!(count = scenarios.len(), "scenarios parsed");
        scenarios
    }
}
