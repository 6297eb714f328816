//! Result summary formulas

use testforge_types::TestScenario;

/// `round(min(scenarios, components) / max(components, 1) * 100)`
///
/// Zero components yields zero. The result never exceeds 100.
#[must_use]
pub fn coverage_percent(scenarios: usize, components: usize) -> u8 {
    if components == 0 {
        return 0;
    }
    let covered = scenarios.min(components);
    // integer round-half-up of covered * 100 / components
    let percent = (covered * 200 + components) / (components * 2);
    u8::try_from(percent).unwrap_or(100)
}

/// Sum of effective durations in minutes; absent counts as 1
#[must_use]
pub fn total_duration(scenarios: &[TestScenario]) -> u32 {
    scenarios
        .iter()
        .map(TestScenario::effective_duration)
        .fold(0, u32::saturating_add)
}
