//! Framework-keyed code analyzers
//!
//! Turns raw source, or pre-extracted structural information, into a
//! normalized [`AnalysisResult`](testforge_types::AnalysisResult):
//! - [`ReactAnalyzer`]: the full heuristic extractor
//! - [`StubAnalyzer`]: empty-but-well-formed results for other frameworks
//! - [`AnalyzerRegistry`]: framework → analyzer lookup, built once
//!
//! Both analysis entry points are total: they never fail and default every
//! collection to empty when nothing is detected.

#![warn(unreachable_pub)]

pub mod analyzer;
pub mod react;
pub mod registry;
pub mod risk;
pub mod stub;

pub use analyzer::{score_complexity, CodeAnalyzer};
pub use react::ReactAnalyzer;
pub use registry::AnalyzerRegistry;
pub use risk::{identify_risk_areas, RiskRule, RiskTarget, DEFAULT_RISK_RULES};
pub use stub::StubAnalyzer;
