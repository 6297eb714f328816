//! Registry keys
//!
//! [`Framework`] selects analyzers and case generators; [`ModelId`] selects
//! the model bridge. Both are closed sets with one escape-hatch variant for
//! plugin-provided implementations. An escape-hatch key that nothing
//! registered fails at resolution with a [`ConfigError`](crate::ConfigError).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Application framework under analysis
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Framework {
    /// React
    React,
    /// Vue
    Vue,
    /// Angular
    Angular,
    /// Node.js services
    NodeJs,
    /// Python services
    Python,
    /// Plugin-provided framework
    Custom(String),
}

impl Framework {
    /// Frameworks with built-in analyzers
    pub const BUILTIN: [Framework; 5] = [
        Framework::React,
        Framework::Vue,
        Framework::Angular,
        Framework::NodeJs,
        Framework::Python,
    ];

    /// Canonical lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Angular => "angular",
            Framework::NodeJs => "nodejs",
            Framework::Python => "python",
            Framework::Custom(name) => name,
        }
    }

    /// Check if this is a plugin-provided key
    #[inline]
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Framework::Custom(_))
    }
}

impl FromStr for Framework {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Ok(match normalized.as_str() {
            "react" => Framework::React,
            "vue" => Framework::Vue,
            "angular" => Framework::Angular,
            "nodejs" | "node" => Framework::NodeJs,
            "python" => Framework::Python,
            _ => Framework::Custom(normalized),
        })
    }
}

impl From<String> for Framework {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(framework) => framework,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Framework {
    fn from(value: &str) -> Self {
        Framework::from(value.to_string())
    }
}

impl From<Framework> for String {
    fn from(value: Framework) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text-generation backend identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelId {
    /// OpenAI GPT-4
    #[default]
    Gpt4,
    /// Anthropic Claude
    Claude,
    /// Google Gemini
    Gemini,
    /// Local model or heuristic generator
    Local,
    /// Plugin-provided backend
    Other(String),
}

impl ModelId {
    /// Models with built-in bridges
    pub const BUILTIN: [ModelId; 4] = [
        ModelId::Gpt4,
        ModelId::Claude,
        ModelId::Gemini,
        ModelId::Local,
    ];

    /// Canonical name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ModelId::Gpt4 => "gpt-4",
            ModelId::Claude => "claude",
            ModelId::Gemini => "gemini",
            ModelId::Local => "local",
            ModelId::Other(name) => name,
        }
    }
}

impl FromStr for ModelId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Ok(match normalized.as_str() {
            "gpt-4" | "gpt4" | "openai" => ModelId::Gpt4,
            "claude" => ModelId::Claude,
            "gemini" => ModelId::Gemini,
            "local" => ModelId::Local,
            _ => ModelId::Other(normalized),
        })
    }
}

impl From<String> for ModelId {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for ModelId {
    fn from(value: &str) -> Self {
        ModelId::from(value.to_string())
    }
}

impl From<ModelId> for String {
    fn from(value: ModelId) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn framework_parse_builtin() {
        assert_eq!(Framework::from("React"), Framework::React);
        assert_eq!(Framework::from(" node "), Framework::NodeJs);
        assert_eq!(Framework::from("nodejs"), Framework::NodeJs);
    }

    #[test]
    fn framework_parse_unknown_is_custom() {
        let fw = Framework::from("COBOL");
        assert_eq!(fw, Framework::Custom("cobol".to_string()));
        assert!(fw.is_custom());
        assert_eq!(fw.to_string(), "cobol");
    }

    #[test]
    fn framework_serde_as_string() {
        let json = serde_json::to_string(&Framework::NodeJs).unwrap();
        assert_eq!(json, "\"nodejs\"");

        let back: Framework = serde_json::from_str("\"angular\"").unwrap();
        assert_eq!(back, Framework::Angular);
    }

    #[test]
    fn model_parse_aliases() {
        assert_eq!(ModelId::from("GPT-4"), ModelId::Gpt4);
        assert_eq!(ModelId::from("openai"), ModelId::Gpt4);
        assert_eq!(ModelId::from("claude"), ModelId::Claude);
        assert_eq!(ModelId::from("llama"), ModelId::Other("llama".into()));
        assert_eq!(ModelId::default(), ModelId::Gpt4);
    }

    #[test]
    fn builtin_names_round_trip() {
        for fw in Framework::BUILTIN {
            assert_eq!(Framework::from(fw.as_str()), fw);
        }
        for model in ModelId::BUILTIN {
            assert_eq!(ModelId::from(model.as_str()), model);
        }
    }

    proptest! {
        #[test]
        fn framework_name_is_stable(raw in "\\PC{0,24}") {
            let fw = Framework::from(raw.as_str());
            prop_assert_eq!(Framework::from(fw.to_string()), fw.clone());
            prop_assert_eq!(fw.as_str(), fw.as_str().trim().to_ascii_lowercase());
        }

        #[test]
        fn model_name_is_stable(raw in "\\PC{0,24}") {
            let model = ModelId::from(raw.as_str());
            prop_assert_eq!(ModelId::from(model.to_string()), model);
        }
    }
}
