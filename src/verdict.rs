//! Terminal classifications and how renderers should present them

use serde::{Serialize, Serializer};

/// Terminal classification produced by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    AISystem,
    LikelyAISystem,
    LikelyNotAISystem,
    BorderlineLikelyNotAISystem,
}

/// Badge style a renderer should use for a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictTone {
    Success,
    Info,
    Warning,
}

impl Verdict {
    /// Human-readable result line, as exported
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::AISystem => "AI system",
            Verdict::LikelyAISystem => "Likely an AI system",
            Verdict::LikelyNotAISystem => "Likely not an AI system",
            Verdict::BorderlineLikelyNotAISystem => {
                "Your solution is a borderline case. It likely falls outside the definition of AI system, \
                 but it is advisable to seek legal advice to confirm this."
            }
        }
    }

    /// Stable machine identifier
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::AISystem => "ai_system",
            Verdict::LikelyAISystem => "likely_ai_system",
            Verdict::LikelyNotAISystem => "likely_not_ai_system",
            Verdict::BorderlineLikelyNotAISystem => "borderline_likely_not_ai_system",
        }
    }

    pub fn tone(&self) -> VerdictTone {
        match self {
            Verdict::AISystem => VerdictTone::Success,
            Verdict::LikelyNotAISystem => VerdictTone::Info,
            Verdict::LikelyAISystem | Verdict::BorderlineLikelyNotAISystem => VerdictTone::Warning,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
