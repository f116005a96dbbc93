use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Kind of generation request, used to pick a provider order and a prompt suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskCategory {
    /// User interface and visual design work
    #[serde(rename = "creative_ui")]
    CreativeUi,
    /// General code writing (the default category)
    #[serde(rename = "code_generation")]
    CodeGeneration,
    /// System and software architecture
    #[serde(rename = "architecture")]
    Architecture,
    /// Diagnosing and fixing defects
    #[serde(rename = "debugging")]
    Debugging,
    /// Short, simple requests suited to a fast model
    #[serde(rename = "fast_simple")]
    FastSimple,
    /// Requests involving images or other visual input
    #[serde(rename = "multimodal")]
    Multimodal,
    /// 3D modeling, animation and game content
    #[serde(rename = "3d_modeling")]
    Modeling3d,
    /// Breaking work down into steps
    #[serde(rename = "planning")]
    Planning,
    /// Restructuring or improving existing code
    #[serde(rename = "refactoring")]
    Refactoring,
}

impl TaskCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::CreativeUi,
        Self::CodeGeneration,
        Self::Architecture,
        Self::Debugging,
        Self::FastSimple,
        Self::Multimodal,
        Self::Modeling3d,
        Self::Planning,
        Self::Refactoring,
    ];

    /// Wire name of the category (lower-case, underscore separated).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreativeUi => "creative_ui",
            Self::CodeGeneration => "code_generation",
            Self::Architecture => "architecture",
            Self::Debugging => "debugging",
            Self::FastSimple => "fast_simple",
            Self::Multimodal => "multimodal",
            Self::Modeling3d => "3d_modeling",
            Self::Planning => "planning",
            Self::Refactoring => "refactoring",
        }
    }
}

impl Display for TaskCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = Error;

    /// Parses either the underscore or the hyphen spelling, case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| Error::InvalidRequest(format!("unknown task category: {value}")))
    }
}
