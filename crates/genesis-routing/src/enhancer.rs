//! Category guidance appended to prompts before they are sent.

use genesis_core::TaskCategory;

const CREATIVE_UI_GUIDANCE: &str = "Focus on creating modern, beautiful, and responsive UI/UX designs.
Use contemporary design patterns and best practices.
Include accessibility considerations.";

const CODE_GENERATION_GUIDANCE: &str = "Write clean, maintainable, and well-documented code.
Follow best practices and design patterns.
Include error handling where appropriate.";

const ARCHITECTURE_GUIDANCE: &str = "Focus on scalable, maintainable architecture.
Consider performance, security, and extensibility.
Explain your architectural decisions.";

const DEBUGGING_GUIDANCE: &str = "Analyze the problem systematically.
Provide clear explanations of the root cause.
Offer multiple solutions when applicable.";

const PLANNING_GUIDANCE: &str = "Break down the task into clear, actionable steps.
Consider dependencies and potential challenges.
Provide a realistic implementation roadmap.";

/// Instruction suffix for a category, if it has one.
pub const fn guidance(category: TaskCategory) -> Option<&'static str> {
    match category {
        TaskCategory::CreativeUi => Some(CREATIVE_UI_GUIDANCE),
        TaskCategory::CodeGeneration => Some(CODE_GENERATION_GUIDANCE),
        TaskCategory::Architecture => Some(ARCHITECTURE_GUIDANCE),
        TaskCategory::Debugging => Some(DEBUGGING_GUIDANCE),
        TaskCategory::Planning => Some(PLANNING_GUIDANCE),
        TaskCategory::FastSimple
        | TaskCategory::Multimodal
        | TaskCategory::Modeling3d
        | TaskCategory::Refactoring => None,
    }
}

/// Appends the category's instruction suffix to `prompt`.
///
/// Categories without a suffix get the prompt back unchanged.
pub fn enhance(prompt: &str, category: TaskCategory) -> String {
    match guidance(category) {
        Some(suffix) => format!("{prompt}\n\n{suffix}"),
        None => prompt.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_appends_suffix() {
        let enhanced = enhance("write a parser", TaskCategory::CodeGeneration);
        assert!(enhanced.starts_with("write a parser\n\n"));
        assert!(enhanced.ends_with("Include error handling where appropriate."));
    }

    #[test]
    fn test_enhance_leaves_other_categories_unchanged() {
        for category in [
            TaskCategory::FastSimple,
            TaskCategory::Multimodal,
            TaskCategory::Modeling3d,
            TaskCategory::Refactoring,
        ] {
            assert_eq!(enhance("prompt", category), "prompt");
        }
    }

    #[test]
    fn test_five_categories_have_guidance() {
        let with_guidance = TaskCategory::ALL
            .iter()
            .filter(|category| guidance(**category).is_some())
            .count();
        assert_eq!(with_guidance, 5);
    }
}
