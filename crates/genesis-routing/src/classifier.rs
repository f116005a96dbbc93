//! Keyword heuristics that map a prompt to a [`TaskCategory`].
//!
//! Categories are checked in a fixed priority order and the first keyword
//! hit wins. Matching is plain substring search on the lower-cased prompt,
//! so short keywords such as `ui` also match inside longer words.

use genesis_core::TaskCategory;

const CREATIVE_UI_KEYWORDS: &[&str] = &[
    "design",
    "ui",
    "ux",
    "interface",
    "layout",
    "styling",
    "beautiful",
    "modern",
    "responsive",
    "frontend",
];

const MODELING_3D_KEYWORDS: &[&str] = &["3d", "blender", "unity", "model", "animation", "game"];

const MULTIMODAL_KEYWORDS: &[&str] = &["image", "picture", "visual", "screenshot", "diagram"];

const ARCHITECTURE_KEYWORDS: &[&str] = &[
    "architecture",
    "structure",
    "design pattern",
    "scalable",
    "system design",
    "database schema",
];

const DEBUGGING_KEYWORDS: &[&str] = &[
    "debug",
    "fix",
    "error",
    "bug",
    "issue",
    "problem",
    "not working",
    "broken",
];

const PLANNING_KEYWORDS: &[&str] = &[
    "plan",
    "breakdown",
    "steps",
    "how to",
    "implement",
    "build",
    "create project",
];

const REFACTORING_KEYWORDS: &[&str] = &["refactor", "improve", "optimize", "clean", "rewrite"];

const FAST_SIMPLE_KEYWORDS: &[&str] = &["simple", "basic", "quick", "small"];

/// Prompts with at least this many words are never `fast_simple`.
const FAST_SIMPLE_MAX_WORDS: usize = 20;

/// Keyword table in priority order; `fast_simple` is handled separately.
const KEYWORD_TABLE: &[(TaskCategory, &[&str])] = &[
    (TaskCategory::CreativeUi, CREATIVE_UI_KEYWORDS),
    (TaskCategory::Modeling3d, MODELING_3D_KEYWORDS),
    (TaskCategory::Multimodal, MULTIMODAL_KEYWORDS),
    (TaskCategory::Architecture, ARCHITECTURE_KEYWORDS),
    (TaskCategory::Debugging, DEBUGGING_KEYWORDS),
    (TaskCategory::Planning, PLANNING_KEYWORDS),
    (TaskCategory::Refactoring, REFACTORING_KEYWORDS),
];

/// Classifies a prompt into exactly one task category.
///
/// Never fails; prompts matching nothing fall back to
/// [`TaskCategory::CodeGeneration`].
pub fn classify(prompt: &str) -> TaskCategory {
    let prompt_lower = prompt.to_lowercase();

    if let Some((category, _)) = KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| contains_any(&prompt_lower, keywords))
    {
        return *category;
    }

    if prompt.split_whitespace().count() < FAST_SIMPLE_MAX_WORDS
        && contains_any(&prompt_lower, FAST_SIMPLE_KEYWORDS)
    {
        return TaskCategory::FastSimple;
    }

    TaskCategory::CodeGeneration
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}
