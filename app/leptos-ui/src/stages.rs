//! Maps coordinator state to the user-facing progress strings shown while a
//! generation or analysis is in flight. Pure lookup, no I/O, no mutation.

use crate::generation::TabId;

/// Icon/message category for the progress panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Prompt,
    Image,
    Analysis,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Prompt => "prompt",
            Feature::Image => "image",
            Feature::Analysis => "analysis",
        }
    }
}

pub fn feature_for_tab(tab: TabId) -> Feature {
    match tab {
        TabId::Prompt => Feature::Prompt,
        TabId::Image => Feature::Image,
        TabId::Suggestions => Feature::Analysis,
    }
}

/// Progress string for a `(feature, stage)` pair. Unrecognized stages fall
/// back to a generic message instead of panicking. Stages are display
/// hints, not contract.
pub fn stage_message(feature: Feature, stage: &str) -> &'static str {
    match (feature, stage) {
        (Feature::Prompt, "initializing") => "Initializing AI system...",
        (Feature::Prompt, "processing") => "Processing your creative prompt...",
        (Feature::Prompt, "generating") => "Generating your unique moodboard...",
        (Feature::Prompt, "tokens_pending") => "Creating design tokens...",
        (Feature::Prompt, "tokens_generated") => "Design tokens ready! Head to Figma plugin...",
        (Feature::Prompt, "finalizing") => {
            "Almost there! Open your Figma plugin to generate the design"
        }

        (Feature::Image, "initializing") => "Preparing image processing...",
        (Feature::Image, "processing") => "Analyzing your image composition...",
        (Feature::Image, "generating") => "Creating matching design elements...",
        (Feature::Image, "tokens_pending") => "Generating design tokens...",
        (Feature::Image, "tokens_generated") => "Design tokens ready! Head to Figma plugin...",
        (Feature::Image, "finalizing") => {
            "Almost there! Open your Figma plugin to generate the design"
        }

        (Feature::Analysis, "initializing") => "Starting design analysis...",
        (Feature::Analysis, "processing") => "Analyzing design patterns...",
        (Feature::Analysis, "extracting") => "Extracting design principles...",
        (Feature::Analysis, "generating") => "Generating suggestions...",
        (Feature::Analysis, "finalizing") => "Preparing detailed feedback...",

        _ => "Processing...",
    }
}

/// Stages where the work has moved to the Figma plugin and the panel should
/// point the user there instead of spinning.
pub fn is_handoff_stage(stage: &str) -> bool {
    matches!(stage, "tokens_generated" | "finalizing")
}
