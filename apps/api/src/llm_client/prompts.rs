// Shared prompt fragments.
// Chat and evaluation each define their own prompts.rs alongside them and
// build on the persona below.

/// Opening line of every system instruction.
pub const ASSISTANT_PERSONA: &str = "You are the VAVE Strategic Business AI Assistant.";

/// The four VAVE axes, in the order they are scored and displayed.
pub const VAVE_AXES: &str = "Fame, Fun, Money, Strategy";

/// Scoring scale the model must use for every axis.
pub const SCORE_SCALE_INSTRUCTION: &str = "Provide RAW scores from 1.0 to 5.0 for each metric.";
