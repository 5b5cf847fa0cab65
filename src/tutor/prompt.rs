//! Prompt construction for the tutor service

use crate::history::CalculationResult;

/// Fixed system instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are a friendly, expert math tutor. \
    Provide step-by-step explanations for mathematical operations or word problems. \
    Use Markdown for formatting.";

/// Wrap a free-text user question.
pub fn build_query_prompt(text: &str) -> String {
    format!(
        "Solve this math problem or explain the logic. Keep it concise but educational. Context: {text}"
    )
}

/// Ask for a breakdown of a completed calculation.
pub fn build_explain_prompt(record: &CalculationResult) -> String {
    format!(
        "Explain why {} equals {}. Break down the operation.",
        record.expression, record.result
    )
}
