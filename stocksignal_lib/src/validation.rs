use crate::error::AnalysisError;

/// Normalise a user-entered ticker: strip ASCII control characters, trim
/// whitespace, uppercase. Blank input is rejected before any request is made.
pub fn validate_symbol(input: &str) -> Result<String, AnalysisError> {
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_uppercase();
    if sanitized.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    Ok(sanitized)
}
