//! Formatting utilities used for CLI outputs.

/// Shorten long names for table cells ("Maximilian Rosenthal" → "Maximilian Ro...").
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut s: String = name.chars().take(keep).collect();
    s.push_str("...");
    s
}
