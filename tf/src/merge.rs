//! Slot-filling merger
//!
//! Folds newly extracted fields onto the fields already known for an
//! in-progress request, distinguishing a first-time fill from a correction
//! (the user changed their mind). Corrections are reported with
//! human-readable messages so the conversational layer can acknowledge
//! them out loud - silently overwriting a date or destination is a costly
//! mistake in this domain.

use serde_json::{Map, Value};
use tracing::debug;

/// Result of one merge call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    /// Keys that were written (fills and corrections)
    pub updated_keys: Vec<String>,
    /// Human-readable "changed X from A to B" messages, one per correction
    pub changes: Vec<String>,
    /// Whether any prior value was overwritten
    pub is_correction: bool,
}

/// Merge extracted fields onto the known request fields
///
/// - Null/empty incoming values are ignored; known data is never erased.
/// - A key with no prior value is filled silently.
/// - A key with a different prior value is a correction: overwritten,
///   recorded in `changes`, and `is_correction` is set.
/// - A key with an equal prior value is a no-op.
pub fn merge_fields(current: &mut Map<String, Value>, incoming: &Map<String, Value>) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for (key, new_value) in incoming {
        if is_empty_value(new_value) {
            continue;
        }
        match current.get(key) {
            Some(old_value) if old_value == new_value => {}
            Some(old_value) if !is_empty_value(old_value) => {
                let message = format!(
                    "changed {} from {} to {}",
                    key,
                    display_value(old_value),
                    display_value(new_value)
                );
                debug!(%key, "merge_fields: correction");
                outcome.changes.push(message);
                outcome.is_correction = true;
                outcome.updated_keys.push(key.clone());
                current.insert(key.clone(), new_value.clone());
            }
            _ => {
                // No prior value (or an empty placeholder): plain fill
                outcome.updated_keys.push(key.clone());
                current.insert(key.clone(), new_value.clone());
            }
        }
    }

    outcome
}

/// Null and blank strings carry no information
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Render a value for a change message without JSON string quotes
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_first_fill_is_not_a_correction() {
        let mut current = Map::new();
        let incoming = fields(&[("destination", json!("Phuket"))]);

        let outcome = merge_fields(&mut current, &incoming);
        assert_eq!(outcome.updated_keys, vec!["destination".to_string()]);
        assert!(!outcome.is_correction);
        assert!(outcome.changes.is_empty());
        assert_eq!(current["destination"], "Phuket");
    }

    #[test]
    fn test_overwrite_is_a_correction_with_message() {
        let mut current = fields(&[
            ("destination", json!("Phuket")),
            ("date", json!("2026-09-01")),
        ]);
        let incoming = fields(&[("destination", json!("Seoul"))]);

        let outcome = merge_fields(&mut current, &incoming);
        assert!(outcome.is_correction);
        assert_eq!(outcome.changes.len(), 1);
        assert!(outcome.changes[0].contains("Phuket"));
        assert!(outcome.changes[0].contains("Seoul"));
        assert_eq!(current["destination"], "Seoul");
        // Unrelated fields are untouched
        assert_eq!(current["date"], "2026-09-01");
    }

    #[test]
    fn test_equal_value_is_a_no_op() {
        let mut current = fields(&[("destination", json!("Phuket"))]);
        let incoming = fields(&[("destination", json!("Phuket"))]);

        let outcome = merge_fields(&mut current, &incoming);
        assert!(outcome.updated_keys.is_empty());
        assert!(!outcome.is_correction);
    }

    #[test]
    fn test_empty_values_never_erase_known_data() {
        let mut current = fields(&[("destination", json!("Phuket"))]);
        let incoming = fields(&[
            ("destination", Value::Null),
            ("origin", json!("   ")),
        ]);

        let outcome = merge_fields(&mut current, &incoming);
        assert!(outcome.updated_keys.is_empty());
        assert_eq!(current["destination"], "Phuket");
        assert!(!current.contains_key("origin"));
    }

    #[test]
    fn test_filling_over_empty_placeholder_is_not_a_correction() {
        let mut current = fields(&[("origin", json!(""))]);
        let incoming = fields(&[("origin", json!("BKK"))]);

        let outcome = merge_fields(&mut current, &incoming);
        assert_eq!(outcome.updated_keys, vec!["origin".to_string()]);
        assert!(!outcome.is_correction);
        assert_eq!(current["origin"], "BKK");
    }

    #[test]
    fn test_mixed_fill_and_correction() {
        let mut current = fields(&[("destination", json!("Phuket"))]);
        let incoming = fields(&[
            ("destination", json!("Seoul")),
            ("date", json!("2026-09-01")),
        ]);

        let outcome = merge_fields(&mut current, &incoming);
        assert!(outcome.is_correction);
        assert_eq!(outcome.updated_keys.len(), 2);
        assert_eq!(outcome.changes.len(), 1);
    }

    #[test]
    fn test_non_string_values_render_in_messages() {
        let mut current = fields(&[("travelers", json!(2))]);
        let incoming = fields(&[("travelers", json!(4))]);

        let outcome = merge_fields(&mut current, &incoming);
        assert_eq!(outcome.changes[0], "changed travelers from 2 to 4");
    }
}
