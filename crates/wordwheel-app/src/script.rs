//! Input scripts: one JSON object per line.
//!
//! A line is either a pointer event (`{"kind": "down", "position": {...}}`)
//! or a button action (`{"action": "submit"}`). Blank lines and lines
//! starting with `#` are skipped.

use serde::Deserialize;
use thiserror::Error;
use wordwheel_core::PointerEvent;

/// Button presses available next to the wheel and rack.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Commit the current selection and keep tracing.
    Add,
    /// Drop the current selection.
    ClearSelection,
    /// Empty the word list.
    ClearWords,
    /// Hand the word list to the submit collaborator.
    Submit,
    ShuffleWheel,
    ShuffleRack,
    /// Empty every board cell.
    ResetBoard,
    /// Replace the rack contents.
    Refill { letters: Vec<char> },
    /// Replace the wheel letters.
    SetLetters { letters: Vec<char> },
}

/// One line of a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Pointer(PointerEvent),
    Action(Action),
}

#[derive(Debug, Error)]
#[error("Script line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Parse a single script line. Returns `Ok(None)` for blank and comment
/// lines. `line` is 1-based and only used for error reporting.
pub fn parse_line(line: usize, text: &str) -> Result<Option<ScriptStep>, ScriptError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|source| ScriptError { line, source })
}

/// Parse a whole script.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(step) = parse_line(index + 1, line)? {
            steps.push(step);
        }
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use wordwheel_core::PointerId;

    #[test]
    fn test_parse_mixed_script() {
        let script = r#"
# trace a word
{"kind": "down", "position": {"x": 10.0, "y": 20.0}}
{"kind": "move", "pointer": 4, "position": {"x": 11.0, "y": 21.0}}
{"kind": "cancel"}
{"action": "submit"}
{"action": "refill", "letters": ["Q", "I"]}
"#;
        let steps = parse_script(script).unwrap();
        assert_eq!(
            steps,
            vec![
                ScriptStep::Pointer(PointerEvent::Down {
                    pointer: PointerId::MOUSE,
                    position: Point::new(10.0, 20.0)
                }),
                ScriptStep::Pointer(PointerEvent::Move {
                    pointer: PointerId(4),
                    position: Point::new(11.0, 21.0)
                }),
                ScriptStep::Pointer(PointerEvent::Cancel { pointer: PointerId::MOUSE }),
                ScriptStep::Action(Action::Submit),
                ScriptStep::Action(Action::Refill { letters: vec!['Q', 'I'] }),
            ]
        );
    }

    #[test]
    fn test_error_reports_line() {
        let error = parse_script("{\"action\": \"submit\"}\n\n{\"action\": \"fly\"}").unwrap_err();
        assert_eq!(error.line, 3);
    }
}
