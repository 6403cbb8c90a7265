//! Text input for the calculator keypad.
//!
//! Each non-whitespace character is one button press. The calculator's own
//! keys come from [`Key::from_char`]; `A` is the host's apply button.

use finance_core::calculations::Key;
use thiserror::Error;

/// A button press on the amount-entry keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadEvent {
    Key(Key),
    Apply,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised keypad input '{character}' at position {position}")]
pub struct KeypadParseError {
    pub character: char,
    /// 1-based character position in the input line.
    pub position: usize,
}

pub fn parse_keys(input: &str) -> Result<Vec<KeypadEvent>, KeypadParseError> {
    input
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(idx, c)| match c {
            'a' | 'A' => Ok(KeypadEvent::Apply),
            _ => Key::from_char(c)
                .map(KeypadEvent::Key)
                .ok_or(KeypadParseError {
                    character: c,
                    position: idx + 1,
                }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use finance_core::calculations::Operator;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_digits_operators_and_apply() {
        let events = parse_keys("12.5 * 2 = A").unwrap();

        assert_eq!(
            events,
            vec![
                KeypadEvent::Key(Key::Digit(1)),
                KeypadEvent::Key(Key::Digit(2)),
                KeypadEvent::Key(Key::Decimal),
                KeypadEvent::Key(Key::Digit(5)),
                KeypadEvent::Key(Key::Operator(Operator::Multiply)),
                KeypadEvent::Key(Key::Digit(2)),
                KeypadEvent::Key(Key::Equals),
                KeypadEvent::Apply,
            ]
        );
    }

    #[test]
    fn accepts_unicode_operator_symbols() {
        let events = parse_keys("6÷3×2").unwrap();

        assert_eq!(events[1], KeypadEvent::Key(Key::Operator(Operator::Divide)));
        assert_eq!(events[3], KeypadEvent::Key(Key::Operator(Operator::Multiply)));
    }

    #[test]
    fn blank_line_is_no_events() {
        assert_eq!(parse_keys("   "), Ok(Vec::new()));
    }

    #[test]
    fn reports_first_bad_character_and_position() {
        let result = parse_keys("1 + 2 % 3");

        assert_eq!(
            result,
            Err(KeypadParseError {
                character: '%',
                position: 7,
            })
        );
    }
}
