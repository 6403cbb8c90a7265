//! Amount-entry calculator behind the transaction amount field.
//!
//! The calculator evaluates a left-to-right chain of binary operations typed
//! on a keypad. Every operator press evaluates what is pending immediately,
//! so there is no operator precedence: `2 + 3 × 4 =` gives `20`.
//!
//! # States
//!
//! | Phase                   | Entered by                          | Left by                       |
//! |-------------------------|-------------------------------------|-------------------------------|
//! | `Empty`                 | start, `C`                          | digit, decimal point          |
//! | `EnteringOperand`       | digit or `.` with nothing pending   | operator                      |
//! | `OperatorPending`       | operator                            | digit, `.`, another operator  |
//! | `EnteringSecondOperand` | digit or `.` after an operator      | operator, `=`                 |
//! | `Result`                | `=`                                 | digit, `.`, operator          |
//! | `Error`                 | division by zero, failed apply      | digit, `.`, `C`               |
//!
//! Results are rounded to ten decimal places so float noise never reaches
//! the display (`0.1 + 0.2` shows `0.3`). Division by zero is not an error
//! value in the Rust sense: the display switches to a translated message and
//! the state keeps accepting keys.
//!
//! # Example
//!
//! ```
//! use finance_core::calculations::{CalculatorState, Key, Operator};
//! use finance_core::Translator;
//!
//! let state = [
//!     Key::Digit(1),
//!     Key::Digit(2),
//!     Key::Decimal,
//!     Key::Digit(5),
//!     Key::Operator(Operator::Multiply),
//!     Key::Digit(2),
//!     Key::Equals,
//! ]
//! .into_iter()
//! .fold(CalculatorState::new(), |state, key| state.reduce(key));
//!
//! assert_eq!(state.display_text(&Translator::default()), "25");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::normalize_float;
use crate::i18n::{MessageKey, Translator};

/// Longest operand the keypad accepts, in characters.
pub const MAX_INPUT_LEN: usize = 15;

/// Decimal places kept in computed results.
pub const RESULT_DECIMAL_PLACES: u32 = 10;

/// A binary arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Keypad label.
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    fn evaluate(
        self,
        lhs: f64,
        rhs: f64,
    ) -> Result<f64, MessageKey> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide if rhs == 0.0 => Err(MessageKey::DivisionByZero),
            Self::Divide => Ok(lhs / rhs),
        }
    }
}

/// A keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A decimal digit, `0..=9`.
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
}

impl Key {
    /// Maps a keypad character to its key.
    ///
    /// Accepts ASCII operators as well as `×`/`x` and `÷`; `C` clears.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| Self::Digit(d as u8)),
            '.' => Some(Self::Decimal),
            '+' => Some(Self::Operator(Operator::Add)),
            '-' => Some(Self::Operator(Operator::Subtract)),
            '*' | 'x' | 'X' | '×' => Some(Self::Operator(Operator::Multiply)),
            '/' | '÷' => Some(Self::Operator(Operator::Divide)),
            '=' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            _ => None,
        }
    }
}

/// What the calculator screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Display {
    /// A numeric literal exactly as typed or computed, e.g. `"12."`.
    Operand(String),
    /// A translated message shown instead of a number.
    Message(MessageKey),
}

impl Display {
    pub fn operand(&self) -> Option<&str> {
        match self {
            Self::Operand(text) => Some(text),
            Self::Message(_) => None,
        }
    }

    pub fn is_message(&self) -> bool {
        matches!(self, Self::Message(_))
    }
}

/// Where the calculator is in its input cycle; derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    EnteringOperand,
    OperatorPending,
    EnteringSecondOperand,
    Result,
    Error,
}

/// The calculator's complete runtime state.
///
/// Invariant: `operator` is set exactly when `previous_operand` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorState {
    display: Display,
    current_operand: Option<String>,
    previous_operand: Option<String>,
    operator: Option<Operator>,
    awaiting_next_operand: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: Display::Operand("0".to_string()),
            current_operand: None,
            previous_operand: None,
            operator: None,
            awaiting_next_operand: false,
        }
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the display with an existing amount.
    ///
    /// The seeded value behaves like a finished result: operators build on
    /// it and the next digit replaces it.
    pub fn from_value(value: f64) -> Self {
        match format_result(value) {
            Ok(text) => Self {
                display: Display::Operand(text.clone()),
                current_operand: Some(text),
                awaiting_next_operand: true,
                ..Self::default()
            },
            Err(_) => {
                warn!(value, "ignoring non-finite initial calculator value");
                Self::default()
            }
        }
    }

    /// Seeds the display from the text of a form field.
    ///
    /// Blank or unparseable text starts from zero.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        match trimmed.parse::<f64>() {
            Ok(value) => Self::from_value(value),
            Err(error) => {
                warn!(input = %text, %error, "ignoring unparseable initial calculator value");
                Self::default()
            }
        }
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Text for the screen; messages are looked up with `translator`.
    pub fn display_text<'a>(
        &'a self,
        translator: &Translator,
    ) -> &'a str {
        match &self.display {
            Display::Operand(text) => text,
            Display::Message(key) => translator.translate(*key),
        }
    }

    pub fn current_operand(&self) -> Option<&str> {
        self.current_operand.as_deref()
    }

    pub fn previous_operand(&self) -> Option<&str> {
        self.previous_operand.as_deref()
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn is_awaiting_next_operand(&self) -> bool {
        self.awaiting_next_operand
    }

    pub fn phase(&self) -> Phase {
        if self.display.is_message() {
            return Phase::Error;
        }
        match (self.operator, self.awaiting_next_operand) {
            (Some(_), true) => Phase::OperatorPending,
            (Some(_), false) => Phase::EnteringSecondOperand,
            (None, true) => Phase::Result,
            (None, false) if self.current_operand.is_none() => Phase::Empty,
            (None, false) => Phase::EnteringOperand,
        }
    }

    /// Returns the state that results from pressing `key`.
    pub fn reduce(
        &self,
        key: Key,
    ) -> Self {
        let mut next = self.clone();
        next.press(key);
        next
    }

    /// Applies `key` in place.
    pub fn press(
        &mut self,
        key: Key,
    ) {
        match key {
            Key::Digit(digit) => self.input_digit(digit),
            Key::Decimal => self.input_decimal(),
            Key::Operator(operator) => self.perform_operation(operator),
            Key::Equals => self.handle_equals(),
            Key::Clear => self.clear(),
        }
        debug!(?key, display = ?self.display, phase = ?self.phase(), "calculator key");
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Parses the display for the host form.
    ///
    /// Returns `None` and shows the invalid-format message when the display
    /// is not a number.
    pub fn apply(&mut self) -> Option<f64> {
        let value = self
            .display
            .operand()
            .and_then(|text| text.parse::<f64>().ok())
            .filter(|value| value.is_finite());

        if value.is_none() {
            warn!(display = ?self.display, "calculator display is not a number");
            self.fail(MessageKey::InvalidFormat);
        }
        value
    }

    fn starts_fresh_operand(&self) -> bool {
        self.awaiting_next_operand || self.display.is_message()
    }

    fn input_digit(
        &mut self,
        digit: u8,
    ) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            warn!(digit, "ignoring non-decimal keypad digit");
            return;
        };

        let next = match self.display.operand() {
            Some("0") if !self.starts_fresh_operand() => ch.to_string(),
            Some(current) if !self.starts_fresh_operand() => format!("{current}{ch}"),
            _ => ch.to_string(),
        };
        self.set_operand(next);
    }

    fn input_decimal(&mut self) {
        let next = match self.display.operand() {
            Some(current) if !self.starts_fresh_operand() => {
                if current.contains('.') {
                    return;
                }
                format!("{current}.")
            }
            _ => "0.".to_string(),
        };
        self.set_operand(next);
    }

    fn set_operand(
        &mut self,
        text: String,
    ) {
        if text.len() > MAX_INPUT_LEN {
            debug!(len = text.len(), "operand at maximum length, key dropped");
            return;
        }
        self.display = Display::Operand(text.clone());
        self.current_operand = Some(text);
        self.awaiting_next_operand = false;
    }

    fn perform_operation(
        &mut self,
        operator: Operator,
    ) {
        if self.display.is_message() {
            debug!("operator ignored while an error is shown");
            return;
        }

        match (self.operator, self.awaiting_next_operand) {
            // Pressing another operator before the next operand only swaps it.
            (Some(_), true) => {}
            (Some(pending), false) => match self.compute(pending) {
                Ok(result) => {
                    self.display = Display::Operand(result.clone());
                    self.previous_operand = Some(result);
                    self.current_operand = None;
                }
                Err(key) => {
                    self.fail(key);
                    return;
                }
            },
            (None, _) => {
                self.previous_operand = self.display.operand().map(str::to_string);
                self.current_operand = None;
            }
        }

        self.operator = Some(operator);
        self.awaiting_next_operand = true;
    }

    fn handle_equals(&mut self) {
        if self.starts_fresh_operand() || self.previous_operand.is_none() {
            return;
        }
        let Some(operator) = self.operator else {
            return;
        };

        match self.compute(operator) {
            Ok(result) => {
                self.display = Display::Operand(result.clone());
                self.current_operand = Some(result);
                self.previous_operand = None;
                self.operator = None;
                self.awaiting_next_operand = true;
            }
            Err(key) => self.fail(key),
        }
    }

    fn compute(
        &self,
        operator: Operator,
    ) -> Result<String, MessageKey> {
        let lhs = self.previous_operand.as_deref().map(parse_operand);
        let rhs = self
            .current_operand
            .as_deref()
            .or(self.display.operand())
            .map(parse_operand);

        let value = operator.evaluate(lhs.unwrap_or_default(), rhs.unwrap_or_default())?;
        format_result(value)
    }

    fn fail(
        &mut self,
        key: MessageKey,
    ) {
        debug!(?key, "calculator entered error state");
        self.display = Display::Message(key);
        self.current_operand = None;
        self.previous_operand = None;
        self.operator = None;
        self.awaiting_next_operand = true;
    }
}

/// Operands are built from keypad characters or formatted results, so
/// they always parse.
fn parse_operand(text: &str) -> f64 {
    text.parse().unwrap_or_default()
}

fn format_result(value: f64) -> Result<String, MessageKey> {
    if !value.is_finite() {
        return Err(MessageKey::Overflow);
    }
    // Magnitudes beyond `Decimal` keep the float's own rendering.
    Ok(normalize_float(value, RESULT_DECIMAL_PLACES)
        .map(|d| d.to_string())
        .unwrap_or_else(|| value.to_string()))
}

/// The calculator as embedded in an amount field.
///
/// The host supplies the starting state and a callback; `apply` hands the
/// final number to the callback and closes the widget.
pub struct AmountCalculator<F>
where
    F: FnMut(f64),
{
    state: CalculatorState,
    translator: Translator,
    on_apply: F,
    open: bool,
}

impl<F> AmountCalculator<F>
where
    F: FnMut(f64),
{
    pub fn open(
        state: CalculatorState,
        translator: Translator,
        on_apply: F,
    ) -> Self {
        Self {
            state,
            translator,
            on_apply,
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn display_text(&self) -> &str {
        self.state.display_text(&self.translator)
    }

    /// Keys pressed after the widget closed are ignored.
    pub fn press(
        &mut self,
        key: Key,
    ) {
        if !self.open {
            warn!(?key, "key pressed on a closed calculator");
            return;
        }
        self.state = self.state.reduce(key);
    }

    /// Returns `true` when the value was delivered and the widget closed.
    pub fn apply(&mut self) -> bool {
        if !self.open {
            return false;
        }
        match self.state.apply() {
            Some(value) => {
                (self.on_apply)(value);
                self.open = false;
                true
            }
            None => false,
        }
    }

    /// Closes without delivering a value.
    pub fn cancel(&mut self) {
        self.open = false;
    }
}
