use std::collections::VecDeque;
use std::convert::Infallible;

use thiserror::Error;

use crate::InputSource;
use crate::game_logic::Input;
use crate::square::Square;

/// Error when parsing a click script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct ParseError(String);

/// A scriptable stand-in for a player clicking on the board.
///
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pending: VecDeque<Input>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional script for execution.
    ///
    /// Format:
    /// - Squares are 2 characters (e.g., "e2", "a1"), each one a click
    /// - Spaces and periods separate clicks; a period usually ends a move
    /// - `!` drops the current selection
    ///
    /// Examples:
    /// - `"e2e4."` - Click e2 then e4
    /// - `"e2. e4."` - Same, spread over two batches
    /// - `"e2. ! d2d4."` - Select e2, change your mind, play d2-d4
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let inputs = parse_script(script)?;
        self.pending.extend(inputs);
        Ok(())
    }

    /// Number of inputs not yet consumed.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Execute all pending inputs, calling the provided callback for each.
    pub fn drain<F>(&mut self, mut on_input: F)
    where
        F: FnMut(Input),
    {
        while let Some(input) = self.pending.pop_front() {
            on_input(input);
        }
    }
}

impl InputSource for ScriptedInput {
    type Error = Infallible;

    fn next_input(&mut self) -> Result<Option<Input>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}

/// Parse a click script into a list of inputs.
fn parse_script(script: &str) -> Result<Vec<Input>, ParseError> {
    let mut inputs = Vec::new();
    let mut current_token = String::new();

    for ch in script.chars() {
        match ch {
            '.' => flush_token(&mut current_token, &mut inputs)?,
            '!' => {
                flush_token(&mut current_token, &mut inputs)?;
                inputs.push(Input::Escape);
            }
            c if c.is_whitespace() => flush_token(&mut current_token, &mut inputs)?,
            _ => {
                current_token.push(ch);

                // Squares are exactly 2 characters (e.g., "e2", "a1")
                if current_token.len() == 2 {
                    flush_token(&mut current_token, &mut inputs)?;
                }
            }
        }
    }

    flush_token(&mut current_token, &mut inputs)?;
    Ok(inputs)
}

/// Turn the current token into a click and clear it.
fn flush_token(token: &mut String, inputs: &mut Vec<Input>) -> Result<(), ParseError> {
    if !token.is_empty() {
        let square: Square = token
            .trim()
            .parse()
            .map_err(|_| ParseError(token.clone()))?;
        inputs.push(Input::Click(square));
        token.clear();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(name: &str) -> Input {
        Input::Click(name.parse().expect("valid square"))
    }

    #[test]
    fn test_parse_clicks_and_escape() {
        let inputs = parse_script("e2e4. g8 ! f6.").unwrap();
        assert_eq!(
            inputs,
            vec![
                click("e2"),
                click("e4"),
                click("g8"),
                Input::Escape,
                click("f6")
            ]
        );
    }

    #[test]
    fn test_parse_error_invalid_square() {
        let mut input = ScriptedInput::new();
        let result = input.push_script("e2.  zz.");
        assert_eq!(result, Err(ParseError("zz".to_string())));
    }

    #[test]
    fn test_dangling_character_is_an_error() {
        assert_eq!(parse_script("e2. e"), Err(ParseError("e".to_string())));
    }

    #[test]
    fn test_parse_error_does_not_modify_state() {
        let mut input = ScriptedInput::new();

        input.push_script("e2. ").unwrap();
        let result = input.push_script("xx.");
        assert!(result.is_err());

        assert_eq!(input.pending(), 1);
        assert_eq!(input.next_input(), Ok(Some(click("e2"))));
        assert_eq!(input.next_input(), Ok(None));
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut input = ScriptedInput::new();
        input.push_script("a2a3. h7h6.").unwrap();

        let mut seen = Vec::new();
        input.drain(|i| seen.push(i));

        assert_eq!(seen.len(), 4);
        assert_eq!(input.pending(), 0);
    }
}
