//! Formula lexer and parser.
//!
//! The parser is recursive descent and builds the thunk tree directly while
//! consuming characters; there is no separate AST stage. Call sites keep
//! their function name as text — the registry lookup happens only when the
//! call-site thunk is forced, so an unknown function in a never-taken branch
//! is not an error.

use std::rc::Rc;

use crate::error::FormulaError;
use crate::eval::Thunk;
use crate::value::Value;

/// Index-addressed cursor over an immutable character buffer.
///
/// The previous character is derived from the cursor rather than kept in a
/// mutable field; it is needed to recognize a backslash-escaped quote inside
/// a string literal.
struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Scanner {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn prev(&self) -> Option<char> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.chars.get(i))
            .copied()
    }

    fn bump(&mut self) {
        if self.pos < self.chars.len() {
            self.pos += 1;
        }
    }

    /// Whitespace (including newlines) is insignificant between tokens and
    /// never skipped inside string literals.
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// The two most recently consumed characters, kept for syntax-error
    /// context.
    fn recent(&self) -> String {
        let start = self.pos.saturating_sub(2);
        self.chars[start..self.pos].iter().collect()
    }
}

/// Parse one complete formula into its root thunk.
///
/// The root accepts the full argument production (string and integer
/// literals included), so `"hello"` or `5` on their own render as expected.
/// Trailing non-whitespace input is a fatal syntax error.
pub(crate) fn parse(input: &str) -> Result<Rc<Thunk>, FormulaError> {
    let mut parser = Parser {
        scanner: Scanner::new(input),
    };
    let root = parser.parse_arg()?;
    parser.scanner.skip_whitespace();
    if !parser.scanner.at_end() {
        return Err(parser.error("end of input"));
    }
    Ok(root)
}

struct Parser {
    scanner: Scanner,
}

impl Parser {
    fn error(&self, expected: impl Into<String>) -> FormulaError {
        FormulaError::Syntax {
            expected: expected.into(),
            near: self.scanner.recent(),
        }
    }

    /// `arg := string | number | formula`, disambiguated by first character.
    /// Names cannot start with a digit, so a leading digit always means an
    /// integer literal.
    fn parse_arg(&mut self) -> Result<Rc<Thunk>, FormulaError> {
        self.scanner.skip_whitespace();
        match self.scanner.peek() {
            Some('"') => self.parse_string(),
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            _ => self.parse_formula(),
        }
    }

    /// `formula := name '(' arglist? ')' | "true" | "false" | "null"`.
    ///
    /// The reserved literals are recognized only for a bare name; a name
    /// followed by `(` is always a call, even if it spells a keyword.
    fn parse_formula(&mut self) -> Result<Rc<Thunk>, FormulaError> {
        self.scanner.skip_whitespace();
        let name = self.parse_name()?;
        self.scanner.skip_whitespace();
        if self.scanner.peek() == Some('(') {
            self.scanner.bump();
            let args = self.parse_args()?;
            return Ok(Thunk::call(name, args));
        }
        match name.as_str() {
            "true" => Ok(Thunk::literal("true", Value::Bool(true))),
            "false" => Ok(Thunk::literal("false", Value::Bool(false))),
            "null" => Ok(Thunk::literal("", Value::Null)),
            _ => Err(self.error("`(`, `true`, `false`, or `null`")),
        }
    }

    /// `name := letter (letter|digit)*`.
    fn parse_name(&mut self) -> Result<String, FormulaError> {
        let mut name = String::new();
        match self.scanner.peek() {
            Some(c) if c.is_alphabetic() => {
                name.push(c);
                self.scanner.bump();
            }
            _ => return Err(self.error("a function name")),
        }
        while let Some(c) = self.scanner.peek() {
            if c.is_alphanumeric() {
                name.push(c);
                self.scanner.bump();
            } else {
                break;
            }
        }
        Ok(name)
    }

    /// Argument list up to and including the closing `)`. A list that is
    /// immediately `)` is a legal zero-argument call.
    fn parse_args(&mut self) -> Result<Vec<Rc<Thunk>>, FormulaError> {
        let mut args = Vec::new();
        loop {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                Some(')') => {
                    self.scanner.bump();
                    return Ok(args);
                }
                Some(',') => {
                    self.scanner.bump();
                }
                None => return Err(self.error("`)`")),
                _ => args.push(self.parse_arg()?),
            }
        }
    }

    /// String literal. A `"` preceded by `\` does not terminate the string;
    /// the backslash stays in the captured text — no unescaping pass is
    /// performed.
    fn parse_string(&mut self) -> Result<Rc<Thunk>, FormulaError> {
        self.scanner.bump();
        let mut raw = String::new();
        loop {
            match self.scanner.peek() {
                None => return Err(self.error("`\"`")),
                Some('"') if self.scanner.prev() != Some('\\') => {
                    self.scanner.bump();
                    break;
                }
                Some(c) => {
                    raw.push(c);
                    self.scanner.bump();
                }
            }
        }
        Ok(Thunk::literal(raw.clone(), Value::Text(raw)))
    }

    /// Integer literal: a maximal run of decimal digits.
    fn parse_number(&mut self) -> Result<Rc<Thunk>, FormulaError> {
        let mut digits = String::new();
        while let Some(c) = self.scanner.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.scanner.bump();
            } else {
                break;
            }
        }
        let value: i64 = digits
            .parse()
            .map_err(|_| self.error("an integer literal"))?;
        Ok(Thunk::literal(digits, Value::Int(value)))
    }
}
