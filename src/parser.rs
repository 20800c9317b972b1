//! Parser for declarative SQL test scripts

use crate::connection::{Row, Rows, Value};
use crate::error::{Error, Result};

/// A single before-action declaration
#[derive(Debug, Clone, PartialEq)]
pub struct BeforeDecl {
    /// Optional description (empty when the script omits it)
    pub description: String,
    /// Operations in the action body
    pub ops: Vec<Op>,
    /// Line number of the declaration (for error reporting)
    pub line_num: usize,
}

/// A test-case declaration and the stands nested under it
#[derive(Debug, Clone, PartialEq)]
pub struct TestCaseDecl {
    /// Test case name (not required to be unique)
    pub name: String,
    /// Stands in declaration order
    pub stands: Vec<StandDecl>,
    /// Line number of the declaration
    pub line_num: usize,
}

/// A numbered stand declaration inside a test case
#[derive(Debug, Clone, PartialEq)]
pub struct StandDecl {
    /// Ordering key; need not be unique or contiguous across test cases
    pub key: i64,
    /// Operations in the action body
    pub ops: Vec<Op>,
    /// Line number of the declaration
    pub line_num: usize,
}

/// One operation in a step body, drawn from the pre-registered vocabulary
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Run a query, discarding the result
    Execute { query: String },
    /// Run a query and compare the result rows to a literal
    ExpectQuery { query: String, expected: Rows },
    /// Compare two literal values
    ExpectEq { actual: Value, expected: Value },
    /// Compare the connection's last insert id to a literal
    ExpectLastInsertId { expected: i64 },
}

/// The parsed script: before-actions and test cases, declaration order intact
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    /// Before-actions in declaration order
    pub befores: Vec<BeforeDecl>,
    /// Test cases in declaration order
    pub cases: Vec<TestCaseDecl>,
}

/// Which block the most recent declaration opened
enum OpenBlock {
    None,
    Before,
    Stand,
}

/// Parse a test script into its declarative structure
///
/// The script is line-oriented: `before`, `test_case` and `stand` lines open
/// blocks, and every other non-blank line is an operation attached to the
/// most recently opened before or stand block. `#` starts a comment;
/// indentation is insignificant.
///
/// # Errors
/// Returns a script error naming the offending line when the content cannot
/// be interpreted into this structure.
pub fn parse(content: &str) -> Result<Script> {
    let mut script = Script::default();
    let mut open = OpenBlock::None;

    for (i, line) in content.lines().enumerate() {
        let line_num = i + 1; // 1-based line numbering
        let trimmed = line.trim();

        // Skip blank lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (word, rest) = split_directive(trimmed);
        match word {
            "before" => {
                let mut cursor = LineCursor::new(rest, line_num);
                let description = if cursor.at_end() {
                    String::new()
                } else {
                    cursor.quoted_string()?
                };
                cursor.expect_end()?;
                script.befores.push(BeforeDecl {
                    description,
                    ops: Vec::new(),
                    line_num,
                });
                open = OpenBlock::Before;
            }
            "test_case" => {
                let mut cursor = LineCursor::new(rest, line_num);
                let name = cursor.name()?;
                cursor.expect_end()?;
                script.cases.push(TestCaseDecl {
                    name,
                    stands: Vec::new(),
                    line_num,
                });
                // Operations may not attach to the test case itself
                open = OpenBlock::None;
            }
            "stand" => {
                let mut cursor = LineCursor::new(rest, line_num);
                let key = cursor.integer()?;
                cursor.expect_end()?;
                let case = script.cases.last_mut().ok_or_else(|| {
                    Error::script_error(line_num, "stand declared outside a test_case")
                })?;
                case.stands.push(StandDecl {
                    key,
                    ops: Vec::new(),
                    line_num,
                });
                open = OpenBlock::Stand;
            }
            _ => {
                let op = parse_op(word, rest, line_num)?;
                let ops = match open {
                    OpenBlock::Before => script.befores.last_mut().map(|b| &mut b.ops),
                    OpenBlock::Stand => script
                        .cases
                        .last_mut()
                        .and_then(|c| c.stands.last_mut())
                        .map(|s| &mut s.ops),
                    OpenBlock::None => None,
                };
                match ops {
                    Some(ops) => ops.push(op),
                    None => {
                        return Err(Error::script_error(
                            line_num,
                            format!("operation '{}' outside a before or stand block", word),
                        ))
                    }
                }
            }
        }
    }

    Ok(script)
}

/// Split a line into its leading directive word and the remainder
fn split_directive(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(pos) => (&line[..pos], line[pos..].trim_start()),
        None => (line, ""),
    }
}

/// Parse an operation line into an Op
fn parse_op(name: &str, rest: &str, line_num: usize) -> Result<Op> {
    let mut cursor = LineCursor::new(rest, line_num);
    let op = match name {
        "execute" => Op::Execute {
            query: cursor.quoted_string()?,
        },
        "expect_query" => {
            let query = cursor.quoted_string()?;
            let expected = cursor.rows()?;
            Op::ExpectQuery { query, expected }
        }
        "expect_eq" => {
            let actual = cursor.value()?;
            let expected = cursor.value()?;
            Op::ExpectEq { actual, expected }
        }
        "expect_last_insert_id" => Op::ExpectLastInsertId {
            expected: cursor.integer()?,
        },
        _ => {
            return Err(Error::script_error(
                line_num,
                format!("unknown operation '{}'", name),
            ))
        }
    };
    cursor.expect_end()?;
    Ok(op)
}

/// Character scanner over the remainder of one line
struct LineCursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line_num: usize,
}

impl<'a> LineCursor<'a> {
    fn new(input: &'a str, line_num: usize) -> Self {
        LineCursor {
            chars: input.chars().peekable(),
            line_num,
        }
    }

    fn err(&self, message: impl Into<String>) -> Error {
        Error::script_error(self.line_num, message)
    }

    fn skip_ws(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.chars.peek().is_none()
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_ws();
        match self.chars.peek() {
            None => Ok(()),
            Some(&c) => Err(self.err(format!("unexpected trailing input starting at '{}'", c))),
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        self.skip_ws();
        match self.chars.next() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.err(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.err(format!("expected '{}'", expected))),
        }
    }

    /// A double- or single-quoted string with escape sequences
    fn quoted_string(&mut self) -> Result<String> {
        self.skip_ws();
        let quote = match self.chars.next() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Err(self.err("expected a quoted string")),
        };

        let mut out = String::new();
        loop {
            match self.chars.next() {
                None => return Err(self.err("unterminated string literal")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.chars.next() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('\\') => out.push('\\'),
                    Some('"') => out.push('"'),
                    Some('\'') => out.push('\''),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => return Err(self.err("unterminated string literal")),
                },
                Some(c) => out.push(c),
            }
        }
    }

    /// A run of non-delimiter characters
    fn bare_word(&mut self) -> Result<String> {
        self.skip_ws();
        let mut out = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || c == ',' || c == ']' {
                break;
            }
            out.push(c);
            self.chars.next();
        }
        if out.is_empty() {
            Err(self.err("expected a word"))
        } else {
            Ok(out)
        }
    }

    /// A name, quoted or bare
    fn name(&mut self) -> Result<String> {
        self.skip_ws();
        match self.chars.peek() {
            Some(&('"' | '\'')) => self.quoted_string(),
            _ => self.bare_word(),
        }
    }

    /// A signed 64-bit integer literal
    fn integer(&mut self) -> Result<i64> {
        self.skip_ws();
        let mut digits = String::new();
        if self.chars.peek() == Some(&'-') {
            digits.push('-');
            self.chars.next();
        }
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        if digits.is_empty() || digits == "-" {
            return Err(self.err("expected an integer"));
        }
        digits
            .parse::<i64>()
            .map_err(|_| self.err("integer out of range"))
    }

    /// A value literal: integer, quoted string, or null
    fn value(&mut self) -> Result<Value> {
        self.skip_ws();
        match self.chars.peek() {
            Some(&('"' | '\'')) => Ok(Value::Text(self.quoted_string()?)),
            Some(&c) if c == '-' || c.is_ascii_digit() => Ok(Value::Integer(self.integer()?)),
            Some(_) => {
                let word = self.bare_word()?;
                if word == "null" {
                    Ok(Value::Null)
                } else {
                    Err(self.err(format!("expected a value literal, found '{}'", word)))
                }
            }
            None => Err(self.err("expected a value literal")),
        }
    }

    /// A rows literal like `[[1, "bob"], [2, null]]`
    fn rows(&mut self) -> Result<Rows> {
        self.expect_char('[')?;
        let mut rows = Vec::new();
        self.skip_ws();
        if self.eat(']') {
            return Ok(rows);
        }
        loop {
            rows.push(self.row()?);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            self.expect_char(']')?;
            return Ok(rows);
        }
    }

    fn row(&mut self) -> Result<Row> {
        self.expect_char('[')?;
        let mut row = Vec::new();
        self.skip_ws();
        if self.eat(']') {
            return Ok(row);
        }
        loop {
            row.push(self.value()?);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            self.expect_char(']')?;
            return Ok(row);
        }
    }
}
