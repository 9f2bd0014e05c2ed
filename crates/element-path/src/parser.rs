//! Element path text parser.

use std::collections::BTreeMap;

use tracing::warn;

use crate::errors::PathError;
use crate::escape::unescape_value;
use crate::path::{ElementPath, PATH_PREFIX};
use crate::segment::{normalize_attribute_name, role_is_valid, PathSegment};

const CONTEXT_WIDTH: usize = 24;

/// Single-pass cursor over the text after the scheme prefix.
pub struct Parser {
    chars: Vec<char>,
    position: usize,
    segment_index: usize,
}

impl Parser {
    fn new(body: &str) -> Self {
        Self {
            chars: body.chars().collect(),
            position: 0,
            segment_index: 0,
        }
    }

    /// Parses a full path, including the `macos://ui/` prefix.
    pub fn parse(text: &str) -> Result<ElementPath, PathError> {
        let trimmed = text.trim();
        let Some(body) = trimmed.strip_prefix(PATH_PREFIX) else {
            return Err(PathError::InvalidPathPrefix {
                expected: PATH_PREFIX,
                found: trimmed.chars().take(PATH_PREFIX.len() + 8).collect(),
            });
        };
        if body.is_empty() {
            return Err(PathError::EmptyPath);
        }
        Parser::new(body).parse_path()
    }

    /// Parses one segment such as `AXButton[@AXTitle="OK"][1]`.
    pub fn parse_segment_text(text: &str) -> Result<PathSegment, PathError> {
        let mut parser = Parser::new(text.trim());
        let segment = parser.parse_segment()?;
        if let Some(ch) = parser.peek() {
            return Err(PathError::attribute(
                0,
                parser.context_from(parser.position),
                format!("unexpected '{ch}' after segment"),
            ));
        }
        Ok(segment)
    }

    fn parse_path(&mut self) -> Result<ElementPath, PathError> {
        let mut segments = Vec::new();
        loop {
            segments.push(self.parse_segment()?);
            match self.peek() {
                None => break,
                Some('/') => {
                    self.next();
                    self.segment_index += 1;
                }
                Some(ch) => {
                    return Err(PathError::attribute(
                        self.segment_index,
                        self.context_from(self.position),
                        format!("unexpected '{ch}' after segment"),
                    ))
                }
            }
        }
        ElementPath::new(segments)
    }

    fn parse_segment(&mut self) -> Result<PathSegment, PathError> {
        let role = self.parse_role()?;
        let mut attributes = BTreeMap::new();
        let mut index: Option<i64> = None;

        loop {
            match self.peek() {
                Some('[') if self.peek_at(1) == Some('@') => {
                    let clause_start = self.position;
                    let (name, value) = self.parse_attribute_clause()?;
                    if attributes.contains_key(&name) {
                        return Err(PathError::attribute(
                            self.segment_index,
                            self.context_from(clause_start),
                            format!("duplicate attribute '{name}'"),
                        ));
                    }
                    attributes.insert(name, value);
                }
                Some('[') => {
                    let (token, value) = self.parse_bracket_index()?;
                    self.set_index(&mut index, token, value)?;
                }
                Some('#') => {
                    self.next();
                    let token = self.take_while(|ch| ch != '/' && ch != '[');
                    let value = self.parse_index_token(&token)?;
                    self.set_index(&mut index, token, value)?;
                }
                _ => break,
            }
        }

        Ok(PathSegment::from_parts(role, attributes, index))
    }

    fn parse_role(&mut self) -> Result<String, PathError> {
        let start = self.position;
        let role = self.take_while(|ch| ch != '[' && ch != '#' && ch != '/');
        if role.is_empty() {
            return Err(PathError::EmptySegment {
                segment_index: self.segment_index,
            });
        }
        if !role_is_valid(&role) {
            return Err(PathError::attribute(
                self.segment_index,
                self.context_from(start),
                "attribute clauses must be written as [@name=\"value\"]",
            ));
        }
        Ok(role)
    }

    fn parse_attribute_clause(&mut self) -> Result<(String, String), PathError> {
        let clause_start = self.position;
        // '[' and '@'
        self.position += 2;

        let name = self.take_while(|ch| !matches!(ch, '=' | ']' | '[' | '/'));
        if self.peek() != Some('=') {
            return Err(PathError::attribute(
                self.segment_index,
                self.context_from(clause_start),
                "expected '=' after attribute name",
            ));
        }
        self.next();

        let name = name.trim();
        if name.is_empty() {
            return Err(PathError::attribute(
                self.segment_index,
                self.context_from(clause_start),
                "attribute name is empty",
            ));
        }

        let value = match (self.peek(), self.peek_at(1)) {
            (Some('"'), _) => {
                self.next();
                self.read_quoted(clause_start)?
            }
            (Some('\\'), Some('"')) => {
                self.position += 2;
                self.read_doubly_escaped(clause_start)?
            }
            _ => {
                return Err(PathError::attribute(
                    self.segment_index,
                    self.context_from(clause_start),
                    "attribute value must be double-quoted",
                ))
            }
        };

        if self.next() != Some(']') {
            return Err(PathError::attribute(
                self.segment_index,
                self.context_from(clause_start),
                "expected ']' after attribute value",
            ));
        }

        Ok((normalize_attribute_name(name), value))
    }

    fn read_quoted(&mut self, clause_start: usize) -> Result<String, PathError> {
        let mut raw = String::new();
        loop {
            match self.next() {
                Some('"') => return Ok(unescape_value(&raw)),
                Some('\\') => {
                    raw.push('\\');
                    match self.next() {
                        Some(escaped) => raw.push(escaped),
                        None => break,
                    }
                }
                Some(ch) => raw.push(ch),
                None => break,
            }
        }
        Err(PathError::attribute(
            self.segment_index,
            self.context_from(clause_start),
            "unterminated attribute value",
        ))
    }

    /// Reads a value whose delimiters arrived as `\"`, i.e. the whole path was
    /// escaped once more by an upstream JSON layer. The outer level is decoded
    /// here; a `\"` closes the value only when the decoded text does not end
    /// in a pending escape.
    fn read_doubly_escaped(&mut self, clause_start: usize) -> Result<String, PathError> {
        let mut inner = String::new();
        loop {
            match self.next() {
                Some('\\') => match self.next() {
                    Some('"') if trailing_backslashes(&inner) % 2 == 1 => inner.push('"'),
                    Some('"') => {
                        warn!(
                            segment = self.segment_index,
                            "attribute value was escaped twice; decoding both levels"
                        );
                        return Ok(unescape_value(&inner));
                    }
                    Some('\\') => inner.push('\\'),
                    Some('n') => inner.push('\n'),
                    Some('t') => inner.push('\t'),
                    Some('r') => inner.push('\r'),
                    Some(other) => {
                        inner.push('\\');
                        inner.push(other);
                    }
                    None => break,
                },
                Some(ch) => inner.push(ch),
                None => break,
            }
        }
        Err(PathError::attribute(
            self.segment_index,
            self.context_from(clause_start),
            "unterminated attribute value",
        ))
    }

    fn parse_bracket_index(&mut self) -> Result<(String, i64), PathError> {
        let clause_start = self.position;
        self.next();
        let token = self.take_while(|ch| ch != ']' && ch != '/');
        if self.peek() != Some(']') {
            return Err(PathError::attribute(
                self.segment_index,
                self.context_from(clause_start),
                "unclosed '['",
            ));
        }
        self.next();
        let value = self.parse_index_token(&token)?;
        Ok((token, value))
    }

    fn parse_index_token(&self, token: &str) -> Result<i64, PathError> {
        token
            .trim()
            .parse::<i64>()
            .map_err(|_| PathError::InvalidIndexSyntax {
                token: token.to_string(),
                segment_index: self.segment_index,
            })
    }

    fn set_index(
        &self,
        slot: &mut Option<i64>,
        token: String,
        value: i64,
    ) -> Result<(), PathError> {
        if slot.is_some() {
            return Err(PathError::InvalidIndexSyntax {
                token,
                segment_index: self.segment_index,
            });
        }
        *slot = Some(value);
        Ok(())
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if !keep(ch) {
                break;
            }
            out.push(ch);
            self.position += 1;
        }
        out
    }

    fn context_from(&self, start: usize) -> String {
        let end = (start + CONTEXT_WIDTH).min(self.chars.len());
        self.chars[start.min(end)..end].iter().collect()
    }
}

fn trailing_backslashes(text: &str) -> usize {
    text.chars().rev().take_while(|ch| *ch == '\\').count()
}
