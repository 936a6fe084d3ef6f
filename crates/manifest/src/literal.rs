//! Assignment-list literal format
//!
//! The tutorial scripts keep their harness manifest as a series of
//! assignments:
//!
//! ```text
//! # comment
//! include_full_subpkgs = [
//!   "ex-basics",
//!   "ex-gcd",
//! ]
//! ```
//!
//! Parsing produces a JSON object so that field checks (missing or unknown
//! lists) go through the same serde path as the YAML and JSON formats.

use serde_json::{Map, Value};

/// Parse assignment-list text into a JSON object of list name to array.
///
/// Errors are plain messages carrying the line number; the caller attaches
/// the origin.
pub(crate) fn parse(input: &str) -> Result<Map<String, Value>, String> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut cursor = Cursor::new(input);
    let mut lists = Map::new();

    loop {
        cursor.skip_trivia();
        if cursor.peek().is_none() {
            break;
        }

        let line = cursor.line;
        let name = cursor
            .ident()
            .ok_or_else(|| format!("line {line}: expected a list name"))?
            .to_string();

        cursor.skip_trivia();
        if cursor.peek() != Some('=') {
            return Err(format!("line {}: expected `=` after `{name}`", cursor.line));
        }
        cursor.bump();

        cursor.skip_trivia();
        if cursor.peek() != Some('[') {
            return Err(format!("line {}: `{name}` is not a list", cursor.line));
        }
        cursor.bump();

        let items = parse_items(&mut cursor, &name)?;
        if lists.insert(name.clone(), Value::Array(items)).is_some() {
            return Err(format!("line {line}: `{name}` is assigned more than once"));
        }
    }

    Ok(lists)
}

fn parse_items(cursor: &mut Cursor<'_>, name: &str) -> Result<Vec<Value>, String> {
    let mut items = Vec::new();

    loop {
        cursor.skip_trivia();
        match cursor.peek() {
            Some(']') => {
                cursor.bump();
                return Ok(items);
            }
            Some(q @ ('"' | '\'')) => {
                cursor.bump();
                items.push(Value::String(cursor.string(q)?));

                cursor.skip_trivia();
                match cursor.peek() {
                    Some(',') => {
                        cursor.bump();
                    }
                    Some(']') => {}
                    Some(c) => {
                        return Err(format!(
                            "line {}: unexpected `{c}` in `{name}`, expected `,` or `]`",
                            cursor.line
                        ))
                    }
                    None => return Err(format!("unterminated list `{name}`")),
                }
            }
            Some(_) => {
                return Err(format!(
                    "line {}: element {} of `{name}` is not a string",
                    cursor.line,
                    items.len()
                ))
            }
            None => return Err(format!("unterminated list `{name}`")),
        }
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Skip whitespace and `#` comments
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        if start == self.pos {
            None
        } else {
            Some(&self.src[start..self.pos])
        }
    }

    /// Read a string body after its opening quote
    fn string(&mut self, quote: char) -> Result<String, String> {
        let line = self.line;
        let mut out = String::new();

        loop {
            match self.bump() {
                None | Some('\n') => return Err(format!("line {line}: unterminated string")),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c @ ('\\' | '"' | '\'')) => out.push(c),
                    Some(c) => return Err(format!("line {line}: unsupported escape `\\{c}`")),
                    None => return Err(format!("line {line}: unterminated string")),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }
}

/// Render named lists back into assignment-list text
pub(crate) fn render(lists: &[(&str, &[String])]) -> String {
    let mut out = String::new();
    out.push_str("#=========================================================================\n");
    out.push_str("# Configuration file for generating the tutorial's harness\n");
    out.push_str("#=========================================================================\n");

    for (name, items) in lists {
        out.push('\n');
        out.push_str(&format!("{name} = [\n"));
        for item in items.iter() {
            out.push_str(&format!("  \"{}\",\n", escape(item)));
        }
        out.push_str("]\n");
    }

    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
