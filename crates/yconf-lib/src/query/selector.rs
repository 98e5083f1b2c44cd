//! jq-style selector parsing and evaluation.
//!
//! Supported: `.`, `.a.b`, `."quoted key"`, `.["key"]`, `.[0]`, `.[-1]`,
//! `.[]`, a trailing `?` on any step, `|` pipes, and the `keys` and
//! `length` builtins. Keys may contain `-`, since there is no arithmetic to
//! confuse it with.

use serde_json::Value;

/// Parsed selector: a pipeline of terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Term {
    Path(Vec<Step>),
    Keys,
    Length,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    op: PathPart,
    optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathPart {
    Field(String),
    Index(i64),
    Iterate,
}

impl Selector {
    /// Parse a selector expression.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason if the expression is malformed.
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut parser = Parser {
            chars: input.chars().collect(),
            pos: 0,
        };
        let selector = parser.pipeline()?;
        parser.skip_ws();
        if let Some(c) = parser.peek() {
            return Err(format!("unexpected {c:?} at offset {}", parser.pos));
        }
        Ok(selector)
    }

    /// Apply the selector to `input`, returning every result in order.
    ///
    /// # Errors
    ///
    /// Returns a reason when a non-optional step hits the wrong type.
    pub fn apply(&self, input: Value) -> Result<Vec<Value>, String> {
        let mut values = vec![input];
        for term in &self.terms {
            let mut next = Vec::new();
            for value in values {
                next.extend(term.apply(value)?);
            }
            values = next;
        }
        Ok(values)
    }
}

impl Term {
    fn apply(&self, input: Value) -> Result<Vec<Value>, String> {
        match self {
            Self::Path(steps) => {
                let mut values = vec![input];
                for step in steps {
                    let mut next = Vec::new();
                    for value in values {
                        match step.apply(value) {
                            Ok(out) => next.extend(out),
                            Err(_) if step.optional => {}
                            Err(e) => return Err(e),
                        }
                    }
                    values = next;
                }
                Ok(values)
            }
            Self::Keys => match input {
                Value::Object(map) => Ok(vec![Value::Array(
                    map.keys().map(|k| Value::String(k.clone())).collect(),
                )]),
                Value::Array(items) => Ok(vec![Value::Array(
                    (0..items.len()).map(Value::from).collect(),
                )]),
                other => Err(format!("{} has no keys", type_name(&other))),
            },
            Self::Length => match input {
                Value::Object(map) => Ok(vec![Value::from(map.len())]),
                Value::Array(items) => Ok(vec![Value::from(items.len())]),
                Value::String(s) => Ok(vec![Value::from(s.chars().count())]),
                Value::Null => Ok(vec![Value::from(0)]),
                Value::Number(n) => Ok(vec![abs(&n)]),
                Value::Bool(_) => Err("boolean has no length".to_string()),
            },
        }
    }
}

impl Step {
    fn apply(&self, input: Value) -> Result<Vec<Value>, String> {
        match (&self.op, input) {
            (PathPart::Field(name), Value::Object(mut map)) => {
                Ok(map.remove(name).into_iter().collect())
            }
            (PathPart::Field(_) | PathPart::Index(_), Value::Null) => Ok(Vec::new()),
            (PathPart::Field(name), other) => {
                Err(format!("cannot index {} with {name:?}", type_name(&other)))
            }
            (PathPart::Index(index), Value::Array(mut items)) => {
                let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
                let resolved = if *index < 0 { len + index } else { *index };
                match usize::try_from(resolved) {
                    Ok(i) if i < items.len() => Ok(vec![items.swap_remove(i)]),
                    _ => Ok(Vec::new()),
                }
            }
            (PathPart::Index(_), other) => {
                Err(format!("cannot index {} with a number", type_name(&other)))
            }
            (PathPart::Iterate, Value::Array(items)) => Ok(items),
            (PathPart::Iterate, Value::Object(map)) => Ok(map.into_iter().map(|(_, v)| v).collect()),
            (PathPart::Iterate, other) => Err(format!("cannot iterate over {}", type_name(&other))),
        }
    }
}

/// `length` of a number is its absolute value; integers stay integers.
fn abs(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i.unsigned_abs())
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        n.as_f64().map_or(Value::Null, |f| Value::from(f.abs()))
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, want: char) -> Result<(), String> {
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(c) => Err(format!("expected {want:?}, found {c:?}")),
            None => Err(format!("expected {want:?}, found end of input")),
        }
    }

    fn pipeline(&mut self) -> Result<Selector, String> {
        let mut terms = vec![self.term()?];
        loop {
            self.skip_ws();
            if self.peek() != Some('|') {
                break;
            }
            self.pos += 1;
            terms.push(self.term()?);
        }
        Ok(Selector { terms })
    }

    fn term(&mut self) -> Result<Term, String> {
        self.skip_ws();
        match self.peek() {
            Some('.') => self.path(),
            Some(c) if c.is_alphabetic() => match self.ident().as_str() {
                "keys" => Ok(Term::Keys),
                "length" => Ok(Term::Length),
                other => Err(format!("unknown function {other:?}")),
            },
            Some(c) => Err(format!("unexpected {c:?} at offset {}", self.pos)),
            None => Err("empty selector".to_string()),
        }
    }

    fn path(&mut self) -> Result<Term, String> {
        let mut steps = Vec::new();
        self.expect('.')?;
        // Right after the leading dot: a key, a bracket, or nothing (identity).
        match self.peek() {
            Some('[') => steps.push(self.bracket()?),
            Some('"') => steps.push(self.field_step(Self::quoted)?),
            Some(c) if is_ident_start(c) => steps.push(self.field_step(|p| Ok(p.ident()))?),
            _ => {}
        }
        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    match self.peek() {
                        Some('[') => steps.push(self.bracket()?),
                        Some('"') => steps.push(self.field_step(Self::quoted)?),
                        Some(c) if is_ident_start(c) => {
                            steps.push(self.field_step(|p| Ok(p.ident()))?);
                        }
                        _ => return Err(format!("expected a key after '.' at offset {}", self.pos)),
                    }
                }
                Some('[') => steps.push(self.bracket()?),
                _ => break,
            }
        }
        Ok(Term::Path(steps))
    }

    fn field_step(
        &mut self,
        key: impl FnOnce(&mut Self) -> Result<String, String>,
    ) -> Result<Step, String> {
        let name = key(self)?;
        Ok(self.finish_step(PathPart::Field(name)))
    }

    fn bracket(&mut self) -> Result<Step, String> {
        self.expect('[')?;
        self.skip_ws();
        let op = match self.peek() {
            Some(']') => PathPart::Iterate,
            Some('"') => PathPart::Field(self.quoted()?),
            Some(c) if c == '-' || c.is_ascii_digit() => PathPart::Index(self.integer()?),
            Some(c) => return Err(format!("unexpected {c:?} inside brackets")),
            None => return Err("unterminated '['".to_string()),
        };
        self.skip_ws();
        self.expect(']')?;
        Ok(self.finish_step(op))
    }

    fn finish_step(&mut self, op: PathPart) -> Step {
        let optional = self.peek() == Some('?');
        if optional {
            self.pos += 1;
        }
        Step { op, optional }
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn quoted(&mut self) -> Result<String, String> {
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => out.push(c),
                    None => return Err("unterminated string".to_string()),
                },
                Some(c) => out.push(c),
                None => return Err("unterminated string".to_string()),
            }
        }
    }

    fn integer(&mut self) -> Result<i64, String> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse()
            .map_err(|_| format!("invalid index {text:?}"))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(selector: &str, input: Value) -> Result<Vec<Value>, String> {
        Selector::parse(selector)?.apply(input)
    }

    fn doc() -> Value {
        json!({
            "some": "thing",
            "here": "goes",
            "command": {"path": "/here/we/go"},
            "list": [1, 2, 3],
            "dashed-key": true,
            "with space": "ok",
        })
    }

    #[test]
    fn test_identity() {
        assert_eq!(run(".", doc()).unwrap(), vec![doc()]);
        assert_eq!(run("  .  ", doc()).unwrap(), vec![doc()]);
    }

    #[test]
    fn test_field_and_nested() {
        assert_eq!(run(".some", doc()).unwrap(), vec![json!("thing")]);
        assert_eq!(run(".command.path", doc()).unwrap(), vec![json!("/here/we/go")]);
        assert_eq!(run(".dashed-key", doc()).unwrap(), vec![json!(true)]);
        assert_eq!(run(".\"with space\"", doc()).unwrap(), vec![json!("ok")]);
        assert_eq!(run(".[\"some\"]", doc()).unwrap(), vec![json!("thing")]);
        assert_eq!(run(".command[\"path\"]", doc()).unwrap(), vec![json!("/here/we/go")]);
    }

    #[test]
    fn test_missing_key_yields_nothing() {
        assert!(run(".nope", doc()).unwrap().is_empty());
        assert!(run(".nope.deeper", doc()).unwrap().is_empty());
    }

    #[test]
    fn test_index_and_iterate() {
        assert_eq!(run(".list[0]", doc()).unwrap(), vec![json!(1)]);
        assert_eq!(run(".list[-1]", doc()).unwrap(), vec![json!(3)]);
        assert!(run(".list[9]", doc()).unwrap().is_empty());
        assert_eq!(run(".list[]", doc()).unwrap(), vec![json!(1), json!(2), json!(3)]);
        assert_eq!(run(".list.[1]", doc()).unwrap(), vec![json!(2)]);
    }

    #[test]
    fn test_type_errors_and_optional() {
        assert!(run(".some.deeper", doc()).is_err());
        assert!(run(".some.deeper?", doc()).unwrap().is_empty());
        assert!(run(".some[]", doc()).is_err());
        assert!(run(".some[]?", doc()).unwrap().is_empty());
        assert!(run(".list.name", doc()).is_err());
    }

    #[test]
    fn test_pipes_and_builtins() {
        assert_eq!(
            run(".command | keys", doc()).unwrap(),
            vec![json!(["path"])]
        );
        assert_eq!(run(".list | length", doc()).unwrap(), vec![json!(3)]);
        assert_eq!(run(".some | length", doc()).unwrap(), vec![json!(5)]);
        assert_eq!(run(". | length", json!(-5)).unwrap(), vec![json!(5)]);
        assert_eq!(run(". | length", json!(2.5)).unwrap(), vec![json!(2.5)]);
        assert_eq!(
            run(". | keys | length", doc()).unwrap(),
            vec![json!(6)]
        );
    }

    #[test]
    fn test_malformed_selectors() {
        for bad in ["", "some", ".[", ".a.", ".[\"x\"", "nosuchfn", ". |", ".a b", ".[x]"] {
            assert!(Selector::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }
}
