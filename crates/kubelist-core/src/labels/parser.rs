// ── Selector string parser ──
//
// Grammar (whitespace-insensitive between tokens):
//
//   selector    := ε | requirement ( ',' requirement )*
//   requirement := '!' KEY
//                | KEY
//                | KEY ( '=' | '==' | '!=' ) VALUE?
//                | KEY ( 'in' | 'notin' ) '(' VALUE ( ',' VALUE )* ')'
//
// Each requirement becomes one `kube::core::Expression`. Numeric `<` / `>`
// have no `Expression` counterpart and are rejected.

use std::collections::BTreeSet;
use std::fmt;

use kube::core::{Expression, Selector};

use super::SelectorError;

const SPECIAL: &[char] = &['=', '!', '(', ')', ',', '<', '>'];
const MAX_NAME_LEN: usize = 63;
const MAX_PREFIX_LEN: usize = 253;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Identifier(String),
    Comma,
    Equals,
    DoubleEquals,
    NotEquals,
    Not,
    In,
    NotIn,
    OpenParen,
    CloseParen,
    Compare(char),
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(s) => write!(f, "identifier {s:?}"),
            Self::Comma => f.write_str("','"),
            Self::Equals => f.write_str("'='"),
            Self::DoubleEquals => f.write_str("'=='"),
            Self::NotEquals => f.write_str("'!='"),
            Self::Not => f.write_str("'!'"),
            Self::In => f.write_str("'in'"),
            Self::NotIn => f.write_str("'notin'"),
            Self::OpenParen => f.write_str("'('"),
            Self::CloseParen => f.write_str("')'"),
            Self::Compare(c) => write!(f, "'{c}'"),
            Self::End => f.write_str("end of input"),
        }
    }
}

// ── Lexer ────────────────────────────────────────────────────────────

fn tokenize(input: &str) -> Vec<(usize, Token)> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        chars.next();
        let token = match c {
            ',' => Token::Comma,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            '<' | '>' => Token::Compare(c),
            '=' => {
                if chars.next_if(|&(_, n)| n == '=').is_some() {
                    Token::DoubleEquals
                } else {
                    Token::Equals
                }
            }
            '!' => {
                if chars.next_if(|&(_, n)| n == '=').is_some() {
                    Token::NotEquals
                } else {
                    Token::Not
                }
            }
            _ => {
                let mut ident = String::from(c);
                while let Some((_, n)) =
                    chars.next_if(|&(_, n)| !n.is_whitespace() && !SPECIAL.contains(&n))
                {
                    ident.push(n);
                }
                match ident.as_str() {
                    "in" => Token::In,
                    "notin" => Token::NotIn,
                    _ => Token::Identifier(ident),
                }
            }
        };
        tokens.push((pos, token));
    }

    tokens.push((input.len(), Token::End));
    tokens
}

// ── Parser ───────────────────────────────────────────────────────────

struct Parser {
    tokens: Vec<(usize, Token)>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens
            .get(self.cursor)
            .map_or(&Token::End, |(_, token)| token)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.cursor).map_or(0, |(pos, _)| *pos)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    fn unexpected(&self, expected: &'static str) -> SelectorError {
        SelectorError::Syntax {
            position: self.position(),
            found: self.peek().to_string(),
            expected,
        }
    }

    fn expect_identifier(&mut self, expected: &'static str) -> Result<String, SelectorError> {
        if let Token::Identifier(_) = self.peek() {
            if let Token::Identifier(ident) = self.advance() {
                return Ok(ident);
            }
        }
        Err(self.unexpected(expected))
    }

    fn parse_selector(&mut self) -> Result<Vec<Expression>, SelectorError> {
        let mut expressions = Vec::new();
        if *self.peek() == Token::End {
            return Ok(expressions);
        }
        loop {
            expressions.push(self.parse_requirement()?);
            match self.peek() {
                Token::Comma => {
                    self.advance();
                }
                Token::End => return Ok(expressions),
                _ => return Err(self.unexpected("',' or end of input")),
            }
        }
    }

    fn parse_requirement(&mut self) -> Result<Expression, SelectorError> {
        if *self.peek() == Token::Not {
            self.advance();
            let key = validate_key(self.expect_identifier("label key")?)?;
            return Ok(Expression::DoesNotExist(key));
        }

        let key = validate_key(self.expect_identifier("label key or '!'")?)?;
        match self.peek() {
            Token::Comma | Token::End => Ok(Expression::Exists(key)),
            Token::Equals | Token::DoubleEquals => {
                self.advance();
                Ok(Expression::Equal(key, self.parse_optional_value()?))
            }
            Token::NotEquals => {
                self.advance();
                Ok(Expression::NotEqual(key, self.parse_optional_value()?))
            }
            Token::In => {
                self.advance();
                Ok(Expression::In(key, self.parse_value_set("in")?))
            }
            Token::NotIn => {
                self.advance();
                Ok(Expression::NotIn(key, self.parse_value_set("notin")?))
            }
            _ => Err(self.unexpected("'=', '==', '!=', 'in' or 'notin'")),
        }
    }

    /// `key=` with nothing after it selects the empty value.
    fn parse_optional_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Token::Identifier(_) => validate_value(self.expect_identifier("value")?),
            _ => Ok(String::new()),
        }
    }

    fn parse_value_set(&mut self, operator: &'static str) -> Result<BTreeSet<String>, SelectorError> {
        if *self.peek() != Token::OpenParen {
            return Err(self.unexpected("'('"));
        }
        self.advance();

        let mut values = BTreeSet::new();
        if *self.peek() == Token::CloseParen {
            return Err(SelectorError::InvalidValues {
                operator,
                reason: "requires one or more values".into(),
            });
        }
        loop {
            values.insert(validate_value(self.expect_identifier("value")?)?);
            match self.advance() {
                Token::Comma => {}
                Token::CloseParen => return Ok(values),
                _ => {
                    self.cursor -= 1;
                    return Err(self.unexpected("',' or ')'"));
                }
            }
        }
    }
}

/// Parse a selector string such as `env=prod,tier in (web,api),!canary`.
///
/// The empty string selects everything.
pub fn parse(input: &str) -> Result<Selector, SelectorError> {
    let expressions = Parser {
        tokens: tokenize(input),
        cursor: 0,
    }
    .parse_selector()?;
    Ok(expressions.into_iter().collect())
}

// ── Validation ───────────────────────────────────────────────────────

/// Label keys are an optional DNS-subdomain prefix and a `/`, followed by a
/// name of up to 63 alphanumerics, `-`, `_` or `.`.
fn validate_key(key: String) -> Result<String, SelectorError> {
    let problem = match key.split_once('/') {
        Some((prefix, name)) => prefix_problem(prefix).or_else(|| name_problem(name)),
        None => name_problem(&key),
    };
    match problem {
        Some(reason) => Err(SelectorError::InvalidKey {
            reason: reason.to_owned(),
            key,
        }),
        None => Ok(key),
    }
}

fn prefix_problem(prefix: &str) -> Option<&'static str> {
    if prefix.is_empty() || prefix.len() > MAX_PREFIX_LEN {
        Some("prefix must be 1-253 characters")
    } else if !prefix
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        Some("prefix must be a lowercase DNS subdomain")
    } else {
        None
    }
}

fn name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("name must not be empty")
    } else if name.len() > MAX_NAME_LEN {
        Some("name must be no more than 63 characters")
    } else if !is_label_token(name) {
        Some("name must consist of alphanumerics, '-', '_' or '.', and start and end with an alphanumeric")
    } else {
        None
    }
}

/// Label values may be empty; otherwise they follow the key-name rules.
fn validate_value(value: String) -> Result<String, SelectorError> {
    if value.is_empty() || (value.len() <= MAX_NAME_LEN && is_label_token(&value)) {
        return Ok(value);
    }
    Err(SelectorError::InvalidValue {
        value,
        reason: "must be at most 63 alphanumerics, '-', '_' or '.', starting and ending with an alphanumeric"
            .to_owned(),
    })
}

fn is_label_token(s: &str) -> bool {
    let bytes = s.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use kube::core::SelectorExt;
    use kubelist_store::Labels;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn empty_input_selects_everything() {
        assert!(parse("").unwrap().selects_all());
        assert!(parse("   ").unwrap().selects_all());
    }

    #[test]
    fn builds_one_expression_per_requirement() {
        let sel = parse("a=1, b==2, c!=3, d in (x, y), e notin (z), f, !g").unwrap();
        let hit = labels(&[("a", "1"), ("b", "2"), ("c", "4"), ("d", "y"), ("e", "w"), ("f", "")]);
        assert!(sel.matches(&hit));

        for (key, value) in [("a", "0"), ("c", "3"), ("d", "z"), ("e", "z"), ("g", "")] {
            let mut miss = hit.clone();
            miss.insert(key.to_owned(), value.to_owned());
            assert!(!sel.matches(&miss), "{key}={value} should not match");
        }
        let mut no_f = hit.clone();
        no_f.remove("f");
        assert!(!sel.matches(&no_f));
    }

    #[test]
    fn display_round_trips() {
        let sel = parse("env=prod,tier in (web,api),!canary").unwrap();
        let text = sel.to_string();
        assert!(text.starts_with("env=prod,"));
        assert_eq!(parse(&text).unwrap().to_string(), text);
    }

    #[test]
    fn trailing_equals_means_empty_value() {
        let sel = parse("env=").unwrap();
        assert!(sel.matches(&labels(&[("env", "")])));
        assert!(!sel.matches(&labels(&[("env", "prod")])));
    }

    #[test]
    fn parsed_selector_filters_labels() {
        let sel = parse("env in (prod,staging),!canary").unwrap();
        assert!(sel.matches(&labels(&[("env", "prod")])));
        assert!(!sel.matches(&labels(&[("env", "prod"), ("canary", "true")])));
        assert!(!sel.matches(&labels(&[("env", "dev")])));
    }

    #[test]
    fn inequality_and_notin_match_missing_keys() {
        assert!(parse("env!=prod").unwrap().matches(&labels(&[])));
        assert!(parse("tier notin (web)").unwrap().matches(&labels(&[])));
        assert!(!parse("env=prod").unwrap().matches(&labels(&[])));
    }

    #[test]
    fn syntax_errors_report_position() {
        let err = parse("env=prod tier").unwrap_err();
        assert_eq!(
            err,
            SelectorError::Syntax {
                position: 9,
                found: "identifier \"tier\"".into(),
                expected: "',' or end of input",
            }
        );
    }

    #[test]
    fn rejects_malformed_sets() {
        assert!(parse("env in prod").is_err());
        assert!(parse("env in (prod").is_err());
        assert!(matches!(
            parse("env in ()").unwrap_err(),
            SelectorError::InvalidValues { operator: "in", .. }
        ));
    }

    #[test]
    fn rejects_dangling_tokens() {
        assert!(parse(",").is_err());
        assert!(parse("env=prod,").is_err());
        assert!(parse("!").is_err());
    }

    #[test]
    fn numeric_comparisons_are_unsupported() {
        let err = parse("replicas>2").unwrap_err();
        assert!(matches!(err, SelectorError::Syntax { position: 8, .. }));
    }

    #[test]
    fn keys_and_values_are_validated() {
        assert!(matches!(parse("-bad").unwrap_err(), SelectorError::InvalidKey { .. }));
        assert!(matches!(
            parse("Bad.Prefix/name").unwrap_err(),
            SelectorError::InvalidKey { .. }
        ));
        assert!(parse("mysql.oracle.com/cluster").is_ok());
        assert!(matches!(
            parse("env=has_trailing-").unwrap_err(),
            SelectorError::InvalidValue { .. }
        ));
    }
}
