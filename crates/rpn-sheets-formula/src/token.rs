//! Tokenization and classification of cell text
//!
//! Cell text is split on runs of whitespace. Each piece is classified once,
//! in this order: number literal, single-character operator, cell reference.
//! Anything else is kept as [`Token::Invalid`] so the evaluator can report
//! it at the point the stack machine reaches it.

use crate::error::{FormulaError, FormulaResult};
use rpn_sheets_core::CellAddress;
use std::fmt;

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Parse a single-character operator token
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    /// The operator's symbol
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Compute `a <op> b`
    pub fn apply(&self, a: f64, b: f64) -> FormulaResult<f64> {
        match self {
            Operator::Add => Ok(a + b),
            Operator::Subtract => Ok(a - b),
            Operator::Multiply => Ok(a * b),
            Operator::Divide => {
                if b == 0.0 {
                    return Err(FormulaError::DivisionByZero);
                }
                Ok(a / b)
            }
        }
    }
}

/// A reference token such as `A1` or `b12`
///
/// `name` is the upper-cased token text. `address` is `None` when the
/// token has the shape of a reference but cannot name a cell (`A0`, or a
/// row number too large to represent); resolving it always fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellReference {
    pub name: String,
    pub address: Option<CellAddress>,
}

impl CellReference {
    /// Parse a reference token, or `None` if the text is not letters followed by digits
    pub fn parse(text: &str) -> Option<Self> {
        if !is_reference_shape(text) {
            return None;
        }

        Some(Self {
            name: text.to_ascii_uppercase(),
            address: CellAddress::parse(text).ok(),
        })
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A classified token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// One of `+ - * /`
    Operator(Operator),
    /// Reference to another cell
    Reference(CellReference),
    /// Anything else
    Invalid(String),
}

impl Token {
    /// Classify a single whitespace-free piece of text
    pub fn classify(text: &str) -> Token {
        if let Some(n) = parse_number(text) {
            return Token::Number(n);
        }
        if let Some(op) = Operator::from_symbol(text) {
            return Token::Operator(op);
        }
        if let Some(reference) = CellReference::parse(text) {
            return Token::Reference(reference);
        }
        Token::Invalid(text.to_string())
    }
}

/// Split cell text on whitespace and classify every piece
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace().map(Token::classify).collect()
}

/// What a cell holds, judged from its text alone
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// A single numeric literal
    Number(f64),
    /// A single reference to another cell
    Reference(CellReference),
    /// More than one whitespace-separated token
    Expression(Vec<Token>),
    /// Empty text or a single token that is neither a number nor a reference
    Other,
}

impl CellContent {
    /// Classify raw cell text
    pub fn classify(raw: &str) -> Self {
        let mut tokens = tokenize(raw);
        if tokens.len() > 1 {
            return CellContent::Expression(tokens);
        }

        match tokens.pop() {
            Some(Token::Number(n)) => CellContent::Number(n),
            Some(Token::Reference(r)) => CellContent::Reference(r),
            _ => CellContent::Other,
        }
    }
}

/// Decimal literals only; `inf`, `infinity` and `nan` spellings are not numbers
fn parse_number(text: &str) -> Option<f64> {
    let decimal = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal {
        return None;
    }
    text.parse::<f64>().ok()
}

fn is_reference_shape(text: &str) -> bool {
    let letters = text.bytes().take_while(u8::is_ascii_alphabetic).count();
    let rest = &text.as_bytes()[letters..];
    letters > 0 && !rest.is_empty() && rest.iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_number() {
        assert_eq!(Token::classify("42"), Token::Number(42.0));
        assert_eq!(Token::classify("3.5"), Token::Number(3.5));
        assert_eq!(Token::classify("-2"), Token::Number(-2.0));
        assert_eq!(Token::classify("1e3"), Token::Number(1000.0));
        assert_eq!(Token::classify("+7"), Token::Number(7.0));
    }

    #[test]
    fn test_classify_non_finite_spellings() {
        for text in ["nan", "NaN", "inf", "INF", "Infinity", "-inf"] {
            assert_eq!(Token::classify(text), Token::Invalid(text.to_string()));
        }
        // Overflowing decimal literals still parse
        assert_eq!(Token::classify("1e400"), Token::Number(f64::INFINITY));
        assert!(matches!(Token::classify("e"), Token::Invalid(_)));
        assert!(matches!(Token::classify("1e"), Token::Invalid(_)));
        // Letters followed by digits are references, not numbers
        assert!(matches!(Token::classify("inf1"), Token::Reference(_)));
        assert_eq!(CellContent::classify("NaN"), CellContent::Other);
    }

    #[test]
    fn test_classify_operator() {
        assert_eq!(Token::classify("+"), Token::Operator(Operator::Add));
        assert_eq!(Token::classify("-"), Token::Operator(Operator::Subtract));
        assert_eq!(Token::classify("*"), Token::Operator(Operator::Multiply));
        assert_eq!(Token::classify("/"), Token::Operator(Operator::Divide));

        assert!(matches!(Token::classify("++"), Token::Invalid(_)));
        assert!(matches!(Token::classify("^"), Token::Invalid(_)));
    }

    #[test]
    fn test_classify_reference() {
        let Token::Reference(r) = Token::classify("b12") else {
            panic!("Expected reference");
        };
        assert_eq!(r.name, "B12");
        assert_eq!(r.address, Some(CellAddress::new(11, 1)));

        // Shape matches but no such row
        let Token::Reference(r) = Token::classify("A0") else {
            panic!("Expected reference");
        };
        assert_eq!(r.address, None);

        assert!(matches!(Token::classify("A"), Token::Invalid(_)));
        assert!(matches!(Token::classify("1A"), Token::Invalid(_)));
        assert!(matches!(Token::classify("A1B"), Token::Invalid(_)));
        assert!(matches!(Token::classify("$A$1"), Token::Invalid(_)));
    }

    #[test]
    fn test_tokenize_whitespace_runs() {
        let tokens = tokenize("  3\t4   +\n");
        assert_eq!(
            tokens,
            vec![
                Token::Number(3.0),
                Token::Number(4.0),
                Token::Operator(Operator::Add),
            ]
        );
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_classify_cell_content() {
        assert_eq!(CellContent::classify(" 5 "), CellContent::Number(5.0));
        assert!(matches!(
            CellContent::classify("a1"),
            CellContent::Reference(CellReference { ref name, .. }) if name == "A1"
        ));
        assert!(matches!(
            CellContent::classify("A1 2 *"),
            CellContent::Expression(ref t) if t.len() == 3
        ));
        // Multi-token content is an expression even if some tokens are invalid
        assert!(matches!(
            CellContent::classify("foo bar"),
            CellContent::Expression(_)
        ));
        assert_eq!(CellContent::classify(""), CellContent::Other);
        assert_eq!(CellContent::classify("hello"), CellContent::Other);
        assert_eq!(CellContent::classify("+"), CellContent::Other);
    }

    #[test]
    fn test_operator_apply() {
        assert_eq!(Operator::Subtract.apply(10.0, 2.0), Ok(8.0));
        assert_eq!(Operator::Divide.apply(10.0, 2.0), Ok(5.0));
        assert_eq!(
            Operator::Divide.apply(5.0, 0.0),
            Err(FormulaError::DivisionByZero)
        );
        assert_eq!(
            Operator::Divide.apply(5.0, -0.0),
            Err(FormulaError::DivisionByZero)
        );
    }
}
