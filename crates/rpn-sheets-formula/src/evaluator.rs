//! Postfix evaluator
//!
//! Evaluation happens in two passes. First every reference token is
//! resolved and replaced by its number. Then the substituted sequence is
//! reduced left to right on a stack. Reference resolution is never
//! interleaved with arithmetic.

use crate::error::{FormulaError, FormulaResult};
use crate::resolver::{resolve, EvaluationState};
use crate::token::{tokenize, CellContent, Token};
use rpn_sheets_core::Grid;
use tracing::trace;

/// Evaluate a postfix token sequence against `grid`
pub fn evaluate(
    tokens: &[Token],
    grid: &Grid,
    state: &mut EvaluationState,
) -> FormulaResult<f64> {
    let resolved = substitute_references(tokens, grid, state)?;
    reduce(&resolved)
}

/// Evaluate the raw text of a top-level cell
///
/// A bare number is its own value and a bare reference is resolved
/// directly. Everything else, including empty text, goes through the
/// postfix evaluator.
pub fn evaluate_cell(
    raw: &str,
    grid: &Grid,
    state: &mut EvaluationState,
) -> FormulaResult<f64> {
    match CellContent::classify(raw) {
        CellContent::Number(n) => Ok(n),
        CellContent::Reference(reference) => resolve(&reference, grid, state),
        CellContent::Expression(tokens) => evaluate(&tokens, grid, state),
        CellContent::Other => evaluate(&tokenize(raw), grid, state),
    }
}

/// Reduce a reference-free token sequence to a single number
pub fn reduce(tokens: &[Token]) -> FormulaResult<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Number(n) => stack.push(*n),
            Token::Operator(op) => {
                let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                    return Err(FormulaError::StackUnderflow {
                        operator: op.symbol(),
                    });
                };
                stack.push(op.apply(a, b)?);
            }
            Token::Reference(r) => return Err(FormulaError::InvalidToken(r.name.clone())),
            Token::Invalid(text) => return Err(FormulaError::InvalidToken(text.clone())),
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        rest => Err(FormulaError::MalformedExpression {
            remaining: rest.len(),
        }),
    }
}

fn substitute_references(
    tokens: &[Token],
    grid: &Grid,
    state: &mut EvaluationState,
) -> FormulaResult<Vec<Token>> {
    tokens
        .iter()
        .map(|token| match token {
            Token::Reference(reference) => {
                trace!("resolving reference {reference}");
                resolve(reference, grid, state).map(Token::Number)
            }
            other => Ok(other.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str) -> FormulaResult<f64> {
        evaluate_cell(text, &Grid::default(), &mut EvaluationState::new())
    }

    fn eval_in(grid: &Grid, text: &str) -> FormulaResult<f64> {
        evaluate_cell(text, grid, &mut EvaluationState::new())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("3 4 +"), Ok(7.0));
        assert_eq!(eval("10 2 /"), Ok(5.0));
        assert_eq!(eval("6 7 *"), Ok(42.0));
        assert_eq!(eval("2 3 4 * +"), Ok(14.0));
        assert_eq!(eval("1.5 2 *"), Ok(3.0));
    }

    #[test]
    fn test_operand_order() {
        assert_eq!(eval("10 2 -"), Ok(8.0));
        assert_eq!(eval("2 10 -"), Ok(-8.0));
        assert_eq!(eval("1 4 /"), Ok(0.25));
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(eval("42"), Ok(42.0));
        assert_eq!(eval("  -0.5 "), Ok(-0.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("5 0 /"), Err(FormulaError::DivisionByZero));
        assert_eq!(eval("5 1 1 - /"), Err(FormulaError::DivisionByZero));
    }

    #[test]
    fn test_stack_underflow() {
        assert_eq!(
            eval("1 +"),
            Err(FormulaError::StackUnderflow { operator: '+' })
        );
        assert_eq!(eval("+"), Err(FormulaError::StackUnderflow { operator: '+' }));
    }

    #[test]
    fn test_malformed_expression() {
        assert_eq!(
            eval("1 2 3 +"),
            Err(FormulaError::MalformedExpression { remaining: 2 })
        );
        assert_eq!(
            eval(""),
            Err(FormulaError::MalformedExpression { remaining: 0 })
        );
    }

    #[test]
    fn test_invalid_token() {
        assert_eq!(eval("hello"), Err(FormulaError::InvalidToken("hello".into())));
        assert_eq!(eval("1 2 ^"), Err(FormulaError::InvalidToken("^".into())));
        // The stack machine fails at the operator before reaching the bad token
        assert_eq!(
            eval("1 + foo"),
            Err(FormulaError::StackUnderflow { operator: '+' })
        );
    }

    #[test]
    fn test_references_resolve_before_arithmetic() {
        let grid = Grid::from_rows(vec![vec!["5"]]);

        // Bad reference reported even though an invalid token comes first
        assert_eq!(
            eval_in(&grid, "foo Z9 +"),
            Err(FormulaError::InvalidCellReference("Z9".into()))
        );
    }

    #[test]
    fn test_reference_in_expression() {
        let grid = Grid::from_rows(vec![vec!["5", "A1 2 *"]]);

        assert_eq!(eval_in(&grid, "A1 2 *"), Ok(10.0));
        assert_eq!(eval_in(&grid, "a1 B1 +"), Ok(15.0));
        assert_eq!(eval_in(&grid, "B1"), Ok(10.0));
    }

    #[test]
    fn test_reduce_rejects_unresolved_reference() {
        let tokens = tokenize("A1 1 +");
        assert_eq!(reduce(&tokens), Err(FormulaError::InvalidToken("A1".into())));
    }
}
