//! # fitch-parse
//!
//! Parser for the fitch prover's surface syntax.
//!
//! Propositional variables are single characters. Each connective has a
//! Unicode glyph and ASCII fallbacks: `¬ - ~ !` for negation, `∧ & . ^`
//! for conjunction, `∨ |` for disjunction, `→ >` for implication, `↔ =`
//! for the biconditional, and `⊥ _ #` for falsum. All binary operators
//! share a single precedence level below negation and associate to the
//! right, so `a & b > c` reads `a ∧ (b → c)`. Brackets `( ) [ ] { }` are
//! interchangeable and whitespace is ignored.
//!
//! ## Example
//!
//! ```
//! use fitch_parse::parse_formula;
//!
//! let formula = parse_formula("-a . b").unwrap();
//! assert_eq!(formula.pretty(), "¬a ∧ b");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use fitch_core::Formula;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "formula.pest"]
struct FormulaParser;

/// Parse error for the surface syntax.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input is not a well-formed formula
    #[error("{0}")]
    Syntax(Box<pest::error::Error<Rule>>),

    /// The grammar produced a shape the builder does not recognize
    #[error("unexpected rule: {0}")]
    UnexpectedRule(String),
}

/// Parse a formula from a string.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not a valid formula,
/// including when there is leftover input after a complete formula.
pub fn parse_formula(input: &str) -> Result<Formula, ParseError> {
    let mut pairs = FormulaParser::parse(Rule::formula, input)
        .map_err(|error| ParseError::Syntax(Box::new(error)))?;

    let formula = pairs
        .next()
        .ok_or_else(|| ParseError::UnexpectedRule("empty parse result".to_string()))?;
    let expr = formula
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::expr)
        .ok_or_else(|| ParseError::UnexpectedRule("formula without body".to_string()))?;

    build_expr(expr)
}

/// Fold a chain `simple (op simple)*` into a right-associative tree.
fn build_expr(pair: Pair<Rule>) -> Result<Formula, ParseError> {
    let mut inner = pair.into_inner();

    let mut operands = Vec::new();
    let mut operators = Vec::new();
    operands.push(build_simple(next_pair(&mut inner)?)?);
    while let Some(operator) = inner.next() {
        operators.push(operator.as_rule());
        operands.push(build_simple(next_pair(&mut inner)?)?);
    }

    let mut result = operands
        .pop()
        .ok_or_else(|| ParseError::UnexpectedRule("expression without operands".to_string()))?;
    while let Some(operator) = operators.pop() {
        let left = operands.pop().ok_or_else(|| {
            ParseError::UnexpectedRule("operator without left operand".to_string())
        })?;
        result = match operator {
            Rule::implies_op => Formula::implies(left, result),
            Rule::iff_op => Formula::iff(left, result),
            Rule::or_op => Formula::or(left, result),
            Rule::and_op => Formula::and(left, result),
            other => return Err(ParseError::UnexpectedRule(format!("{:?}", other))),
        };
    }
    Ok(result)
}

fn build_simple(pair: Pair<Rule>) -> Result<Formula, ParseError> {
    let mut inner = pair.into_inner();
    let unit = next_pair(&mut inner)?;
    match unit.as_rule() {
        Rule::negation => {
            let operand = build_simple(next_pair(&mut unit.into_inner())?)?;
            Ok(Formula::not(operand))
        }
        Rule::bottom => Ok(Formula::Bottom),
        Rule::group => build_expr(next_pair(&mut unit.into_inner())?),
        Rule::name => {
            let symbol = unit.as_str().chars().next().ok_or_else(|| {
                ParseError::UnexpectedRule("empty name".to_string())
            })?;
            Ok(Formula::Name(symbol))
        }
        other => Err(ParseError::UnexpectedRule(format!("{:?}", other))),
    }
}

fn next_pair<'a>(
    pairs: &mut pest::iterators::Pairs<'a, Rule>,
) -> Result<Pair<'a, Rule>, ParseError> {
    pairs
        .next()
        .ok_or_else(|| ParseError::UnexpectedRule("truncated parse tree".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(c: char) -> Formula {
        Formula::name(c)
    }

    #[test]
    fn test_single_name() {
        assert_eq!(parse_formula("a").unwrap(), name('a'));
    }

    #[test]
    fn test_operator_aliases() {
        let implication = Formula::implies(name('a'), name('b'));
        assert_eq!(parse_formula("a → b").unwrap(), implication);
        assert_eq!(parse_formula("a > b").unwrap(), implication);

        let conjunction = Formula::and(name('a'), name('b'));
        assert_eq!(parse_formula("a ∧ b").unwrap(), conjunction);
        assert_eq!(parse_formula("a & b").unwrap(), conjunction);
        assert_eq!(parse_formula("a . b").unwrap(), conjunction);
        assert_eq!(parse_formula("a ^ b").unwrap(), conjunction);

        assert_eq!(
            parse_formula("a | b").unwrap(),
            Formula::or(name('a'), name('b'))
        );
        assert_eq!(
            parse_formula("a = b").unwrap(),
            Formula::iff(name('a'), name('b'))
        );
    }

    #[test]
    fn test_negation_aliases_and_binding() {
        // negation binds tighter than any binary operator
        let expected = Formula::and(Formula::not(name('a')), name('b'));
        assert_eq!(parse_formula("-a.b").unwrap(), expected);
        assert_eq!(parse_formula("¬a ∧ b").unwrap(), expected);
        assert_eq!(parse_formula("~a & b").unwrap(), expected);
        assert_eq!(parse_formula("!a & b").unwrap(), expected);

        assert_eq!(
            parse_formula("--a").unwrap(),
            Formula::not(Formula::not(name('a')))
        );
    }

    #[test]
    fn test_bottom() {
        assert_eq!(parse_formula("⊥").unwrap(), Formula::Bottom);
        assert_eq!(parse_formula("_").unwrap(), Formula::Bottom);
        assert_eq!(parse_formula("#").unwrap(), Formula::Bottom);
        assert_eq!(
            parse_formula("_ > a").unwrap(),
            Formula::implies(Formula::Bottom, name('a'))
        );
    }

    #[test]
    fn test_right_associativity() {
        // a > b > c reads a → (b → c)
        assert_eq!(
            parse_formula("a > b > c").unwrap(),
            Formula::implies(name('a'), Formula::implies(name('b'), name('c')))
        );
        // single precedence level: a & b > c reads a ∧ (b → c)
        assert_eq!(
            parse_formula("a & b > c").unwrap(),
            Formula::and(name('a'), Formula::implies(name('b'), name('c')))
        );
    }

    #[test]
    fn test_brackets_interchangeable() {
        let expected = Formula::implies(Formula::and(name('a'), name('b')), name('c'));
        assert_eq!(parse_formula("(a & b) > c").unwrap(), expected);
        assert_eq!(parse_formula("[a & b] > c").unwrap(), expected);
        assert_eq!(parse_formula("{a & b) > c").unwrap(), expected);
    }

    #[test]
    fn test_whitespace_ignored() {
        assert_eq!(
            parse_formula("  a   >\tb ").unwrap(),
            Formula::implies(name('a'), name('b'))
        );
    }

    #[test]
    fn test_errors() {
        assert!(parse_formula("").is_err());
        assert!(parse_formula("a >").is_err());
        assert!(parse_formula("(a").is_err());
        assert!(parse_formula("a b").is_err());
        assert!(parse_formula("> a").is_err());
    }

    #[test]
    fn test_parse_pretty_round_trip() {
        let formulas = vec![
            name('a'),
            Formula::Bottom,
            Formula::not(Formula::and(name('a'), Formula::not(name('a')))),
            Formula::implies(name('a'), Formula::not(Formula::not(name('a')))),
            Formula::implies(
                Formula::and(
                    Formula::implies(name('a'), name('b')),
                    Formula::implies(name('b'), name('c')),
                ),
                Formula::implies(name('a'), name('c')),
            ),
            Formula::implies(
                Formula::iff(name('a'), name('b')),
                Formula::iff(name('b'), name('a')),
            ),
            Formula::or(name('a'), Formula::not(name('a'))),
        ];

        for formula in formulas {
            let reparsed = parse_formula(&formula.pretty()).unwrap();
            assert_eq!(reparsed, formula, "round trip failed for {}", formula);
        }
    }
}
