//! Lowering proof trees to line trees.
//!
//! [`arrange`] walks a proof tree, numbering one statement per rule
//! application, opening a block for every discharged assumption, and
//! resolving every reiteration to the earlier line that introduced its
//! claim. It also eliminates repetition: a claim already stated in scope
//! is cited rather than derived a second time, so two different
//! derivations of the same formula collapse onto the earlier one.

use crate::line::{Block, Bunch, Line, LineRef, Stmt};
use fitch_core::{Formula, ProofNode, Rule};
use thiserror::Error;

/// Arrangement failure. This cannot happen for proofs produced by the
/// search engine; it signals a malformed tree.
#[derive(Debug, Error)]
pub enum ArrangeError {
    /// A reiteration cited a formula no line in scope states.
    #[error("reiterated formula {0} is not available in scope")]
    UnresolvedReiteration(Formula),
}

/// Lower a proof tree into a Fitch-style line tree.
pub fn arrange(proof: &ProofNode) -> Result<Bunch, ArrangeError> {
    let mut next_lineno = 1;
    match arrange_aux(proof, &[], &mut next_lineno)? {
        Arranged::Flat(lines) => Ok(Bunch { body: lines }),
        Arranged::Nested(block) => Ok(Bunch {
            body: vec![Line::Block(block)],
        }),
    }
}

/// The two shapes a subtree lowers to: lines to splice into the
/// enclosing scope, or a block to nest.
enum Arranged {
    Flat(Vec<Line>),
    Nested(Block),
}

fn arrange_aux(
    proof: &ProofNode,
    parent_context: &[&Line],
    next_lineno: &mut usize,
) -> Result<Arranged, ArrangeError> {
    let assumption_stmt = proof.assumption.as_ref().map(|assumed| Stmt {
        claim: assumed.clone(),
        rule: Rule::Assumption,
        lineno: use_lineno(next_lineno),
        prereqs: vec![],
    });

    // `assuming X, prove X`: the subderivation is a single reiteration.
    // The block still needs a visible body, so the claim is echoed on an
    // unnumbered line that shares the assumption's number, keeping the
    // block's span at N-N.
    if let (Some(assumption), Rule::Reiteration) = (&assumption_stmt, proof.rule) {
        let target = if proof.claim == assumption.claim {
            assumption.lineno
        } else {
            lookup(parent_context, &[], &proof.claim)
                .ok_or_else(|| ArrangeError::UnresolvedReiteration(proof.claim.clone()))?
        };
        let echo = Stmt {
            claim: proof.claim.clone(),
            rule: Rule::Reiteration,
            lineno: assumption.lineno,
            prereqs: vec![LineRef::Line(target)],
        };
        return Ok(Arranged::Nested(Block {
            assumption: assumption.clone(),
            body: vec![Line::Stmt(echo)],
        }));
    }

    let mut lines: Vec<Line> = Vec::new();
    if let Some(stmt) = &assumption_stmt {
        lines.push(Line::Stmt(stmt.clone()));
    }

    let mut prereqs: Vec<LineRef> = Vec::new();
    for subproof in &proof.subproofs {
        // Reiterations never take a line; they resolve to the line that
        // introduced the claim.
        if subproof.rule == Rule::Reiteration && subproof.assumption.is_none() {
            let lineno = lookup(parent_context, &lines, &subproof.claim).ok_or_else(|| {
                ArrangeError::UnresolvedReiteration(subproof.claim.clone())
            })?;
            prereqs.push(LineRef::Line(lineno));
            continue;
        }

        // A claim already stated in scope is cited, not derived again.
        if let Some(lineno) = lookup(parent_context, &lines, &subproof.claim) {
            prereqs.push(LineRef::Line(lineno));
            continue;
        }

        let arranged = {
            let context: Vec<&Line> =
                parent_context.iter().copied().chain(lines.iter()).collect();
            arrange_aux(subproof, &context, next_lineno)?
        };
        match arranged {
            Arranged::Flat(sub_lines) => {
                let conclusion = sub_lines.last().map(line_ref);
                lines.extend(sub_lines);
                if let Some(reference) = conclusion {
                    prereqs.push(reference);
                }
            }
            Arranged::Nested(block) => {
                let (lo, hi) = block.span();
                lines.push(Line::Block(block));
                prereqs.push(LineRef::Span(lo, hi));
            }
        }
    }

    lines.push(Line::Stmt(Stmt {
        claim: proof.claim.clone(),
        rule: proof.rule,
        lineno: use_lineno(next_lineno),
        prereqs,
    }));

    match assumption_stmt {
        None => Ok(Arranged::Flat(lines)),
        Some(assumption) => {
            let body = lines.split_off(1);
            Ok(Arranged::Nested(Block { assumption, body }))
        }
    }
}

fn use_lineno(next_lineno: &mut usize) -> usize {
    let lineno = *next_lineno;
    *next_lineno += 1;
    lineno
}

/// Find the earliest statement in scope with the given claim. Statements
/// inside closed blocks are not in scope and are never matched.
fn lookup(parent_context: &[&Line], local: &[Line], claim: &Formula) -> Option<usize> {
    parent_context
        .iter()
        .copied()
        .chain(local.iter())
        .find_map(|line| match line {
            Line::Stmt(stmt) if stmt.claim == *claim => Some(stmt.lineno),
            _ => None,
        })
}

fn line_ref(line: &Line) -> LineRef {
    match line {
        Line::Stmt(stmt) => LineRef::Line(stmt.lineno),
        Line::Block(block) => {
            let (lo, hi) = block.span();
            LineRef::Span(lo, hi)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(c: char) -> Formula {
        Formula::name(c)
    }

    fn assumed(mut node: ProofNode, assumption: Formula) -> ProofNode {
        node.assumption = Some(assumption);
        node
    }

    /// `a → a`: →I over an `assuming a, prove a` reiteration.
    fn identity_proof() -> ProofNode {
        let goal = Formula::implies(name('a'), name('a'));
        let sub = assumed(ProofNode::reiteration(name('a')), name('a'));
        ProofNode::new(goal, Rule::ImpliesIntro, vec![sub])
    }

    #[test]
    fn test_identity_block_span() {
        let bunch = arrange(&identity_proof()).unwrap();
        assert_eq!(bunch.body.len(), 2);

        let Line::Block(block) = &bunch.body[0] else {
            panic!("expected a block");
        };
        assert_eq!(block.span(), (1, 1));
        assert_eq!(block.assumption.lineno, 1);

        let Line::Stmt(conclusion) = &bunch.body[1] else {
            panic!("expected the conclusion");
        };
        assert_eq!(conclusion.lineno, 2);
        assert_eq!(conclusion.prereqs, vec![LineRef::Span(1, 1)]);
    }

    #[test]
    fn test_reiterations_consume_no_line() {
        // assuming a ∧ ¬a, derive ⊥ from its conjuncts
        let contradiction = Formula::and(name('a'), Formula::not(name('a')));
        let left = ProofNode::new(
            name('a'),
            Rule::AndElim,
            vec![ProofNode::reiteration(contradiction.clone())],
        );
        let right = ProofNode::new(
            Formula::not(name('a')),
            Rule::AndElim,
            vec![ProofNode::reiteration(contradiction.clone())],
        );
        let bottom = assumed(
            ProofNode::new(Formula::Bottom, Rule::BottomIntro, vec![left, right]),
            contradiction.clone(),
        );
        let proof = ProofNode::new(
            Formula::not(contradiction),
            Rule::NotIntro,
            vec![bottom],
        );

        let bunch = arrange(&proof).unwrap();
        let Line::Block(block) = &bunch.body[0] else {
            panic!("expected a block");
        };
        // assumption line 1, two ∧E lines, the ⊥ line; reiterated
        // conjunction cited as line 1 both times
        assert_eq!(block.span(), (1, 4));
        let Line::Stmt(and_elim) = &block.body[0] else {
            panic!("expected a statement");
        };
        assert_eq!(and_elim.lineno, 2);
        assert_eq!(and_elim.prereqs, vec![LineRef::Line(1)]);

        let Line::Stmt(bottom_stmt) = &block.body[2] else {
            panic!("expected a statement");
        };
        assert_eq!(
            bottom_stmt.prereqs,
            vec![LineRef::Line(2), LineRef::Line(3)]
        );
    }

    #[test]
    fn test_duplicate_claims_collapse() {
        // a → ((a ∨ b) ∧ (a ∨ b)): the second ∨I derivation must cite
        // the first instead of re-deriving
        let disjunction = Formula::or(name('a'), name('b'));
        let or_intro = || {
            ProofNode::new(
                disjunction.clone(),
                Rule::OrIntro,
                vec![ProofNode::reiteration(name('a'))],
            )
        };
        let conjunction = Formula::and(disjunction.clone(), disjunction.clone());
        let and_intro = assumed(
            ProofNode::new(conjunction.clone(), Rule::AndIntro, vec![or_intro(), or_intro()]),
            name('a'),
        );
        let proof = ProofNode::new(
            Formula::implies(name('a'), conjunction),
            Rule::ImpliesIntro,
            vec![and_intro],
        );

        let bunch = arrange(&proof).unwrap();
        let Line::Block(block) = &bunch.body[0] else {
            panic!("expected a block");
        };
        // lines: 1 assumption, 2 the ∨I, 3 the ∧I citing 2 twice
        assert_eq!(block.span(), (1, 3));
        let Line::Stmt(and_stmt) = &block.body[1] else {
            panic!("expected a statement");
        };
        assert_eq!(and_stmt.rule, Rule::AndIntro);
        assert_eq!(and_stmt.prereqs, vec![LineRef::Line(2), LineRef::Line(2)]);
    }

    #[test]
    fn test_unresolved_reiteration_is_an_error() {
        // a reiteration of something never stated anywhere
        let proof = ProofNode::new(
            Formula::or(name('a'), name('b')),
            Rule::OrIntro,
            vec![ProofNode::reiteration(name('a'))],
        );
        let err = arrange(&proof).unwrap_err();
        assert!(matches!(err, ArrangeError::UnresolvedReiteration(_)));
        assert_eq!(
            err.to_string(),
            "reiterated formula a is not available in scope"
        );
    }

    #[test]
    fn test_consecutive_numbering() {
        // nested blocks: a → ¬¬a
        let bottom = assumed(
            ProofNode::new(
                Formula::Bottom,
                Rule::BottomIntro,
                vec![
                    ProofNode::reiteration(name('a')),
                    ProofNode::reiteration(Formula::not(name('a'))),
                ],
            ),
            Formula::not(name('a')),
        );
        let not_not = assumed(
            ProofNode::new(
                Formula::not(Formula::not(name('a'))),
                Rule::NotIntro,
                vec![bottom],
            ),
            name('a'),
        );
        let proof = ProofNode::new(
            Formula::implies(name('a'), Formula::not(Formula::not(name('a')))),
            Rule::ImpliesIntro,
            vec![not_not],
        );

        let bunch = arrange(&proof).unwrap();
        let mut linenos = Vec::new();
        collect_linenos(&bunch.body, &mut linenos);
        assert_eq!(linenos, vec![1, 2, 3, 4, 5]);
    }

    fn collect_linenos(lines: &[Line], out: &mut Vec<usize>) {
        for line in lines {
            match line {
                Line::Stmt(stmt) => out.push(stmt.lineno),
                Line::Block(block) => {
                    out.push(block.assumption.lineno);
                    collect_linenos(&block.body, out);
                }
            }
        }
    }
}
