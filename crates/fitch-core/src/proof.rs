//! Proof tree representation.
//!
//! A proof is a tree of rule applications. Each node claims a formula,
//! names the inference rule that justifies it, and carries the subproofs
//! the rule consumes. A node may additionally discharge a local
//! assumption, under which all of its subproofs are proven.
//!
//! The tree reads "inside out" relative to a Fitch-style derivation: where
//! a Fitch proof builds up from what is known toward the goal, the tree
//! decomposes the goal into the premises each rule requires. All leaves
//! are [`Rule::Reiteration`] nodes citing an active assumption.

use crate::Formula;

/// An inference rule of the natural-deduction calculus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Cite a formula already in scope
    Reiteration,
    /// From A and B conclude A ∧ B
    AndIntro,
    /// From A ∧ B conclude A (or B)
    AndElim,
    /// From A (or B) conclude A ∨ B
    OrIntro,
    /// From A ∨ B and subproofs of G under A and under B, conclude G
    OrElim,
    /// From a subproof of ⊥ under A, conclude ¬A
    NotIntro,
    /// From ¬¬A conclude A
    NotElim,
    /// From A and ¬A conclude ⊥
    BottomIntro,
    /// From ⊥ conclude anything
    BottomElim,
    /// From a subproof of B under A, conclude A → B
    ImpliesIntro,
    /// From A → B and A conclude B
    ImpliesElim,
    /// From subproofs of B under A and of A under B, conclude A ↔ B
    IffIntro,
    /// From A ↔ B and one side conclude the other
    IffElim,
    /// Open a subderivation; emitted only by the arranger
    Assumption,
}

/// The broad category a rule belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    /// Produces a formula of a specific connective
    Intro,
    /// Consumes a formula of a specific connective from scope
    Elim,
    /// Restates something already in scope
    Reiteration,
    /// Opens a subderivation
    Assumption,
}

impl Rule {
    /// Every rule of the calculus. The twelve searchable rules come
    /// first, in the prover's dispatch order; `BottomElim` (derived) and
    /// `Assumption` (arranger-only) close the list.
    pub const ALL: [Rule; 14] = [
        Rule::Reiteration,
        Rule::AndIntro,
        Rule::AndElim,
        Rule::OrIntro,
        Rule::OrElim,
        Rule::ImpliesIntro,
        Rule::ImpliesElim,
        Rule::IffIntro,
        Rule::IffElim,
        Rule::BottomIntro,
        Rule::NotIntro,
        Rule::NotElim,
        Rule::BottomElim,
        Rule::Assumption,
    ];

    /// The fixed glyph used when rendering proofs.
    pub fn glyph(&self) -> &'static str {
        match self {
            Rule::Reiteration => "re",
            Rule::AndIntro => "∧I",
            Rule::AndElim => "∧E",
            Rule::OrIntro => "∨I",
            Rule::OrElim => "∨E",
            Rule::NotIntro => "¬I",
            Rule::NotElim => "¬E",
            Rule::BottomIntro => "⊥I",
            Rule::BottomElim => "⊥E",
            Rule::ImpliesIntro => "→I",
            Rule::ImpliesElim => "→E",
            Rule::IffIntro => "↔I",
            Rule::IffElim => "↔E",
            Rule::Assumption => "as",
        }
    }

    /// Which category the rule falls into.
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Reiteration => RuleKind::Reiteration,
            Rule::Assumption => RuleKind::Assumption,
            Rule::AndIntro
            | Rule::OrIntro
            | Rule::NotIntro
            | Rule::BottomIntro
            | Rule::ImpliesIntro
            | Rule::IffIntro => RuleKind::Intro,
            Rule::AndElim
            | Rule::OrElim
            | Rule::NotElim
            | Rule::BottomElim
            | Rule::ImpliesElim
            | Rule::IffElim => RuleKind::Elim,
        }
    }
}

/// One node of a proof tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofNode {
    /// The formula this node proves
    pub claim: Formula,
    /// The rule justifying the claim
    pub rule: Rule,
    /// Immediate justifications, in citation order
    pub subproofs: Vec<ProofNode>,
    /// The local assumption this node discharges, if any
    pub assumption: Option<Formula>,
}

impl ProofNode {
    /// Create a node with no discharged assumption.
    pub fn new(claim: Formula, rule: Rule, subproofs: Vec<ProofNode>) -> Self {
        ProofNode {
            claim,
            rule,
            subproofs,
            assumption: None,
        }
    }

    /// Create a reiteration leaf.
    pub fn reiteration(claim: Formula) -> Self {
        ProofNode::new(claim, Rule::Reiteration, vec![])
    }

    /// The size of the proof: one per rule application plus one per
    /// discharged assumption. Used as the search budget.
    pub fn size(&self) -> usize {
        let own = 1 + usize::from(self.assumption.is_some());
        own + self.subproofs.iter().map(ProofNode::size).sum::<usize>()
    }

    /// Render the tree in a debugging notation, one rule application per
    /// line, subproofs indented.
    pub fn pretty(&self) -> String {
        let mut text = format!("prove <{}> via {}", self.claim, self.rule.glyph());
        if let Some(assumption) = &self.assumption {
            text = format!("assuming <{}>, {}", assumption, text);
        }
        if !self.subproofs.is_empty() {
            let subtext = self
                .subproofs
                .iter()
                .map(ProofNode::pretty)
                .collect::<Vec<_>>()
                .join("\n");
            text.push_str(":\n");
            text.push_str(&indent(&subtext, "|   "));
        }
        text
    }
}

fn indent(text: &str, indentation: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", indentation, line))
        .collect::<Vec<_>>()
        .join("\n")
}
