//! Iterative-deepening proof search.
//!
//! [`Prover::prove`] looks for a proof billed at 1, then 2, and so on,
//! so the first proof found is minimal under the search's billing. At
//! each budget, [`Prover::find_proof`] tries one generator per rule in a
//! fixed order; the first generator that produces a proof wins.
//!
//! Billing coincides with the structural size metric except for `∧E`,
//! which is billed like a reiteration: a returned tree's structural size
//! exceeds the billed size by one per `∧E` node in it, and a tree free
//! of `∧E` consumes its budget exactly. This holds wherever an `∧E`
//! appears, whether as a witness citation or as the entire body proven
//! under a discharged assumption.
//!
//! ## Wildcard rules
//!
//! The elimination rules and `⊥I` contain a metavariable the goal does
//! not fix (which disjunction to eliminate, which implication to apply,
//! which formula to contradict). Generators restrict that metavariable to
//! formulas *in scope*: the active assumptions plus the immediate
//! conjuncts of any assumed conjunction. A proof that eliminates a
//! non-assumed formula is redundant: the formula had to be derived by an
//! earlier step, and the derivation can be composed with that step
//! directly. Nothing is lost by the restriction on the intended workload.
//!
//! A witness is cited through a budget-1 *fetch*: a reiteration when the
//! witness is itself assumed, otherwise a single `∧E` applied to a
//! reiteration of the assumed conjunction.

use fitch_core::{Formula, ProofNode, Rule};
use log::{debug, trace};
use std::collections::HashSet;

/// A prover for propositional formulas.
pub struct Prover {
    /// Largest proof size to try before giving up; `None` searches
    /// forever (and so diverges on non-theorems)
    pub max_size: Option<usize>,
    /// Enable caching of failed subgoals
    pub use_cache: bool,
    /// Subgoals known to have no proof, keyed by goal, active
    /// assumptions, and budget
    cache: HashSet<(Formula, Vec<Formula>, usize)>,
    /// Statistics for the most recent [`Prover::prove`] call
    stats: SearchStats,
}

/// Statistics about a proof search.
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Number of subgoals explored
    pub goals_explored: usize,
    /// Number of cache hits
    pub cache_hits: usize,
    /// Largest size the deepening driver reached
    pub max_size_reached: usize,
}

impl Default for Prover {
    fn default() -> Self {
        Self::new()
    }
}

impl Prover {
    /// Create an unbounded prover.
    pub fn new() -> Self {
        Self {
            max_size: None,
            use_cache: true,
            cache: HashSet::new(),
            stats: SearchStats::default(),
        }
    }

    /// Create a prover that gives up beyond the given proof size.
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size: Some(max_size),
            ..Self::new()
        }
    }

    /// Get statistics about the most recent search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Clear the cache and reset statistics.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.stats = SearchStats::default();
    }

    /// Search for a proof of `goal` by iterative deepening.
    ///
    /// Returns the first proof found, which is minimal under the
    /// search's billing; the tree's structural size exceeds the billed
    /// size by one per `∧E` node and otherwise matches it. Returns
    /// `None` only when `max_size` is set and exhausted; "no proof
    /// within the budget" and "not a theorem" are indistinguishable.
    pub fn prove(&mut self, goal: &Formula) -> Option<ProofNode> {
        self.stats = SearchStats::default();
        let mut assumptions = Vec::new();

        let mut size = 1;
        loop {
            if let Some(cap) = self.max_size {
                if size > cap {
                    debug!("no proof of {} within size {}", goal, cap);
                    return None;
                }
            }
            self.stats.max_size_reached = size;
            debug!("searching for a proof of {} at size {}", goal, size);

            if let Some(proof) = self.find_proof(goal, &mut assumptions, size) {
                return Some(proof);
            }
            size += 1;
        }
    }

    /// Search for a proof of `goal` billed at exactly `size`, citing
    /// only formulas reachable from `assumptions`. The returned tree's
    /// structural size equals `size` plus one per `∧E` node in it.
    pub fn find_proof(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        if size == 0 {
            return None;
        }
        self.stats.goals_explored += 1;

        if self.use_cache {
            let key = (goal.clone(), assumptions.clone(), size);
            if self.cache.contains(&key) {
                self.stats.cache_hits += 1;
                return None;
            }
            let result = self.dispatch(goal, assumptions, size);
            if result.is_none() {
                self.cache.insert(key);
            }
            return result;
        }

        self.dispatch(goal, assumptions, size)
    }

    /// Like [`Prover::find_proof`], but with `assuming` additionally in
    /// scope. On success the returned node discharges `assuming` in its
    /// assumption slot. The budget excludes the discharged assumption;
    /// callers account for it.
    pub fn find_proof_assuming(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
        assuming: &Formula,
    ) -> Option<ProofNode> {
        assumptions.push(assuming.clone());
        let found = self.find_proof(goal, assumptions, size);
        assumptions.pop();

        found.map(|mut proof| {
            proof.assumption = Some(assuming.clone());
            proof
        })
    }

    fn dispatch(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        let result = self
            .try_reiteration(goal, assumptions, size)
            .or_else(|| self.try_and_intro(goal, assumptions, size))
            .or_else(|| self.try_and_elim(goal, assumptions, size))
            .or_else(|| self.try_or_intro(goal, assumptions, size))
            .or_else(|| self.try_or_elim(goal, assumptions, size))
            .or_else(|| self.try_implies_intro(goal, assumptions, size))
            .or_else(|| self.try_implies_elim(goal, assumptions, size))
            .or_else(|| self.try_iff_intro(goal, assumptions, size))
            .or_else(|| self.try_iff_elim(goal, assumptions, size))
            .or_else(|| self.try_bottom_intro(goal, assumptions, size))
            .or_else(|| self.try_not_intro(goal, assumptions, size))
            .or_else(|| self.try_not_elim(goal, assumptions, size));

        if let Some(proof) = &result {
            trace!("proved {} via {} at size {}", goal, proof.rule.glyph(), size);
        }
        result
    }

    /// Cite a formula in scope at budget 1: a reiteration if it is
    /// assumed, a single `∧E` if it is a conjunct of an assumed
    /// conjunction.
    fn fetch(
        &mut self,
        witness: &Formula,
        assumptions: &mut Vec<Formula>,
    ) -> Option<ProofNode> {
        self.find_proof(witness, assumptions, 1)
    }

    /// `prove <goal> via re`; requires `goal` among the assumptions.
    fn try_reiteration(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        if size != 1 {
            return None;
        }
        if assumptions.contains(goal) {
            Some(ProofNode::reiteration(goal.clone()))
        } else {
            None
        }
    }

    /// `prove <l ∧ r> via ∧I` from proofs of both conjuncts, splitting
    /// the remaining budget between them.
    fn try_and_intro(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        let Formula::And(left, right) = goal else {
            return None;
        };
        if size < 3 {
            return None;
        }

        for (lsize, rsize) in splits(size - 1) {
            if let Some(lproof) = self.find_proof(left, assumptions, lsize) {
                if let Some(rproof) = self.find_proof(right, assumptions, rsize) {
                    return Some(ProofNode::new(
                        goal.clone(),
                        Rule::AndIntro,
                        vec![lproof, rproof],
                    ));
                }
            }
        }
        None
    }

    /// `prove <goal> via ∧E`; requires an assumed conjunction with
    /// `goal` as a conjunct. Budget 1: this rule doubles as a fetch and
    /// is billed like a reiteration.
    fn try_and_elim(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        if size != 1 {
            return None;
        }
        for assumed in assumptions.iter() {
            if let Formula::And(left, right) = assumed {
                if left.as_ref() == goal || right.as_ref() == goal {
                    return Some(ProofNode::new(
                        goal.clone(),
                        Rule::AndElim,
                        vec![ProofNode::reiteration(assumed.clone())],
                    ));
                }
            }
        }
        None
    }

    /// `prove <l ∨ r> via ∨I` from a proof of either disjunct at the
    /// remaining budget.
    fn try_or_intro(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        let Formula::Or(left, right) = goal else {
            return None;
        };
        if size < 2 {
            return None;
        }

        if let Some(lproof) = self.find_proof(left, assumptions, size - 1) {
            return Some(ProofNode::new(goal.clone(), Rule::OrIntro, vec![lproof]));
        }
        if let Some(rproof) = self.find_proof(right, assumptions, size - 1) {
            return Some(ProofNode::new(goal.clone(), Rule::OrIntro, vec![rproof]));
        }
        None
    }

    /// `prove <goal> via ∨E` from a disjunction in scope and subproofs of
    /// `goal` under each disjunct.
    fn try_or_elim(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        if size < 5 {
            return None;
        }

        for witness in in_scope(assumptions) {
            let Formula::Or(left, right) = &witness else {
                continue;
            };
            let (left, right) = (left.as_ref().clone(), right.as_ref().clone());

            let Some(citation) = self.fetch(&witness, assumptions) else {
                continue;
            };
            for (lsize, rsize) in splits(size - 4) {
                if let Some(lproof) =
                    self.find_proof_assuming(goal, assumptions, lsize, &left)
                {
                    if let Some(rproof) =
                        self.find_proof_assuming(goal, assumptions, rsize, &right)
                    {
                        return Some(ProofNode::new(
                            goal.clone(),
                            Rule::OrElim,
                            vec![citation, lproof, rproof],
                        ));
                    }
                }
            }
        }
        None
    }

    /// `prove <l → r> via →I` from a subproof of `r` assuming `l`.
    fn try_implies_intro(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        let Formula::Implies(left, right) = goal else {
            return None;
        };
        if size < 3 {
            return None;
        }

        self.find_proof_assuming(right, assumptions, size - 2, left)
            .map(|sub| ProofNode::new(goal.clone(), Rule::ImpliesIntro, vec![sub]))
    }

    /// `prove <goal> via →E` from an implication in scope whose
    /// consequent is `goal` and a proof of its antecedent.
    fn try_implies_elim(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        if size < 3 {
            return None;
        }

        for witness in in_scope(assumptions) {
            let Formula::Implies(antecedent, consequent) = &witness else {
                continue;
            };
            if consequent.as_ref() != goal {
                continue;
            }
            let antecedent = antecedent.as_ref().clone();

            let Some(citation) = self.fetch(&witness, assumptions) else {
                continue;
            };
            if let Some(antecedent_proof) =
                self.find_proof(&antecedent, assumptions, size - 2)
            {
                return Some(ProofNode::new(
                    goal.clone(),
                    Rule::ImpliesElim,
                    vec![citation, antecedent_proof],
                ));
            }
        }
        None
    }

    /// `prove <l ↔ r> via ↔I` from subproofs in each direction, splitting
    /// the budget left after the rule and the two discharged assumptions.
    fn try_iff_intro(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        let Formula::Iff(left, right) = goal else {
            return None;
        };
        if size < 5 {
            return None;
        }

        for (ltr_size, rtl_size) in splits(size - 3) {
            if let Some(ltr) = self.find_proof_assuming(right, assumptions, ltr_size, left)
            {
                if let Some(rtl) =
                    self.find_proof_assuming(left, assumptions, rtl_size, right)
                {
                    return Some(ProofNode::new(
                        goal.clone(),
                        Rule::IffIntro,
                        vec![ltr, rtl],
                    ));
                }
            }
        }
        None
    }

    /// `prove <goal> via ↔E` from a biconditional in scope with `goal` on
    /// one side and a proof of the other side.
    fn try_iff_elim(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        if size < 3 {
            return None;
        }

        for witness in in_scope(assumptions) {
            let Formula::Iff(left, right) = &witness else {
                continue;
            };
            let other = if left.as_ref() == goal {
                right.as_ref().clone()
            } else if right.as_ref() == goal {
                left.as_ref().clone()
            } else {
                continue;
            };

            let Some(citation) = self.fetch(&witness, assumptions) else {
                continue;
            };
            if let Some(other_proof) = self.find_proof(&other, assumptions, size - 2) {
                return Some(ProofNode::new(
                    goal.clone(),
                    Rule::IffElim,
                    vec![citation, other_proof],
                ));
            }
        }
        None
    }

    /// `prove <⊥> via ⊥I` from a formula in scope and a proof of its
    /// negation. A negated formula in scope is contradicted by proving
    /// the formula under the negation; anything else by proving its
    /// negation.
    fn try_bottom_intro(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        if *goal != Formula::Bottom {
            return None;
        }
        if size < 3 {
            return None;
        }

        for witness in in_scope(assumptions) {
            if let Formula::Not(inner) = &witness {
                let inner = inner.as_ref().clone();
                if let Some(inner_proof) = self.find_proof(&inner, assumptions, size - 2) {
                    let Some(citation) = self.fetch(&witness, assumptions) else {
                        continue;
                    };
                    return Some(ProofNode::new(
                        Formula::Bottom,
                        Rule::BottomIntro,
                        vec![inner_proof, citation],
                    ));
                }
            } else {
                let negated = Formula::not(witness.clone());
                if let Some(negated_proof) =
                    self.find_proof(&negated, assumptions, size - 2)
                {
                    let Some(citation) = self.fetch(&witness, assumptions) else {
                        continue;
                    };
                    return Some(ProofNode::new(
                        Formula::Bottom,
                        Rule::BottomIntro,
                        vec![citation, negated_proof],
                    ));
                }
            }
        }
        None
    }

    /// `prove <¬inner> via ¬I` from a subproof of ⊥ assuming `inner`.
    fn try_not_intro(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        let Formula::Not(inner) = goal else {
            return None;
        };
        if size < 3 {
            return None;
        }

        self.find_proof_assuming(&Formula::Bottom, assumptions, size - 2, inner)
            .map(|sub| ProofNode::new(goal.clone(), Rule::NotIntro, vec![sub]))
    }

    /// `prove <goal> via ¬E` from a proof of ¬¬goal. This is the
    /// classical rule; `⊥E` is derivable from it together with `¬I` and
    /// so has no generator of its own.
    fn try_not_elim(
        &mut self,
        goal: &Formula,
        assumptions: &mut Vec<Formula>,
        size: usize,
    ) -> Option<ProofNode> {
        if size < 2 {
            return None;
        }

        let notnot = Formula::not(Formula::not(goal.clone()));
        self.find_proof(&notnot, assumptions, size - 1)
            .map(|sub| ProofNode::new(goal.clone(), Rule::NotElim, vec![sub]))
    }
}

/// All ways to split a budget into two positive parts, in lexicographic
/// order: `splits(4)` yields `(1, 3), (2, 2), (3, 1)`.
fn splits(budget: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..budget).map(move |left| (left, budget - left))
}

/// The formulas a wildcard rule may use as its witness: every active
/// assumption, then the immediate conjuncts of every assumed conjunction.
fn in_scope(assumptions: &[Formula]) -> Vec<Formula> {
    let mut scope: Vec<Formula> = assumptions.to_vec();
    for assumed in assumptions {
        if let Formula::And(left, right) = assumed {
            scope.push(left.as_ref().clone());
            scope.push(right.as_ref().clone());
        }
    }
    scope
}
