//! # fitch-viz
//!
//! Fitch-style presentation for the fitch prover.
//!
//! A proof tree from the search engine is lowered into a linear, indented
//! derivation: numbered lines, one nested block per discharged
//! assumption, each statement annotated with its rule and the lines it
//! cites. Example, for `¬(a ∧ ¬a)`:
//!
//! ```text
//! │ 1. a ∧ ¬a  [as]
//! │───
//! │ 2. a  [∧E:1]
//! │ 3. ¬a  [∧E:1]
//! │ 4. ⊥  [⊥I:2,3]
//! 5. ¬(a ∧ ¬a)  [¬I:1-4]
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arrange;
pub mod line;

pub use arrange::{arrange, ArrangeError};
pub use fitch_core::ProofNode;
pub use line::{Block, Bunch, Line, LineRef, Stmt};

/// Arrange a proof tree and render it as a Fitch-style derivation.
pub fn render_proof(proof: &ProofNode) -> Result<String, ArrangeError> {
    Ok(arrange(proof)?.pretty())
}
