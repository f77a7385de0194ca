//! Line-tree representation of a Fitch-style derivation.
//!
//! A proof tree is lowered (by [`crate::arrange`]) into a sequence of
//! numbered statements and nested blocks. Where the proof tree decomposes
//! its goal top-down, the line tree reads bottom-up: known facts first,
//! each line citing the earlier lines that justify it, the goal last.

use fitch_core::{Formula, Rule};
use std::fmt;

/// A line of a Fitch-style derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// A single numbered statement
    Stmt(Stmt),
    /// An indented subderivation
    Block(Block),
}

/// A citation of earlier material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineRef {
    /// A single line, cited by number
    Line(usize),
    /// A block, cited as opening line through closing line
    Span(usize, usize),
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRef::Line(lineno) => write!(f, "{}", lineno),
            LineRef::Span(lo, hi) => write!(f, "{}-{}", lo, hi),
        }
    }
}

/// One numbered statement: a claim, the rule justifying it, and the
/// prior lines the rule cites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stmt {
    /// The formula this line states
    pub claim: Formula,
    /// The rule justifying the claim
    pub rule: Rule,
    /// This line's number
    pub lineno: usize,
    /// Citations of earlier lines and blocks
    pub prereqs: Vec<LineRef>,
}

impl Stmt {
    pub(crate) fn pretty(&self) -> String {
        let prereqs = if self.prereqs.is_empty() {
            String::new()
        } else {
            let spans: Vec<String> = self.prereqs.iter().map(LineRef::to_string).collect();
            format!(":{}", spans.join(","))
        };

        // The echo line of an `assuming X, prove X` block shares the
        // assumption's number and renders without one.
        if self.rule == Rule::Reiteration {
            format!("{}  [{}{}]", self.claim, self.rule.glyph(), prereqs)
        } else {
            format!("{}. {}  [{}{}]", self.lineno, self.claim, self.rule.glyph(), prereqs)
        }
    }
}

/// An indented subderivation: an assumption line followed by the lines
/// proven under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// The assumption opening the block
    pub assumption: Stmt,
    /// Lines proven under the assumption (the assumption itself excluded)
    pub body: Vec<Line>,
}

impl Block {
    /// The block's extent as cited by rules that discharge it: the
    /// assumption's line through the last line of the body.
    pub fn span(&self) -> (usize, usize) {
        (self.assumption.lineno, self.last_lineno())
    }

    fn last_lineno(&self) -> usize {
        match self.body.last() {
            Some(Line::Stmt(stmt)) => stmt.lineno,
            Some(Line::Block(block)) => block.last_lineno(),
            None => self.assumption.lineno,
        }
    }

    pub(crate) fn pretty(&self) -> String {
        let mut rows = vec![format!(" {}", self.assumption.pretty()), "───".to_string()];
        for line in &self.body {
            match line {
                Line::Stmt(stmt) => rows.push(format!(" {}", stmt.pretty())),
                Line::Block(block) => rows.push(block.pretty()),
            }
        }
        indent(&rows.join("\n"), "│")
    }
}

/// The top-level container of a derivation. Unlike a [`Block`], a bunch
/// carries no assumption: a completed Fitch proof starts with nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bunch {
    /// The derivation's lines, outermost scope
    pub body: Vec<Line>,
}

impl Bunch {
    /// Render the derivation.
    pub fn pretty(&self) -> String {
        self.body
            .iter()
            .map(|line| match line {
                Line::Stmt(stmt) => stmt.pretty(),
                Line::Block(block) => block.pretty(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Bunch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

fn indent(text: &str, indentation: &str) -> String {
    text.lines()
        .map(|row| format!("{}{}", indentation, row))
        .collect::<Vec<_>>()
        .join("\n")
}
