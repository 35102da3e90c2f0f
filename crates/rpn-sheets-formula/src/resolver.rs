//! Cell-reference resolution
//!
//! Resolution evaluates a referenced cell on demand and recurses into any
//! references it contains. An [`EvaluationState`] is threaded through the
//! whole call tree of one top-level cell:
//!
//! - *in-progress* holds the references on the active path. Meeting one of
//!   them again is a cycle.
//! - *completed* holds references whose resolution finished without a
//!   cycle. A completed reference is not cycle-checked again.
//!
//! With [`CompletionPolicy::Rewalk`] (the default) a completed reference is
//! re-evaluated from its cell text with a fresh state rather than read from
//! a cache. [`CompletionPolicy::Cache`] keeps the computed values instead.
//! Evaluation is deterministic, so both policies give identical results.

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::evaluate;
use crate::token::{CellContent, CellReference};
use ahash::{AHashMap, AHashSet};
use rpn_sheets_core::{CellAddress, Grid};
use tracing::trace;

/// How completed references are re-read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Re-walk the referenced cell with a fresh state on every hit
    #[default]
    Rewalk,
    /// Keep the value computed on first resolution
    Cache,
}

/// Reference tracking for one top-level cell evaluation
#[derive(Debug, Default)]
pub struct EvaluationState {
    policy: CompletionPolicy,
    in_progress: AHashSet<CellAddress>,
    completed: AHashSet<CellAddress>,
    values: AHashMap<CellAddress, f64>,
}

impl EvaluationState {
    /// Create an empty state with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty state with the given policy
    pub fn with_policy(policy: CompletionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// An empty state sharing this state's policy
    pub fn fresh(&self) -> Self {
        Self::with_policy(self.policy)
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    /// Check if `addr` is on the active resolution path
    pub fn is_in_progress(&self, addr: &CellAddress) -> bool {
        self.in_progress.contains(addr)
    }

    /// Check if `addr` has been resolved without a cycle
    pub fn is_completed(&self, addr: &CellAddress) -> bool {
        self.completed.contains(addr)
    }

    fn mark_completed(&mut self, addr: CellAddress, value: f64) {
        self.completed.insert(addr);
        if self.policy == CompletionPolicy::Cache {
            self.values.insert(addr, value);
        }
    }

    fn cached(&self, addr: &CellAddress) -> Option<f64> {
        match self.policy {
            CompletionPolicy::Cache => self.values.get(addr).copied(),
            CompletionPolicy::Rewalk => None,
        }
    }
}

/// Resolve a reference to the numeric value of the cell it names
pub fn resolve(
    reference: &CellReference,
    grid: &Grid,
    state: &mut EvaluationState,
) -> FormulaResult<f64> {
    let addr = reference
        .address
        .ok_or_else(|| FormulaError::InvalidCellReference(reference.name.clone()))?;

    resolve_address(addr, grid, state)
}

fn resolve_address(
    addr: CellAddress,
    grid: &Grid,
    state: &mut EvaluationState,
) -> FormulaResult<f64> {
    if state.is_completed(&addr) {
        if let Some(value) = state.cached(&addr) {
            trace!("{addr} cached as {value}");
            return Ok(value);
        }
        trace!("{addr} already completed, re-walking with a fresh state");
        let mut fresh = state.fresh();
        return evaluate_content(addr, grid, &mut fresh);
    }

    if state.is_in_progress(&addr) {
        return Err(FormulaError::CyclicReference(addr.to_string()));
    }

    state.in_progress.insert(addr);
    let result = evaluate_content(addr, grid, state);
    state.in_progress.remove(&addr);

    let value = result?;
    trace!("{addr} resolved to {value}");
    state.mark_completed(addr, value);
    Ok(value)
}

/// Evaluate the text of the cell at `addr` as a referenced cell
fn evaluate_content(
    addr: CellAddress,
    grid: &Grid,
    state: &mut EvaluationState,
) -> FormulaResult<f64> {
    let raw = grid
        .get(&addr)
        .ok_or_else(|| FormulaError::InvalidCellReference(addr.to_string()))?;

    trace!("fetched {addr}: '{raw}'");

    match CellContent::classify(raw) {
        CellContent::Number(n) => Ok(n),
        CellContent::Expression(tokens) => evaluate(&tokens, grid, state),
        CellContent::Reference(next) => resolve(&next, grid, state),
        CellContent::Other => Err(FormulaError::InvalidCellContent {
            reference: addr.to_string(),
            content: raw.to_string(),
        }),
    }
}
