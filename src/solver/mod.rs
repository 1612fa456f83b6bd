//! Resolution engines and the reconciliation cost they optimize.
//!
//! * [ResolutionEngine] - interface of a cost-based polytomy solver
//! * [SpeciesGuidedEngine] - default engine, resolving along the species tree
//! * [PassThroughEngine] - returns its input unchanged
//! * [CostModel], [ReconciliationCost] - duplication/loss weights and counts

mod cost;
mod engine;

pub use cost::{CostModel, ReconciliationCost};
pub use engine::{PassThroughEngine, ResolutionEngine, SpeciesGuidedEngine};
