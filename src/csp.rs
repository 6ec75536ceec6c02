//! CSP engine: model construction and the seven move-selection strategies

pub mod local_search;
pub mod model;
pub mod propagation;
pub mod search;

pub use local_search::{DEFAULT_MAX_STEPS, min_conflicts};
pub use model::{CspModel, DomainSet, degree_heuristic};
pub use propagation::{DEFAULT_K, arc_consistency, constraint_propagation, k_consistency};
pub use search::{Assignment, backtracking_search, forward_checking};
