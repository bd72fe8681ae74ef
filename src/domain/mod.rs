//! Domain layer containing the assessment and recommendation algorithms.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `personality` - Trait axes, poles, labels and the question bank
//! - `estimator` - Feature builder, dropout network and uncertainty math
//! - `bandit` - Process-wide epsilon-greedy axis selection
//! - `assessment` - Adaptive assessment session aggregate
//! - `interest` - Six-dimension interest quiz and its scoring
//! - `recommendation` - Signal fusion ranking of outcome categories

pub mod assessment;
pub mod bandit;
pub mod estimator;
pub mod foundation;
pub mod interest;
pub mod personality;
pub mod recommendation;
