//! Interest Profiler - adaptive trait assessment and career cluster ranking
//!
//! An adaptive yes/no questionnaire estimates a four-letter trait label with
//! Monte Carlo dropout uncertainty, a Likert interest quiz produces a
//! six-dimension interest vector, and a signal fusion recommender combines
//! both into a ranked list of career clusters.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
