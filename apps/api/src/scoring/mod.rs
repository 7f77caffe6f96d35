// Career scoring: reference tables, the heuristic engine, and the pluggable
// predictor backends that sit in front of it.

use thiserror::Error;

pub mod engine;
pub mod models;
pub mod predictor;
pub mod tables;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
