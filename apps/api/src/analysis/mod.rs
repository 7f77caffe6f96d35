// Analysis API: stored predictions, history, comparison and reports.
pub mod handlers;
pub mod models;
pub mod repository;
