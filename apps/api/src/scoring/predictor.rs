//! Prediction backends: pluggable, trait-based, chosen once at startup.
//!
//! Default: `HeuristicPredictor` (local tables, no I/O).
//! With `ML_SERVICE_URL` set: `MlServicePredictor`, which asks the external
//! service first and falls back to the heuristic engine on any failure.
//!
//! `AppState` holds an `Arc<dyn CareerPredictor>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::ml_client::{MlHealth, MlServiceClient};
use crate::scoring::engine::ScoringEngine;
use crate::scoring::models::{PredictionBundle, Profile};

/// Which backend produced a bundle. Persisted next to each analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    MlService,
    Heuristic,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionSource::MlService => "ml_service",
            PredictionSource::Heuristic => "heuristic",
        }
    }
}

/// Backend report for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct BackendHealth {
    pub backend: &'static str,
    /// `None` for backends without an external dependency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ml_service: Option<MlServiceStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MlServiceStatus {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<MlHealth>,
}

#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub bundle: PredictionBundle,
    pub source: PredictionSource,
}

#[async_trait]
pub trait CareerPredictor: Send + Sync {
    async fn predict(&self, profile: &Profile) -> Result<PredictionOutcome, AppError>;

    /// Skill vocabulary offered to clients.
    async fn skills(&self) -> (Vec<String>, PredictionSource);

    /// Backend label for startup logs.
    fn backend(&self) -> &'static str;

    async fn health(&self) -> BackendHealth {
        BackendHealth {
            backend: self.backend(),
            ml_service: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicPredictor
// ────────────────────────────────────────────────────────────────────────────

pub struct HeuristicPredictor {
    engine: ScoringEngine,
}

impl HeuristicPredictor {
    pub fn new(engine: ScoringEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl CareerPredictor for HeuristicPredictor {
    async fn predict(&self, profile: &Profile) -> Result<PredictionOutcome, AppError> {
        Ok(PredictionOutcome {
            bundle: self.engine.predict(profile),
            source: PredictionSource::Heuristic,
        })
    }

    async fn skills(&self) -> (Vec<String>, PredictionSource) {
        (
            self.engine.tables().skill_vocabulary(),
            PredictionSource::Heuristic,
        )
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MlServicePredictor
// ────────────────────────────────────────────────────────────────────────────

pub struct MlServicePredictor {
    client: MlServiceClient,
    fallback: ScoringEngine,
}

impl MlServicePredictor {
    pub fn new(client: MlServiceClient, fallback: ScoringEngine) -> Self {
        Self { client, fallback }
    }
}

#[async_trait]
impl CareerPredictor for MlServicePredictor {
    async fn predict(&self, profile: &Profile) -> Result<PredictionOutcome, AppError> {
        match self.client.predict(profile).await {
            Ok(bundle) => Ok(PredictionOutcome {
                bundle,
                source: PredictionSource::MlService,
            }),
            Err(e) => {
                warn!("ML service unavailable, using heuristic prediction: {e}");
                Ok(PredictionOutcome {
                    bundle: self.fallback.predict(profile),
                    source: PredictionSource::Heuristic,
                })
            }
        }
    }

    async fn skills(&self) -> (Vec<String>, PredictionSource) {
        match self.client.skills().await {
            Ok(skills) if !skills.is_empty() => (skills, PredictionSource::MlService),
            Ok(_) => (
                self.fallback.tables().skill_vocabulary(),
                PredictionSource::Heuristic,
            ),
            Err(e) => {
                warn!("ML service skill list unavailable: {e}");
                (
                    self.fallback.tables().skill_vocabulary(),
                    PredictionSource::Heuristic,
                )
            }
        }
    }

    fn backend(&self) -> &'static str {
        "ml_service"
    }

    async fn health(&self) -> BackendHealth {
        let status = match self.client.health().await {
            Ok(health) => MlServiceStatus {
                reachable: true,
                health: Some(health),
            },
            Err(e) => {
                warn!("ML service health check failed at {}: {e}", self.client.base_url());
                MlServiceStatus {
                    reachable: false,
                    health: None,
                }
            }
        };
        BackendHealth {
            backend: self.backend(),
            ml_service: Some(status),
        }
    }
}
