//! In-process engine backed by `strictly_quarto`.

use strictly_quarto::QuartoEngine;
use tracing::{info, instrument};

use super::{Engine, EngineError, EngineLoader};

/// [`Engine`] implementation running the reference Quarto rules in-process.
#[derive(Debug, Clone)]
pub struct LocalEngine {
    inner: QuartoEngine,
}

impl LocalEngine {
    /// Creates an engine seeded for the computer policy.
    #[instrument]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: QuartoEngine::new(seed),
        }
    }
}

impl Engine for LocalEngine {
    fn fetch_game_state(&self) -> Result<String, EngineError> {
        Ok(self.inner.fetch_game_state()?)
    }

    fn fetch_policy_action(&mut self) -> Result<String, EngineError> {
        Ok(self.inner.fetch_policy_action()?)
    }

    fn play_turn(
        &mut self,
        row: usize,
        col: usize,
        piece_index: Option<usize>,
    ) -> Result<(), EngineError> {
        Ok(self.inner.play_turn(row, col, piece_index)?)
    }

    fn is_game_over(&self) -> Result<bool, EngineError> {
        Ok(self.inner.is_game_over())
    }

    fn judge_winner(&self, human_moved_first: bool) -> Result<String, EngineError> {
        Ok(self.inner.judge_winner(human_moved_first)?)
    }

    fn reset(&mut self) -> Result<(), EngineError> {
        self.inner.reset();
        Ok(())
    }
}

/// Builds a [`LocalEngine`] off the UI thread.
#[derive(Debug, Clone, Copy, derive_new::new)]
pub struct LocalEngineLoader {
    seed: u64,
}

#[async_trait::async_trait]
impl EngineLoader for LocalEngineLoader {
    #[instrument(skip(self), fields(seed = self.seed))]
    async fn load(&self) -> Result<Box<dyn Engine>, EngineError> {
        let seed = self.seed;
        let engine = tokio::task::spawn_blocking(move || LocalEngine::new(seed))
            .await
            .map_err(|e| EngineError::unavailable(format!("Engine load task failed: {}", e)))?;
        info!("Local engine loaded");
        Ok(Box::new(engine))
    }
}
