//! Reloadable, explicitly owned model handle.
//!
//! The handle loads eagerly when opened and only reloads when the owner calls
//! [`ModelHandle::refresh`]. A failed refresh leaves the previously loaded
//! model in place.

use std::fmt;

use crate::backend::{ModelError, RiskModel};
use crate::loader::ModelLoader;

pub struct ModelHandle {
    loader: Option<Box<dyn ModelLoader>>,
    model: Box<dyn RiskModel>,
    generation: u64,
}

impl ModelHandle {
    /// Load a model from `loader`, keeping the loader for later refreshes.
    pub fn open(loader: impl ModelLoader + 'static) -> Result<Self, ModelError> {
        let model = loader.load()?;
        log::info!("loaded model '{}' from {}", model.name(), loader.describe());
        Ok(Self {
            loader: Some(Box::new(loader)),
            model,
            generation: 1,
        })
    }

    /// Wrap an already constructed model. Refreshing it is a no-op.
    pub fn fixed(model: impl RiskModel + 'static) -> Self {
        Self {
            loader: None,
            model: Box::new(model),
            generation: 1,
        }
    }

    pub fn model(&self) -> &dyn RiskModel {
        self.model.as_ref()
    }

    /// Number of successful loads so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_reloadable(&self) -> bool {
        self.loader.is_some()
    }

    pub fn refresh(&mut self) -> Result<(), ModelError> {
        let Some(loader) = &self.loader else {
            log::debug!("model '{}' has no loader; refresh skipped", self.model.name());
            return Ok(());
        };
        match loader.load() {
            Ok(model) => {
                log::info!(
                    "reloaded model '{}' from {} (generation {})",
                    model.name(),
                    loader.describe(),
                    self.generation + 1
                );
                self.model = model;
                self.generation += 1;
                Ok(())
            }
            Err(e) => {
                log::warn!(
                    "refresh from {} failed, keeping '{}': {e}",
                    loader.describe(),
                    self.model.name()
                );
                Err(e)
            }
        }
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("model", &self.model.name())
            .field("source", &self.loader.as_ref().map(|l| l.describe()))
            .field("generation", &self.generation)
            .finish()
    }
}
