//! Sources a [`ModelHandle`](crate::ModelHandle) can (re)load a model from

use std::path::{Path, PathBuf};

use crate::backend::{ModelError, RiskModel};
use crate::backends::LogisticModel;

pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<Box<dyn RiskModel>, ModelError>;

    /// Human-readable origin used in log lines
    fn describe(&self) -> String;
}

/// Reads a [`LogisticModel`] JSON artifact from disk on every load.
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    path: PathBuf,
}

impl ArtifactLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelLoader for ArtifactLoader {
    fn load(&self) -> Result<Box<dyn RiskModel>, ModelError> {
        Ok(Box::new(LogisticModel::load(&self.path)?))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
