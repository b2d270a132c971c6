//! Model side of infant mortality risk scoring.
//!
//! Defines the training schema ([`ModelRow`] and its builder), the
//! [`RiskModel`] inference contract, a JSON logistic-regression artifact and
//! the reloadable [`ModelHandle`] an evaluator owns.

pub mod backend;
pub mod backends;
pub mod handle;
pub mod loader;
pub mod schema;

pub use backend::{positive_probability, ModelError, RiskModel};
pub use backends::LogisticModel;
pub use handle::ModelHandle;
pub use loader::{ArtifactLoader, ModelLoader};
pub use schema::{ColumnKind, ColumnValue, ModelRow, ModelRowBuilder, WealthIndex, COLUMNS};
