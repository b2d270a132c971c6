//! Concrete model implementations

pub mod logistic;

pub use logistic::LogisticModel;
