//! Strategy components.

pub mod levels;
pub mod reconciler;

pub use levels::{LevelProvider, LevelsError, RungSpec, StaticSpreadLevels};
pub use reconciler::{OfferReconciler, ReconcileError};
