//! `assessjoin-linkage` - Mortgage-to-assessment record linkage engine.
//!
//! Pure engine crate: receives already-fetched CSV text, returns joined rows.
//! It performs no I/O. [`JoinConfig`] describes a whole run, including where
//! the inputs live, the output path and HTTP settings; those sections are
//! read and acted on by the caller, the engine only uses `[window]`.

pub mod address;
pub mod columns;
pub mod config;
pub mod dates;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod matcher;
pub mod model;
pub mod mortgage;
pub mod property;

pub use address::normalize_address;
pub use config::JoinConfig;
pub use engine::run;
pub use error::LinkageError;
pub use model::{JoinResult, JoinedRow, MatchTier, MortgageRecord, PropertyRecord};
pub use property::PropertyIndex;
