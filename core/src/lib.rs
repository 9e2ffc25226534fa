//! bumps-core: results of multi-day, multi-division bumps races.
//!
//! Two textual forms are supported and converted between:
//!   - a flat table with one row per crew per day (flat.rs)
//!   - a compact run-length notation per day of racing (notation.rs)
//!
//! Both go through the same model: an Event holding a movement matrix
//! indexed by (day, division, slot). The builder and the decoder fill it;
//! the encoder and replay read it.

pub mod builder;
pub mod config;
pub mod decoder;
pub mod division_index;
pub mod encoder;
pub mod error;
pub mod event;
pub mod flat;
pub mod movement;
pub mod notation;
pub mod replay;
pub mod token;
pub mod types;
