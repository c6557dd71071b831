//! Observability layer: `tracing` initialization only. No metrics HTTP
//! server is carried over from the teacher (spec §1 Non-goal: no GUI or
//! metrics surface) — structured `tracing` spans/events are used directly
//! in the control-thread code instead.

pub mod tracing;

pub use self::tracing::{init_tracing, shutdown_tracing};
