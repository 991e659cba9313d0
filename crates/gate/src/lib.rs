//! # Session admission gate
//!
//! Decides whether a participant opening a class link may enter the live
//! video room. Teachers are admitted as soon as their assignment checks
//! out; students wait until a teacher attendance record exists for the
//! class today.

pub mod config;
pub mod gate;
pub mod session;

pub use gate::{AdmissionGate, GateState, Ticket};
pub use session::AdmissionSession;
