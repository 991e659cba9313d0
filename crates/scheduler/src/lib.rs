//! # Reminder scheduler
//!
//! Periodic scans that email class reminders shortly before a class starts
//! and announce recordings once a class has ended. Each invocation is
//! stateless; the "reminder sent" date on a schedule and the "email sent"
//! flag on a recording keep repeated or overlapping invocations from
//! sending twice.

pub mod config;
pub mod directory;
pub mod mailer;
pub mod mock;
pub mod scheduler;

pub use scheduler::{ClassNotification, Scheduler};
