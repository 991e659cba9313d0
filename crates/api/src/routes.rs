pub mod class_session;
pub mod functions;
pub mod health;
pub mod recording;
pub mod schedule;
