pub mod class_session;
pub mod functions;
pub mod recording;
pub mod schedule;
