pub mod attendance;
pub mod enrollment;
pub mod recording;
pub mod schedule;
pub mod teacher;
