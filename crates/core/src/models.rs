pub mod attendance;
pub mod enrollment;
pub mod recording;
pub mod scan;
pub mod schedule;
pub mod teacher;
