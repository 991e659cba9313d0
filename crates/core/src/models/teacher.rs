use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which batches and subjects a teacher may run classes for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherAssignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub batches: Vec<String>,
    pub subjects: Vec<String>,
}

impl TeacherAssignment {
    pub fn teaches_batch(&self, batch: &str) -> bool {
        let batch = batch.trim();
        self.batches.iter().any(|b| b.trim() == batch)
    }
}
