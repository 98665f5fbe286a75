use registrar_core::types::EnrollmentRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCount {
    pub course_id: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub version: String,
    pub command: String,
    pub student_id: String,
    pub matched: Vec<EnrollmentRecord>,
    /// Every course the student is enrolled in, in first-occurrence order.
    pub course_counts: Vec<CourseCount>,
    /// Subset of `course_counts` with a count above one.
    pub duplicates: Vec<CourseCount>,
}

impl ScanResult {
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}
