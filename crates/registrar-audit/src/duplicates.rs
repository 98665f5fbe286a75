//! Duplicate course registration scanner.
//!
//! A student is registered for a course more than once when two or more
//! `takes` rows share their `student_id` and `course_id`, whatever the
//! section or semester. Every function here is pure.

use std::collections::HashMap;

use registrar_core::types::EnrollmentRecord;

use crate::types::{CourseCount, ScanResult};

/// Per-course counts that iterate in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseCounts {
    entries: Vec<CourseCount>,
    index: HashMap<String, usize>,
}

impl CourseCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, course_id: &str) {
        match self.index.get(course_id) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(course_id.to_string(), self.entries.len());
                self.entries.push(CourseCount {
                    course_id: course_id.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub fn get(&self, course_id: &str) -> Option<usize> {
        self.index.get(course_id).map(|&i| self.entries[i].count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseCount> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<CourseCount> {
        self.entries
    }
}

/// Records whose `student_id` equals `target_id` exactly, in input order.
pub fn find_records<'a>(
    records: &'a [EnrollmentRecord],
    target_id: &str,
) -> Vec<&'a EnrollmentRecord> {
    records
        .iter()
        .filter(|r| r.student_id == target_id)
        .collect()
}

pub fn count_by_course(matched: &[&EnrollmentRecord]) -> CourseCounts {
    let mut counts = CourseCounts::new();
    for record in matched {
        counts.increment(&record.course_id);
    }
    counts
}

/// Courses counted more than once, in first-occurrence order.
pub fn detect_duplicates(counts: &CourseCounts) -> Vec<CourseCount> {
    counts.iter().filter(|c| c.count > 1).cloned().collect()
}

/// Run the whole scan for one student.
pub fn scan(records: &[EnrollmentRecord], target_id: &str) -> ScanResult {
    let matched = find_records(records, target_id);
    let counts = count_by_course(&matched);
    let duplicates = detect_duplicates(&counts);
    tracing::debug!(
        student_id = target_id,
        matched = matched.len(),
        duplicates = duplicates.len(),
        "scan complete"
    );

    ScanResult {
        version: env!("CARGO_PKG_VERSION").into(),
        command: "scan".into(),
        student_id: target_id.to_string(),
        matched: matched.into_iter().cloned().collect(),
        course_counts: counts.into_vec(),
        duplicates,
    }
}

#[cfg(test)]
#[path = "duplicates_tests.rs"]
mod tests;
