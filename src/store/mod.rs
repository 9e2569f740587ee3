//! Retrieval-store abstraction for Laere.
//!
//! Provides a trait-based interface over the indexed course corpus. The
//! store answers content queries (with fuzzy course-name resolution) and
//! structural queries (course outlines and links); everything above it
//! treats it as an opaque collaborator.

mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A lesson within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Lesson number within the course (0-based in most corpora).
    pub lesson_number: u32,
    /// Lesson title.
    pub title: String,
    /// Link to the lesson page, if known.
    pub lesson_link: Option<String>,
}

/// A course with its ordered lesson list.
///
/// Also serves as the outline returned by
/// [`RetrievalStore::get_course_outline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Full course title, unique within the corpus.
    pub title: String,
    /// Link to the course page, if known.
    pub course_link: Option<String>,
    /// Instructor name, if known.
    pub instructor: Option<String>,
    /// Lessons in course order.
    pub lessons: Vec<Lesson>,
}

/// One indexed chunk of course content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseChunk {
    /// Chunk text.
    pub content: String,
    /// Title of the course this chunk belongs to.
    pub course_title: String,
    /// Lesson the chunk came from, when attributable to one.
    pub lesson_number: Option<u32>,
    /// Position of the chunk within its course.
    pub chunk_index: usize,
}

/// The serde shape of one corpus file: a course plus its pre-chunked content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDocument {
    pub course: Course,
    pub chunks: Vec<CourseChunk>,
}

/// A content-search request.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Free-text query.
    pub query: String,
    /// Restrict to one course, resolved by fuzzy/best-match semantics.
    pub course_name: Option<String>,
    /// Restrict to one lesson number.
    pub lesson_number: Option<u32>,
}

/// Provenance metadata carried alongside each matched document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub course_title: String,
    pub lesson_number: Option<u32>,
    pub chunk_index: usize,
}

/// Results of a content search: parallel lists ordered by ascending distance.
///
/// A failed course-name resolution is reported through `error` rather than
/// an empty result set, so callers can distinguish "nothing matched the
/// query" from "the filter itself was wrong".
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub documents: Vec<String>,
    pub metadata: Vec<ChunkMetadata>,
    pub distances: Vec<f32>,
    pub error: Option<String>,
}

impl SearchResults {
    /// Build the resolution-error form.
    pub fn not_found(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// True when no documents matched (and no error occurred).
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Trait for retrieval-store implementations.
#[async_trait]
pub trait RetrievalStore: Send + Sync {
    /// Run a content search with optional course/lesson filters.
    async fn search(&self, filter: &SearchFilter) -> Result<SearchResults>;

    /// Resolve a course name and return its outline, or `None` when no
    /// course matches.
    async fn get_course_outline(&self, course_name: &str) -> Result<Option<Course>>;

    /// Look up the link for a lesson by exact course title.
    async fn get_lesson_link(
        &self,
        course_title: &str,
        lesson_number: u32,
    ) -> Result<Option<String>>;

    /// Look up the link for a course by exact title.
    async fn get_course_link(&self, course_title: &str) -> Result<Option<String>>;
}
