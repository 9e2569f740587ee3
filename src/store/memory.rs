//! In-memory retrieval store.
//!
//! Holds courses and pre-chunked content in process memory and ranks
//! matches by query-term overlap. Suitable for small corpora and tests;
//! larger deployments put a vector index behind [`RetrievalStore`] instead.

use super::{
    ChunkMetadata, Course, CourseChunk, CourseDocument, RetrievalStore, SearchFilter,
    SearchResults,
};
use crate::error::{LaereError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::RwLock;
use tracing::info;

/// Default cap on search results per query.
const DEFAULT_MAX_RESULTS: usize = 5;

/// In-memory retrieval store.
pub struct MemoryStore {
    courses: RwLock<Vec<Course>>,
    chunks: RwLock<Vec<CourseChunk>>,
    max_results: usize,
}

impl MemoryStore {
    /// Create an empty store with the default result cap.
    pub fn new() -> Self {
        Self::with_max_results(DEFAULT_MAX_RESULTS)
    }

    /// Create an empty store with a custom result cap.
    pub fn with_max_results(max_results: usize) -> Self {
        Self {
            courses: RwLock::new(Vec::new()),
            chunks: RwLock::new(Vec::new()),
            max_results,
        }
    }

    /// Add a course and its chunks to the index.
    pub fn add_course(&self, course: Course, chunks: Vec<CourseChunk>) {
        let mut courses = self.courses.write().unwrap();
        // Re-adding a course replaces its previous content.
        if let Some(pos) = courses.iter().position(|c| c.title == course.title) {
            let title = courses[pos].title.clone();
            courses[pos] = course;
            let mut stored = self.chunks.write().unwrap();
            stored.retain(|c| c.course_title != title);
            stored.extend(chunks);
        } else {
            courses.push(course);
            self.chunks.write().unwrap().extend(chunks);
        }
    }

    /// Load every `*.json` corpus file in a directory.
    ///
    /// Returns the number of courses loaded.
    pub fn load_dir(&self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Err(LaereError::Config(format!(
                "Corpus directory not found: {}",
                dir.display()
            )));
        }

        let mut entries: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort();

        let mut loaded = 0;
        for path in entries {
            let content = std::fs::read_to_string(&path)?;
            let doc: CourseDocument = serde_json::from_str(&content).map_err(|e| {
                LaereError::Config(format!("Invalid corpus file {}: {}", path.display(), e))
            })?;
            self.add_course(doc.course, doc.chunks);
            loaded += 1;
        }

        info!(courses = loaded, dir = %dir.display(), "Loaded corpus");
        Ok(loaded)
    }

    /// Titles of all indexed courses, in load order.
    pub fn course_titles(&self) -> Vec<String> {
        self.courses
            .read()
            .unwrap()
            .iter()
            .map(|c| c.title.clone())
            .collect()
    }

    /// Number of indexed courses.
    pub fn course_count(&self) -> usize {
        self.courses.read().unwrap().len()
    }

    /// Resolve a partial course name to the full title.
    ///
    /// Case-insensitive; an exact title match wins, otherwise the first
    /// course whose title contains the query.
    fn resolve_course_name(&self, name: &str) -> Option<String> {
        let needle = name.to_lowercase();
        let courses = self.courses.read().unwrap();

        if let Some(course) = courses.iter().find(|c| c.title.to_lowercase() == needle) {
            return Some(course.title.clone());
        }

        courses
            .iter()
            .find(|c| c.title.to_lowercase().contains(&needle))
            .map(|c| c.title.clone())
    }

    fn find_course(&self, title: &str) -> Option<Course> {
        self.courses
            .read()
            .unwrap()
            .iter()
            .find(|c| c.title == title)
            .cloned()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RetrievalStore for MemoryStore {
    async fn search(&self, filter: &SearchFilter) -> Result<SearchResults> {
        let course_title = match &filter.course_name {
            Some(name) => match self.resolve_course_name(name) {
                Some(title) => Some(title),
                None => {
                    return Ok(SearchResults::not_found(format!(
                        "No course found matching '{}'",
                        name
                    )));
                }
            },
            None => None,
        };

        let terms: Vec<String> = filter
            .query
            .to_lowercase()
            .split_whitespace()
            .map(|t| t.to_string())
            .collect();

        let chunks = self.chunks.read().unwrap();
        let mut scored: Vec<(f32, &CourseChunk)> = chunks
            .iter()
            .filter(|c| {
                course_title
                    .as_deref()
                    .is_none_or(|title| c.course_title == title)
            })
            .filter(|c| {
                filter
                    .lesson_number
                    .is_none_or(|n| c.lesson_number == Some(n))
            })
            .filter_map(|chunk| {
                let haystack = chunk.content.to_lowercase();
                let matched = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
                if matched == 0 || terms.is_empty() {
                    None
                } else {
                    // Ascending pseudo-distance: 0.0 when every term matched.
                    let distance = 1.0 - matched as f32 / terms.len() as f32;
                    Some((distance, chunk))
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.chunk_index.cmp(&b.1.chunk_index))
        });
        scored.truncate(self.max_results);

        let mut results = SearchResults::default();
        for (distance, chunk) in scored {
            results.documents.push(chunk.content.clone());
            results.metadata.push(ChunkMetadata {
                course_title: chunk.course_title.clone(),
                lesson_number: chunk.lesson_number,
                chunk_index: chunk.chunk_index,
            });
            results.distances.push(distance);
        }

        Ok(results)
    }

    async fn get_course_outline(&self, course_name: &str) -> Result<Option<Course>> {
        let title = match self.resolve_course_name(course_name) {
            Some(title) => title,
            None => return Ok(None),
        };
        Ok(self.find_course(&title))
    }

    async fn get_lesson_link(
        &self,
        course_title: &str,
        lesson_number: u32,
    ) -> Result<Option<String>> {
        Ok(self.find_course(course_title).and_then(|course| {
            course
                .lessons
                .iter()
                .find(|l| l.lesson_number == lesson_number)
                .and_then(|l| l.lesson_link.clone())
        }))
    }

    async fn get_course_link(&self, course_title: &str) -> Result<Option<String>> {
        Ok(self
            .find_course(course_title)
            .and_then(|course| course.course_link))
    }
}
