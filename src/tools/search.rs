//! Content-search tool.

use super::{SourceAttribution, Tool, ToolReply};
use crate::error::{LaereError, Result};
use crate::llm::{InputSchema, ParamSpec, ToolSpec};
use crate::store::{RetrievalStore, SearchFilter};
use async_trait::async_trait;
use std::sync::Arc;

/// Searches course content with optional course and lesson filters.
///
/// Every matched chunk is rendered as a labeled block and recorded as a
/// source attribution, so the caller can show where an answer came from.
pub struct SearchTool {
    store: Arc<dyn RetrievalStore>,
}

impl SearchTool {
    /// Create a search tool over the given store.
    pub fn new(store: Arc<dyn RetrievalStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            "search_course_content",
            "Search course materials with smart course name matching and lesson filtering",
            InputSchema::new()
                .property("query", ParamSpec::string("What to search for in the course content"))
                .property(
                    "course_name",
                    ParamSpec::string("Course title (partial matches work, e.g. 'MCP', 'Introduction')"),
                )
                .property(
                    "lesson_number",
                    ParamSpec::integer("Specific lesson number to search within (e.g. 1, 2, 3)"),
                )
                .require("query"),
        )
    }

    async fn execute(&self, args: &serde_json::Value) -> Result<ToolReply> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| LaereError::InvalidInput("Missing 'query' argument".to_string()))?;
        let course_name = args
            .get("course_name")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        let lesson_number = args
            .get("lesson_number")
            .and_then(|v| v.as_u64())
            .map(|n| n as u32);

        let filter = SearchFilter {
            query: query.to_string(),
            course_name: course_name.clone(),
            lesson_number,
        };

        let results = self.store.search(&filter).await?;

        // Resolution errors go back verbatim so the model can explain them.
        if let Some(error) = results.error {
            return Ok(ToolReply::text(error));
        }

        if results.is_empty() {
            let mut filter_info = String::new();
            if let Some(name) = &course_name {
                filter_info.push_str(&format!(" in course '{}'", name));
            }
            if let Some(n) = lesson_number {
                filter_info.push_str(&format!(" in lesson {}", n));
            }
            return Ok(ToolReply::text(format!(
                "No relevant content found{}.",
                filter_info
            )));
        }

        let mut blocks = Vec::with_capacity(results.documents.len());
        let mut sources = Vec::with_capacity(results.documents.len());

        for (document, meta) in results.documents.iter().zip(results.metadata.iter()) {
            let label = match meta.lesson_number {
                Some(n) => format!("{} - Lesson {}", meta.course_title, n),
                None => meta.course_title.clone(),
            };

            blocks.push(format!("[{}]\n{}", label, document));

            let link = match meta.lesson_number {
                Some(n) => self.store.get_lesson_link(&meta.course_title, n).await?,
                None => self.store.get_course_link(&meta.course_title).await?,
            };
            sources.push(SourceAttribution { label, link });
        }

        Ok(ToolReply::with_sources(blocks.join("\n\n"), sources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ChunkMetadata, Course, SearchResults};

    /// Store fake returning scripted search results.
    struct FakeStore {
        results: SearchResults,
    }

    #[async_trait]
    impl RetrievalStore for FakeStore {
        async fn search(&self, _filter: &SearchFilter) -> Result<SearchResults> {
            Ok(self.results.clone())
        }

        async fn get_course_outline(&self, _course_name: &str) -> Result<Option<Course>> {
            Ok(None)
        }

        async fn get_lesson_link(
            &self,
            _course_title: &str,
            lesson_number: u32,
        ) -> Result<Option<String>> {
            Ok(Some(format!("https://example.com/lesson{}", lesson_number)))
        }

        async fn get_course_link(&self, _course_title: &str) -> Result<Option<String>> {
            Ok(Some("https://example.com/course".to_string()))
        }
    }

    fn sample_results() -> SearchResults {
        SearchResults {
            documents: vec![
                "This is lesson 1 content about MCP.".to_string(),
                "Course-level overview content.".to_string(),
            ],
            metadata: vec![
                ChunkMetadata {
                    course_title: "Introduction to MCP".to_string(),
                    lesson_number: Some(1),
                    chunk_index: 0,
                },
                ChunkMetadata {
                    course_title: "Introduction to MCP".to_string(),
                    lesson_number: None,
                    chunk_index: 1,
                },
            ],
            distances: vec![0.1, 0.2],
            error: None,
        }
    }

    fn tool_with(results: SearchResults) -> SearchTool {
        SearchTool::new(Arc::new(FakeStore { results }))
    }

    #[test]
    fn test_spec_shape() {
        let tool = tool_with(SearchResults::default());
        let spec = tool.spec();
        assert_eq!(spec.name, "search_course_content");
        assert_eq!(spec.input_schema.required, vec!["query"]);
        assert!(spec.input_schema.properties.contains_key("course_name"));
        assert!(spec.input_schema.properties.contains_key("lesson_number"));
    }

    #[tokio::test]
    async fn test_formats_headers_and_sources() {
        let tool = tool_with(sample_results());
        let reply = tool
            .execute(&serde_json::json!({"query": "MCP"}))
            .await
            .unwrap();

        assert!(reply.content.contains("[Introduction to MCP - Lesson 1]"));
        assert!(reply.content.contains("This is lesson 1 content"));
        // Chunk without a lesson number gets a course-only header.
        assert!(reply.content.contains("[Introduction to MCP]\nCourse-level"));
        assert!(reply.content.contains("\n\n"));

        assert_eq!(reply.sources.len(), 2);
        assert_eq!(reply.sources[0].label, "Introduction to MCP - Lesson 1");
        assert_eq!(
            reply.sources[0].link.as_deref(),
            Some("https://example.com/lesson1")
        );
        assert_eq!(reply.sources[1].label, "Introduction to MCP");
        assert_eq!(
            reply.sources[1].link.as_deref(),
            Some("https://example.com/course")
        );
    }

    #[tokio::test]
    async fn test_empty_results_mention_filters() {
        let tool = tool_with(SearchResults::default());
        let reply = tool
            .execute(&serde_json::json!({
                "query": "NonExistentTopic",
                "course_name": "MCP",
                "lesson_number": 5
            }))
            .await
            .unwrap();

        assert!(reply.content.contains("No relevant content found"));
        assert!(reply.content.contains("in course 'MCP'"));
        assert!(reply.content.contains("in lesson 5"));
        assert!(reply.sources.is_empty());
    }

    #[tokio::test]
    async fn test_resolution_error_returned_verbatim() {
        let tool = tool_with(SearchResults::not_found(
            "No course found matching 'NonExistent'",
        ));
        let reply = tool
            .execute(&serde_json::json!({"query": "test", "course_name": "NonExistent"}))
            .await
            .unwrap();

        assert_eq!(reply.content, "No course found matching 'NonExistent'");
        assert!(reply.sources.is_empty());
    }

    #[tokio::test]
    async fn test_missing_query_is_an_error() {
        let tool = tool_with(sample_results());
        let result = tool
            .execute(&serde_json::json!({"course_name": "MCP"}))
            .await;
        assert!(result.is_err());
    }
}
