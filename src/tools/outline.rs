//! Course-outline tool.

use super::{Tool, ToolReply};
use crate::error::{LaereError, Result};
use crate::llm::{InputSchema, ParamSpec, ToolSpec};
use crate::store::RetrievalStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Returns the structural outline of a course: title, link, instructor,
/// and the full lesson list.
///
/// Outline answers are structural rather than excerpted content, so this
/// tool records no source attributions.
pub struct OutlineTool {
    store: Arc<dyn RetrievalStore>,
}

impl OutlineTool {
    /// Create an outline tool over the given store.
    pub fn new(store: Arc<dyn RetrievalStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for OutlineTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            "get_course_outline",
            "Get the complete outline of a course: title, link, instructor, and all lessons",
            InputSchema::new()
                .property(
                    "course_name",
                    ParamSpec::string("Course title to look up (partial matches work)"),
                )
                .require("course_name"),
        )
    }

    async fn execute(&self, args: &serde_json::Value) -> Result<ToolReply> {
        let course_name = args
            .get("course_name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                LaereError::InvalidInput("Missing 'course_name' argument".to_string())
            })?;

        let course = match self.store.get_course_outline(course_name).await? {
            Some(course) => course,
            None => {
                return Ok(ToolReply::text(format!(
                    "No course found matching '{}'.",
                    course_name
                )));
            }
        };

        let mut lines = vec![format!("Course: {}", course.title)];
        if let Some(link) = &course.course_link {
            lines.push(format!("Course Link: {}", link));
        }
        if let Some(instructor) = &course.instructor {
            lines.push(format!("Instructor: {}", instructor));
        }

        let mut lessons = course.lessons.clone();
        lessons.sort_by_key(|l| l.lesson_number);

        lines.push(format!("\nLessons ({}):", lessons.len()));
        for lesson in &lessons {
            let mut line = format!("  Lesson {}: {}", lesson.lesson_number, lesson.title);
            if let Some(link) = &lesson.lesson_link {
                line.push_str(&format!(" ({})", link));
            }
            lines.push(line);
        }

        Ok(ToolReply::text(lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Course, Lesson, SearchFilter, SearchResults};

    struct FakeStore {
        course: Option<Course>,
    }

    #[async_trait]
    impl RetrievalStore for FakeStore {
        async fn search(&self, _filter: &SearchFilter) -> Result<SearchResults> {
            Ok(SearchResults::default())
        }

        async fn get_course_outline(&self, _course_name: &str) -> Result<Option<Course>> {
            Ok(self.course.clone())
        }

        async fn get_lesson_link(
            &self,
            _course_title: &str,
            _lesson_number: u32,
        ) -> Result<Option<String>> {
            Ok(None)
        }

        async fn get_course_link(&self, _course_title: &str) -> Result<Option<String>> {
            Ok(None)
        }
    }

    fn sample_course() -> Course {
        Course {
            title: "Introduction to MCP".to_string(),
            course_link: Some("https://example.com/course".to_string()),
            instructor: Some("Test Instructor".to_string()),
            lessons: vec![
                Lesson {
                    lesson_number: 2,
                    title: "Advanced Topics".to_string(),
                    lesson_link: Some("https://example.com/lesson2".to_string()),
                },
                Lesson {
                    lesson_number: 0,
                    title: "Introduction".to_string(),
                    lesson_link: Some("https://example.com/lesson0".to_string()),
                },
                Lesson {
                    lesson_number: 1,
                    title: "Getting Started".to_string(),
                    lesson_link: None,
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_renders_outline_in_lesson_order() {
        let tool = OutlineTool::new(Arc::new(FakeStore {
            course: Some(sample_course()),
        }));

        let reply = tool
            .execute(&serde_json::json!({"course_name": "MCP"}))
            .await
            .unwrap();

        assert!(reply.content.starts_with("Course: Introduction to MCP"));
        assert!(reply.content.contains("Course Link: https://example.com/course"));
        assert!(reply.content.contains("Instructor: Test Instructor"));
        assert!(reply.content.contains("Lessons (3):"));

        // Lessons come back ascending even though the store returned them
        // out of order.
        let intro = reply.content.find("Lesson 0: Introduction").unwrap();
        let started = reply.content.find("Lesson 1: Getting Started").unwrap();
        let advanced = reply.content.find("Lesson 2: Advanced Topics").unwrap();
        assert!(intro < started && started < advanced);

        assert!(reply.content.contains("(https://example.com/lesson2)"));
        assert!(reply.sources.is_empty());
    }

    #[tokio::test]
    async fn test_unresolved_course() {
        let tool = OutlineTool::new(Arc::new(FakeStore { course: None }));
        let reply = tool
            .execute(&serde_json::json!({"course_name": "NonExistent"}))
            .await
            .unwrap();

        assert!(reply.content.contains("No course found"));
        assert!(reply.content.contains("NonExistent"));
    }

    #[tokio::test]
    async fn test_missing_course_name_is_an_error() {
        let tool = OutlineTool::new(Arc::new(FakeStore { course: None }));
        assert!(tool.execute(&serde_json::json!({})).await.is_err());
    }
}
