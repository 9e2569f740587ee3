//! Courses command implementation.

use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

/// Run the courses command.
pub async fn run_courses(corpus: Option<&PathBuf>, settings: Settings) -> Result<()> {
    let store = super::load_store(corpus, &settings)?;

    let titles = store.course_titles();
    if titles.is_empty() {
        Output::info("No courses indexed yet.");
        return Ok(());
    }

    Output::header(&format!("Indexed Courses ({})", titles.len()));
    println!();
    for title in &titles {
        Output::list_item(title);
    }

    Ok(())
}
