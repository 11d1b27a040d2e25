use std::path::Path;

use tracing::{debug, info};

use crate::errors::{AppError, ParseError};
use crate::resume::models::Resume;

/// Parses raw resume YAML into the document model.
///
/// Fails as a whole on malformed YAML, a missing `content.basics`, or an entry
/// without its identifying field (`name`, `institution`, `language`,
/// `network`); there is no per-field salvage. Descriptive fields default.
pub fn parse_resume(raw: &str) -> Result<Resume, ParseError> {
    let resume: Resume = serde_yaml::from_str(raw)?;
    debug!(
        work = resume.content.work.len(),
        skills = resume.content.skills.len(),
        projects = resume.content.projects.len(),
        "Resume parsed"
    );
    Ok(resume)
}

/// Reads the resume asset from disk and parses it.
pub fn load_resume(path: &Path) -> Result<Resume, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let resume = parse_resume(&raw)?;
    info!("Loaded resume for {} from {}", resume.content.basics.name, path.display());
    Ok(resume)
}
