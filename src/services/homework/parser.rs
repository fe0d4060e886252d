use super::catalog::{StatusCatalog, UnknownStatusError};
use crate::modules::homework::Submission;

/// Turns a submission into the text sent to the student's chat.
#[derive(Debug, Clone, Default)]
pub struct StatusParser {
    catalog: StatusCatalog,
}

impl StatusParser {
    pub fn new(catalog: StatusCatalog) -> Self {
        Self { catalog }
    }

    pub fn parse(&self, submission: &Submission) -> Result<String, UnknownStatusError> {
        let verdict = self.catalog.verdict(&submission.status)?;
        Ok(format!("Changed status of \"{}\": {}", submission.name, verdict))
    }
}
