use std::collections::HashMap;

use crate::modules::homework::HomeworkStatus;

/// Raised when the API reports a status missing from the verdict table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("undocumented homework status '{0}'")]
pub struct UnknownStatusError(pub String);

/// Verdict text shown to the student for each review status.
#[derive(Debug, Clone)]
pub struct StatusCatalog {
    verdicts: HashMap<&'static str, &'static str>,
}

impl StatusCatalog {
    pub fn standard() -> Self {
        let verdicts = HomeworkStatus::ALL
            .into_iter()
            .map(|status| (status.as_str(), standard_verdict(status)))
            .collect();
        Self { verdicts }
    }

    pub fn verdict(&self, code: &str) -> Result<&'static str, UnknownStatusError> {
        self.verdicts
            .get(code)
            .copied()
            .ok_or_else(|| UnknownStatusError(code.to_string()))
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.verdicts.contains_key(code)
    }
}

impl Default for StatusCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_verdict(status: HomeworkStatus) -> &'static str {
    match status {
        HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
        HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
        HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
    }
}
