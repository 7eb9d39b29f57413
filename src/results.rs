use serde::{Deserialize, Serialize};

/// Final status of one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioStatus {
    Passed,
    Failed {
        /// Text of the step that failed
        step: String,
        /// Line of the failing step in the feature file
        line: usize,
        message: String,
    },
}

/// Outcome of one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub feature: String,
    pub scenario: String,
    pub status: ScenarioStatus,
    /// Steps skipped after a failure
    pub skipped_steps: usize,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        matches!(self.status, ScenarioStatus::Passed)
    }
}

/// Outcomes of a whole run, in execution order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    /// A run with no failed scenario succeeds
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}
