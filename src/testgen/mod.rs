//! Coverage-gap driven end-to-end test generation.
//!
//! One run makes a single analyzer call, keeps the high-priority gaps that have no test, then
//! makes one generator call per gap, strictly in order. A failed analysis aborts the run; a
//! failed generation only affects its own gap.

mod parse;

pub use parse::{parse_gaps, select_actionable};

use crate::agent::{AgentExecutor, AgentOutcome};
use crate::config::AgentConfig;
use crate::error::TestGenError;
use nlsql_schema::{AgentTemplateRequest, CoverageGap};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};

pub const ANALYZER_AGENT: &str = "pw_coverage_analyzer";
pub const ANALYZER_COMMAND: &str = "/pw_coverage_gap";
pub const GENERATOR_AGENT_PREFIX: &str = "pw_test_generator_";
pub const GENERATOR_COMMAND: &str = "/pw_generate_e2e_test";

const RUN_ID_LEN: usize = 8;

/// Short random id correlating one run's log lines and agent calls.
pub fn make_run_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(RUN_ID_LEN);
    id
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapStatus {
    Generated,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapOutcome {
    pub feature: String,
    pub test_file: String,
    pub status: GapStatus,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub run_id: String,
    /// Gaps reported by the analyzer before filtering.
    pub gaps_reported: usize,
    pub outcomes: Vec<GapOutcome>,
}

impl GenerationReport {
    pub fn generated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == GapStatus::Generated)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.generated()
    }
}

pub struct TestGenerator {
    executor: Arc<dyn AgentExecutor>,
    run_id: String,
    analyzer_model: String,
    generator_model: String,
}

impl TestGenerator {
    pub fn new(executor: Arc<dyn AgentExecutor>, run_id: String, cfg: &AgentConfig) -> Self {
        Self {
            executor,
            run_id,
            analyzer_model: cfg.analyzer_model.clone(),
            generator_model: cfg.generator_model.clone(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Runs the whole workflow inside a `pw_generate_tests{run_id}` span.
    pub async fn run(&self) -> Result<GenerationReport, TestGenError> {
        let span = info_span!("pw_generate_tests", run_id = %self.run_id);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> Result<GenerationReport, TestGenError> {
        info!("Analyzing coverage gaps...");
        let gaps = self.find_gaps().await?;
        let gaps_reported = gaps.len();

        let actionable = select_actionable(gaps);
        info!("Found {} high priority gaps", actionable.len());

        let mut outcomes = Vec::with_capacity(actionable.len());
        for gap in &actionable {
            outcomes.push(self.generate(gap).await);
        }

        Ok(GenerationReport {
            run_id: self.run_id.clone(),
            gaps_reported,
            outcomes,
        })
    }

    /// Asks the analyzer for the full gap list. Any failure here is fatal for the run.
    pub async fn find_gaps(&self) -> Result<Vec<CoverageGap>, TestGenError> {
        let request = AgentTemplateRequest {
            agent_name: ANALYZER_AGENT.to_string(),
            slash_command: ANALYZER_COMMAND.to_string(),
            args: Vec::new(),
            run_id: self.run_id.clone(),
            model: self.analyzer_model.clone(),
        };

        match self.executor.execute(&request).await? {
            AgentOutcome::Succeeded { output } => Ok(parse_gaps(&output)?),
            AgentOutcome::Failed { reason } => {
                error!("Coverage analysis failed: {reason}");
                Err(TestGenError::AnalysisFailed(reason))
            }
        }
    }

    /// Generates the test for one gap. Never fails the run; the outcome records what happened.
    pub async fn generate(&self, gap: &CoverageGap) -> GapOutcome {
        info!("Generating test for: {}", gap.feature);
        let request = AgentTemplateRequest {
            agent_name: format!("{GENERATOR_AGENT_PREFIX}{}", gap.feature),
            slash_command: GENERATOR_COMMAND.to_string(),
            args: vec![gap.description.clone(), gap.suggested_test_file.clone()],
            run_id: self.run_id.clone(),
            model: self.generator_model.clone(),
        };

        let status = match self.executor.execute(&request).await {
            Ok(AgentOutcome::Succeeded { .. }) => {
                info!("Generated: {}", gap.suggested_test_file);
                GapStatus::Generated
            }
            Ok(AgentOutcome::Failed { reason }) => {
                error!(reason = %reason, "Failed to generate: {}", gap.feature);
                GapStatus::Failed(reason)
            }
            Err(e) => {
                error!(error = %e, "Failed to generate: {}", gap.feature);
                GapStatus::Failed(e.to_string())
            }
        };

        GapOutcome {
            feature: gap.feature.clone(),
            test_file: gap.suggested_test_file.clone(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_is_short_hex() {
        let id = make_run_id();
        assert_eq!(id.len(), RUN_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, make_run_id());
    }

    #[test]
    fn report_counts_statuses() {
        let report = GenerationReport {
            run_id: "abcd1234".to_string(),
            gaps_reported: 4,
            outcomes: vec![
                GapOutcome {
                    feature: "a".to_string(),
                    test_file: "a.spec.ts".to_string(),
                    status: GapStatus::Generated,
                },
                GapOutcome {
                    feature: "b".to_string(),
                    test_file: "b.spec.ts".to_string(),
                    status: GapStatus::Failed("boom".to_string()),
                },
            ],
        };
        assert_eq!(report.generated(), 1);
        assert_eq!(report.failed(), 1);
    }
}
