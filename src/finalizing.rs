//! Installation finalizing stages and their timeouts.
//!
//! Every stage has a default timeout, selected from the hard or soft
//! profile. The default can be overridden per stage through a
//! `FINALIZING_STAGE_<STAGE>_TIMEOUT` environment variable holding a
//! humantime duration ("30m", "2h45m"). Stages that wait on OLM operators
//! stretch to the largest per-operator timeout.

use std::time::Duration;

use tracing::warn;

use crate::models::{MonitoredOperator, OperatorType};

const GENERAL_WAIT_TIMEOUT: Duration = Duration::from_secs(70 * 60);
const LONG_WAIT_TIMEOUT: Duration = Duration::from_secs(10 * 60 * 60);
const SHORT_WAIT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Stages of installation finalization, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalizingStage {
    WaitingForClusterOperators,
    AddingRouterCa,
    ApplyingOlmManifests,
    WaitingForOlmOperatorsCsvInitialization,
    WaitingForOlmOperatorsCsv,
    WaitingForOlmOperatorSetupJobs,
    Done,
}

/// All stages, in execution order.
pub const FINALIZING_STAGES: [FinalizingStage; 7] = [
    FinalizingStage::WaitingForClusterOperators,
    FinalizingStage::AddingRouterCa,
    FinalizingStage::ApplyingOlmManifests,
    FinalizingStage::WaitingForOlmOperatorsCsvInitialization,
    FinalizingStage::WaitingForOlmOperatorsCsv,
    FinalizingStage::WaitingForOlmOperatorSetupJobs,
    FinalizingStage::Done,
];

const OLM_OPERATOR_STAGES: [FinalizingStage; 3] = [
    FinalizingStage::WaitingForOlmOperatorsCsvInitialization,
    FinalizingStage::WaitingForOlmOperatorsCsv,
    FinalizingStage::WaitingForOlmOperatorSetupJobs,
];

impl FinalizingStage {
    /// Stage name as reported in installation progress.
    pub fn as_str(self) -> &'static str {
        match self {
            FinalizingStage::WaitingForClusterOperators => "Waiting for cluster operators",
            FinalizingStage::AddingRouterCa => "Adding router ca",
            FinalizingStage::ApplyingOlmManifests => "Applying olm manifests",
            FinalizingStage::WaitingForOlmOperatorsCsvInitialization => {
                "Waiting for olm operators csv initialization"
            }
            FinalizingStage::WaitingForOlmOperatorsCsv => "Waiting for olm operators csv",
            FinalizingStage::WaitingForOlmOperatorSetupJobs => {
                "Waiting for olm operator setup jobs"
            }
            FinalizingStage::Done => "Done",
        }
    }

    /// Name of the environment variable overriding this stage's timeout.
    pub fn timeout_env_var(self) -> String {
        format!(
            "FINALIZING_STAGE_{}_TIMEOUT",
            self.as_str().to_uppercase().replace(' ', "_")
        )
    }

    fn hard_timeout(self) -> Duration {
        match self {
            FinalizingStage::WaitingForClusterOperators => LONG_WAIT_TIMEOUT,
            FinalizingStage::ApplyingOlmManifests
            | FinalizingStage::WaitingForOlmOperatorSetupJobs => SHORT_WAIT_TIMEOUT,
            _ => GENERAL_WAIT_TIMEOUT,
        }
    }

    fn soft_timeout(self) -> Duration {
        match self {
            FinalizingStage::ApplyingOlmManifests
            | FinalizingStage::WaitingForOlmOperatorSetupJobs => SHORT_WAIT_TIMEOUT,
            _ => GENERAL_WAIT_TIMEOUT,
        }
    }
}

impl std::fmt::Display for FinalizingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default timeout for a stage: the environment override when present and
/// parsable, otherwise the profile default.
pub fn finalizing_stage_default_timeout(stage: FinalizingStage, soft_timeouts: bool) -> Duration {
    if let Ok(raw) = std::env::var(stage.timeout_env_var()) {
        if !raw.is_empty() {
            match humantime::parse_duration(&raw) {
                Ok(duration) => return duration,
                Err(e) => {
                    warn!(
                        stage = %stage,
                        value = %raw,
                        error = %e,
                        "failed to parse stage timeout override"
                    );
                }
            }
        }
    }
    if soft_timeouts {
        stage.soft_timeout()
    } else {
        stage.hard_timeout()
    }
}

/// Effective timeout for a stage. OLM-related stages wait at least as long
/// as the slowest OLM operator asks for.
pub fn finalizing_stage_timeout(
    stage: FinalizingStage,
    operators: &[MonitoredOperator],
    soft_timeouts: bool,
) -> Duration {
    let mut timeout = finalizing_stage_default_timeout(stage, soft_timeouts);
    if OLM_OPERATOR_STAGES.contains(&stage) {
        for operator in operators {
            if operator.operator_type == OperatorType::Olm && operator.timeout_seconds > 0 {
                timeout = timeout.max(Duration::from_secs(operator.timeout_seconds as u64));
            }
        }
    }
    timeout
}
