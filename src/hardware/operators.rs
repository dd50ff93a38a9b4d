//! Operator requirements collaborator.

use crate::error::Result;
use crate::hardware::{OperatorHardwareRequirements, OperatorHostRequirements};
use crate::models::{Cluster, Host};

/// Source of per-operator hardware requirements. Resolution is a table
/// lookup in every known implementation, so the trait is synchronous.
pub trait OperatorRequirementsApi: Send + Sync {
    /// Requirements each of the cluster's operators adds for this host.
    fn get_requirements(
        &self,
        cluster: &Cluster,
        host: &Host,
    ) -> Result<Vec<OperatorHostRequirements>>;

    /// Preflight requirements for the cluster's operators.
    fn get_preflight_requirements(
        &self,
        cluster: &Cluster,
    ) -> Result<Vec<OperatorHardwareRequirements>>;
}

/// Implementation for clusters without OLM operators.
pub struct NoOperators;

impl OperatorRequirementsApi for NoOperators {
    fn get_requirements(
        &self,
        _cluster: &Cluster,
        _host: &Host,
    ) -> Result<Vec<OperatorHostRequirements>> {
        Ok(Vec::new())
    }

    fn get_preflight_requirements(
        &self,
        _cluster: &Cluster,
    ) -> Result<Vec<OperatorHardwareRequirements>> {
        Ok(Vec::new())
    }
}
