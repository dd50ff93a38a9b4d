//! Boot image features.

use crate::featuresupport::features::effective_image_type;
use crate::featuresupport::support_level::{
    ActiveLevel, ArchitectureId, FeatureId, SupportLevel, SupportLevelFeature,
    SupportLevelFilters,
};
use crate::models::{Cluster, ClusterUpdateParams, ImageType, InfraEnv, InfraEnvUpdateParams};

pub struct MinimalIsoFeature;

impl SupportLevelFeature for MinimalIsoFeature {
    fn id(&self) -> FeatureId {
        FeatureId::MinimalIso
    }

    fn name(&self) -> &'static str {
        "Minimal ISO"
    }

    fn support_level(&self, filters: &SupportLevelFilters) -> Option<SupportLevel> {
        if filters.cpu_architecture.as_deref() == Some("s390x") {
            Some(SupportLevel::Unavailable)
        } else {
            Some(SupportLevel::Supported)
        }
    }

    fn incompatible_architectures(&self, _openshift_version: Option<&str>) -> Vec<ArchitectureId> {
        vec![ArchitectureId::S390x]
    }

    fn active_level(
        &self,
        _cluster: Option<&Cluster>,
        infra_env: Option<&InfraEnv>,
        _cluster_update: Option<&ClusterUpdateParams>,
        infra_env_update: Option<&InfraEnvUpdateParams>,
    ) -> ActiveLevel {
        let Some(infra_env) = infra_env else {
            return ActiveLevel::NotRelevant;
        };
        if effective_image_type(infra_env, infra_env_update) == Some(ImageType::MinimalIso) {
            ActiveLevel::Active
        } else {
            ActiveLevel::NotActive
        }
    }
}
