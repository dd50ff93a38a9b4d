//! CPU architecture support catalog.

use crate::error::{Error, Result};
use crate::featuresupport::support_level::{ArchitectureId, SupportLevel};
use crate::versions;

impl ArchitectureId {
    /// Architecture name as it appears in API payloads.
    pub fn api_name(self) -> &'static str {
        match self {
            ArchitectureId::X8664 => "x86_64",
            ArchitectureId::Arm64 => "arm64",
            ArchitectureId::S390x => "s390x",
            ArchitectureId::Ppc64le => "ppc64le",
            ArchitectureId::MultiArchReleaseImage => "multi",
        }
    }

    /// Map an API architecture name to its catalog entry. "aarch64" is an
    /// accepted alias for arm64.
    pub fn from_api_name(name: &str) -> Option<ArchitectureId> {
        match name {
            "x86_64" => Some(ArchitectureId::X8664),
            "arm64" | "aarch64" => Some(ArchitectureId::Arm64),
            "s390x" => Some(ArchitectureId::S390x),
            "ppc64le" => Some(ArchitectureId::Ppc64le),
            "multi" => Some(ArchitectureId::MultiArchReleaseImage),
            _ => None,
        }
    }

    /// Support level of this architecture at the given OpenShift version.
    pub fn support_level(self, openshift_version: &str) -> SupportLevel {
        match self {
            ArchitectureId::X8664 => SupportLevel::Supported,
            ArchitectureId::Arm64 => {
                if versions::less_than(openshift_version, "4.10") {
                    SupportLevel::Unavailable
                } else {
                    SupportLevel::Supported
                }
            }
            ArchitectureId::S390x | ArchitectureId::Ppc64le => {
                if versions::less_than(openshift_version, "4.12") {
                    SupportLevel::Unavailable
                } else {
                    SupportLevel::Supported
                }
            }
            ArchitectureId::MultiArchReleaseImage => {
                if versions::less_than(openshift_version, "4.11") {
                    SupportLevel::Unavailable
                } else {
                    SupportLevel::TechPreview
                }
            }
        }
    }
}

/// All catalog entries, in API-name order.
pub const ALL_ARCHITECTURES: [ArchitectureId; 5] = [
    ArchitectureId::X8664,
    ArchitectureId::Arm64,
    ArchitectureId::S390x,
    ArchitectureId::Ppc64le,
    ArchitectureId::MultiArchReleaseImage,
];

/// Support level per architecture for one version. Always one entry per
/// catalog architecture.
pub fn get_cpu_architecture_support_list(
    openshift_version: &str,
) -> Vec<(ArchitectureId, SupportLevel)> {
    ALL_ARCHITECTURES
        .iter()
        .map(|arch| (*arch, arch.support_level(openshift_version)))
        .collect()
}

/// Whether the named architecture can be used at the given version.
pub fn is_architecture_supported(cpu_architecture: &str, openshift_version: &str) -> Result<bool> {
    let arch = ArchitectureId::from_api_name(cpu_architecture).ok_or_else(|| {
        Error::InvalidInput(format!("invalid cpu architecture: {}", cpu_architecture))
    })?;
    Ok(arch.support_level(openshift_version).is_available())
}
