//! Disk eligibility and host requirements resolution.

use std::net::IpAddr;

use tracing::debug;

use crate::error::{Error, Result};
use crate::hardware::{
    ClusterHostRequirements, Details, PreflightHardwareRequirements, ValidatorCfg,
};
use crate::hardware::operators::OperatorRequirementsApi;
use crate::models::{
    Cluster, DiskEncryption, Disk, DriveType, Host, HostRole, InfraEnv, Inventory, Route,
};
use crate::versions;

const TOO_SMALL_DISK_PREFIX: &str = "Disk is too small";
const WRONG_DRIVE_TYPE_PREFIX: &str = "Drive type is";
const WRONG_MULTIPATH_TYPE_PREFIX: &str =
    "Multipath device has path of unsupported type. Path type must be one of";
const MIXED_TYPES_IN_MULTIPATH: &str =
    "Multipath device has paths of different types, but they must all be the same type";
const ISCSI_HOST_IP_NOT_AVAILABLE: &str =
    "Host IP address used to connect to the iSCSI target is not available";
const ISCSI_HOST_IP_PARSE_PREFIX: &str = "Cannot parse iSCSI host IP";
const ISCSI_NETWORK_INTERFACE_NOT_FOUND: &str =
    "Cannot find the network interface behind the default route";
const WRONG_ISCSI_NETWORK_PREFIX: &str = "iSCSI host IP";
const ERRORS_IN_ISCSI_DISABLE_MULTIPATH: &str =
    "Multipath device has unusable iSCSI paths, please make sure all paths are valid";

const MULTIPATH_MEMBER_TYPES: &str = "FC, iSCSI";

/// Resolves hardware requirements and decides disk installation
/// eligibility.
pub struct HardwareValidator {
    cfg: ValidatorCfg,
    operator_api: Box<dyn OperatorRequirementsApi>,
}

impl HardwareValidator {
    pub fn new(cfg: ValidatorCfg, operator_api: Box<dyn OperatorRequirementsApi>) -> Self {
        Self { cfg, operator_api }
    }

    /// Reasons a disk cannot be used as an installation target. Reasons
    /// produced by earlier callers of this function are recomputed; reasons
    /// from other sources pass through untouched.
    pub fn disk_is_eligible(
        &self,
        disk: &Disk,
        cluster: Option<&Cluster>,
        infra_env: Option<&InfraEnv>,
        host: &Host,
        inventory: &Inventory,
    ) -> Result<Vec<String>> {
        let version = effective_version(cluster, infra_env);
        let arch = effective_architecture(cluster, infra_env, inventory);
        let valid_types = valid_drive_types(version, arch);

        let mut owned = Vec::new();

        if !valid_types.contains(&disk.drive_type) {
            let allowed = valid_types
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            owned.push(format!(
                "{} {}, it must be one of {}.",
                WRONG_DRIVE_TYPE_PREFIX, disk.drive_type, allowed
            ));
        }

        let min_size_bytes = gb_to_bytes(self.minimum_disk_size_gb(cluster, host, version)?);
        if disk.size_bytes < min_size_bytes {
            owned.push(format!(
                "{} (disk only has {}, but {} are required)",
                TOO_SMALL_DISK_PREFIX,
                humanize_bytes(disk.size_bytes),
                humanize_bytes(min_size_bytes)
            ));
        }

        // An iSCSI path of a multipath device is checked through the
        // multipath device, not on its own.
        if disk.drive_type == DriveType::ISCSI && !is_part_of_multipath(disk, inventory) {
            if let Some(reason) = validate_iscsi_disk(disk, inventory) {
                owned.push(reason);
            }
        }

        if disk.drive_type == DriveType::Multipath {
            owned.extend(validate_multipath_disk(disk, inventory, version));
        }

        let mut reasons: Vec<String> = disk
            .installation_eligibility
            .not_eligible_reasons
            .iter()
            .filter(|reason| !is_owned_reason(reason))
            .cloned()
            .collect();
        for reason in owned {
            if !reasons.contains(&reason) {
                reasons.push(reason);
            }
        }
        Ok(reasons)
    }

    /// OpenShift baseline, operator deltas, and their combination for a
    /// host in a cluster.
    pub fn get_cluster_host_requirements(
        &self,
        cluster: &Cluster,
        host: &Host,
    ) -> Result<ClusterHostRequirements> {
        let ocp = self.role_requirements(cluster, host)?;
        let operators = self.operator_api.get_requirements(cluster, host)?;

        let mut total = ocp.clone();
        for op in &operators {
            let details = &op.requirements;
            total.cpu_cores += details.cpu_cores;
            total.ram_mib += details.ram_mib;
            total.disk_size_gb += details.disk_size_gb;
            if details.installation_disk_speed_threshold_ms > 0
                && (total.installation_disk_speed_threshold_ms == 0
                    || details.installation_disk_speed_threshold_ms
                        < total.installation_disk_speed_threshold_ms)
            {
                total.installation_disk_speed_threshold_ms =
                    details.installation_disk_speed_threshold_ms;
            }
            total.network_latency_threshold_ms = min_threshold(
                total.network_latency_threshold_ms,
                details.network_latency_threshold_ms,
            );
            total.packet_loss_percentage =
                min_threshold(total.packet_loss_percentage, details.packet_loss_percentage);
        }

        Ok(ClusterHostRequirements {
            ocp,
            operators,
            total,
        })
    }

    /// Role baselines for the cluster before host assignment, with TPM
    /// flags derived from the disk encryption settings.
    pub fn get_preflight_hardware_requirements(
        &self,
        cluster: &Cluster,
    ) -> Result<PreflightHardwareRequirements> {
        let entry = self.cfg.requirements_for_version(&cluster.openshift_version)?;
        let master_source = if cluster.control_plane_count == 1 {
            entry.sno.as_ref()
        } else {
            entry.master.as_ref()
        };
        let mut master = master_source.cloned().ok_or_else(|| {
            Error::InvalidInput(format!(
                "hardware requirements for masters are not defined for version {}",
                entry.version
            ))
        })?;
        let mut worker = entry.worker.clone().ok_or_else(|| {
            Error::InvalidInput(format!(
                "hardware requirements for workers are not defined for version {}",
                entry.version
            ))
        })?;
        let arbiter = entry.arbiter.clone();

        // Only TPM modes make the firmware requirement visible here; tang
        // needs no hardware.
        if let Some(encryption) = &cluster.disk_encryption {
            if encryption.mode.as_deref() == Some(DiskEncryption::MODE_TPMV2) {
                match encryption.enable_on.as_deref() {
                    Some(DiskEncryption::ENABLE_ON_ALL) => {
                        master.tpm_enabled_in_bios = true;
                        worker.tpm_enabled_in_bios = true;
                    }
                    Some(DiskEncryption::ENABLE_ON_MASTERS) => master.tpm_enabled_in_bios = true,
                    Some(DiskEncryption::ENABLE_ON_WORKERS) => worker.tpm_enabled_in_bios = true,
                    _ => {}
                }
            }
        }

        let operators = self.operator_api.get_preflight_requirements(cluster)?;
        Ok(PreflightHardwareRequirements {
            master,
            arbiter,
            worker,
            operators,
        })
    }

    /// Installation-eligible disks of a host, ordered by installation
    /// preference: HDD before anything else, NVMe devices last, smaller
    /// disks first, name as the tie breaker.
    pub fn get_host_valid_disks(&self, host: &Host) -> Result<Vec<Disk>> {
        let inventory: Inventory = serde_json::from_str(&host.inventory)?;
        let mut disks: Vec<Disk> = inventory
            .disks
            .into_iter()
            .filter(|disk| disk.installation_eligibility.eligible)
            .collect();
        disks.sort_by(|a, b| {
            let key = |d: &Disk| {
                (
                    d.name.starts_with("nvme"),
                    d.drive_type != DriveType::HDD,
                    d.size_bytes,
                )
            };
            key(a).cmp(&key(b)).then_with(|| a.name.cmp(&b.name))
        });
        Ok(disks)
    }

    fn role_requirements(&self, cluster: &Cluster, host: &Host) -> Result<Details> {
        let entry = self.cfg.requirements_for_version(&cluster.openshift_version)?;
        let role = host.role.unwrap_or(HostRole::AutoAssign);
        let details = match role {
            HostRole::Master | HostRole::Bootstrap => {
                if cluster.control_plane_count == 1 {
                    entry.sno.as_ref()
                } else {
                    entry.master.as_ref()
                }
            }
            HostRole::Arbiter => entry.arbiter.as_ref(),
            HostRole::Worker => {
                if self.is_edge_worker(host) {
                    entry.edge_worker.as_ref().or(entry.worker.as_ref())
                } else {
                    entry.worker.as_ref()
                }
            }
            HostRole::AutoAssign => entry.worker.as_ref(),
        };
        details.cloned().ok_or_else(|| {
            Error::InvalidInput(format!(
                "hardware requirements for role {:?} are not defined for version {}",
                role, entry.version
            ))
        })
    }

    /// Edge workers are aarch64 devices whose product name matches the
    /// configured list. The role check stays with the caller: only worker
    /// hosts ever get the edge baseline.
    fn is_edge_worker(&self, host: &Host) -> bool {
        let Ok(inventory) = serde_json::from_str::<Inventory>(&host.inventory) else {
            return false;
        };
        if !matches!(inventory.cpu.architecture.as_str(), "aarch64" | "arm64") {
            return false;
        }
        self.cfg
            .is_edge_worker_product(&inventory.system_vendor.product_name)
    }

    fn minimum_disk_size_gb(
        &self,
        cluster: Option<&Cluster>,
        host: &Host,
        version: &str,
    ) -> Result<i64> {
        match cluster {
            Some(cluster) => Ok(self.get_cluster_host_requirements(cluster, host)?.total.disk_size_gb),
            None => {
                // Unbound host: accept anything that would fit the least
                // demanding role.
                let entry = self.cfg.requirements_for_version(version)?;
                let master = entry.master.as_ref().map(|d| d.disk_size_gb);
                let worker = entry.worker.as_ref().map(|d| d.disk_size_gb);
                match (master, worker) {
                    (Some(m), Some(w)) => Ok(m.min(w)),
                    (Some(m), None) => Ok(m),
                    (None, Some(w)) => Ok(w),
                    (None, None) => Err(Error::InvalidInput(format!(
                        "no disk size requirements defined for version {}",
                        version
                    ))),
                }
            }
        }
    }
}

fn effective_version<'a>(cluster: Option<&'a Cluster>, infra_env: Option<&'a InfraEnv>) -> &'a str {
    if let Some(cluster) = cluster {
        if !cluster.openshift_version.is_empty() {
            return &cluster.openshift_version;
        }
    }
    infra_env
        .and_then(|ie| ie.openshift_version.as_deref())
        .unwrap_or("")
}

fn effective_architecture<'a>(
    cluster: Option<&'a Cluster>,
    infra_env: Option<&'a InfraEnv>,
    inventory: &'a Inventory,
) -> &'a str {
    if let Some(cluster) = cluster {
        if !cluster.cpu_architecture.is_empty() {
            return &cluster.cpu_architecture;
        }
    }
    if let Some(infra_env) = infra_env {
        if !infra_env.cpu_architecture.is_empty() {
            return &infra_env.cpu_architecture;
        }
    }
    &inventory.cpu.architecture
}

/// Drive types acceptable as installation targets for this version and
/// architecture, in the order they are named in eligibility messages.
fn valid_drive_types(version: &str, arch: &str) -> Vec<DriveType> {
    let mut types = vec![DriveType::HDD, DriveType::SSD, DriveType::Multipath];
    if versions::at_least(version, "4.14") {
        types.push(DriveType::RAID);
    }
    if versions::at_least(version, "4.15") {
        types.push(DriveType::ISCSI);
    }
    if matches!(arch, "" | "x86_64" | "s390x") {
        types.push(DriveType::FC);
    }
    if arch == "s390x" {
        types.push(DriveType::ECKD);
        types.push(DriveType::FBA);
    }
    types
}

fn gb_to_bytes(gb: i64) -> i64 {
    gb * 1_000_000_000
}

/// Decimal SI rendering, e.g. 128849018880 -> "129 GB".
fn humanize_bytes(bytes: i64) -> String {
    let value = bytes.max(0);
    if value < 10 {
        return format!("{} B", value);
    }
    const SIZES: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];
    let float = value as f64;
    let exponent = (float.ln() / 1000f64.ln()).floor();
    let index = (exponent as usize).min(SIZES.len() - 1);
    let scaled = ((float / 1000f64.powi(index as i32)) * 10.0 + 0.5).floor() / 10.0;
    if scaled < 10.0 {
        format!("{:.1} {}", scaled, SIZES[index])
    } else {
        format!("{:.0} {}", scaled, SIZES[index])
    }
}

fn min_threshold(current: Option<f64>, candidate: Option<f64>) -> Option<f64> {
    match (current, candidate) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn is_part_of_multipath(disk: &Disk, inventory: &Inventory) -> bool {
    disk.holders
        .split(',')
        .map(str::trim)
        .filter(|holder| !holder.is_empty())
        .any(|holder| {
            inventory
                .disks
                .iter()
                .any(|d| d.name == holder && d.drive_type == DriveType::Multipath)
        })
}

fn multipath_members<'a>(multipath: &Disk, inventory: &'a Inventory) -> Vec<&'a Disk> {
    inventory
        .disks
        .iter()
        .filter(|disk| {
            disk.holders
                .split(',')
                .map(str::trim)
                .any(|holder| !holder.is_empty() && holder == multipath.name)
        })
        .collect()
}

fn validate_multipath_disk(disk: &Disk, inventory: &Inventory, version: &str) -> Vec<String> {
    let members = multipath_members(disk, inventory);
    let supported = members
        .iter()
        .all(|m| matches!(m.drive_type, DriveType::FC | DriveType::ISCSI));
    if members.is_empty() || !supported {
        return vec![format!(
            "{} {}",
            WRONG_MULTIPATH_TYPE_PREFIX, MULTIPATH_MEMBER_TYPES
        )];
    }
    let has_fc = members.iter().any(|m| m.drive_type == DriveType::FC);
    let has_iscsi = members.iter().any(|m| m.drive_type == DriveType::ISCSI);
    if has_fc && has_iscsi {
        return vec![MIXED_TYPES_IN_MULTIPATH.to_string()];
    }
    if has_iscsi {
        let iscsi_allowed = versions::at_least(version, "4.15");
        let member_invalid = members
            .iter()
            .any(|m| validate_iscsi_disk(m, inventory).is_some());
        if !iscsi_allowed || member_invalid {
            debug!(disk = %disk.name, "multipath device has invalid iSCSI paths");
            return vec![ERRORS_IN_ISCSI_DISABLE_MULTIPATH.to_string()];
        }
    }
    Vec::new()
}

/// iSCSI boot volumes must not ride the default network interface, or the
/// initiator loses its session when the installer reconfigures networking.
fn validate_iscsi_disk(disk: &Disk, inventory: &Inventory) -> Option<String> {
    let host_ip = disk
        .iscsi
        .as_ref()
        .and_then(|iscsi| iscsi.host_ip_address.as_deref())
        .unwrap_or("");
    if host_ip.is_empty() {
        return Some(ISCSI_HOST_IP_NOT_AVAILABLE.to_string());
    }
    let ip: IpAddr = match host_ip.parse() {
        Ok(ip) => ip,
        Err(e) => {
            return Some(format!(
                "{} {}: {}",
                ISCSI_HOST_IP_PARSE_PREFIX, host_ip, e
            ));
        }
    };
    let (family, default_destination) = if ip.is_ipv4() {
        (Route::FAMILY_V4, "0.0.0.0")
    } else {
        (Route::FAMILY_V6, "::")
    };
    let default_route = inventory
        .routes
        .iter()
        .find(|route| route.family == family && route.destination == default_destination);
    let Some(route) = default_route else {
        return None;
    };
    let Some(interface) = inventory
        .interfaces
        .iter()
        .find(|interface| interface.name == route.interface)
    else {
        return Some(ISCSI_NETWORK_INTERFACE_NOT_FOUND.to_string());
    };
    let addresses = if ip.is_ipv4() {
        &interface.ipv4_addresses
    } else {
        &interface.ipv6_addresses
    };
    if addresses.iter().any(|cidr| cidr_contains(cidr, &ip)) {
        return Some(format!(
            "{} {} is on the default network interface, the disk must be connected through a dedicated network",
            WRONG_ISCSI_NETWORK_PREFIX, host_ip
        ));
    }
    None
}

fn is_owned_reason(reason: &str) -> bool {
    reason == MIXED_TYPES_IN_MULTIPATH
        || reason == ISCSI_HOST_IP_NOT_AVAILABLE
        || reason == ISCSI_NETWORK_INTERFACE_NOT_FOUND
        || reason == ERRORS_IN_ISCSI_DISABLE_MULTIPATH
        || reason.starts_with(TOO_SMALL_DISK_PREFIX)
        || reason.starts_with(WRONG_DRIVE_TYPE_PREFIX)
        || reason.starts_with(WRONG_MULTIPATH_TYPE_PREFIX)
        || reason.starts_with(ISCSI_HOST_IP_PARSE_PREFIX)
        || reason.starts_with(WRONG_ISCSI_NETWORK_PREFIX)
}

fn cidr_contains(cidr: &str, ip: &IpAddr) -> bool {
    let Some((network, prefix)) = cidr.split_once('/') else {
        return false;
    };
    let Ok(prefix) = prefix.parse::<u32>() else {
        return false;
    };
    match (network.parse::<IpAddr>(), ip) {
        (Ok(IpAddr::V4(network)), IpAddr::V4(ip)) => {
            if prefix > 32 {
                return false;
            }
            let mask = if prefix == 0 {
                0
            } else {
                u32::MAX << (32 - prefix)
            };
            (u32::from(network) & mask) == (u32::from(*ip) & mask)
        }
        (Ok(IpAddr::V6(network)), IpAddr::V6(ip)) => {
            if prefix > 128 {
                return false;
            }
            let mask = if prefix == 0 {
                0
            } else {
                u128::MAX << (128 - prefix)
            };
            (u128::from(network) & mask) == (u128::from(*ip) & mask)
        }
        _ => false,
    }
}
