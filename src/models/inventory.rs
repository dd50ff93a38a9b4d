//! Host inventory as reported by the discovery agent.

use serde::{Deserialize, Serialize};

/// Physical drive type of a disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum DriveType {
    HDD,
    SSD,
    ODD,
    FC,
    #[serde(rename = "iSCSI")]
    ISCSI,
    LVM,
    Multipath,
    ECKD,
    FBA,
    RAID,
    #[default]
    Unknown,
}

impl std::fmt::Display for DriveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DriveType::HDD => "HDD",
            DriveType::SSD => "SSD",
            DriveType::ODD => "ODD",
            DriveType::FC => "FC",
            DriveType::ISCSI => "iSCSI",
            DriveType::LVM => "LVM",
            DriveType::Multipath => "Multipath",
            DriveType::ECKD => "ECKD",
            DriveType::FBA => "FBA",
            DriveType::RAID => "RAID",
            DriveType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// iSCSI session details for an iSCSI-backed disk.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Iscsi {
    /// IP the host uses to reach the iSCSI target.
    #[serde(default)]
    pub host_ip_address: Option<String>,
}

/// Whether a disk may be used as an installation target.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InstallationEligibility {
    #[serde(default)]
    pub eligible: bool,
    #[serde(default)]
    pub not_eligible_reasons: Vec<String>,
}

/// A block device on the host.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Disk {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size_bytes: i64,
    #[serde(default)]
    pub drive_type: DriveType,
    /// Comma-separated names of devices stacked on top of this one
    /// (a multipath device lists itself in each path's holders).
    #[serde(default)]
    pub holders: String,
    #[serde(default)]
    pub iscsi: Option<Iscsi>,
    #[serde(default)]
    pub installation_eligibility: InstallationEligibility,
}

/// A network interface with its configured addresses (CIDR notation).
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Interface {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ipv4_addresses: Vec<String>,
    #[serde(default)]
    pub ipv6_addresses: Vec<String>,
}

/// A kernel routing table entry.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Route {
    #[serde(default)]
    pub interface: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub gateway: String,
    /// Address family, AF_INET (2) or AF_INET6 (10).
    #[serde(default)]
    pub family: i32,
}

impl Route {
    pub const FAMILY_V4: i32 = 2;
    pub const FAMILY_V6: i32 = 10;
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Cpu {
    #[serde(default)]
    pub architecture: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SystemVendor {
    #[serde(default)]
    pub product_name: String,
}

/// Full hardware inventory of a host.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Inventory {
    #[serde(default)]
    pub cpu: Cpu,
    #[serde(default)]
    pub system_vendor: SystemVendor,
    #[serde(default)]
    pub disks: Vec<Disk>,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub routes: Vec<Route>,
}
