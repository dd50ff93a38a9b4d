//! Tests for hardware requirements resolution and disk eligibility.

use std::collections::BTreeMap;

use agent_install_operator::hardware::{
    Details, HardwareValidator, NoOperators, OperatorHardwareRequirements,
    OperatorHostRequirements, OperatorRequirementsApi, ValidatorCfg, VersionedHostRequirements,
};
use agent_install_operator::models::{
    Cluster, DiskEncryption, Disk, DriveType, Host, HostRole, InfraEnv, InstallationEligibility,
    Interface, Inventory, Iscsi, Route,
};

struct FakeOperators {
    host: Vec<OperatorHostRequirements>,
    preflight: Vec<OperatorHardwareRequirements>,
}

impl OperatorRequirementsApi for FakeOperators {
    fn get_requirements(
        &self,
        _cluster: &Cluster,
        _host: &Host,
    ) -> agent_install_operator::Result<Vec<OperatorHostRequirements>> {
        Ok(self.host.clone())
    }

    fn get_preflight_requirements(
        &self,
        _cluster: &Cluster,
    ) -> agent_install_operator::Result<Vec<OperatorHardwareRequirements>> {
        Ok(self.preflight.clone())
    }
}

fn validator() -> HardwareValidator {
    HardwareValidator::new(ValidatorCfg::default(), Box::new(NoOperators))
}

fn cluster(version: &str) -> Cluster {
    Cluster {
        openshift_version: version.to_string(),
        cpu_architecture: "x86_64".to_string(),
        control_plane_count: 3,
        ..Default::default()
    }
}

fn host(role: HostRole) -> Host {
    Host {
        role: Some(role),
        inventory: String::new(),
    }
}

fn inventory_json(architecture: &str, product_name: &str) -> String {
    format!(
        r#"{{"cpu":{{"architecture":"{}"}},"system_vendor":{{"product_name":"{}"}}}}"#,
        architecture, product_name
    )
}

fn disk(name: &str, drive_type: DriveType, size_gb: i64) -> Disk {
    Disk {
        name: name.to_string(),
        drive_type,
        size_bytes: size_gb * 1_000_000_000,
        installation_eligibility: InstallationEligibility {
            eligible: true,
            not_eligible_reasons: Vec::new(),
        },
        ..Default::default()
    }
}

#[test]
fn test_cluster_host_requirements_totals() {
    let details1 = Details {
        cpu_cores: 4,
        ram_mib: 1024,
        disk_size_gb: 10,
        installation_disk_speed_threshold_ms: 10,
        network_latency_threshold_ms: Some(100.0),
        packet_loss_percentage: Some(0.0),
        tpm_enabled_in_bios: false,
    };
    let details2 = Details {
        cpu_cores: 2,
        ram_mib: 256,
        disk_size_gb: 5,
        installation_disk_speed_threshold_ms: 5,
        network_latency_threshold_ms: Some(1000.0),
        packet_loss_percentage: Some(10.0),
        tpm_enabled_in_bios: false,
    };
    let operators = FakeOperators {
        host: vec![
            OperatorHostRequirements {
                operator_name: "operator-1".to_string(),
                requirements: details1,
            },
            OperatorHostRequirements {
                operator_name: "operator-2".to_string(),
                requirements: details2,
            },
        ],
        preflight: Vec::new(),
    };
    let validator = HardwareValidator::new(ValidatorCfg::default(), Box::new(operators));

    let requirements = validator
        .get_cluster_host_requirements(&cluster("4.12"), &host(HostRole::Master))
        .unwrap();

    assert_eq!(requirements.ocp.cpu_cores, 4);
    assert_eq!(requirements.operators.len(), 2);
    assert_eq!(requirements.total.cpu_cores, 10);
    assert_eq!(requirements.total.ram_mib, 16384 + 1024 + 256);
    assert_eq!(requirements.total.disk_size_gb, 115);
    assert_eq!(requirements.total.installation_disk_speed_threshold_ms, 5);
    assert_eq!(requirements.total.network_latency_threshold_ms, Some(100.0));
    assert_eq!(requirements.total.packet_loss_percentage, Some(0.0));
}

#[test]
fn test_single_node_master_uses_sno_baseline() {
    let mut sno = cluster("4.12");
    sno.control_plane_count = 1;
    let requirements = validator()
        .get_cluster_host_requirements(&sno, &host(HostRole::Master))
        .unwrap();
    assert_eq!(requirements.ocp.cpu_cores, 8);

    let multi = validator()
        .get_cluster_host_requirements(&cluster("4.12"), &host(HostRole::Master))
        .unwrap();
    assert_eq!(multi.ocp.cpu_cores, 4);
}

#[test]
fn test_arbiter_and_auto_assign_roles() {
    let arbiter = validator()
        .get_cluster_host_requirements(&cluster("4.19"), &host(HostRole::Arbiter))
        .unwrap();
    assert_eq!(arbiter.ocp.cpu_cores, 2);
    assert_eq!(arbiter.ocp.ram_mib, 8192);

    let auto = validator()
        .get_cluster_host_requirements(&cluster("4.12"), &host(HostRole::AutoAssign))
        .unwrap();
    assert_eq!(auto.ocp.cpu_cores, 2);
}

#[test]
fn test_edge_worker_baseline() {
    let mut edge = host(HostRole::Worker);
    edge.inventory = inventory_json("aarch64", "Jetson AGX Orin");
    let requirements = validator()
        .get_cluster_host_requirements(&cluster("4.12"), &edge)
        .unwrap();
    assert_eq!(requirements.ocp.disk_size_gb, 15);

    // Same product on x86_64 stays a regular worker
    let mut x86 = host(HostRole::Worker);
    x86.inventory = inventory_json("x86_64", "Jetson AGX Orin");
    let requirements = validator()
        .get_cluster_host_requirements(&cluster("4.12"), &x86)
        .unwrap();
    assert_eq!(requirements.ocp.disk_size_gb, 100);

    // Only worker hosts get the edge baseline
    let mut master = host(HostRole::Master);
    master.inventory = inventory_json("aarch64", "Jetson AGX Orin");
    let requirements = validator()
        .get_cluster_host_requirements(&cluster("4.12"), &master)
        .unwrap();
    assert_eq!(requirements.ocp.cpu_cores, 4);
}

#[test]
fn test_preflight_tpm_requirements() {
    let mut cluster = cluster("4.12");

    cluster.disk_encryption = Some(DiskEncryption {
        enable_on: Some(DiskEncryption::ENABLE_ON_ALL.to_string()),
        mode: Some(DiskEncryption::MODE_TPMV2.to_string()),
    });
    let preflight = validator().get_preflight_hardware_requirements(&cluster).unwrap();
    assert!(preflight.master.tpm_enabled_in_bios);
    assert!(preflight.worker.tpm_enabled_in_bios);
    assert!(preflight.arbiter.is_some());

    cluster.disk_encryption = Some(DiskEncryption {
        enable_on: Some(DiskEncryption::ENABLE_ON_MASTERS.to_string()),
        mode: Some(DiskEncryption::MODE_TPMV2.to_string()),
    });
    let preflight = validator().get_preflight_hardware_requirements(&cluster).unwrap();
    assert!(preflight.master.tpm_enabled_in_bios);
    assert!(!preflight.worker.tpm_enabled_in_bios);

    // Tang needs no TPM
    cluster.disk_encryption = Some(DiskEncryption {
        enable_on: Some(DiskEncryption::ENABLE_ON_ALL.to_string()),
        mode: Some(DiskEncryption::MODE_TANG.to_string()),
    });
    let preflight = validator().get_preflight_hardware_requirements(&cluster).unwrap();
    assert!(!preflight.master.tpm_enabled_in_bios);
    assert!(!preflight.worker.tpm_enabled_in_bios);
}

#[test]
fn test_preflight_single_node_uses_sno_baseline() {
    let mut sno = cluster("4.12");
    sno.control_plane_count = 1;
    let preflight = validator().get_preflight_hardware_requirements(&sno).unwrap();
    assert_eq!(preflight.master.cpu_cores, 8);
}

#[test]
fn test_host_valid_disks_ordering() {
    let mut disks = vec![
        disk("sda", DriveType::HDD, 500),
        disk("sdj", DriveType::SSD, 50),
        disk("sdc", DriveType::HDD, 200),
        disk("nvme01fs2", DriveType::SSD, 60),
        disk("sdz", DriveType::HDD, 300),
        disk("nvme01fs3", DriveType::SSD, 60),
        disk("sdn", DriveType::HDD, 400),
        disk("nvme01fs1", DriveType::SSD, 60),
        disk("sdp", DriveType::HDD, 100),
    ];
    let mut excluded = disk("sdx", DriveType::HDD, 100);
    excluded.installation_eligibility.eligible = false;
    disks.push(excluded);

    let inventory = Inventory {
        disks,
        ..Default::default()
    };
    let host = Host {
        role: Some(HostRole::Master),
        inventory: serde_json::to_string(&inventory).unwrap(),
    };
    let sorted = validator().get_host_valid_disks(&host).unwrap();
    let names: Vec<&str> = sorted.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "sdp",
            "sdc",
            "sdz",
            "sdn",
            "sda",
            "sdj",
            "nvme01fs1",
            "nvme01fs2",
            "nvme01fs3"
        ]
    );
}

#[test]
fn test_disk_wrong_drive_type_message() {
    let cluster = cluster("4.14");
    let host = host(HostRole::Master);
    let lvm_disk = disk("dm-0", DriveType::LVM, 200);
    let reasons = validator()
        .disk_is_eligible(&lvm_disk, Some(&cluster), None, &host, &Inventory::default())
        .unwrap();
    assert_eq!(
        reasons,
        vec!["Drive type is LVM, it must be one of HDD, SSD, Multipath, RAID, FC.".to_string()]
    );
}

#[test]
fn test_disk_too_small_message() {
    let cluster = cluster("4.14");
    let host = host(HostRole::Master);
    let small = disk("sda", DriveType::SSD, 10);
    let reasons = validator()
        .disk_is_eligible(&small, Some(&cluster), None, &host, &Inventory::default())
        .unwrap();
    assert_eq!(
        reasons,
        vec!["Disk is too small (disk only has 10 GB, but 100 GB are required)".to_string()]
    );
}

#[test]
fn test_iscsi_disk_host_ip_checks() {
    let cluster = cluster("4.15");
    let host = host(HostRole::Master);
    let inventory = Inventory {
        interfaces: vec![Interface {
            name: "eth0".to_string(),
            ipv4_addresses: vec!["192.168.1.1/24".to_string()],
            ipv6_addresses: Vec::new(),
        }],
        routes: vec![Route {
            interface: "eth0".to_string(),
            destination: "0.0.0.0".to_string(),
            gateway: "192.168.1.254".to_string(),
            family: Route::FAMILY_V4,
        }],
        ..Default::default()
    };

    let mut no_ip = disk("sda", DriveType::ISCSI, 200);
    no_ip.iscsi = Some(Iscsi {
        host_ip_address: None,
    });
    let reasons = validator()
        .disk_is_eligible(&no_ip, Some(&cluster), None, &host, &inventory)
        .unwrap();
    assert_eq!(
        reasons,
        vec!["Host IP address used to connect to the iSCSI target is not available".to_string()]
    );

    let mut on_default = disk("sda", DriveType::ISCSI, 200);
    on_default.iscsi = Some(Iscsi {
        host_ip_address: Some("192.168.1.5".to_string()),
    });
    let reasons = validator()
        .disk_is_eligible(&on_default, Some(&cluster), None, &host, &inventory)
        .unwrap();
    assert_eq!(
        reasons,
        vec![
            "iSCSI host IP 192.168.1.5 is on the default network interface, the disk must be connected through a dedicated network"
                .to_string()
        ]
    );

    let mut dedicated = disk("sda", DriveType::ISCSI, 200);
    dedicated.iscsi = Some(Iscsi {
        host_ip_address: Some("10.0.0.5".to_string()),
    });
    let reasons = validator()
        .disk_is_eligible(&dedicated, Some(&cluster), None, &host, &inventory)
        .unwrap();
    assert!(reasons.is_empty());
}

#[test]
fn test_multipath_member_type_checks() {
    let cluster = cluster("4.15");
    let host = host(HostRole::Master);

    let mut fc_path = disk("sda", DriveType::FC, 200);
    fc_path.holders = "dm-0".to_string();
    let mut iscsi_path = disk("sdb", DriveType::ISCSI, 200);
    iscsi_path.holders = "dm-0".to_string();
    iscsi_path.iscsi = Some(Iscsi {
        host_ip_address: Some("10.0.0.5".to_string()),
    });
    let multipath = disk("dm-0", DriveType::Multipath, 200);

    // Mixed FC and iSCSI paths
    let inventory = Inventory {
        disks: vec![fc_path.clone(), iscsi_path.clone(), multipath.clone()],
        ..Default::default()
    };
    let reasons = validator()
        .disk_is_eligible(&multipath, Some(&cluster), None, &host, &inventory)
        .unwrap();
    assert_eq!(
        reasons,
        vec![
            "Multipath device has paths of different types, but they must all be the same type"
                .to_string()
        ]
    );

    // Unsupported member type
    let mut lvm_path = disk("sdc", DriveType::LVM, 200);
    lvm_path.holders = "dm-0".to_string();
    let inventory = Inventory {
        disks: vec![lvm_path, multipath.clone()],
        ..Default::default()
    };
    let reasons = validator()
        .disk_is_eligible(&multipath, Some(&cluster), None, &host, &inventory)
        .unwrap();
    assert_eq!(
        reasons,
        vec![
            "Multipath device has path of unsupported type. Path type must be one of FC, iSCSI"
                .to_string()
        ]
    );

    // iSCSI path with a broken host IP disables the whole multipath device
    let mut broken_path = iscsi_path.clone();
    broken_path.iscsi = Some(Iscsi {
        host_ip_address: None,
    });
    let inventory = Inventory {
        disks: vec![broken_path, multipath.clone()],
        ..Default::default()
    };
    let reasons = validator()
        .disk_is_eligible(&multipath, Some(&cluster), None, &host, &inventory)
        .unwrap();
    assert_eq!(
        reasons,
        vec![
            "Multipath device has unusable iSCSI paths, please make sure all paths are valid"
                .to_string()
        ]
    );

    // All-FC multipath is fine
    let mut fc_path2 = disk("sdd", DriveType::FC, 200);
    fc_path2.holders = "dm-0".to_string();
    let inventory = Inventory {
        disks: vec![fc_path, fc_path2, multipath.clone()],
        ..Default::default()
    };
    let reasons = validator()
        .disk_is_eligible(&multipath, Some(&cluster), None, &host, &inventory)
        .unwrap();
    assert!(reasons.is_empty());
}

#[test]
fn test_iscsi_multipath_needs_4_15() {
    let cluster = cluster("4.14");
    let host = host(HostRole::Master);
    let mut iscsi_path = disk("sdb", DriveType::ISCSI, 200);
    iscsi_path.holders = "dm-0".to_string();
    iscsi_path.iscsi = Some(Iscsi {
        host_ip_address: Some("10.0.0.5".to_string()),
    });
    let multipath = disk("dm-0", DriveType::Multipath, 200);
    let inventory = Inventory {
        disks: vec![iscsi_path, multipath.clone()],
        ..Default::default()
    };
    let reasons = validator()
        .disk_is_eligible(&multipath, Some(&cluster), None, &host, &inventory)
        .unwrap();
    assert_eq!(
        reasons,
        vec![
            "Multipath device has unusable iSCSI paths, please make sure all paths are valid"
                .to_string()
        ]
    );
}

#[test]
fn test_foreign_reasons_are_preserved_and_owned_reasons_recomputed() {
    let cluster = cluster("4.14");
    let host = host(HostRole::Master);
    let mut target = disk("sda", DriveType::SSD, 200);
    target.installation_eligibility.not_eligible_reasons = vec![
        "Disk is removable".to_string(),
        "Disk is too small (disk only has 1 GB, but 100 GB are required)".to_string(),
    ];
    let reasons = validator()
        .disk_is_eligible(&target, Some(&cluster), None, &host, &Inventory::default())
        .unwrap();
    // The stale size reason is dropped, the foreign reason survives
    assert_eq!(reasons, vec!["Disk is removable".to_string()]);
}

#[test]
fn test_unbound_host_uses_least_demanding_role() {
    let entry = VersionedHostRequirements {
        version: "default".to_string(),
        master: Some(Details {
            cpu_cores: 4,
            ram_mib: 16384,
            disk_size_gb: 100,
            installation_disk_speed_threshold_ms: 10,
            ..Default::default()
        }),
        worker: Some(Details {
            cpu_cores: 2,
            ram_mib: 8192,
            disk_size_gb: 50,
            installation_disk_speed_threshold_ms: 10,
            ..Default::default()
        }),
        ..Default::default()
    };
    let mut versioned_requirements = BTreeMap::new();
    versioned_requirements.insert("default".to_string(), entry);
    let cfg = ValidatorCfg {
        versioned_requirements,
        edge_worker_product_names: Vec::new(),
    };
    let validator = HardwareValidator::new(cfg, Box::new(NoOperators));
    let infra_env = InfraEnv {
        openshift_version: Some("4.12".to_string()),
        ..Default::default()
    };
    let host = host(HostRole::AutoAssign);

    let fits_worker = disk("sda", DriveType::SSD, 60);
    let reasons = validator
        .disk_is_eligible(&fits_worker, None, Some(&infra_env), &host, &Inventory::default())
        .unwrap();
    assert!(reasons.is_empty());

    let too_small = disk("sda", DriveType::SSD, 40);
    let reasons = validator
        .disk_is_eligible(&too_small, None, Some(&infra_env), &host, &Inventory::default())
        .unwrap();
    assert_eq!(reasons.len(), 1);
    assert!(reasons[0].starts_with("Disk is too small"));
}
