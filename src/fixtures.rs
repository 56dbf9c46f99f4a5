use chrono::Local;

/// Login identity used by the workflows
#[derive(Debug, Clone)]
pub struct TestUser {
    pub employee_id: String,
    pub password: String,
}

/// Asset record created during the manage-assets workflow.
///
/// Name and serial carry a timestamp so reruns against the same database
/// never collide on unique columns.
#[derive(Debug, Clone)]
pub struct TestAsset {
    pub name: String,
    pub serial: String,
    pub asset_type: String,
    pub status: String,
}

impl TestAsset {
    pub fn generate() -> Self {
        let stamp = Local::now().format("%Y%m%d%H%M%S");
        Self {
            name: format!("TEST-ASSET-{}", stamp),
            serial: format!("SN-{}", stamp),
            asset_type: "COMPUTER".to_string(),
            status: "ACTIVE".to_string(),
        }
    }
}

/// Static input data for one run. Immutable once generated.
#[derive(Debug, Clone)]
pub struct TestFixtures {
    pub user: TestUser,
    pub asset: TestAsset,
}

impl TestFixtures {
    pub fn generate() -> Self {
        Self {
            user: TestUser {
                employee_id: "EMP-101".to_string(),
                password: "user123".to_string(),
            },
            asset: TestAsset::generate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_has_timestamped_name_and_serial() {
        let asset = TestAsset::generate();
        assert!(asset.name.starts_with("TEST-ASSET-"));
        assert!(asset.serial.starts_with("SN-"));

        let stamp = asset.name.trim_start_matches("TEST-ASSET-");
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(asset.serial.trim_start_matches("SN-"), stamp);
    }

    #[test]
    fn test_fixture_defaults() {
        let fixtures = TestFixtures::generate();
        assert_eq!(fixtures.user.employee_id, "EMP-101");
        assert_eq!(fixtures.asset.asset_type, "COMPUTER");
        assert_eq!(fixtures.asset.status, "ACTIVE");
    }
}
