// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use splitpot::application::GroupService;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(GroupService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = GroupService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Test fixture: a standard group with members
pub struct TripGroup;

impl TripGroup {
    pub const NAME: &'static str = "Trip";

    /// Create the "Trip" group with Alice and Bob
    pub async fn create_pair(service: &GroupService) -> Result<()> {
        service.create_group(Self::NAME.into()).await?;
        service.add_member(Self::NAME, "Alice".into()).await?;
        service.add_member(Self::NAME, "Bob".into()).await?;
        Ok(())
    }

    /// Create the "Trip" group with Alice, Bob and Carol
    pub async fn create_trio(service: &GroupService) -> Result<()> {
        Self::create_pair(service).await?;
        service.add_member(Self::NAME, "Carol".into()).await?;
        Ok(())
    }
}
