//! Space data integration contract
//!
//! An owner-curated log of space missions whose data field can be revised
//! as new findings arrive.

use crate::core::validate::{require_label, require_max_len, MAX_DATA_LEN, MAX_NAME_LEN};
use crate::core::{CallContext, ContractError, ContractResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recorded space mission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceMission {
    pub id: u64,
    pub name: String,
    /// Unix timestamp of the launch
    pub launch_date: u64,
    pub target_asteroid: String,
    pub data: String,
    /// Block height of the last data write
    pub updated_at: u64,
}

/// The space-data-integration contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceDataRegistry {
    owner: String,
    missions: BTreeMap<u64, SpaceMission>,
    /// Last assigned mission id
    last_id: u64,
}

impl SpaceDataRegistry {
    pub fn new(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            missions: BTreeMap::new(),
            last_id: 0,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    fn require_owner(&self, ctx: &CallContext, action: &'static str) -> ContractResult<()> {
        if !ctx.is(&self.owner) {
            log::warn!("Rejected {} by non-owner {}", action, ctx.sender);
            return Err(ContractError::unauthorized(&ctx.sender, action));
        }
        Ok(())
    }

    /// Record a new mission (owner only) and return its id
    pub fn add_space_mission(
        &mut self,
        ctx: &CallContext,
        name: &str,
        launch_date: u64,
        target_asteroid: &str,
        data: &str,
    ) -> ContractResult<u64> {
        self.require_owner(ctx, "add space mission")?;
        require_label("name", name, MAX_NAME_LEN)?;
        require_label("target asteroid", target_asteroid, MAX_NAME_LEN)?;
        require_max_len("data", data, MAX_DATA_LEN)?;

        let id = self.last_id.checked_add(1).ok_or(ContractError::Overflow)?;
        self.missions.insert(
            id,
            SpaceMission {
                id,
                name: name.to_string(),
                launch_date,
                target_asteroid: target_asteroid.to_string(),
                data: data.to_string(),
                updated_at: ctx.block_height,
            },
        );
        self.last_id = id;

        log::info!("Space mission {} recorded as {} targeting {}", name, id, target_asteroid);
        Ok(id)
    }

    /// Overwrite a mission's data (owner only)
    pub fn update_mission_data(
        &mut self,
        ctx: &CallContext,
        mission_id: u64,
        new_data: &str,
    ) -> ContractResult<()> {
        self.require_owner(ctx, "update mission data")?;
        require_max_len("data", new_data, MAX_DATA_LEN)?;

        let mission = self
            .missions
            .get_mut(&mission_id)
            .ok_or(ContractError::MissionNotFound(mission_id))?;
        mission.data = new_data.to_string();
        mission.updated_at = ctx.block_height;

        log::info!("Space mission {} data updated", mission_id);
        Ok(())
    }

    pub fn get_space_mission(&self, id: u64) -> Option<&SpaceMission> {
        self.missions.get(&id)
    }

    /// Missions aimed at a given asteroid
    pub fn missions_to(&self, target_asteroid: &str) -> Vec<&SpaceMission> {
        self.missions
            .values()
            .filter(|m| m.target_asteroid == target_asteroid)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.missions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
    const LAUNCH: u64 = 1_672_531_200;

    fn owner_ctx() -> CallContext {
        CallContext::new(OWNER, 10)
    }

    fn setup() -> SpaceDataRegistry {
        let mut registry = SpaceDataRegistry::new(OWNER);
        registry
            .add_space_mission(&owner_ctx(), "Asteroid Explorer 1", LAUNCH, "Ceres", "Initial mission data")
            .unwrap();
        registry
    }

    #[test]
    fn test_add_mission() {
        let registry = setup();

        let mission = registry.get_space_mission(1).unwrap();
        assert_eq!(mission.name, "Asteroid Explorer 1");
        assert_eq!(mission.launch_date, LAUNCH);
        assert_eq!(mission.target_asteroid, "Ceres");
        assert_eq!(mission.data, "Initial mission data");
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_add_mission_non_owner() {
        let mut registry = SpaceDataRegistry::new(OWNER);

        let result = registry.add_space_mission(
            &CallContext::new("ST2OUTSIDER", 10),
            "Unauthorized Mission",
            LAUNCH,
            "Vesta",
            "Unauthorized data",
        );
        assert_eq!(result.unwrap_err().code(), 403);
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_update_mission_data() {
        let mut registry = setup();

        registry
            .update_mission_data(&owner_ctx().at_height(20), 1, "Mission data with latest findings")
            .unwrap();

        let mission = registry.get_space_mission(1).unwrap();
        assert_eq!(mission.data, "Mission data with latest findings");
        assert_eq!(mission.updated_at, 20);
    }

    #[test]
    fn test_update_mission_non_owner() {
        let mut registry = setup();

        let result = registry.update_mission_data(
            &CallContext::new("ST2OUTSIDER", 10),
            1,
            "Unauthorized update attempt",
        );
        assert_eq!(result.unwrap_err().code(), 403);
        assert_eq!(registry.get_space_mission(1).unwrap().data, "Initial mission data");
    }

    #[test]
    fn test_update_unknown_mission() {
        let mut registry = setup();

        let result = registry.update_mission_data(&owner_ctx(), 999, "Update for non-existent mission");
        assert!(matches!(result, Err(ContractError::MissionNotFound(999))));
    }

    #[test]
    fn test_non_owner_checked_before_existence() {
        let mut registry = setup();

        let result = registry.update_mission_data(&CallContext::new("ST2OUTSIDER", 10), 999, "x");
        assert_eq!(result.unwrap_err().code(), 403);
    }

    #[test]
    fn test_validation() {
        let mut registry = SpaceDataRegistry::new(OWNER);

        assert!(registry
            .add_space_mission(&owner_ctx(), "", LAUNCH, "Ceres", "")
            .is_err());
        assert!(registry
            .add_space_mission(&owner_ctx(), "M", LAUNCH, "Ceres", &"x".repeat(MAX_DATA_LEN + 1))
            .is_err());
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_missions_to() {
        let mut registry = setup();
        registry
            .add_space_mission(&owner_ctx(), "Dawn", LAUNCH, "Vesta", "")
            .unwrap();

        assert_eq!(registry.missions_to("Ceres").len(), 1);
        assert_eq!(registry.missions_to("Vesta")[0].id, 2);
        assert!(registry.get_space_mission(999).is_none());
    }
}
