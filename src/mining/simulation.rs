//! Mining simulation contract
//!
//! Ties asteroid registration, operation scheduling and extraction ticks
//! together. Operations run for a whole number of days measured in blocks.

use crate::config::MiningConfig;
use crate::core::{CallContext, ContractError, ContractResult};
use crate::mining::asteroid::{Asteroid, AsteroidRegistry};
use crate::mining::operation::{MiningOperation, OperationStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one `simulate_mining` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningTick {
    pub operation_id: u64,
    /// Resources added by this tick
    pub extracted: u128,
    /// Running total for the operation
    pub resources_extracted: u128,
    pub block_height: u64,
    pub status: OperationStatus,
}

/// The mining-simulation contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningSimulation {
    blocks_per_day: u64,
    yield_scale: u128,
    asteroids: AsteroidRegistry,
    operations: BTreeMap<u64, MiningOperation>,
    /// Last assigned operation id
    last_operation_id: u64,
}

impl MiningSimulation {
    pub fn new(config: &MiningConfig) -> Self {
        Self {
            blocks_per_day: config.blocks_per_day,
            yield_scale: config.yield_scale,
            asteroids: AsteroidRegistry::new(),
            operations: BTreeMap::new(),
            last_operation_id: 0,
        }
    }

    pub fn blocks_per_day(&self) -> u64 {
        self.blocks_per_day
    }

    pub fn asteroids(&self) -> &AsteroidRegistry {
        &self.asteroids
    }

    /// Register an asteroid; open to any caller
    pub fn register_asteroid(
        &mut self,
        ctx: &CallContext,
        name: &str,
        size: u64,
        resource_richness: u64,
        mining_difficulty: u64,
    ) -> ContractResult<u64> {
        self.asteroids
            .register(ctx, name, size, resource_richness, mining_difficulty)
    }

    /// Start an operation on a registered asteroid with the caller as operator
    ///
    /// The operation covers `duration_days * blocks_per_day` blocks from the
    /// current height.
    pub fn start_mining_operation(
        &mut self,
        ctx: &CallContext,
        asteroid_id: u64,
        duration_days: u64,
    ) -> ContractResult<u64> {
        if !self.asteroids.exists(asteroid_id) {
            return Err(ContractError::AsteroidNotFound(asteroid_id));
        }
        if duration_days == 0 {
            return Err(ContractError::InvalidArgument(
                "duration must be at least one day".to_string(),
            ));
        }

        let duration_blocks = duration_days
            .checked_mul(self.blocks_per_day)
            .ok_or(ContractError::Overflow)?;
        let end_block = ctx
            .block_height
            .checked_add(duration_blocks)
            .ok_or(ContractError::Overflow)?;
        let id = self
            .last_operation_id
            .checked_add(1)
            .ok_or(ContractError::Overflow)?;

        self.operations.insert(
            id,
            MiningOperation {
                id,
                asteroid_id,
                operator: ctx.sender.clone(),
                start_block: ctx.block_height,
                end_block,
                resources_extracted: 0,
            },
        );
        self.last_operation_id = id;

        log::info!(
            "Mining operation {} started on asteroid {} by {} (blocks {}..={})",
            id,
            asteroid_id,
            ctx.sender,
            ctx.block_height,
            end_block
        );
        Ok(id)
    }

    /// Advance an operation by one extraction tick
    ///
    /// Only the operator may simulate, and only while the operation is
    /// active: from `start_block` until the height passes `end_block`. Extraction stops adding once the asteroid's reserves are
    /// reached; the call still succeeds.
    pub fn simulate_mining(
        &mut self,
        ctx: &CallContext,
        operation_id: u64,
    ) -> ContractResult<MiningTick> {
        let operation = self
            .operations
            .get_mut(&operation_id)
            .ok_or(ContractError::OperationNotFound(operation_id))?;

        if !ctx.is(&operation.operator) {
            log::warn!(
                "Rejected simulation of operation {} by non-operator {}",
                operation_id,
                ctx.sender
            );
            return Err(ContractError::unauthorized(&ctx.sender, "simulate mining"));
        }
        match operation.status(ctx.block_height) {
            OperationStatus::Active => {}
            OperationStatus::Pending => {
                return Err(ContractError::OperationNotStarted {
                    id: operation_id,
                    start_block: operation.start_block,
                    height: ctx.block_height,
                })
            }
            OperationStatus::Ended => {
                return Err(ContractError::OperationEnded {
                    id: operation_id,
                    end_block: operation.end_block,
                    height: ctx.block_height,
                })
            }
        }

        let asteroid = self
            .asteroids
            .get(operation.asteroid_id)
            .ok_or(ContractError::AsteroidNotFound(operation.asteroid_id))?;
        let extracted = operation.extract(
            asteroid.extraction_yield(self.yield_scale)?,
            asteroid.reserves(),
        );

        log::debug!(
            "Operation {} extracted {} (total {}) at block {}",
            operation_id,
            extracted,
            operation.resources_extracted,
            ctx.block_height
        );

        Ok(MiningTick {
            operation_id,
            extracted,
            resources_extracted: operation.resources_extracted,
            block_height: ctx.block_height,
            status: operation.status(ctx.block_height),
        })
    }

    pub fn get_asteroid(&self, id: u64) -> Option<&Asteroid> {
        self.asteroids.get(id)
    }

    pub fn get_mining_operation(&self, id: u64) -> Option<&MiningOperation> {
        self.operations.get(&id)
    }

    /// Operations run by a principal
    pub fn operations_for(&self, operator: &str) -> Vec<&MiningOperation> {
        self.operations
            .values()
            .filter(|op| op.operator == operator)
            .collect()
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }
}
