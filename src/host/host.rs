//! Contract host
//!
//! Routes `(contract, function, args)` calls to the owning contract and
//! turns the outcome into a [`CallResult`]. Calls run one at a time against
//! exclusively borrowed state.

use crate::config::{Config, ConfigError};
use crate::core::CallContext;
use crate::host::args::Args;
use crate::host::error::HostError;
use crate::host::response::{amount_value, CallResult};
use crate::host::world::{
    World, MARKET_CONTRACT, MINING_CONTRACT, MISSION_CONTRACT, TOKEN_CONTRACT,
};
use serde_json::{json, Value};

/// Executes contract calls against a [`World`]
#[derive(Debug, Clone)]
pub struct Host {
    world: World,
}

impl Host {
    /// Host with freshly deployed contracts
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            world: World::new(config)?,
        })
    }

    pub fn from_world(world: World) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    /// Run a call; failures become `{success: false, error: code}`
    pub fn call(
        &mut self,
        ctx: &CallContext,
        contract: &str,
        function: &str,
        args: &[Value],
    ) -> CallResult {
        match self.try_call(ctx, contract, function, args) {
            Ok(result) => result,
            Err(err) => {
                log::debug!(
                    "{}::{} by {} failed: {}",
                    contract,
                    function,
                    ctx.sender,
                    err
                );
                CallResult::err(err.code())
            }
        }
    }

    /// Run a call, keeping the typed error
    pub fn try_call(
        &mut self,
        ctx: &CallContext,
        contract: &str,
        function: &str,
        args: &[Value],
    ) -> Result<CallResult, HostError> {
        let args = Args::new(function, args);
        match contract {
            TOKEN_CONTRACT => self.call_token(ctx, function, &args),
            MINING_CONTRACT => self.call_mining(ctx, function, &args),
            MARKET_CONTRACT => self.call_market(ctx, function, &args),
            MISSION_CONTRACT => self.call_missions(ctx, function, &args),
            other => Err(HostError::UnknownContract(other.to_string())),
        }
    }

    // =========================================================================
    // asteroid-mining-token
    // =========================================================================

    fn call_token(
        &mut self,
        ctx: &CallContext,
        function: &str,
        args: &Args,
    ) -> Result<CallResult, HostError> {
        let token = &mut self.world.token;
        match function {
            "mint" => {
                args.expect(2)?;
                token.mint(ctx, args.u128(0, "amount")?, args.principal(1, "recipient")?)?;
                Ok(CallResult::ok())
            }
            "transfer" => {
                args.expect(3)?;
                token.transfer(
                    ctx,
                    args.u128(0, "amount")?,
                    args.principal(1, "sender")?,
                    args.principal(2, "recipient")?,
                )?;
                Ok(CallResult::ok())
            }
            "acquire-asteroid-shares" => {
                args.expect(2)?;
                token.acquire_asteroid_shares(
                    ctx,
                    args.u64(0, "asteroid-id")?,
                    args.u128(1, "shares")?,
                )?;
                Ok(CallResult::ok())
            }
            "get-asteroid-ownership" => {
                // Defaults to the caller's own stake
                args.expect_range(1, 2)?;
                let owner = if args.len() == 2 {
                    args.principal(1, "owner")?
                } else {
                    ctx.sender.as_str()
                };
                let ownership = token.get_asteroid_ownership(args.u64(0, "asteroid-id")?, owner);
                Ok(record(ownership.map(|o| {
                    json!({ "owner": o.owner, "shares": amount_value(o.shares) })
                })))
            }
            "get-balance" => {
                args.expect(1)?;
                let balance = token.get_balance(args.principal(0, "account")?);
                Ok(CallResult::ok_value(amount_value(balance)))
            }
            "get-token-uri" => {
                args.expect(0)?;
                Ok(CallResult::ok_value(json!(token.get_token_uri())))
            }
            "set-token-uri" => {
                args.expect(1)?;
                token.set_token_uri(ctx, args.str(0, "uri")?)?;
                Ok(CallResult::ok())
            }
            "get-name" => {
                args.expect(0)?;
                Ok(CallResult::ok_value(json!(token.name())))
            }
            "get-symbol" => {
                args.expect(0)?;
                Ok(CallResult::ok_value(json!(token.symbol())))
            }
            "get-decimals" => {
                args.expect(0)?;
                Ok(CallResult::ok_value(json!(token.decimals())))
            }
            "get-total-supply" => {
                args.expect(0)?;
                Ok(CallResult::ok_value(amount_value(token.total_supply())))
            }
            _ => Err(unknown_function(TOKEN_CONTRACT, function)),
        }
    }

    // =========================================================================
    // mining-simulation
    // =========================================================================

    fn call_mining(
        &mut self,
        ctx: &CallContext,
        function: &str,
        args: &Args,
    ) -> Result<CallResult, HostError> {
        let mining = &mut self.world.mining;
        match function {
            "register-asteroid" => {
                args.expect(4)?;
                let id = mining.register_asteroid(
                    ctx,
                    args.str(0, "name")?,
                    args.u64(1, "size")?,
                    args.u64(2, "resource-richness")?,
                    args.u64(3, "mining-difficulty")?,
                )?;
                Ok(CallResult::ok_value(json!(id)))
            }
            "start-mining-operation" => {
                args.expect(2)?;
                let id = mining.start_mining_operation(
                    ctx,
                    args.u64(0, "asteroid-id")?,
                    args.u64(1, "duration-days")?,
                )?;
                Ok(CallResult::ok_value(json!(id)))
            }
            "simulate-mining" => {
                args.expect(1)?;
                let tick = mining.simulate_mining(ctx, args.u64(0, "operation-id")?)?;
                Ok(CallResult::ok_value(json!({
                    "extracted": amount_value(tick.extracted),
                    "resources_extracted": amount_value(tick.resources_extracted),
                    "status": tick.status,
                })))
            }
            "get-asteroid" => {
                args.expect(1)?;
                let asteroid = mining.get_asteroid(args.u64(0, "asteroid-id")?);
                Ok(record(asteroid.map(|a| {
                    json!({
                        "name": a.name,
                        "size": a.size,
                        "resource_richness": a.resource_richness,
                        "mining_difficulty": a.mining_difficulty,
                    })
                })))
            }
            "get-mining-operation" => {
                args.expect(1)?;
                let operation = mining.get_mining_operation(args.u64(0, "operation-id")?);
                Ok(record(operation.map(|op| {
                    json!({
                        "asteroid_id": op.asteroid_id,
                        "operator": op.operator,
                        "start_block": op.start_block,
                        "end_block": op.end_block,
                        "resources_extracted": amount_value(op.resources_extracted),
                    })
                })))
            }
            _ => Err(unknown_function(MINING_CONTRACT, function)),
        }
    }

    // =========================================================================
    // resource-market
    // =========================================================================

    fn call_market(
        &mut self,
        ctx: &CallContext,
        function: &str,
        args: &Args,
    ) -> Result<CallResult, HostError> {
        let market = &mut self.world.market;
        match function {
            "update-resource-price" => {
                args.expect(2)?;
                market.update_resource_price(
                    ctx,
                    args.u64(0, "resource-id")?,
                    args.u128(1, "new-price")?,
                )?;
                Ok(CallResult::ok())
            }
            "add-resource-supply" => {
                args.expect(2)?;
                let supply = market.add_resource_supply(
                    ctx,
                    args.u64(0, "resource-id")?,
                    args.u128(1, "amount")?,
                )?;
                Ok(CallResult::ok_value(amount_value(supply)))
            }
            "remove-resource-supply" => {
                args.expect(2)?;
                let supply = market.remove_resource_supply(
                    ctx,
                    args.u64(0, "resource-id")?,
                    args.u128(1, "amount")?,
                )?;
                Ok(CallResult::ok_value(amount_value(supply)))
            }
            "get-resource-price" => {
                args.expect(1)?;
                let price = market.get_resource_price(args.u64(0, "resource-id")?);
                Ok(record(price.map(|price| json!({ "price": amount_value(price) }))))
            }
            "get-resource-supply" => {
                args.expect(1)?;
                let supply = market.get_resource_supply(args.u64(0, "resource-id")?);
                Ok(record(supply.map(|supply| json!({ "supply": amount_value(supply) }))))
            }
            _ => Err(unknown_function(MARKET_CONTRACT, function)),
        }
    }

    // =========================================================================
    // space-data-integration
    // =========================================================================

    fn call_missions(
        &mut self,
        ctx: &CallContext,
        function: &str,
        args: &Args,
    ) -> Result<CallResult, HostError> {
        let missions = &mut self.world.missions;
        match function {
            "add-space-mission" => {
                args.expect(4)?;
                let id = missions.add_space_mission(
                    ctx,
                    args.str(0, "name")?,
                    args.u64(1, "launch-date")?,
                    args.str(2, "target-asteroid")?,
                    args.str(3, "data")?,
                )?;
                Ok(CallResult::ok_value(json!(id)))
            }
            "update-mission-data" => {
                args.expect(2)?;
                missions.update_mission_data(
                    ctx,
                    args.u64(0, "mission-id")?,
                    args.str(1, "new-data")?,
                )?;
                Ok(CallResult::ok())
            }
            "get-space-mission" => {
                args.expect(1)?;
                let mission = missions.get_space_mission(args.u64(0, "mission-id")?);
                Ok(record(mission.map(|m| {
                    json!({
                        "name": m.name,
                        "launch_date": m.launch_date,
                        "target_asteroid": m.target_asteroid,
                        "data": m.data,
                    })
                })))
            }
            _ => Err(unknown_function(MISSION_CONTRACT, function)),
        }
    }
}

fn unknown_function(contract: &str, function: &str) -> HostError {
    HostError::UnknownFunction {
        contract: contract.to_string(),
        function: function.to_string(),
    }
}

/// A record, or `null` when absent
fn record(item: Option<Value>) -> CallResult {
    CallResult::Record(item.unwrap_or(Value::Null))
}
