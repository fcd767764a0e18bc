//! CLI commands for the contract host
//!
//! Implements all command handlers for the CLI interface.

use crate::config::Config;
use crate::core::CallContext;
use crate::host::{Host, World, CHAIN_KEY, CONTRACTS, TOKEN_CONTRACT};
use crate::storage::{FileStore, KvStore, StorageConfig};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Config file kept in the data directory
pub const CONFIG_FILE: &str = "config.json";

/// Application state
pub struct AppState {
    pub config: Config,
    pub host: Host,
    pub store: FileStore,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load contract state from `data_dir`
    ///
    /// An explicit config path wins over the one stored in the data
    /// directory, which wins over defaults.
    pub fn new(data_dir: PathBuf, config_path: Option<&Path>) -> CliResult<Self> {
        let config = resolve_config(&data_dir, config_path)?;
        let store = FileStore::new(StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        })?;

        if !World::exists_in(&store)? {
            log::warn!("No contract state in {:?}, starting fresh", data_dir);
        }
        let world = World::load(&store, &config)?;

        Ok(Self {
            config,
            host: Host::from_world(world),
            store,
            data_dir,
        })
    }

    /// Context for the next call; the sender defaults to the contract owner
    /// and the height to the stored chain height
    pub fn context(&self, sender: Option<&str>, block_height: Option<u64>) -> CallContext {
        CallContext::new(
            sender.unwrap_or(self.config.contract_owner.as_str()),
            block_height.unwrap_or(self.host.world().chain.block_height),
        )
    }

    /// Save the current state
    pub fn save(&mut self) -> CliResult<()> {
        self.host.world().save(&mut self.store)?;
        Ok(())
    }
}

fn resolve_config(data_dir: &Path, config_path: Option<&Path>) -> CliResult<Config> {
    if let Some(path) = config_path {
        return Ok(Config::load(path)?);
    }
    let stored = data_dir.join(CONFIG_FILE);
    if stored.exists() {
        return Ok(Config::load(&stored)?);
    }
    Ok(Config::default())
}

/// Deploy fresh contracts into `data_dir`
pub fn cmd_init(
    data_dir: &Path,
    config_path: Option<&Path>,
    owner: Option<&str>,
    force: bool,
) -> CliResult<()> {
    let mut config = resolve_config(data_dir, config_path)?;
    if let Some(owner) = owner {
        config.contract_owner = owner.to_string();
    }
    config.validate()?;

    let mut store = FileStore::new(StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    })?;

    if World::exists_in(&store)? && !force {
        println!("⚠️  Contracts already deployed at {:?}", data_dir);
        println!("   Use --force to redeploy (this will replace existing state)");
        return Ok(());
    }

    config.save(&data_dir.join(CONFIG_FILE))?;
    let world = World::new(&config)?;
    world.save(&mut store)?;

    println!("✅ Contracts deployed!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   👤 Contract owner: {}", config.contract_owner);
    println!("   ⏱️  Blocks per day: {}", config.mining.blocks_per_day);
    println!("   🔑 State digest: {}", world.state_digest()?);

    Ok(())
}

/// Parse a CLI argument: JSON when it parses, a plain string otherwise
///
/// Text that reads as JSON (`2024`, `true`) must be quoted (`'"2024"'`)
/// to be passed as a string.
pub fn parse_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Call a contract function and print the result as JSON
///
/// State is written back only when a successful call changed it, so
/// read-only lookups leave the stored documents and their backups alone.
pub fn cmd_call(
    state: &mut AppState,
    ctx: &CallContext,
    contract: &str,
    function: &str,
    raw_args: &[String],
) -> CliResult<Value> {
    let args: Vec<Value> = raw_args.iter().map(|a| parse_arg(a)).collect();

    log::info!(
        "{}::{} by {} at height {}",
        contract,
        function,
        ctx.sender,
        ctx.block_height
    );
    let before = state.host.world().state_digest()?;
    let result = state.host.call(ctx, contract, function, &args);

    if result.is_success() && state.host.world().state_digest()? != before {
        state.save()?;
    } else {
        log::debug!("State unchanged, nothing to save");
    }

    let output = result.to_json();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(output)
}

/// Move the stored chain height forward
pub fn cmd_advance(state: &mut AppState, blocks: Option<u64>, days: Option<u64>) -> CliResult<u64> {
    let blocks = match (blocks, days) {
        (Some(blocks), None) => blocks,
        (None, Some(days)) => days.saturating_mul(state.config.mining.blocks_per_day),
        (None, None) => 1,
        (Some(_), Some(_)) => return Err("use either --blocks or --days, not both".into()),
    };

    let height = state.host.world_mut().advance(blocks);
    state.save()?;

    println!("⏩ Advanced {} block(s), height is now {}", blocks, height);
    Ok(height)
}

/// Display contract state overview
pub fn cmd_status(state: &AppState) -> CliResult<()> {
    let world = state.host.world();

    println!("🪐 Asteroid mining contracts");
    println!("   ├─ Data directory: {:?}", state.data_dir);
    println!("   ├─ Contract owner: {}", state.config.contract_owner);
    println!("   ├─ Block height: {}", world.chain.block_height);
    println!(
        "   ├─ Token: {} ({}), supply {}, {} holder(s)",
        world.token.name(),
        world.token.symbol(),
        world.token.total_supply(),
        world.token.holders().len()
    );
    println!(
        "   ├─ Asteroids: {}, operations: {}",
        world.mining.asteroids().count(),
        world.mining.operation_count()
    );
    println!("   ├─ Resource listings: {}", world.market.listings().len());
    println!("   ├─ Space missions: {}", world.missions.count());
    println!("   ├─ Stored keys: {}", state.store.keys()?.join(", "));
    println!(
        "   ├─ Backups: {}",
        state.store.list_backups(TOKEN_CONTRACT).len()
    );
    println!("   └─ State digest: {}", world.state_digest()?);

    Ok(())
}

/// Put every stored document back to backup `index` (0 is the newest)
///
/// The replaced documents become the newest backups, so a restore can be
/// undone by restoring backup 0.
pub fn cmd_restore(state: &mut AppState, index: usize) -> CliResult<Vec<String>> {
    let mut restored = Vec::new();
    for key in CONTRACTS.iter().chain(std::iter::once(&CHAIN_KEY)) {
        if state.store.list_backups(key).contains(&index) {
            state.store.restore_backup(key, index)?;
            restored.push(key.to_string());
        }
    }
    if restored.is_empty() {
        return Err(format!("no backup {} in {:?}", index, state.data_dir).into());
    }

    let world = World::load(&state.store, &state.config)?;
    state.host = Host::from_world(world);

    println!("⏪ Restored backup {}: {}", index, restored.join(", "));
    println!("   🔑 State digest: {}", state.host.world().state_digest()?);
    Ok(restored)
}

/// List dispatchable contracts
pub fn cmd_contracts() -> CliResult<()> {
    println!("📜 Contracts:");
    for name in CONTRACTS {
        println!("   {}", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MINING_CONTRACT;
    use serde_json::json;

    const OWNER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

    #[test]
    fn test_parse_arg() {
        assert_eq!(parse_arg("1000"), json!(1000));
        assert_eq!(parse_arg("\"quoted\""), json!("quoted"));
        assert_eq!(parse_arg("Ceres"), json!("Ceres"));
        assert_eq!(parse_arg(OWNER), json!(OWNER));
        assert_eq!(parse_arg("2024"), json!(2024));
        assert_eq!(parse_arg("\"2024\""), json!("2024"));
    }

    #[test]
    fn test_init_call_and_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().to_path_buf();

        cmd_init(&data_dir, None, Some(OWNER), false).unwrap();

        let mut state = AppState::new(data_dir.clone(), None).unwrap();
        assert_eq!(state.config.contract_owner, OWNER);

        let ctx = state.context(None, Some(100));
        let args = vec!["Ceres".to_string(), "1000".to_string(), "80".to_string(), "50".to_string()];
        let output = cmd_call(&mut state, &ctx, "mining-simulation", "register-asteroid", &args).unwrap();
        assert_eq!(output, json!({"success": true, "value": 1}));

        cmd_advance(&mut state, None, Some(2)).unwrap();

        let reloaded = AppState::new(data_dir, None).unwrap();
        assert_eq!(reloaded.host.world().chain.block_height, 288);
        assert_eq!(reloaded.host.world().mining.get_asteroid(1).unwrap().name, "Ceres");
        assert_eq!(reloaded.context(None, None).sender, OWNER);
    }

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_failed_call_not_saved() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().to_path_buf();
        cmd_init(&data_dir, None, Some(OWNER), false).unwrap();

        let mut state = AppState::new(data_dir, None).unwrap();
        let stored = state.store.get_raw(TOKEN_CONTRACT).unwrap();

        let ctx = state.context(Some("ST2OUTSIDER"), None);
        let output = cmd_call(
            &mut state,
            &ctx,
            TOKEN_CONTRACT,
            "mint",
            &args(&["10", "ST2OUTSIDER"]),
        )
        .unwrap();
        assert_eq!(output, json!({"success": false, "error": 403}));

        assert_eq!(state.store.get_raw(TOKEN_CONTRACT).unwrap(), stored);
        assert!(state.store.list_backups(TOKEN_CONTRACT).is_empty());
    }

    #[test]
    fn test_lookups_keep_backups() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().to_path_buf();
        cmd_init(&data_dir, None, Some(OWNER), false).unwrap();

        let mut state = AppState::new(data_dir, None).unwrap();
        let ctx = state.context(None, None);
        cmd_call(&mut state, &ctx, TOKEN_CONTRACT, "mint", &args(&["1000", OWNER])).unwrap();

        let backups = state.store.list_backups(TOKEN_CONTRACT);
        let before_mint = state.store.read_backup(TOKEN_CONTRACT, 0).unwrap();
        assert_eq!(backups, vec![0]);

        for _ in 0..6 {
            cmd_call(&mut state, &ctx, MINING_CONTRACT, "get-asteroid", &args(&["999"])).unwrap();
            let output =
                cmd_call(&mut state, &ctx, TOKEN_CONTRACT, "get-balance", &args(&[OWNER])).unwrap();
            assert_eq!(output, json!({"success": true, "value": 1000}));
        }

        assert_eq!(state.store.list_backups(TOKEN_CONTRACT), backups);
        assert_eq!(
            state.store.read_backup(TOKEN_CONTRACT, 0).unwrap(),
            before_mint
        );
    }

    #[test]
    fn test_restore_backup() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().to_path_buf();
        cmd_init(&data_dir, None, Some(OWNER), false).unwrap();

        let mut state = AppState::new(data_dir.clone(), None).unwrap();
        let ctx = state.context(None, None);
        cmd_call(&mut state, &ctx, TOKEN_CONTRACT, "mint", &args(&["1000", OWNER])).unwrap();
        assert_eq!(state.host.world().token.get_balance(OWNER), 1000);

        let restored = cmd_restore(&mut state, 0).unwrap();
        assert!(restored.contains(&TOKEN_CONTRACT.to_string()));
        assert_eq!(state.host.world().token.get_balance(OWNER), 0);

        let reloaded = AppState::new(data_dir, None).unwrap();
        assert_eq!(reloaded.host.world().token.get_balance(OWNER), 0);

        // Restoring again undoes the restore
        cmd_restore(&mut state, 0).unwrap();
        assert_eq!(state.host.world().token.get_balance(OWNER), 1000);

        assert!(cmd_restore(&mut state, 4).is_err());
    }

    #[test]
    fn test_advance_flags() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(temp_dir.path().to_path_buf(), None).unwrap();

        assert_eq!(cmd_advance(&mut state, None, None).unwrap(), 1);
        assert_eq!(cmd_advance(&mut state, Some(9), None).unwrap(), 10);
        assert!(cmd_advance(&mut state, Some(1), Some(1)).is_err());
    }
}
