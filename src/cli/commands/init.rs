use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::SlotLayoutStore;
use crate::core::build_station_pool;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the data directory and its `log/` folder
///  - the station slot layout
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing rLounge…");

    let cfg = Config::init_all(cli.data_dir.clone(), cli.test)?;

    // Loading synthesizes the default mapping when no layout is saved yet.
    let ids: Vec<u32> = build_station_pool(&cfg).iter().map(|s| s.id).collect();
    let layout = SlotLayoutStore::load(cfg.layout_file(), &cfg.layout_order, &ids);
    println!(
        "✅ Layout:      {:?} ({} slots)",
        cfg.layout_file(),
        layout.slot_count()
    );

    println!("🎉 rLounge initialization completed!");
    Ok(())
}
