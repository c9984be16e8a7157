use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *edit_config {
            let fallback = default_editor();
            let chosen = editor.clone().unwrap_or_else(|| fallback.clone());

            if open_in(&chosen, &path) {
                success(format!("Configuration file edited with '{}'", chosen));
            } else if chosen != fallback {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    chosen, fallback
                ));
                if open_in(&fallback, &path) {
                    success(format!("Configuration file edited with '{}'", fallback));
                } else {
                    error(format!("Could not open the configuration with '{}'", fallback));
                }
            } else {
                error(format!("Could not open the configuration with '{}'", chosen));
            }
        }
    }

    Ok(())
}

/// $EDITOR, then $VISUAL, then the platform default.
fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn open_in(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .is_ok_and(|s| s.success())
}
