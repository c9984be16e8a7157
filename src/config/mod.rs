use crate::errors::{AppError, AppResult};
use crate::utils::path::{expand_tilde, resolve_in};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// A shared station declared in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryStation {
    pub id: u32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_dir: String,
    #[serde(default = "default_member_file")]
    pub member_file: String,
    #[serde(default = "default_primary_stations")]
    pub primary_stations: u32,
    #[serde(default = "default_auxiliary_stations")]
    pub auxiliary_stations: Vec<AuxiliaryStation>,
    #[serde(default = "default_layout_order")]
    pub layout_order: Vec<u32>,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f32,
}

fn default_member_file() -> String {
    "membership.csv".to_string()
}
fn default_primary_stations() -> u32 {
    16
}
fn default_auxiliary_stations() -> Vec<AuxiliaryStation> {
    vec![
        AuxiliaryStation {
            id: 17,
            label: "Xbox".to_string(),
        },
        AuxiliaryStation {
            id: 18,
            label: "PS4".to_string(),
        },
    ]
}
fn default_layout_order() -> Vec<u32> {
    vec![16, 15, 14, 11, 12, 13, 10, 9, 8, 7, 6, 5, 1, 2, 3, 4, 17, 18]
}
fn default_canvas_width() -> f32 {
    1080.0
}
fn default_canvas_height() -> f32 {
    720.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir().to_string_lossy().to_string(),
            member_file: default_member_file(),
            primary_stations: default_primary_stations(),
            auxiliary_stations: default_auxiliary_stations(),
            layout_order: default_layout_order(),
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rlounge")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rlounge")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rlounge.conf")
    }

    pub fn default_data_dir() -> PathBuf {
        Self::config_dir().join("data")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject station pools that would break id uniqueness.
    pub fn validate(&self) -> AppResult<()> {
        let mut seen: Vec<u32> = (1..=self.primary_stations).collect();
        for aux in &self.auxiliary_stations {
            if aux.id == 0 || seen.contains(&aux.id) {
                return Err(AppError::Config(format!(
                    "auxiliary station id {} collides with another station",
                    aux.id
                )));
            }
            seen.push(aux.id);
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(AppError::Config("canvas size must be positive".into()));
        }
        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    /// Active occupant list (whole-file rewrite on every mutation).
    pub fn ledger_file(&self) -> PathBuf {
        self.data_path().join("active_users.json")
    }

    /// Station → slot mapping.
    pub fn layout_file(&self) -> PathBuf {
        self.data_path().join("device_layout.json")
    }

    /// Folder holding one `lounge-YYYY-MM-DD.json` bucket per day.
    pub fn log_dir(&self) -> PathBuf {
        self.data_path().join("log")
    }

    pub fn member_path(&self) -> PathBuf {
        resolve_in(&self.data_path(), &self.member_file)
    }

    /// Initialize configuration file and data folders.
    ///
    /// In test mode the config file is left untouched.
    pub fn init_all(data_dir: Option<String>, is_test: bool) -> AppResult<Self> {
        let mut config = Self::load().unwrap_or_default();
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }

        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            let yaml = serde_yaml::to_string(&config)?;
            fs::write(Self::config_file(), yaml)?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        fs::create_dir_all(config.data_path())?;
        fs::create_dir_all(config.log_dir())?;
        println!("✅ Data dir:    {:?}", config.data_path());

        Ok(config)
    }
}
