#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, TimeZone};
use rlounge::config::Config;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub fn rlo() -> Command {
    cargo_bin_cmd!("rlounge")
}

/// Create an empty, unique working folder inside the system temp dir
pub fn setup_test_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rlounge_{}_{}", name, std::process::id()));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test dir");
    path
}

/// `rlounge` bound to a private HOME (config) and data folder under `root`
pub fn rlo_in(root: &Path) -> Command {
    let mut cmd = rlo();
    cmd.env("HOME", root)
        .env("APPDATA", root)
        .arg("--data-dir")
        .arg(root.join("data"));
    cmd
}

/// Default configuration with its data folder under `root`
pub fn test_config(root: &Path) -> Config {
    Config {
        data_dir: root.join("data").to_string_lossy().to_string(),
        ..Config::default()
    }
}

/// Fixed local timestamp
pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("unambiguous local time")
}

/// Write a whole text file, creating its folder
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
}
