use std::env;
use std::fs;
use std::time::Duration;

use listserial::config::{AppConfig, CONFIG_FILE};
use serial_test::serial;
use tempfile::TempDir;

// Tests here change the working directory, so they must not run in parallel
struct CwdGuard(std::path::PathBuf);

impl CwdGuard {
    fn enter(dir: &std::path::Path) -> Self {
        let previous = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        Self(previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.0);
    }
}

#[test]
#[serial]
fn discover_without_file() {
    let temp = TempDir::new().unwrap();
    let _cwd = CwdGuard::enter(temp.path());

    assert!(AppConfig::discover().is_none());
}

#[test]
#[serial]
fn discover_reads_local_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(CONFIG_FILE),
        "[list]\ntimeout = \"200ms\"\nverify = false\n",
    )
    .unwrap();
    let _cwd = CwdGuard::enter(temp.path());

    let list = AppConfig::discover().unwrap().list.unwrap();
    assert_eq!(list.timeout, Some(Duration::from_millis(200)));
    assert_eq!(list.verify, Some(false));
}

#[test]
#[serial]
fn discover_ignores_broken_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CONFIG_FILE), "[list\nverify = ").unwrap();
    let _cwd = CwdGuard::enter(temp.path());

    assert!(AppConfig::discover().is_none());
}

#[test]
#[serial]
fn genconfig_in_current_directory() {
    let temp = TempDir::new().unwrap();
    let _cwd = CwdGuard::enter(temp.path());

    AppConfig::generate_config_file(CONFIG_FILE, false).unwrap();
    assert!(AppConfig::generate_config_file(CONFIG_FILE, false).is_err());

    let list = AppConfig::discover().unwrap().list.unwrap();
    assert_eq!(list.timeout, Some(Duration::from_secs(1)));
    assert_eq!(list.verify, Some(true));
}
