use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

pub const HOME_ENV: &str = "SALES_CORE_HOME";

const DEFAULT_DIR_NAME: &str = ".sales_core";
const STORE_FILE: &str = "store.json";
const BACKUP_DIR: &str = "backups";
const EXPORT_DIR: &str = "exports";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application data directory, defaulting to `~/.sales_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Creates `path` and its parents when missing.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Writes `data` to a sibling temp file, then renames it over `path` so
/// readers never observe a partial document.
pub fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, path)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Derives every managed location from a single base directory.
pub struct PathResolver;

impl PathResolver {
    pub fn base_dir() -> PathBuf {
        app_data_dir()
    }

    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    pub fn store_file_in(base: &Path) -> PathBuf {
        base.join(STORE_FILE)
    }

    pub fn backup_dir_in(base: &Path) -> PathBuf {
        base.join(BACKUP_DIR)
    }

    pub fn export_dir_in(base: &Path) -> PathBuf {
        base.join(EXPORT_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managed_paths_hang_off_the_base() {
        let base = PathBuf::from("/tmp/shop");
        assert_eq!(PathResolver::store_file_in(&base), base.join("store.json"));
        assert_eq!(PathResolver::backup_dir_in(&base), base.join("backups"));
        assert_eq!(PathResolver::export_dir_in(&base), base.join("exports"));
        assert_eq!(
            PathResolver::resolve_base(Some(base.clone())),
            PathBuf::from("/tmp/shop")
        );
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let temp = tempfile::tempdir().expect("temp dir");
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).expect("create");
        ensure_dir(&nested).expect("second call is a no-op");
        assert!(nested.is_dir());
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let temp = tempfile::tempdir().expect("temp dir");
        let target = temp.path().join("nested").join("doc.json");
        write_atomic(&target, "{}").expect("write");
        write_atomic(&target, "[]").expect("overwrite");
        assert_eq!(fs::read_to_string(&target).unwrap(), "[]");
        assert!(!tmp_path(&target).exists());
        assert_eq!(tmp_path(&target), temp.path().join("nested").join("doc.json.tmp"));
    }
}
