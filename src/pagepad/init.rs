use crate::api::PagesApi;
use crate::config::PagesConfig;
use crate::error::{PageError, Result};
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use log::debug;
use std::path::PathBuf;

pub struct PagesContext {
    pub api: PagesApi<FsBackend>,
    pub config: PagesConfig,
    pub data_dir: PathBuf,
}

/// The platform data directory, e.g. `~/.local/share/pagepad` on Linux.
pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "pagepad", "pagepad")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| PageError::Store("Could not determine a data directory".to_string()))
}

/// Wire config, backend, and API for `data_dir` (or the platform default).
pub fn initialize(data_dir: Option<PathBuf>) -> Result<PagesContext> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    debug!("using data directory {}", data_dir.display());

    let config = PagesConfig::load(&data_dir)?;
    let backend = FsBackend::new(data_dir.clone()).with_file_ext(&config.file_ext());
    let api = PagesApi::open(backend)?;

    Ok(PagesContext {
        api,
        config,
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn initialize_seeds_a_fresh_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("data");

        let ctx = initialize(Some(dir.clone())).unwrap();

        assert_eq!(ctx.data_dir, dir);
        assert!(dir.join("pages.json").exists());
        assert_eq!(fs::read_to_string(dir.join("page-1.txt")).unwrap(), "");
    }

    #[test]
    fn initialize_honors_configured_extension() {
        let temp = TempDir::new().unwrap();
        let mut config = PagesConfig::default();
        config.set_file_ext("md");
        config.save(temp.path()).unwrap();

        let ctx = initialize(Some(temp.path().to_path_buf())).unwrap();

        assert_eq!(ctx.config.file_ext(), ".md");
        assert!(temp.path().join("page-1.md").exists());
    }
}
