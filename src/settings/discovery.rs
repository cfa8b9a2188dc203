use std::path::{Path, PathBuf};

pub const ENV_FILE_NAME: &str = ".env";

/// Walks from `start` up to and including the file-system root and returns
/// the first `.env` that is a regular file.
pub fn find_nearest_env_file(start: &Path) -> Option<PathBuf> {
    find_nearest_with(start, |candidate| candidate.is_file())
}

pub fn find_nearest_env_file_from_cwd() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_nearest_env_file(&cwd)
}

pub fn find_nearest_with<F>(start: &Path, exists: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    start
        .ancestors()
        .map(|dir| dir.join(ENV_FILE_NAME))
        .find(|candidate| exists(candidate))
}
