use std::path::{Path, PathBuf};

pub const TIDY_DIR_NAME: &str = ".tidy";
pub const STORE_FILE_NAME: &str = "index.json";

#[must_use]
pub fn default_store_path_rel() -> PathBuf {
    PathBuf::from(TIDY_DIR_NAME).join(STORE_FILE_NAME)
}

#[must_use]
pub fn store_path_for_root(root: &Path) -> PathBuf {
    root.join(default_store_path_rel())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_lives_under_tidy_dir() {
        let path = store_path_for_root(Path::new("/photos"));
        assert_eq!(path, PathBuf::from("/photos/.tidy/index.json"));
    }
}
