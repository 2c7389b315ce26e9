//! Content directory resolution

use std::path::PathBuf;

/// Environment variable naming the content directory.
pub const DATA_DIR_VAR: &str = "TACTICS_DATA_DIR";

/// Resolves the content directory.
///
/// Order: explicit `--data-dir`, then `$TACTICS_DATA_DIR`, then the content
/// bundled with `tactics-content` in this workspace.
pub fn data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(DATA_DIR_VAR).map(PathBuf::from))
        .unwrap_or_else(bundled_data_dir)
}

/// `crates/game/content/data`, relative to this crate's manifest.
pub fn bundled_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("game")
        .join("content")
        .join("data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        assert_eq!(
            data_dir(Some(PathBuf::from("/srv/puzzles"))),
            PathBuf::from("/srv/puzzles")
        );
    }

    #[test]
    fn bundled_dir_points_at_content_data() {
        assert!(bundled_data_dir().ends_with("game/content/data"));
    }
}
