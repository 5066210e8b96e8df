//! Path utilities for the Zellij sandbox environment.

use std::path::PathBuf;

/// Returns the data directory for Userdeck trace output.
///
/// The directory is located at `/host/.local/share/zellij/userdeck` in the
/// Zellij sandbox. `/host` points at the cwd of the last focused terminal,
/// or the folder Zellij was started from, which typically resolves to the
/// user's home directory so the effective path is
/// `~/.local/share/zellij/userdeck`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("userdeck")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_lives_under_the_sandbox_mount() {
        assert!(get_data_dir().starts_with("/host"));
        assert!(get_data_dir().ends_with("userdeck"));
    }
}
