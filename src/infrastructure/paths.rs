//! Sandbox paths.

use std::path::PathBuf;

/// Directory name under Zellij's data directory.
pub const APP_DIR_NAME: &str = "candidate-browser";

/// Returns the directory holding the trace file.
///
/// `/host` is the working directory of the last focused terminal, or the
/// folder Zellij started in, which usually makes this
/// `~/.local/share/zellij/candidate-browser` on the host.
///
/// ```
/// use candidate_browser::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/candidate-browser")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join(APP_DIR_NAME)
}
