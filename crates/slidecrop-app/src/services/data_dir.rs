// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Data directory resolution. Only `config.json` lives here.

use std::path::PathBuf;

const APP_DIR: &str = "slidecrop";

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> PathBuf {
    let base = base_dir(
        std::env::var("XDG_DATA_HOME").ok(),
        std::env::var("HOME").ok(),
    );
    let dir = base.join(APP_DIR);
    if let Err(err) = std::fs::create_dir_all(&dir) {
        tracing::warn!(path = %dir.display(), %err, "could not create data directory");
    }
    dir
}

/// XDG data home, then `~/.local/share`, then the system temp directory.
fn base_dir(xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    match (xdg_data_home, home) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) if !home.is_empty() => PathBuf::from(home).join(".local").join("share"),
        _ => std::env::temp_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let dir = base_dir(Some("/data".into()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/data"));
    }

    #[test]
    fn empty_xdg_falls_back_to_home() {
        let dir = base_dir(Some(String::new()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/home/u/.local/share"));
    }

    #[test]
    fn nothing_set_uses_temp() {
        assert_eq!(base_dir(None, None), std::env::temp_dir());
    }
}
