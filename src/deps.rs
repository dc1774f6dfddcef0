use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::MissingDependencies;

pub const FFMPEG: &str = "ffmpeg";
pub const YT_DLP: &str = "yt-dlp";

/// Resolved locations of the external programs the app drives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub ffmpeg: PathBuf,
    pub yt_dlp: PathBuf,
}

/// Looks for ffmpeg and yt-dlp on the process PATH.
pub fn check() -> Result<Toolchain, MissingDependencies> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    check_in(std::env::var_os("PATH"), cwd)
}

pub fn check_in<P: AsRef<OsStr>>(
    search_path: Option<P>,
    cwd: impl AsRef<Path>,
) -> Result<Toolchain, MissingDependencies> {
    let lookup = |name: &'static str| {
        let found = which::which_in(name, search_path.as_ref(), cwd.as_ref()).ok();
        debug!(tool = name, path = ?found, "dependency lookup");
        found
    };
    let ffmpeg = lookup(FFMPEG);
    let yt_dlp = lookup(YT_DLP);

    match (ffmpeg, yt_dlp) {
        (Some(ffmpeg), Some(yt_dlp)) => {
            info!(ffmpeg = %ffmpeg.display(), yt_dlp = %yt_dlp.display(), "dependencies found");
            Ok(Toolchain { ffmpeg, yt_dlp })
        }
        (ffmpeg, yt_dlp) => {
            let mut missing = Vec::new();
            if ffmpeg.is_none() {
                missing.push(FFMPEG);
            }
            if yt_dlp.is_none() {
                missing.push(YT_DLP);
            }
            Err(MissingDependencies { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[cfg(unix)]
    fn fake_tool(dir: &Path, name: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn empty_search_path_reports_both_tools() {
        let dir = tempdir().unwrap();
        let err = check_in(Some(dir.path()), dir.path()).unwrap_err();
        assert_eq!(err.missing, vec![FFMPEG, YT_DLP]);
    }

    #[cfg(unix)]
    #[test]
    fn finds_tools_on_search_path() {
        let dir = tempdir().unwrap();
        fake_tool(dir.path(), FFMPEG);
        fake_tool(dir.path(), YT_DLP);

        let tools = check_in(Some(dir.path()), dir.path()).unwrap();
        assert_eq!(tools.ffmpeg, dir.path().join(FFMPEG));
        assert_eq!(tools.yt_dlp, dir.path().join(YT_DLP));
    }

    #[cfg(unix)]
    #[test]
    fn reports_only_the_missing_tool() {
        let dir = tempdir().unwrap();
        fake_tool(dir.path(), YT_DLP);

        let err = check_in(Some(dir.path()), dir.path()).unwrap_err();
        assert_eq!(err.missing, vec![FFMPEG]);
    }
}
