use std::io;

use thiserror::Error;

/// Input problems caught before a download starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no link entered")]
    NoLink,
    #[error("no download folder selected")]
    NoFolder,
}

/// Failure of a single yt-dlp run
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to launch yt-dlp: {0}")]
    Spawn(#[source] io::Error),
    #[error("lost contact with yt-dlp: {0}")]
    Io(#[from] io::Error),
    /// yt-dlp ran and exited unsuccessfully; `message` is its error output
    #[error("{message}")]
    Exited { message: String },
}

/// External tools that could not be found on PATH
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_missing(.missing))]
pub struct MissingDependencies {
    pub missing: Vec<&'static str>,
}

fn render_missing(missing: &[&'static str]) -> String {
    let list = missing
        .iter()
        .map(|dep| format!("- {dep}"))
        .collect::<Vec<_>>()
        .join("\n");
    let names = missing.join(" ");
    format!(
        "Missing dependencies:\n\n{list}\n\nPlease install:\n\
         Ubuntu/Debian: sudo apt install {names}\n\
         Fedora/RHEL: sudo dnf install {names}"
    )
}

/// Anything that stops the application from reaching its main window
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Dependencies(#[from] MissingDependencies),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("window failed: {0}")]
    Gui(#[from] eframe::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dependencies_lists_tools_and_install_hints() {
        let err = MissingDependencies {
            missing: vec!["ffmpeg", "yt-dlp"],
        };
        let text = err.to_string();

        assert!(text.starts_with("Missing dependencies:"));
        assert!(text.contains("- ffmpeg\n- yt-dlp"));
        assert!(text.contains("sudo apt install ffmpeg yt-dlp"));
        assert!(text.contains("sudo dnf install ffmpeg yt-dlp"));
    }

    #[test]
    fn exited_error_displays_tool_message_verbatim() {
        let err = FetchError::Exited {
            message: "ERROR: Video unavailable\nmore".to_string(),
        };
        assert_eq!(err.to_string(), "ERROR: Video unavailable\nmore");
    }
}
