//! Clipboard operations.
//!
//! The preferred path writes through arboard on the blocking pool. When the
//! backend cannot be constructed at all (common over SSH or on headless
//! boxes), a synchronous fallback stages the text in a temp file and pipes
//! it into the platform copy command.

use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

/// How a successful copy reached the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The asynchronous clipboard backend accepted the write.
    Copied,
    /// The platform copy command accepted the write.
    CopiedViaFallback,
}

/// Recoverable copy failures. Callers log these and move on; neither kind
/// is surfaced in the UI.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("clipboard write rejected: {0}")]
    WriteRejected(String),
    #[error("fallback copy failed: {0}")]
    FallbackFailed(String),
}

/// Why a writer could not complete a write.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The backend cannot be constructed. Routes to the fallback path.
    #[error("clipboard backend unavailable: {0}")]
    Unavailable(String),
    /// The backend exists but refused the write. Aborts the copy.
    #[error("{0}")]
    Rejected(String),
}

/// Seam for the preferred asynchronous clipboard write.
#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    async fn write(&self, text: &str) -> Result<(), WriteError>;
}

/// System clipboard backed by arboard. The handle is created per write on
/// the blocking pool; arboard handles are not Send.
pub struct SystemClipboard;

#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write(&self, text: &str) -> Result<(), WriteError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| WriteError::Unavailable(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| WriteError::Rejected(e.to_string()))
        })
        .await
        .map_err(|e| WriteError::Rejected(e.to_string()))?
    }
}

/// Copy text to the system clipboard.
pub async fn copy(text: &str) -> Result<CopyOutcome, CopyError> {
    copy_with(&SystemClipboard, text).await
}

/// Copy text using the given writer, falling back to the platform copy
/// command when the writer's backend is unavailable. A rejected write does
/// NOT fall back; the backend was there and said no.
pub async fn copy_with(
    writer: &dyn ClipboardWriter,
    text: &str,
) -> Result<CopyOutcome, CopyError> {
    match writer.write(text).await {
        Ok(()) => Ok(CopyOutcome::Copied),
        Err(WriteError::Unavailable(reason)) => {
            debug!(%reason, "clipboard backend unavailable, trying fallback");
            fallback_copy(text)?;
            Ok(CopyOutcome::CopiedViaFallback)
        }
        Err(WriteError::Rejected(reason)) => Err(CopyError::WriteRejected(reason)),
    }
}

/// Synchronous fallback: stage the text in a temp file and pipe it into the
/// platform copy command. The staging file is removed on every exit path.
fn fallback_copy(text: &str) -> Result<(), CopyError> {
    let staging = StagingFile::create(text)
        .map_err(|e| CopyError::FallbackFailed(format!("staging file: {e}")))?;
    let cmd = platform_copy_command()
        .ok_or_else(|| CopyError::FallbackFailed("no copy command for this platform".into()))?;
    run_copy_command(cmd, staging.path())
}

/// Feed the staging file into `cmd` as stdin and wait for it to finish.
fn run_copy_command(mut cmd: Command, staging: &Path) -> Result<(), CopyError> {
    let input = File::open(staging)
        .map_err(|e| CopyError::FallbackFailed(format!("open staging file: {e}")))?;
    let program = cmd.get_program().to_string_lossy().to_string();
    let status = cmd
        .stdin(Stdio::from(input))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| CopyError::FallbackFailed(format!("spawn {program}: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(CopyError::FallbackFailed(format!(
            "{program} exited with {status}"
        )))
    }
}

#[cfg(target_os = "macos")]
fn platform_copy_command() -> Option<Command> {
    Some(Command::new("pbcopy"))
}

#[cfg(target_os = "windows")]
fn platform_copy_command() -> Option<Command> {
    Some(Command::new("clip"))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_copy_command() -> Option<Command> {
    if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        Some(Command::new("wl-copy"))
    } else if std::env::var_os("DISPLAY").is_some() {
        let mut cmd = Command::new("xclip");
        cmd.arg("-selection").arg("clipboard");
        Some(cmd)
    } else {
        None
    }
}

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Temp file holding the exact text for the fallback command. Removal
/// happens in Drop so success and failure paths both clean up.
struct StagingFile {
    path: PathBuf,
}

impl StagingFile {
    fn create(text: &str) -> std::io::Result<Self> {
        let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!("clipdeck-{}-{seq}.txt", std::process::id()));
        let mut file = File::create(&path)?;
        file.write_all(text.as_bytes())?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), "failed to remove staging file: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct RecordingWriter {
        written: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ClipboardWriter for RecordingWriter {
        async fn write(&self, text: &str) -> Result<(), WriteError> {
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct RejectingWriter;

    #[async_trait]
    impl ClipboardWriter for RejectingWriter {
        async fn write(&self, _text: &str) -> Result<(), WriteError> {
            Err(WriteError::Rejected("permission denied".to_string()))
        }
    }

    #[tokio::test]
    async fn copy_hands_text_to_writer_unchanged() {
        let writer = RecordingWriter {
            written: Mutex::new(Vec::new()),
        };
        // Leading/trailing whitespace must survive; no trimming anywhere.
        let outcome = copy_with(&writer, "  https://example.com/a  ").await.unwrap();
        assert_eq!(outcome, CopyOutcome::Copied);

        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0], "  https://example.com/a  ");
    }

    #[tokio::test]
    async fn rejected_write_is_an_error_not_a_fallback() {
        let err = copy_with(&RejectingWriter, "https://example.com/a")
            .await
            .unwrap_err();
        assert!(matches!(err, CopyError::WriteRejected(_)));
    }

    #[test]
    fn staging_file_holds_exact_text_and_is_removed_on_drop() {
        let staging = StagingFile::create("https://example.com/a").unwrap();
        let path = staging.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "https://example.com/a"
        );
        drop(staging);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn successful_copy_command_cleans_up_staging() {
        let staging = StagingFile::create("hello").unwrap();
        let path = staging.path().to_path_buf();
        run_copy_command(Command::new("cat"), staging.path()).unwrap();
        drop(staging);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn failed_copy_command_still_cleans_up_staging() {
        let staging = StagingFile::create("hello").unwrap();
        let path = staging.path().to_path_buf();
        let err = run_copy_command(Command::new("false"), staging.path()).unwrap_err();
        assert!(matches!(err, CopyError::FallbackFailed(_)));
        drop(staging);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn missing_command_is_a_fallback_failure() {
        let staging = StagingFile::create("hello").unwrap();
        let err = run_copy_command(Command::new("clipdeck-no-such-command"), staging.path())
            .unwrap_err();
        assert!(matches!(err, CopyError::FallbackFailed(_)));
    }
}
