use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture command failed: {0}")]
    Failed(String),
    #[error("capture produced no image data")]
    Empty,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Photo-capture side-channel for the creation form. A capture either
/// yields raw image bytes or fails; there is no retry -- the user simply
/// invokes it again.
pub trait PhotoCapture: Send {
    fn capture(&mut self) -> Result<Vec<u8>, CaptureError>;
}

/// Captures a frame by running an external command and reading the image
/// bytes from its stdout (e.g. `fswebcam --save - -q`).
pub struct CommandCapture {
    program: String,
    args: Vec<String>,
}

impl CommandCapture {
    /// Parse a whitespace-separated command line. Returns `None` for an
    /// empty command.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl PhotoCapture for CommandCapture {
    fn capture(&mut self) -> Result<Vec<u8>, CaptureError> {
        let output = Command::new(&self.program).args(&self.args).output()?;

        if !output.status.success() {
            return Err(CaptureError::Failed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        if output.stdout.is_empty() {
            return Err(CaptureError::Empty);
        }
        Ok(output.stdout)
    }
}

/// Encode captured bytes as a self-contained data URI, the form the catalog
/// stores in `url_fotografia`.
pub fn data_uri(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_embeds_the_bytes_as_base64() {
        let uri = data_uri(b"imagen");
        let encoded = uri.strip_prefix("data:image/jpeg;base64,").unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), b"imagen");
    }

    #[test]
    fn command_capture_reads_stdout() {
        let mut capture = CommandCapture::from_command_line("printf imagen").unwrap();
        assert_eq!(capture.capture().unwrap(), b"imagen");
    }

    #[test]
    fn failing_command_is_an_error() {
        let mut capture = CommandCapture::from_command_line("false").unwrap();
        assert!(capture.capture().is_err());
    }

    #[test]
    fn empty_command_line_is_rejected() {
        assert!(CommandCapture::from_command_line("   ").is_none());
    }
}
