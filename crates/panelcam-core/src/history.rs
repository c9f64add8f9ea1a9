//! History integration: every cursor change is recorded as a `frame/<index>`
//! fragment, and the starting frame is read back from the current fragment.

use std::path::PathBuf;

use tracing::warn;

use crate::{Error, Result};

const FRAME_MARKER: &str = "frame";
const FRAME_PREFIX: &str = "frame/";

/// Navigation history the engine reports cursor changes to
pub trait HistoryRouter: Send {
    /// Record a new location
    fn navigate(&mut self, fragment: &str);

    /// The current location, if any
    fn fragment(&self) -> Option<String>;
}

/// Fragment naming a frame index
pub fn frame_fragment(index: usize) -> String {
    format!("{}{}", FRAME_PREFIX, index)
}

/// Parse the numeric frame token out of a fragment.
///
/// Fragments without `"frame"` carry no token and yield `Ok(None)`. The first
/// `"frame/"` is removed and the remainder is read like a float prefix
/// (`"3abc"` reads as 3). Tokens that are not finite numbers are malformed.
pub fn parse_frame_token(fragment: &str) -> Result<Option<f64>> {
    if !fragment.contains(FRAME_MARKER) {
        return Ok(None);
    }

    let token = fragment.replacen(FRAME_PREFIX, "", 1);
    match parse_float_prefix(&token) {
        Some(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(Error::MalformedFrameToken(token)),
    }
}

/// Starting frame for a fragment, before range checking.
///
/// Missing or malformed tokens fall back to frame 0. Negative values are
/// returned as errors since no frame can satisfy them; fractional values
/// are truncated.
pub fn initial_frame(fragment: Option<&str>) -> Result<usize> {
    let Some(fragment) = fragment else {
        return Ok(0);
    };

    match parse_frame_token(fragment) {
        Ok(Some(value)) if value < 0.0 => Err(Error::InvalidPath(format!(
            "start frame {} is negative",
            value
        ))),
        Ok(Some(value)) => Ok(value.trunc() as usize),
        Ok(None) => Ok(0),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable start frame, starting at 0");
            Ok(0)
        }
    }
}

/// Longest leading run of `text` that parses as a float
fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let candidate_len = text
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    (1..=candidate_len)
        .rev()
        .find_map(|len| text[..len].parse::<f64>().ok())
}

/// History kept in memory for the life of the session
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    current: Option<String>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that starts at an existing fragment
    pub fn starting_at(fragment: impl Into<String>) -> Self {
        Self {
            current: Some(fragment.into()),
        }
    }
}

impl HistoryRouter for MemoryHistory {
    fn navigate(&mut self, fragment: &str) {
        self.current = Some(fragment.to_string());
    }

    fn fragment(&self) -> Option<String> {
        self.current.clone()
    }
}

/// History that persists the latest fragment to a file so a reader resumes
/// where they left off
#[derive(Debug, Clone)]
pub struct FileHistory {
    path: PathBuf,
    current: Option<String>,
}

impl FileHistory {
    /// Open the history file; a missing file means no history yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let current = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let trimmed = content.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, current })
    }

    fn persist(&self, fragment: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, fragment)
    }
}

impl HistoryRouter for FileHistory {
    fn navigate(&mut self, fragment: &str) {
        if let Err(e) = self.persist(fragment) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist history");
        }
        self.current = Some(fragment.to_string());
    }

    fn fragment(&self) -> Option<String> {
        self.current.clone()
    }
}
