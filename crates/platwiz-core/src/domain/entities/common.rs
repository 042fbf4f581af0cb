use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Separator convention of a host-supplied path string.
///
/// Host paths arrive as plain strings (the host may be running on another
/// OS than the one whose conventions the string follows), so parent and
/// append operations are done textually against the detected style rather
/// than through `std::path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathStyle {
    Windows,
    Posix,
}

impl PathStyle {
    /// Style of the platform this binary runs on.
    pub const fn native() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Detect the style of `path`: backslashes or a drive prefix mean
    /// Windows, anything else falls back to [`PathStyle::native`].
    pub fn detect(path: &str) -> Self {
        let bytes = path.as_bytes();
        let has_drive = bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic();
        if path.contains('\\') || has_drive {
            Self::Windows
        } else if path.contains('/') {
            Self::Posix
        } else {
            Self::native()
        }
    }

    pub const fn separator(self) -> char {
        match self {
            Self::Windows => '\\',
            Self::Posix => '/',
        }
    }

    fn is_separator(self, c: char) -> bool {
        match self {
            Self::Windows => c == '\\' || c == '/',
            Self::Posix => c == '/',
        }
    }
}

/// A directory path as the host wrote it.
///
/// Directory values are kept with a trailing separator, matching what the
/// host supplies and what the template engine concatenates against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPath {
    raw: String,
    style: PathStyle,
}

impl HostPath {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let style = PathStyle::detect(&raw);
        Self { raw, style }
    }

    pub fn with_style(raw: impl Into<String>, style: PathStyle) -> Self {
        Self {
            raw: raw.into(),
            style,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    /// Parent directory, with a trailing separator.
    ///
    /// Roots (`/`, `C:\`) and bare names have no parent.
    pub fn parent(&self) -> Result<HostPath, DomainError> {
        let no_parent = || DomainError::NoParentDirectory {
            path: self.raw.clone(),
        };

        let trimmed = self.raw.trim_end_matches(|c| self.style.is_separator(c));
        if trimmed.is_empty() {
            return Err(no_parent());
        }

        let idx = trimmed
            .rfind(|c| self.style.is_separator(c))
            .ok_or_else(no_parent)?;
        Ok(Self::with_style(&trimmed[..=idx], self.style))
    }

    /// Append a directory segment followed by a separator.
    ///
    /// The raw value is extended as-is, so a directory already ending in a
    /// separator composes into `dir\segment\`.
    pub fn join_dir(&self, segment: &str) -> HostPath {
        let mut raw = self.raw.clone();
        if !raw.is_empty() && !raw.ends_with(|c| self.style.is_separator(c)) {
            raw.push(self.style.separator());
        }
        raw.push_str(segment);
        raw.push(self.style.separator());
        Self::with_style(raw, self.style)
    }

    /// The same directory guaranteed to end with a separator.
    pub fn with_trailing_separator(&self) -> HostPath {
        if self.raw.ends_with(|c| self.style.is_separator(c)) {
            self.clone()
        } else {
            let mut raw = self.raw.clone();
            raw.push(self.style.separator());
            Self::with_style(raw, self.style)
        }
    }
}

impl fmt::Display for HostPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
