//! Host platform detection for choosing link strategies.

use serde::Serialize;

/// Platform family, as far as link creation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Unix-like hosts, where symbolic links need no special privilege.
    Unix,
    /// Windows, where symbolic links need developer mode or elevation.
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Whether unprivileged users can create symbolic links.
    #[must_use]
    pub const fn has_unprivileged_symlinks(self) -> bool {
        matches!(self, Self::Unix)
    }
}
