//! Session

use clap::ValueEnum;

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    /// Light background
    #[default]
    Light,

    /// Dark background
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Viewer session, passed explicitly to anything that renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    authenticated: bool,
    theme: Theme,
}

impl Session {
    /// A signed-in session using the given theme.
    pub fn signed_in(theme: Theme) -> Self {
        Self {
            authenticated: true,
            theme,
        }
    }

    /// A signed-out session.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Whether the viewer is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch between light and dark.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Sign out, keeping the theme.
    pub fn sign_out(&mut self) {
        self.authenticated = false;
    }
}
