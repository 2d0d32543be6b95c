//! Page navigation guard

use crate::messages;
use serde::{Deserialize, Serialize};

/// Pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Page {
    /// Sign-in / sign-up tabs
    Login,
    /// Dog registration for the signed-in owner
    DogInfo,
    /// Standalone score entry grid
    Scores,
}

/// Where a request for a page actually lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Page to render
    pub page: Page,
    /// Warning shown after a redirect
    pub notice: Option<&'static str>,
}

impl Page {
    /// Redirect signed-out users away from `DogInfo` and signed-in users away
    /// from `Login`. `Scores` is open to everyone.
    #[must_use]
    pub const fn guard(self, authenticated: bool) -> Route {
        match (self, authenticated) {
            (Self::DogInfo, false) => Route {
                page: Self::Login,
                notice: Some(messages::LOGIN_REQUIRED),
            },
            (Self::Login, true) => Route {
                page: Self::DogInfo,
                notice: None,
            },
            (page, _) => Route { page, notice: None },
        }
    }
}
