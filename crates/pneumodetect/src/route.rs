//! Named routes and the links between pages.
//!
//! Pages are reached by following links from the current page. Opening a
//! route directly (the address bar) is also possible via
//! [`Navigator::open`], but carries no parameters.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// A page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    /// Landing page.
    #[default]
    Home,
    /// Login and signup forms.
    Auth,
    /// Patient dashboard.
    Dashboard,
    /// Cough recording simulator.
    CoughAnalysis,
    /// Vitals stream simulator.
    Vitals,
    /// Report history.
    Reports,
    /// Admin panel.
    Admin,
}

impl Route {
    /// Every route.
    pub const ALL: [Route; 7] = [
        Self::Home,
        Self::Auth,
        Self::Dashboard,
        Self::CoughAnalysis,
        Self::Vitals,
        Self::Reports,
        Self::Admin,
    ];

    /// The URL path of the route.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Auth => "/auth",
            Self::Dashboard => "/dashboard",
            Self::CoughAnalysis => "/cough-analysis",
            Self::Vitals => "/vitals",
            Self::Reports => "/reports",
            Self::Admin => "/admin",
        }
    }

    /// The short name of the route.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Auth => "auth",
            Self::Dashboard => "dashboard",
            Self::CoughAnalysis => "cough-analysis",
            Self::Vitals => "vitals",
            Self::Reports => "reports",
            Self::Admin => "admin",
        }
    }

    /// The page title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "PneumoDetect",
            Self::Auth => "Login / Sign Up",
            Self::Dashboard => "Dashboard",
            Self::CoughAnalysis => "Cough Sound Analysis",
            Self::Vitals => "Real-Time Vitals Monitor",
            Self::Reports => "Test Reports & History",
            Self::Admin => "Admin Dashboard",
        }
    }

    /// Routes this page links to.
    #[must_use]
    pub fn links(&self) -> &'static [Route] {
        match self {
            Self::Home => &[Self::Dashboard, Self::Auth, Self::CoughAnalysis, Self::Vitals],
            Self::Auth => &[Self::Dashboard, Self::Home],
            Self::Dashboard => &[Self::CoughAnalysis, Self::Vitals, Self::Reports, Self::Home],
            Self::CoughAnalysis => &[Self::Dashboard, Self::Vitals, Self::Reports],
            Self::Vitals => &[Self::Dashboard, Self::Reports, Self::CoughAnalysis],
            Self::Reports => &[Self::Dashboard, Self::CoughAnalysis],
            Self::Admin => &[Self::Dashboard],
        }
    }

    /// Check whether this page links to `to`.
    #[must_use]
    pub fn links_to(&self, to: Route) -> bool {
        self.links().contains(&to)
    }

    /// Resolve a URL path. Trailing slashes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRoute`] if no route has this path.
    pub fn from_path(path: &str) -> Result<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL
            .into_iter()
            .find(|r| r.path() == normalized)
            .ok_or_else(|| Error::UnknownRoute {
                path: path.to_string(),
            })
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Route {
    type Err = Error;

    /// Accepts either a path (`/vitals`) or a name (`vitals`).
    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with('/') {
            return Self::from_path(s);
        }
        Self::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| Error::UnknownRoute {
                path: s.to_string(),
            })
    }
}

/// Tracks the current page and where the user has been.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    history: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

impl Navigator {
    /// Start at `route`.
    #[must_use]
    pub fn new(route: Route) -> Self {
        Self {
            current: route,
            history: vec![route],
        }
    }

    /// The current page.
    #[must_use]
    pub fn current(&self) -> Route {
        self.current
    }

    /// Every page visited, oldest first, including the current one.
    #[must_use]
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Follow a link from the current page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLink`] if the current page has no link to `to`.
    pub fn follow(&mut self, to: Route) -> Result<Route> {
        if !self.current.links_to(to) {
            warn!(from = %self.current, %to, "no such link");
            return Err(Error::NoLink {
                from: self.current,
                to,
            });
        }
        self.go(to);
        Ok(to)
    }

    /// Open a route directly, without following a link.
    pub fn open(&mut self, to: Route) -> Route {
        self.go(to);
        to
    }

    fn go(&mut self, to: Route) {
        debug!(from = %self.current, %to, "navigate");
        self.current = to;
        self.history.push(to);
    }
}
