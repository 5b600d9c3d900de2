//! Page composition.
//!
//! The [`App`] owns navigation and the view-model of the page currently on
//! screen. Moving to another page drops the old view-model, which cancels
//! whatever timers it had pending.

use tokio::sync::mpsc;
use tracing::debug;

use crate::auth::{AuthForms, LoginForm, SignupForm};
use crate::catalog::PageContent;
use crate::config::Config;
use crate::cough::{CoughSimulator, CoughTimings};
use crate::error::{Error, Result};
use crate::notify::{Notice, Notifier};
use crate::random::{BoxedRandom, StdRandom};
use crate::route::{Navigator, Route};
use crate::vitals::VitalsSimulator;

/// The view-model of the page on screen.
#[derive(Debug, Default)]
pub enum MountedView {
    /// A page with static content only.
    #[default]
    Static,
    /// The cough page.
    Cough(CoughSimulator),
    /// The vitals page.
    Vitals(VitalsSimulator),
}

/// The running application.
#[derive(Debug)]
pub struct App {
    config: Config,
    navigator: Navigator,
    notifier: Notifier,
    auth: AuthForms,
    view: MountedView,
    mounts: u64,
}

impl App {
    /// Start on the landing page.
    ///
    /// Returns the app and the receiver for its notices.
    #[must_use]
    pub fn new(config: Config) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (notifier, rx) = Notifier::channel();
        let auth = AuthForms::new(config.submit_delay(), notifier.clone());
        let app = Self {
            config,
            navigator: Navigator::default(),
            notifier,
            auth,
            view: MountedView::Static,
            mounts: 0,
        };
        (app, rx)
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current page.
    #[must_use]
    pub fn route(&self) -> Route {
        self.navigator.current()
    }

    /// Pages visited so far.
    #[must_use]
    pub fn history(&self) -> &[Route] {
        self.navigator.history()
    }

    /// Static content of the current page.
    #[must_use]
    pub fn content(&self) -> PageContent {
        PageContent::for_route(self.route())
    }

    /// The mounted view-model.
    #[must_use]
    pub fn view(&self) -> &MountedView {
        &self.view
    }

    /// The cough simulator, if the cough page is on screen.
    pub fn cough(&mut self) -> Option<&mut CoughSimulator> {
        match &mut self.view {
            MountedView::Cough(sim) => Some(sim),
            _ => None,
        }
    }

    /// The vitals simulator, if the vitals page is on screen.
    pub fn vitals(&mut self) -> Option<&mut VitalsSimulator> {
        match &mut self.view {
            MountedView::Vitals(sim) => Some(sim),
            _ => None,
        }
    }

    /// Follow a link from the current page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLink`] if the current page does not link to `to`.
    pub fn follow(&mut self, to: Route) -> Result<()> {
        self.navigator.follow(to)?;
        self.mount(to);
        Ok(())
    }

    /// Open a page directly.
    pub fn open(&mut self, to: Route) {
        self.navigator.open(to);
        self.mount(to);
    }

    /// Submit the login form and move to the page it leads to.
    ///
    /// # Errors
    ///
    /// Fails if the auth page is not on screen or a field is empty.
    pub async fn login(&mut self, form: &LoginForm) -> Result<()> {
        self.require_page("login", Route::Auth)?;
        let next = self.auth.login(form).await?;
        self.follow(next)
    }

    /// Submit the signup form and move to the page it leads to.
    ///
    /// # Errors
    ///
    /// Fails if the auth page is not on screen or a field is empty.
    pub async fn signup(&mut self, form: &SignupForm) -> Result<()> {
        self.require_page("signup", Route::Auth)?;
        let next = self.auth.signup(form).await?;
        self.follow(next)
    }

    /// Click the forgot-password link.
    ///
    /// # Errors
    ///
    /// Fails if the auth page is not on screen.
    pub fn forgot_password(&self) -> Result<()> {
        self.require_page("forgot password", Route::Auth)?;
        self.auth.forgot_password();
        Ok(())
    }

    fn require_page(&self, action: &'static str, expected: Route) -> Result<()> {
        let current = self.route();
        if current != expected {
            return Err(Error::WrongPage {
                action,
                expected,
                current,
            });
        }
        Ok(())
    }

    /// Replace the mounted view-model with a fresh one for `route`.
    fn mount(&mut self, route: Route) {
        // Tear down first so the old timers are gone before new ones start
        self.view = MountedView::Static;

        self.view = match route {
            Route::CoughAnalysis => MountedView::Cough(CoughSimulator::new(
                CoughTimings::from_config(&self.config),
                self.next_rng(),
                self.notifier.clone(),
            )),
            Route::Vitals => MountedView::Vitals(VitalsSimulator::new(
                self.config.sample_interval(),
                self.next_rng(),
            )),
            _ => MountedView::Static,
        };
        debug!(%route, "page mounted");
    }

    /// A random source for the next view. With a fixed seed every mount gets
    /// a distinct but reproducible stream.
    fn next_rng(&mut self) -> BoxedRandom {
        self.mounts += 1;
        let seed = self.config.random.seed.map(|s| s.wrapping_add(self.mounts));
        Box::new(StdRandom::from_seed_option(seed))
    }
}
