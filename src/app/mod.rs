//! Action dispatch
//!
//! Every user interaction is one [`Action`] handled against one session and
//! answered with a [`View`]. Errors never escape a handler: they are rendered
//! as an inline message on the page the action came from.
//!
//! # Example
//!
//! ```rust,no_run
//! use agility_compe::app::{Action, App, Page};
//! use agility_compe::auth::MemoryAuthService;
//! use agility_compe::config::Config;
//! use agility_compe::registry::MemoryRecordStore;
//! use agility_compe::session::SessionId;
//!
//! # async fn example() {
//! let app = App::new(Config::default(), MemoryAuthService::new(), MemoryRecordStore::new());
//! let session = SessionId::new("browser-1");
//!
//! let view = app.handle(&session, Action::Visit(Page::DogInfo)).await;
//! assert_eq!(view.page(), Page::Login);
//! # }
//! ```

mod route;
mod view;

pub use route::{Page, Route};
pub use view::{DogInfoView, LoginView, ScoreView, View};

use crate::auth::{AuthService, User};
use crate::config::Config;
use crate::error::ValidationError;
use crate::messages;
use crate::registry::{DogClass, DogFields, DogRecord, Event, RecordStore};
use crate::score::{snapshot, ScoreTable, COLUMNS};
use crate::session::{SessionId, SessionStore};
use crate::{Error, Result};
use tracing::{info, warn};

/// Input of the add-dog form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDog {
    /// Dog name
    pub dog_name: String,
    /// Breed
    pub breed: String,
    /// Height class
    pub dog_class: DogClass,
    /// Selected events
    pub events: Vec<Event>,
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Open a page
    Visit(Page),
    /// Submit the sign-in form
    SignIn {
        /// Email
        email: String,
        /// Password
        password: String,
    },
    /// Submit the sign-up form
    SignUp {
        /// Display name
        name: String,
        /// Email
        email: String,
        /// Password
        password: String,
    },
    /// Press the sign-out button
    SignOut,
    /// Submit the add-dog form
    AddDog(NewDog),
    /// Save changes to a registered dog
    UpdateDog {
        /// Record id
        id: String,
        /// New breed, class and events
        fields: DogFields,
    },
    /// Delete a registered dog
    DeleteDog {
        /// Record id
        id: String,
        /// Confirmation checkbox state
        confirmed: bool,
    },
    /// Open the score grid
    ShowScores,
    /// Press "計算" with the edited grid
    ComputeScores(ScoreTable),
    /// Press "保存"
    SaveScores,
    /// Restore the grid from the last snapshot
    LoadScores,
}

/// The application: configuration, sessions, and remote collaborators.
pub struct App<A, R> {
    config: Config,
    sessions: SessionStore,
    auth: A,
    records: R,
}

impl<A: AuthService, R: RecordStore> App<A, R> {
    /// Create an application with no live sessions.
    #[must_use]
    pub fn new(config: Config, auth: A, records: R) -> Self {
        let sessions = SessionStore::new(config.seed_names.clone());
        Self {
            config,
            sessions,
            auth,
            records,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Live sessions.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Authentication collaborator.
    #[must_use]
    pub const fn auth(&self) -> &A {
        &self.auth
    }

    /// Record store collaborator.
    #[must_use]
    pub const fn records(&self) -> &R {
        &self.records
    }

    /// Drop all state for `session` (browser closed / cookie expired).
    pub fn end_session(&self, session: &SessionId) -> bool {
        self.sessions.end(session)
    }

    /// Handle one action and render the resulting page.
    pub async fn handle(&self, session: &SessionId, action: Action) -> View {
        match action {
            Action::Visit(page) => self.render(session, page, None).await,
            Action::SignIn { email, password } => {
                let result = self.sign_in(session, &email, &password).await;
                self.after(session, result, Page::DogInfo, Page::Login).await
            }
            Action::SignUp {
                name,
                email,
                password,
            } => {
                let result = self.sign_up(session, &name, &email, &password).await;
                self.after(session, result, Page::DogInfo, Page::Login).await
            }
            Action::SignOut => {
                self.sign_out(session).await;
                self.render(session, Page::Login, None).await
            }
            Action::AddDog(new_dog) => {
                let result = self.add_dog(session, new_dog).await;
                self.after(session, result, Page::DogInfo, Page::DogInfo).await
            }
            Action::UpdateDog { id, fields } => {
                let result = self.update_dog(session, &id, fields).await;
                self.after(session, result, Page::DogInfo, Page::DogInfo).await
            }
            Action::DeleteDog { id, confirmed } => {
                let result = self.delete_dog(session, &id, confirmed).await;
                self.after(session, result, Page::DogInfo, Page::DogInfo).await
            }
            Action::ShowScores => self.render(session, Page::Scores, None).await,
            Action::ComputeScores(candidate) => {
                let result = self.compute_scores(session, &candidate);
                self.after(session, result, Page::Scores, Page::Scores).await
            }
            Action::SaveScores => {
                let result = self.save_scores(session);
                self.after(session, result, Page::Scores, Page::Scores).await
            }
            Action::LoadScores => {
                let result = self.load_scores(session);
                self.after(session, result, Page::Scores, Page::Scores).await
            }
        }
    }

    async fn after(
        &self,
        session: &SessionId,
        result: Result<()>,
        on_success: Page,
        on_error: Page,
    ) -> View {
        match result {
            Ok(()) => self.render(session, on_success, None).await,
            Err(e) => {
                warn!(session = %session, error = %e, "Action failed");
                self.render(session, on_error, Some(e.user_message())).await
            }
        }
    }

    async fn render(&self, session: &SessionId, page: Page, error: Option<String>) -> View {
        let user = self.current_user(session);
        let route = page.guard(user.is_some());

        match (route.page, user) {
            (Page::DogInfo, Some(user)) => self.render_dog_info(session, &user, error).await,
            (Page::Scores, _) => self.render_scores(session, error),
            _ => View::Login(LoginView {
                notice: route.notice.map(ToString::to_string),
                error,
            }),
        }
    }

    async fn render_dog_info(
        &self,
        session: &SessionId,
        user: &User,
        error: Option<String>,
    ) -> View {
        let flash = self.sessions.with_session(session, |s| s.take_flash());
        let max = self.config.max_dogs;

        let (dogs, error) = match self.records.list(user.id()).await {
            Ok(dogs) => (dogs, error),
            Err(e) => (Vec::new(), error.or_else(|| Some(e.user_message()))),
        };
        let can_add = dogs.len() < max;

        View::DogInfo(DogInfoView {
            caption: messages::signed_in_as(user.display_name()),
            flash,
            error,
            summary: messages::registered_count(dogs.len(), max),
            dogs,
            can_add,
            cap_notice: (!can_add).then(|| messages::registration_cap(max)),
        })
    }

    fn render_scores(&self, session: &SessionId, error: Option<String>) -> View {
        let (table, flash) = self.sessions.with_session(session, |s| {
            s.scores().initialize();
            (s.scores().present_editable_view(), s.take_flash())
        });

        View::Scores(ScoreView {
            columns: &COLUMNS,
            table,
            flash,
            error,
        })
    }

    fn current_user(&self, session: &SessionId) -> Option<User> {
        self.sessions.with_session(session, |s| s.user().cloned())
    }

    fn require_user(&self, session: &SessionId) -> Option<User> {
        let user = self.current_user(session);
        if user.is_none() {
            warn!(session = %session, "Registration action without a signed-in user");
        }
        user
    }

    async fn sign_in(&self, session: &SessionId, email: &str, password: &str) -> Result<()> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let user = self.auth.sign_in(email, password).await?;
        info!(session = %session, user_id = user.id(), "User signed in");
        self.start_user_session(session, user);
        Ok(())
    }

    async fn sign_up(
        &self,
        session: &SessionId,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<()> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingRegistrationFields.into());
        }
        let min = self.config.min_password_len;
        if password.chars().count() < min {
            return Err(ValidationError::PasswordTooShort { min }.into());
        }

        let user = self.auth.sign_up(email, password, name).await?;
        info!(session = %session, user_id = user.id(), "User registered");
        self.start_user_session(session, user);
        Ok(())
    }

    fn start_user_session(&self, session: &SessionId, user: User) {
        let welcome = messages::welcome(user.display_name());
        self.sessions.with_session(session, |s| {
            s.sign_in(user);
            s.set_flash(welcome);
        });
    }

    async fn sign_out(&self, session: &SessionId) {
        let Some(user) = self.sessions.with_session(session, |s| s.sign_out()) else {
            return;
        };
        if let Err(e) = self.auth.sign_out(user.id()).await {
            warn!(session = %session, error = %e, "Provider sign-out failed");
        }
        info!(session = %session, user_id = user.id(), "User signed out");
    }

    async fn add_dog(&self, session: &SessionId, new_dog: NewDog) -> Result<()> {
        let Some(user) = self.require_user(session) else {
            return Ok(());
        };

        let max = self.config.max_dogs;
        let current = self.records.list(user.id()).await?.len();
        if current >= max {
            return Err(ValidationError::RegistrationCapReached { max }.into());
        }
        if new_dog.dog_name.trim().is_empty()
            || new_dog.breed.trim().is_empty()
            || new_dog.events.is_empty()
        {
            return Err(ValidationError::MissingDogFields.into());
        }

        let record = DogRecord::builder(user.id(), new_dog.dog_name)
            .breed(new_dog.breed)
            .dog_class(new_dog.dog_class)
            .events(new_dog.events)
            .build();
        let record = self.records.insert(record).await?;

        info!(session = %session, id = record.id(), "Dog registered");
        self.sessions
            .with_session(session, |s| s.set_flash(messages::dog_added(record.dog_name())));
        Ok(())
    }

    async fn update_dog(&self, session: &SessionId, id: &str, fields: DogFields) -> Result<()> {
        let Some(user) = self.require_user(session) else {
            return Ok(());
        };
        if fields.events.is_empty() {
            return Err(ValidationError::NoEventsSelected.into());
        }

        let existing = self.owned_record(&user, id).await?;
        self.records.update(id, fields).await?;

        info!(session = %session, id, "Dog updated");
        self.sessions.with_session(session, |s| {
            s.set_flash(messages::dog_updated(existing.dog_name()));
        });
        Ok(())
    }

    async fn delete_dog(&self, session: &SessionId, id: &str, confirmed: bool) -> Result<()> {
        let Some(user) = self.require_user(session) else {
            return Ok(());
        };
        if !confirmed {
            return Err(ValidationError::DeleteNotConfirmed.into());
        }

        let existing = self.owned_record(&user, id).await?;
        self.records.delete(id).await?;

        info!(session = %session, id, "Dog deleted");
        self.sessions.with_session(session, |s| {
            s.set_flash(messages::dog_deleted(existing.dog_name()));
        });
        Ok(())
    }

    async fn owned_record(&self, user: &User, id: &str) -> Result<DogRecord> {
        self.records
            .list(user.id())
            .await?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| Error::NotFound(format!("dog record {id}")))
    }

    fn compute_scores(&self, session: &SessionId, candidate: &ScoreTable) -> Result<()> {
        self.sessions.with_session(session, |s| -> Result<()> {
            s.scores().reconcile(candidate)?;
            s.scores().recompute_derived();
            Ok(())
        })
    }

    fn save_scores(&self, session: &SessionId) -> Result<()> {
        let path = &self.config.snapshot_path;
        let table = self
            .sessions
            .with_session(session, |s| s.scores().present_editable_view());

        snapshot::write_parquet(&table, path)?;
        info!(session = %session, path = %path.display(), "Saved score snapshot");

        self.sessions
            .with_session(session, |s| s.set_flash(messages::SAVED));
        Ok(())
    }

    fn load_scores(&self, session: &SessionId) -> Result<()> {
        let path = &self.config.snapshot_path;
        let table = snapshot::read_parquet(path)?;
        info!(session = %session, path = %path.display(), "Loaded score snapshot");

        self.sessions.with_session(session, |s| {
            s.scores().replace(table);
            s.set_flash(messages::LOADED);
        });
        Ok(())
    }
}
