use crate::config::{Config, ReadFailurePolicy};
use crate::db::Repository;
use crate::error::{AppError, Result};
use crate::models::{
    first_selectable_index, CategoryFilter, CategoryOption, Course, NewCourse, Session, CATALOG,
};
use crate::services::{visible_courses, CourseStore, IdentityProvider};
use crate::tui::AppAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    AddCourse,
    Auth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Url,
    Category,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Url,
            FormField::Url => FormField::Category,
            FormField::Category => FormField::Name,
        }
    }

    fn prev(self) -> Self {
        self.next().next()
    }
}

/// Add-course popup. `category_index` points into `CATALOG`, headers included.
#[derive(Debug, Clone)]
pub struct CourseForm {
    pub name: String,
    pub url: String,
    pub category_index: usize,
    pub field: FormField,
    pub error: Option<String>,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            url: String::new(),
            category_index: first_selectable_index(),
            field: FormField::Name,
            error: None,
        }
    }
}

impl CourseForm {
    pub fn category(&self) -> CategoryOption {
        CATALOG[self.category_index]
    }

    fn to_new_course(&self) -> NewCourse {
        NewCourse {
            name: self.name.clone(),
            url: self.url.clone(),
            category: self.category().label(),
        }
    }

    fn active_input(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Name => Some(&mut self.name),
            FormField::Url => Some(&mut self.url),
            FormField::Category => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub tab: AuthTab,
    pub field: AuthField,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub info: Option<String>,
}

/// A single write against the course store.
#[derive(Debug, Clone)]
pub enum Mutation {
    Add(NewCourse),
    SetCompleted { id: i64, completed: bool },
    Delete(i64),
}

pub struct App {
    // Data
    pub session: Session,
    pub courses: Vec<Course>,

    // UI State
    pub query: String,
    pub category_filter: CategoryFilter,
    pub selected_index: usize,
    pub mode: InputMode,
    pub form: CourseForm,
    pub auth: AuthForm,
    pub notice: Option<String>,
    pub show_help: bool,
    read_failure: ReadFailurePolicy,

    // Services
    store: CourseStore,
    identity: IdentityProvider,
}

impl App {
    pub async fn new(config: &Config) -> Result<Self> {
        let repository = Repository::new(&config.db_path).await?;
        let store = CourseStore::new(
            repository.clone(),
            config.multi_user,
            config.allow_custom_categories,
        );
        let identity = IdentityProvider::new(repository);

        Ok(Self::with_services(store, identity, config.read_failure).await)
    }

    pub async fn with_services(
        store: CourseStore,
        identity: IdentityProvider,
        read_failure: ReadFailurePolicy,
    ) -> Self {
        let mode = if store.ownership() {
            InputMode::Auth
        } else {
            InputMode::Normal
        };

        let mut app = Self {
            session: Session::Anonymous,
            courses: Vec::new(),
            query: String::new(),
            category_filter: CategoryFilter::All,
            selected_index: 0,
            mode,
            form: CourseForm::default(),
            auth: AuthForm::default(),
            notice: None,
            show_help: false,
            read_failure,
            store,
            identity,
        };

        if mode == InputMode::Normal {
            app.reload().await;
        }
        app
    }

    pub fn visible_courses(&self) -> Vec<&Course> {
        visible_courses(&self.courses, &self.query, &self.category_filter)
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.visible_courses().get(self.selected_index).copied()
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::MoveUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }

            AppAction::MoveDown => {
                let len = self.visible_courses().len();
                if len > 0 && self.selected_index < len - 1 {
                    self.selected_index += 1;
                }
            }

            AppAction::MoveToTop => {
                self.selected_index = 0;
            }

            AppAction::MoveToBottom => {
                self.selected_index = self.visible_courses().len().saturating_sub(1);
            }

            AppAction::Reload => {
                self.reload().await;
            }

            AppAction::ToggleCompleted => {
                if let Some(course) = self.selected_course() {
                    let mutation = Mutation::SetCompleted {
                        id: course.id,
                        completed: course.completion().toggled().is_done(),
                    };
                    self.apply(mutation).await?;
                }
            }

            AppAction::DeleteCourse => {
                if let Some(course) = self.selected_course() {
                    let id = course.id;
                    self.apply(Mutation::Delete(id)).await?;
                }
            }

            AppAction::OpenLink => {
                if let Some(course) = self.selected_course() {
                    let url = course.url.clone();
                    if let Err(e) = open::that(&url) {
                        tracing::warn!("Failed to open {}: {}", url, e);
                        self.notice = Some(format!("Could not open {url}"));
                    }
                }
            }

            AppAction::StartAddCourse => {
                self.form = CourseForm::default();
                self.mode = InputMode::AddCourse;
            }

            AppAction::FormChar(c) => {
                if let Some(input) = self.form.active_input() {
                    input.push(c);
                }
            }

            AppAction::FormBackspace => {
                if let Some(input) = self.form.active_input() {
                    input.pop();
                }
            }

            AppAction::FormNextField => {
                self.form.field = self.form.field.next();
            }

            AppAction::FormPrevField => {
                self.form.field = self.form.field.prev();
            }

            AppAction::FormNextCategory => {
                self.form.category_index = (self.form.category_index + 1) % CATALOG.len();
            }

            AppAction::FormPrevCategory => {
                self.form.category_index =
                    (self.form.category_index + CATALOG.len() - 1) % CATALOG.len();
            }

            AppAction::FormSubmit => {
                let course = self.form.to_new_course();
                match self.apply(Mutation::Add(course)).await {
                    Ok(()) => {
                        self.form = CourseForm::default();
                        self.mode = InputMode::Normal;
                        self.selected_index = 0;
                    }
                    Err(AppError::Validation(e)) => {
                        self.form.error = Some(e.to_string());
                    }
                    Err(e) => return Err(e),
                }
            }

            AppAction::FormCancel => {
                self.form = CourseForm::default();
                self.mode = InputMode::Normal;
            }

            AppAction::StartSearch => {
                self.mode = InputMode::Search;
            }

            AppAction::SearchChar(c) => {
                self.query.push(c);
                self.selected_index = 0;
                self.reload().await;
            }

            AppAction::SearchBackspace => {
                self.query.pop();
                self.selected_index = 0;
                self.reload().await;
            }

            AppAction::SearchConfirm => {
                self.mode = InputMode::Normal;
            }

            AppAction::SearchCancel => {
                self.query.clear();
                self.mode = InputMode::Normal;
                self.selected_index = 0;
                self.reload().await;
            }

            AppAction::CycleCategoryFilter => {
                self.category_filter = self.category_filter.cycle();
                self.selected_index = 0;
                self.reload().await;
            }

            AppAction::ClearFilters => {
                self.query.clear();
                self.category_filter = CategoryFilter::All;
                self.selected_index = 0;
                self.reload().await;
            }

            AppAction::AuthChar(c) => match self.auth.field {
                AuthField::Email => self.auth.email.push(c),
                AuthField::Password => self.auth.password.push(c),
            },

            AppAction::AuthBackspace => {
                match self.auth.field {
                    AuthField::Email => self.auth.email.pop(),
                    AuthField::Password => self.auth.password.pop(),
                };
            }

            AppAction::AuthNextField => {
                self.auth.field = match self.auth.field {
                    AuthField::Email => AuthField::Password,
                    AuthField::Password => AuthField::Email,
                };
            }

            AppAction::AuthSwitchTab => {
                self.auth.tab = match self.auth.tab {
                    AuthTab::SignIn => AuthTab::SignUp,
                    AuthTab::SignUp => AuthTab::SignIn,
                };
                self.auth.error = None;
                self.auth.info = None;
            }

            AppAction::AuthSubmit => {
                self.submit_auth().await?;
            }

            AppAction::SignOut => {
                if self.store.ownership() && self.session.is_authenticated() {
                    self.identity.sign_out(&mut self.session);
                    self.courses.clear();
                    self.query.clear();
                    self.category_filter = CategoryFilter::All;
                    self.selected_index = 0;
                    self.auth = AuthForm::default();
                    self.mode = InputMode::Auth;
                }
            }

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }
        }

        Ok(false)
    }

    /// Runs one store write, then re-reads the list from the store.
    pub async fn apply(&mut self, mutation: Mutation) -> Result<()> {
        let outcome = match mutation {
            Mutation::Add(course) => self.store.insert(&self.session, course).await.map(|_| ()),
            Mutation::SetCompleted { id, completed } => {
                self.store.set_completed(&self.session, id, completed).await
            }
            Mutation::Delete(id) => self.store.delete(&self.session, id).await,
        };

        match outcome {
            Ok(()) => {}
            Err(AppError::NotFound(id)) => {
                tracing::debug!(id, "course already gone, reloading");
            }
            Err(e) => return Err(e),
        }

        self.reload().await;
        Ok(())
    }

    /// Replaces the snapshot. A failed read leaves an empty list.
    pub async fn reload(&mut self) {
        match self.store.list(&self.session).await {
            Ok(courses) => {
                self.courses = courses;
                self.notice = None;
            }
            Err(e) => {
                tracing::warn!("Failed to load courses: {}", e);
                self.courses.clear();
                self.notice = match self.read_failure {
                    ReadFailurePolicy::Notice => {
                        Some("Could not load courses, showing an empty list".to_string())
                    }
                    ReadFailurePolicy::Silent => None,
                };
            }
        }

        let len = self.visible_courses().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    async fn submit_auth(&mut self) -> Result<()> {
        self.auth.error = None;
        self.auth.info = None;

        match self.auth.tab {
            AuthTab::SignIn => {
                match self
                    .identity
                    .sign_in(&self.auth.email, &self.auth.password)
                    .await
                {
                    Ok(session) => {
                        self.session = session;
                        self.auth = AuthForm::default();
                        self.mode = InputMode::Normal;
                        self.reload().await;
                    }
                    Err(e @ (AppError::InvalidCredentials | AppError::Validation(_))) => {
                        self.auth.error = Some(e.to_string());
                    }
                    Err(e) => return Err(e),
                }
            }
            AuthTab::SignUp => {
                match self
                    .identity
                    .sign_up(&self.auth.email, &self.auth.password)
                    .await
                {
                    Ok(principal) => {
                        self.auth = AuthForm {
                            email: principal.email,
                            info: Some("Account created, you can sign in now".to_string()),
                            ..AuthForm::default()
                        };
                    }
                    Err(e @ (AppError::EmailTaken(_) | AppError::Validation(_))) => {
                        self.auth.error = Some(e.to_string());
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(())
    }

    /// Turns an action failure into a notice; the loop keeps running.
    pub fn report_error(&mut self, error: AppError) {
        tracing::error!("Action failed: {}", error);
        match self.mode {
            InputMode::AddCourse => self.form.error = Some(error.to_string()),
            InputMode::Auth => self.auth.error = Some(error.to_string()),
            InputMode::Normal | InputMode::Search => self.notice = Some(error.to_string()),
        }
    }
}
