//! Native egui shell for browsing and editing remote users.

mod controller;
mod session;
mod state_feedback;
mod state_ops;
mod style;
mod ui;

use crate::backend::{spawn_backend, BackendHandle, HttpUserStore, RequestId};
use controller::CollectionController;
use eframe::egui;
use session::EditSessionManager;
use std::collections::{BTreeMap, VecDeque};
use std::time::{Duration, Instant};
use style::*;
use tracing::info;
use userdeck_core::{
    Config, CoreError, FilePreferenceStore, FormProfile, PreferenceStore, SearchField, Theme,
    ThemePreference, User,
};

/// Native egui application shell.
///
/// Owns every piece of UI state on the UI thread and talks to the remote
/// resource only through the backend worker, so `update` never blocks on the
/// network.
pub(crate) struct UserDeckApp {
    controller: CollectionController,
    session: EditSessionManager,
    theme: ThemePreference,
    form_profile: FormProfile,
    search_fields: Vec<SearchField>,
    search_query: String,
    visible: Vec<User>,
    selected_id: Option<u64>,
    removals_in_flight: BTreeMap<RequestId, u64>,
    api_url: String,
    status: Option<StatusMessage>,
    notices: VecDeque<Notice>,
    next_notice_id: u64,
    style_applied: Option<Theme>,
}

const STATUS_TTL: Duration = Duration::from_secs(5);
const NOTICE_TTL: Duration = Duration::from_secs(4);
const ERROR_NOTICE_TTL: Duration = Duration::from_secs(8);
const NOTICE_LIMIT: usize = 4;
const PENDING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);
#[doc = "Default initial window size for native GUI startup."]
pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [1000.0, 700.0];
#[doc = "Minimum window size that keeps the list and detail panel usable."]
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [720.0, 480.0];

struct StatusMessage {
    text: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct Notice {
    id: u64,
    text: String,
    kind: NoticeKind,
    expires_at: Instant,
}

impl UserDeckApp {
    /// Construct the app from `config`.
    ///
    /// Spawns the backend worker against the configured users API, reads the
    /// theme preference, and sends the initial list request.
    ///
    /// # Errors
    /// Returns an error if the API URL is invalid or the worker thread cannot
    /// be spawned.
    pub(crate) fn new(config: &Config) -> Result<Self, CoreError> {
        let store = HttpUserStore::from_config(config)?;
        let backend = spawn_backend(store)?;
        info!("native GUI using users API at {}", config.api_url);
        let prefs = FilePreferenceStore::new(config.prefs_path.clone());
        Ok(Self::from_parts(backend, Box::new(prefs), config))
    }

    /// Assemble the app around an existing backend and preference store.
    pub(crate) fn from_parts(
        backend: BackendHandle,
        prefs: Box<dyn PreferenceStore>,
        config: &Config,
    ) -> Self {
        let mut app = Self {
            controller: CollectionController::new(backend),
            session: EditSessionManager::default(),
            theme: ThemePreference::load(prefs),
            form_profile: config.form_profile,
            search_fields: config.search_fields.clone(),
            search_query: String::new(),
            visible: Vec::new(),
            selected_id: None,
            removals_in_flight: BTreeMap::new(),
            api_url: config.api_url.clone(),
            status: None,
            notices: VecDeque::with_capacity(NOTICE_LIMIT),
            next_notice_id: 0,
            style_applied: None,
        };
        app.reload();
        app
    }
}

impl eframe::App for UserDeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_style(ctx);
        self.poll_backend();
        self.prune_feedback(Instant::now());

        self.render_top_bar(ctx);
        self.render_status_bar(ctx);
        self.render_detail_panel(ctx);
        self.render_user_list(ctx);
        self.render_session_window(ctx);
        self.render_notices(ctx);

        if self.controller.has_pending() || !self.notices.is_empty() || self.status.is_some() {
            ctx.request_repaint_after(PENDING_REPAINT_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests;
