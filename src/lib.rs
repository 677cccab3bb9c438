//! Root crate facade for the UserDeck desktop client and reference users API.

pub use userdeck_core::{
    config, models, search, theme, validation, Config, CoreError, FormProfile, Theme, User,
    UserDraft, UserPatch,
};
pub use userdeck_server::{create_app, serve_router, AppState, EmbeddedServer, UserDirectory};

/// Desktop client: backend worker, remote store, and the `run` entry point.
#[cfg(feature = "gui")]
pub use userdeck_gui::{backend, run};
