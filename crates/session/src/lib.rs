//! An explicitly owned game session over the core state machine and the
//! card pipeline, with pluggable persistence.

mod error;
mod persistence;
mod session;

pub use error::SessionError;
pub use persistence::{
    default_state_path, JsonFileStore, MemoryStore, MemoryTargetStore, SavedSession, StateStore,
    TargetStore, SAVE_SCHEMA_VERSION,
};
pub use session::{LanguageCallback, Session, SessionConfig};
