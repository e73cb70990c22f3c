use serde::{Deserialize, Serialize};

/// A timed effect opened by an event card. It stays alive until the rotation
/// comes back around to the slot that opened it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    pub title: String,
    pub person: String,
    pub starting_index: usize,
    pub ended: bool,
}

impl GameEvent {
    pub fn new(title: impl Into<String>, person: impl Into<String>, starting_index: usize) -> Self {
        Self {
            title: title.into(),
            person: person.into(),
            starting_index,
            ended: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.ended
    }
}
