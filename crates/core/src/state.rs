use crate::{GameEvent, LocalizedCard, Tag, TagFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationState {
    #[default]
    Start,
    Lobby,
    Playing,
    Ending,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    /// Derived from `GameState::events` after every turn; never edit directly.
    #[serde(default)]
    pub event: Option<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub state: ApplicationState,
    #[serde(default)]
    pub cards: Vec<LocalizedCard>,
    #[serde(default)]
    pub card_amount: Option<usize>,
    #[serde(default)]
    pub max_cards: Option<usize>,
    #[serde(default)]
    pub current_card_index: usize,
    #[serde(default)]
    pub current_player_index: usize,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub events: Vec<GameEvent>,
    #[serde(default = "default_included_tags")]
    pub included_tags: Vec<Tag>,
    #[serde(default)]
    pub excluded_tags: Vec<Tag>,
    #[serde(default)]
    pub ending_event: Option<GameEvent>,
}

fn default_included_tags() -> Vec<Tag> {
    Tag::ALL.to_vec()
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            state: ApplicationState::Start,
            cards: Vec::new(),
            card_amount: None,
            max_cards: None,
            current_card_index: 0,
            current_player_index: 0,
            players: Vec::new(),
            events: Vec::new(),
            included_tags: default_included_tags(),
            excluded_tags: Vec::new(),
            ending_event: None,
        }
    }

    pub fn tag_filter(&self) -> TagFilter {
        TagFilter::new(self.included_tags.clone(), self.excluded_tags.clone())
    }

    pub fn current_card(&self) -> Option<&LocalizedCard> {
        self.cards.get(self.current_card_index)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn alive_events(&self) -> impl Iterator<Item = &GameEvent> + '_ {
        self.events.iter().filter(|event| event.is_alive())
    }
}
