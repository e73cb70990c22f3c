use crate::error::SessionError;
use crate::persistence::{MemoryStore, MemoryTargetStore, SavedSession, StateStore, TargetStore};
use partydeck_core::{
    ApplicationState, GameState, Language, LanguagePool, LocalizedCard, Player, RngState, Tag,
};
use partydeck_data::{load_cards, load_single_card, CatalogSource};
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub catalog_path: PathBuf,
    pub save_path: Option<PathBuf>,
    pub language: Language,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("assets").join("cards.json"),
            save_path: crate::default_state_path(),
            language: Language::detect(std::env::var("LANG").ok().as_deref()),
        }
    }
}

pub type LanguageCallback = Box<dyn FnMut(Language) + Send>;

/// Owns one game session: the state, the per-language pool and the stores
/// they are written to. Every mutating call persists before returning.
pub struct Session {
    state: GameState,
    pool: LanguagePool,
    language: Language,
    rng: RngState,
    source: Box<dyn CatalogSource + Send>,
    store: Box<dyn StateStore>,
    targets: Box<dyn TargetStore>,
    on_language_change: Option<LanguageCallback>,
}

impl Session {
    pub fn new(source: impl CatalogSource + Send + 'static, language: Language) -> Self {
        Self {
            state: GameState::new(),
            pool: LanguagePool::default(),
            language,
            rng: RngState::from_entropy(),
            source: Box::new(source),
            store: Box::new(MemoryStore::default()),
            targets: Box::new(MemoryTargetStore::default()),
            on_language_change: None,
        }
    }

    pub fn with_state_store(mut self, store: impl StateStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn with_target_store(mut self, targets: impl TargetStore + 'static) -> Self {
        self.targets = Box::new(targets);
        self
    }

    pub fn with_rng(mut self, rng: RngState) -> Self {
        self.rng = rng;
        self
    }

    /// Picks up the saved session if the store has a readable one.
    pub fn restore(mut self) -> Self {
        match self.store.load() {
            Ok(Some(saved)) => {
                debug!(state = ?saved.state.state, "restored saved session");
                self.language = saved.language;
                self.state = saved.state;
                self.pool = saved.pool;
            }
            Ok(None) => {}
            Err(err) => warn!("ignoring unreadable saved session: {err}"),
        }
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn pool(&self) -> &LanguagePool {
        &self.pool
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn current_card(&self) -> Option<&LocalizedCard> {
        self.state.current_card()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    pub fn reset(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!("failed to clear saved session: {err}");
        }
        self.targets.clear();
        self.state = GameState::new();
        info!("session reset");
    }

    pub fn change_state(&mut self, state: ApplicationState) {
        self.state.change_state(state);
        self.save();
    }

    pub fn add_player(&mut self, name: &str) -> u32 {
        let id = self.state.add_player(name);
        self.save();
        id
    }

    pub fn remove_player(&mut self, id: u32) -> bool {
        let removed = self.state.remove_player(id).is_some();
        if removed {
            self.save();
        } else {
            debug!(id, "no player to remove");
        }
        removed
    }

    pub fn set_card_amount(&mut self, amount: usize) {
        self.state.card_amount = Some(amount);
        self.save();
    }

    pub fn set_tags(&mut self, included: Vec<Tag>, excluded: Vec<Tag>) {
        self.state.included_tags = included;
        self.state.excluded_tags = excluded;
        self.save();
    }

    /// Loads the pool for the current tags and records how many cards a
    /// session could use. Returns that count (0 leaves `max_cards` untouched).
    pub fn initialize_max_cards(&mut self) -> usize {
        let available = self.load_pool();
        if available > 0 {
            self.state.max_cards = Some(available);
            self.save();
        }
        available
    }

    pub fn start_game(&mut self) -> Result<(), SessionError> {
        let available = self.load_pool();
        let cards: Vec<LocalizedCard> = self
            .pool
            .cards(self.language)
            .unwrap_or_default()
            .iter()
            .take(available)
            .cloned()
            .collect();
        if cards.is_empty() {
            warn!("cannot start a game without cards");
            return Err(SessionError::EmptyPool);
        }
        // Never zero once started.
        let amount = self.state.card_amount.unwrap_or(available).clamp(1, cards.len());
        self.state.cards = cards;
        self.state.max_cards = Some(available);
        self.state.card_amount = Some(amount);
        self.state.events.clear();
        self.state.ending_event = None;
        self.targets.clear();
        self.state.start_game(&mut self.rng);
        info!(
            players = self.state.players.len(),
            cards = amount,
            "game started"
        );
        self.save();
        Ok(())
    }

    pub fn show_next_card(&mut self) {
        self.state.show_next_card();
        if let Some(event) = &self.state.ending_event {
            debug!(title = %event.title, person = %event.person, "event ended");
        }
        if self.state.state == ApplicationState::Ending {
            info!("out of cards");
        }
        self.save();
    }

    /// Swaps the card at `index` for a freshly drawn one in every language.
    pub fn reroll_card(&mut self, index: usize) -> bool {
        let filter = self.state.tag_filter();
        let replaced = load_single_card(
            &mut self.pool,
            index,
            self.source.as_ref(),
            &filter,
            &mut self.rng,
        );
        if replaced {
            self.targets.forget_target(index);
            self.refresh_cards();
            self.save();
        }
        replaced
    }

    /// Registers the single callback run after the language changes.
    pub fn on_language_change(&mut self, callback: impl FnMut(Language) + Send + 'static) {
        self.on_language_change = Some(Box::new(callback));
    }

    pub fn change_language(&mut self, language: Language) {
        if language == self.language {
            return;
        }
        self.language = language;
        if let Some(callback) = self.on_language_change.as_mut() {
            callback(language);
        }
        self.refresh_cards();
        self.save();
    }

    /// Target for the current card, drawn once per card slot and then remembered.
    pub fn target(&mut self) -> Option<String> {
        let index = self.state.current_card_index;
        if !self.current_card()?.target_player {
            return None;
        }
        if let Some(name) = self.targets.load_target(index) {
            return Some(name);
        }
        let name = self.state.pick_target(&mut self.rng)?;
        if let Err(err) = self.targets.persist_target(index, &name) {
            warn!("failed to remember target for card {index}: {err}");
        }
        Some(name)
    }

    /// Copies the active language's pool into the game, keeping positions.
    pub fn refresh_cards(&mut self) {
        match self.pool.cards(self.language) {
            Some(cards) if !cards.is_empty() => self.state.cards = cards.to_vec(),
            _ => warn!(language = %self.language, "no card data for language"),
        }
    }

    fn load_pool(&mut self) -> usize {
        let filter = self.state.tag_filter();
        load_cards(&mut self.pool, self.source.as_ref(), &filter, &mut self.rng)
    }

    fn save(&mut self) {
        let saved = SavedSession::new(self.language, self.state.clone(), self.pool.clone());
        if let Err(err) = self.store.persist(&saved) {
            warn!("failed to save session: {err}");
        }
    }
}
