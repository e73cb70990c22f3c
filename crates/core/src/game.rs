use crate::{ApplicationState, GameEvent, GameState, Player, RngState};

impl GameState {
    /// Shuffles turn order, rewinds both indices and enters `Playing`. A timed
    /// first card opens its event for the first player right away.
    pub fn start_game(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.players);
        self.current_card_index = 0;
        self.current_player_index = 0;
        self.change_state(ApplicationState::Playing);
        self.open_event_for_current_card();
        self.refresh_player_events();
    }

    /// Ids are `len + 1`, so an id freed by a removal can be handed out again.
    pub fn add_player(&mut self, name: impl Into<String>) -> u32 {
        let id = self.players.len() as u32 + 1;
        self.players.push(Player {
            id,
            name: name.into(),
            event: None,
        });
        id
    }

    pub fn remove_player(&mut self, id: u32) -> Option<Player> {
        let index = self.players.iter().position(|player| player.id == id)?;
        let removed = self.players.remove(index);
        if self.current_player_index >= self.players.len() {
            self.current_player_index = 0;
        }
        Some(removed)
    }

    /// No legality check; sequencing is up to the caller.
    pub fn change_state(&mut self, state: ApplicationState) {
        self.state = state;
    }

    pub fn show_next_card(&mut self) {
        if self.state == ApplicationState::Ending {
            return;
        }
        self.resolve_ending_events();
        self.events.retain(GameEvent::is_alive);

        self.current_card_index += 1;
        self.current_player_index = match self.players.len() {
            0 => 0,
            len => (self.current_player_index + 1) % len,
        };

        if self.current_card_index >= self.card_amount.unwrap_or(0) {
            for event in &mut self.events {
                event.ended = true;
            }
            self.ending_event = None;
            self.change_state(ApplicationState::Ending);
        } else {
            self.open_event_for_current_card();
        }
        self.refresh_player_events();
    }

    /// A random player other than the active one, for cards that need a target.
    pub fn pick_target(&self, rng: &mut RngState) -> Option<String> {
        let card = self.current_card()?;
        if !card.target_player {
            return None;
        }
        let index = rng.index_excluding(self.players.len(), self.current_player_index)?;
        self.players.get(index).map(|player| player.name.clone())
    }

    /// Rotation slot of the player whose turn is ending.
    fn vacated_player_index(&self) -> Option<usize> {
        match (self.players.len(), self.current_player_index) {
            (0, _) => None,
            (len, 0) => Some(len - 1),
            (_, index) => Some(index - 1),
        }
    }

    // Ended events are swept at the end of this step, so an event surfaced
    // as `ending_event` can never be matched again on a later step.
    fn resolve_ending_events(&mut self) {
        let Some(check_index) = self.vacated_player_index() else {
            self.ending_event = None;
            return;
        };
        let mut first_ended = None;
        for event in self
            .events
            .iter_mut()
            .filter(|event| event.is_alive() && event.starting_index == check_index)
        {
            event.ended = true;
            if first_ended.is_none() {
                first_ended = Some(event.clone());
            }
        }
        self.ending_event = first_ended;
    }

    fn open_event_for_current_card(&mut self) {
        let Some(card) = self.cards.get(self.current_card_index) else {
            return;
        };
        if !card.timed_event {
            return;
        }
        let Some(player) = self.players.get(self.current_player_index) else {
            return;
        };
        let event = GameEvent::new(card.title.clone(), player.name.clone(), self.current_player_index);
        self.events.push(event);
    }

    fn refresh_player_events(&mut self) {
        let events = &self.events;
        for player in &mut self.players {
            player.event = events
                .iter()
                .find(|event| event.is_alive() && event.person == player.name)
                .cloned();
        }
    }
}
