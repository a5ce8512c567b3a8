use alloc::rc::Rc;
use core::cell::RefCell;

use vc_event::{EventDispatcher, Subscriptions};

use crate::{EntityInteraction, GameState, GameStateChange, PlayerAction, PlayerInput};

// -----------------------------------------------------------------------------
// PlayerState

/// Everything the player tracks, updated only by incoming events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub jumping: bool,
    pub attack_direction: i32,
    pub game_state: GameState,
    pub interactions: u32,
}

impl PlayerState {
    pub fn apply_input(&mut self, input: &PlayerInput) {
        match input.action {
            PlayerAction::Move => {
                self.x += input.dx;
                self.y += input.dy;
            }
            PlayerAction::Jump => self.jumping = true,
            PlayerAction::Attack => self.attack_direction = input.attack_direction,
        }
    }

    pub fn apply_state_change(&mut self, change: &GameStateChange) {
        self.game_state = change.new_state;
    }

    pub fn apply_interaction(&mut self, _interaction: &EntityInteraction) {
        self.interactions = self.interactions.saturating_add(1);
    }
}

// -----------------------------------------------------------------------------
// Player

/// A player that reacts to [`PlayerInput`], [`GameStateChange`] and
/// [`EntityInteraction`] events.
///
/// It subscribes on construction and unsubscribes when dropped; the borrow
/// of the dispatcher makes sure the dispatcher outlives it.
///
/// # Examples
///
/// ```
/// use vc_event::EventDispatcher;
/// use vc_player::{Player, PlayerInput};
///
/// let dispatcher = EventDispatcher::new();
/// let player = Player::new(&dispatcher);
///
/// dispatcher.publish(&PlayerInput::move_by(2.0, -1.0));
/// dispatcher.process_all();
///
/// assert_eq!((player.x(), player.y()), (2.0, -1.0));
/// ```
pub struct Player<'d> {
    state: Rc<RefCell<PlayerState>>,
    subscriptions: Subscriptions<'d>,
}

impl<'d> Player<'d> {
    pub fn new(dispatcher: &'d EventDispatcher) -> Self {
        let state = Rc::new(RefCell::new(PlayerState::default()));
        let mut subscriptions = Subscriptions::new(dispatcher);

        let target = state.clone();
        subscriptions.listen(move |input: &PlayerInput| target.borrow_mut().apply_input(input));

        let target = state.clone();
        subscriptions.listen(move |change: &GameStateChange| {
            target.borrow_mut().apply_state_change(change);
        });

        let target = state.clone();
        subscriptions.listen(move |interaction: &EntityInteraction| {
            target.borrow_mut().apply_interaction(interaction);
        });

        log::debug!(
            "player subscribed to {} event kinds on dispatcher {}",
            subscriptions.len(),
            dispatcher.id(),
        );

        Self {
            state,
            subscriptions,
        }
    }

    /// Returns a copy of the current state.
    #[inline]
    pub fn state(&self) -> PlayerState {
        *self.state.borrow()
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.state.borrow().x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.state.borrow().y
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.state.borrow().jumping
    }

    #[inline]
    pub fn attack_direction(&self) -> i32 {
        self.state.borrow().attack_direction
    }

    #[inline]
    pub fn game_state(&self) -> GameState {
        self.state.borrow().game_state
    }

    #[inline]
    pub fn interactions(&self) -> u32 {
        self.state.borrow().interactions
    }

    /// Returns the subscriptions held by this player.
    #[inline]
    pub fn subscriptions(&self) -> &Subscriptions<'d> {
        &self.subscriptions
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use vc_event::{Event, EventDispatcher};

    use super::{Player, PlayerState};
    use crate::{EntityInteraction, GameState, GameStateChange, InteractionType, PlayerInput};

    #[test]
    fn starts_at_rest() {
        let dispatcher = EventDispatcher::new();
        let player = Player::new(&dispatcher);

        assert_eq!(player.x(), 0.0);
        assert_eq!(player.y(), 0.0);
        assert!(!player.is_jumping());
        assert_eq!(player.attack_direction(), 0);
        assert_eq!(player.state(), PlayerState::default());
    }

    #[test]
    fn responds_to_input() {
        let dispatcher = EventDispatcher::new();
        let player = Player::new(&dispatcher);

        dispatcher.publish(&PlayerInput::jump());
        dispatcher.process_all();
        assert!(player.is_jumping());

        dispatcher.publish(&PlayerInput::move_by(5.0, 5.0));
        dispatcher.process_all();
        assert_eq!(player.x(), 5.0);
        assert_eq!(player.y(), 5.0);

        dispatcher.publish(&PlayerInput::attack(90));
        dispatcher.process_all();
        assert_eq!(player.attack_direction(), 90);
    }

    #[test]
    fn process_only_input() {
        let dispatcher = EventDispatcher::new();
        let player = Player::new(&dispatcher);

        dispatcher.publish(&PlayerInput::jump());
        dispatcher.publish(&GameStateChange {
            new_state: GameState::Pause,
        });

        assert_eq!(dispatcher.process_only(PlayerInput::kind()), 1);
        assert!(player.is_jumping());
        assert_eq!(player.game_state(), GameState::Start);

        assert_eq!(dispatcher.process_all(), 1);
        assert_eq!(player.game_state(), GameState::Pause);
    }

    #[test]
    fn counts_interactions() {
        let dispatcher = EventDispatcher::new();
        let player = Player::new(&dispatcher);

        dispatcher.publish(&EntityInteraction {
            interaction: InteractionType::Pickup,
            entity_a: 1,
            entity_b: 7,
        });
        dispatcher.publish(&EntityInteraction::default());
        dispatcher.process_all();

        assert_eq!(player.interactions(), 2);
    }

    #[test]
    fn drop_unsubscribes() {
        let dispatcher = EventDispatcher::new();
        let player = Player::new(&dispatcher);

        assert_eq!(player.subscriptions().len(), 3);
        assert_eq!(dispatcher.listener_count(PlayerInput::kind()), 1);
        assert_eq!(dispatcher.listener_count(GameStateChange::kind()), 1);
        assert_eq!(dispatcher.listener_count(EntityInteraction::kind()), 1);

        drop(player);
        assert_eq!(dispatcher.listeners().total(), 0);

        dispatcher.publish(&PlayerInput::jump());
        assert_eq!(dispatcher.process_all(), 1);
    }

    #[test]
    fn two_players_share_a_dispatcher() {
        let dispatcher = EventDispatcher::new();
        let first = Player::new(&dispatcher);
        let second = Player::new(&dispatcher);

        dispatcher.publish(&PlayerInput::move_by(1.0, 2.0));
        dispatcher.process_all();
        assert_eq!(first.state(), second.state());

        drop(first);
        dispatcher.publish(&PlayerInput::move_by(1.0, 0.0));
        dispatcher.process_all();
        assert_eq!(second.x(), 2.0);
        assert_eq!(dispatcher.listener_count(PlayerInput::kind()), 1);
    }
}
