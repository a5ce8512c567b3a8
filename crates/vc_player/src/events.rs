use alloc::vec::Vec;

use vc_event::{Event, EventKind};

// -----------------------------------------------------------------------------
// PlayerInput

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerAction {
    #[default]
    Move,
    Jump,
    Attack,
}

/// Input aimed at the player.
///
/// `dx` and `dy` are only meaningful for [`PlayerAction::Move`],
/// `attack_direction` (in degrees) only for [`PlayerAction::Attack`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput {
    pub action: PlayerAction,
    pub dx: f32,
    pub dy: f32,
    pub attack_direction: i32,
}

impl PlayerInput {
    pub const fn move_by(dx: f32, dy: f32) -> Self {
        Self {
            action: PlayerAction::Move,
            dx,
            dy,
            attack_direction: 0,
        }
    }

    pub const fn jump() -> Self {
        Self {
            action: PlayerAction::Jump,
            dx: 0.0,
            dy: 0.0,
            attack_direction: 0,
        }
    }

    pub const fn attack(direction: i32) -> Self {
        Self {
            action: PlayerAction::Attack,
            dx: 0.0,
            dy: 0.0,
            attack_direction: direction,
        }
    }
}

impl Event for PlayerInput {}

// -----------------------------------------------------------------------------
// GameStateChange

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Start,
    Pause,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStateChange {
    pub new_state: GameState,
}

impl Event for GameStateChange {}

// -----------------------------------------------------------------------------
// EntityInteraction

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionType {
    #[default]
    Collision,
    Pickup,
    Trigger,
}

/// Two entities interacting. `-1` stands for "no entity".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityInteraction {
    pub interaction: InteractionType,
    pub entity_a: i32,
    pub entity_b: i32,
}

impl Default for EntityInteraction {
    fn default() -> Self {
        Self {
            interaction: InteractionType::Collision,
            entity_a: -1,
            entity_b: -1,
        }
    }
}

impl EntityInteraction {
    /// Returns `true` if `entity` is one of the two participants.
    pub fn involves(&self, entity: i32) -> bool {
        entity >= 0 && (self.entity_a == entity || self.entity_b == entity)
    }
}

impl Event for EntityInteraction {}

// -----------------------------------------------------------------------------
// Registration

/// Every event type the player reacts to.
pub type PlayerEvents = (PlayerInput, GameStateChange, EntityInteraction);

/// Allocates the kinds of [`PlayerEvents`] in a fixed order.
///
/// Call it once at startup before any other event type is used to get the
/// same kinds on every run.
pub fn register_player_events() -> Vec<EventKind> {
    vc_event::register::<PlayerEvents>()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use vc_event::Event;

    use super::{EntityInteraction, GameStateChange, PlayerAction, PlayerInput};
    use super::{GameState, InteractionType, register_player_events};

    #[test]
    fn kinds_are_unique() {
        assert_ne!(PlayerInput::kind(), GameStateChange::kind());
        assert_ne!(GameStateChange::kind(), EntityInteraction::kind());
        assert_ne!(PlayerInput::kind(), EntityInteraction::kind());
    }

    #[test]
    fn registration_order() {
        assert_eq!(
            register_player_events(),
            [
                PlayerInput::kind(),
                GameStateChange::kind(),
                EntityInteraction::kind()
            ]
        );
    }

    #[test]
    fn defaults() {
        let input = PlayerInput::default();
        assert_eq!(input.action, PlayerAction::Move);
        assert_eq!((input.dx, input.dy, input.attack_direction), (0.0, 0.0, 0));

        assert_eq!(GameStateChange::default().new_state, GameState::Start);

        let hit = EntityInteraction::default();
        assert_eq!(hit.interaction, InteractionType::Collision);
        assert_eq!((hit.entity_a, hit.entity_b), (-1, -1));
        assert!(!hit.involves(-1));
    }
}
