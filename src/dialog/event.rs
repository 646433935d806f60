//! Events that drive the dice dialog

use crate::entities::Turn;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// An inbound user turn, already classified
    UserTurn { turn: Turn },

    /// Results of a `RollDice` effect, in roll order
    DiceRolled { rolls: Vec<u32> },
}

impl Event {
    pub fn user_turn(turn: Turn) -> Self {
        Event::UserTurn { turn }
    }
}
