//! Dice dialog state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

pub mod create_game;
mod effect;
pub mod event;
pub mod play_game;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use play_game::ResultCard;
pub use state::{ConvContext, Conversation, DialogState, ExpectedInput};
pub use transition::{transition, TransitionError};
