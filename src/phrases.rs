//! Response phrase catalog
//!
//! The state machine only names phrases; the runtime picks a wording so that
//! transitions stay deterministic.

use crate::scoring::Reaction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phrase", content = "reaction", rename_all = "snake_case")]
pub enum PhraseKey {
    ChooseSides,
    ChooseCount,
    CountOutOfRange,
    Intro,
    Reaction(Reaction),
}

pub const HELP_TEXT: &str = "I can roll dice for you. Say something like \"roll two 6-sided dice\" \
    or \"let's play craps\". After a roll, say \"roll again\" or \"new game\".";

pub fn fallback_text(text: &str) -> String {
    format!("Sorry, I did not understand '{text}'. Type 'help' if you need assistance.")
}

/// All wordings for a phrase, never empty
pub fn variants(key: PhraseKey) -> &'static [&'static str] {
    match key {
        PhraseKey::ChooseSides => &[
            "How many sides on the dice?",
            "Please enter the number of sides of the dice to be rolled.",
        ],
        PhraseKey::ChooseCount => &[
            "How many dice should I roll?",
            "How many times should I roll? Pick a number from 1 to 100.",
        ],
        PhraseKey::CountOutOfRange => &["Please enter a number between 1 and 100."],
        PhraseKey::Intro => &[
            "Here we go.",
            "Let's see what we get.",
            "Rolling the dice.",
        ],
        PhraseKey::Reaction(reaction) => reaction_variants(reaction),
    }
}

fn reaction_variants(reaction: Reaction) -> &'static [&'static str] {
    match reaction {
        Reaction::Best => &["Wow! That's the best possible roll!", "Perfect roll!"],
        Reaction::Good => &["Nice roll.", "That's a good one."],
        Reaction::Normal => &["Not bad.", "A decent roll."],
        Reaction::Bad => &["Ouch, that's a low one.", "Better luck next time."],
        Reaction::Worst => &["That's the worst roll possible."],
        Reaction::CrapsLose => &["Craps! You lose."],
        Reaction::CrapsSeven => &["Lucky seven! You win."],
        Reaction::CrapsEleven => &["Eleven! You win."],
        Reaction::CrapsRetry => &["No winner yet. Roll again."],
    }
}

/// Join one wording per key; `pick(n)` must return an index below `n`
pub fn compose(keys: &[PhraseKey], mut pick: impl FnMut(usize) -> usize) -> String {
    keys.iter()
        .map(|key| {
            let options = variants(*key);
            let idx = pick(options.len()).min(options.len() - 1);
            options[idx]
        })
        .collect::<Vec<_>>()
        .join(" ")
}
