//! Roll dice and find out which spells the roll lets you cast.
//!
//! ```rust
//! # use spell_dice::{evaluate, roll_with, Session};
//! # use rand::rngs::StdRng;
//! # use rand::SeedableRng;
//! #
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Only the default spells are checked when nothing was picked.
//! let spells = evaluate(&[3, 3], &[])?;
//! assert_eq!(spells, ["Enchant", "Light and Shadow", "Metamorphosis"]);
//!
//! // Use a custom Rng that implements the rand::Rng trait
//! let mut rng = StdRng::seed_from_u64(1);
//! let rolled = roll_with(4, &mut rng);
//! assert_eq!(rolled.len(), 4);
//! println!("{rolled}");
//!
//! // Keep track of the player's choices between rolls
//! let mut session = Session::default();
//! session.toggle_by_name("Might")?;
//! session.set_rolls(vec![5, 6]);
//! assert_eq!(session.matching_spells()?, ["Might"]);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
mod predicate;
mod roll;
mod session;
mod spell;

pub use predicate::{
    has_equal_values, has_sequential_subset, has_subset_matching_sum, PredicateError,
};
pub use roll::{RollSequence, BURNING_SUCCESS_THRESHOLD, DIE_SIDES};
pub use session::{Outcome, Session, SessionError, MIN_DICE};
pub use spell::{Catalog, Rule, Spell, DEFAULT_SPELLS, SELECTABLE_SPELLS};

/// Names of the standard spells castable with `rolls`.
/// `selection` picks the selectable spells by position.
pub fn evaluate(rolls: &[i32], selection: &[bool]) -> Result<Vec<&'static str>, PredicateError> {
    Catalog::standard().matching_spells(rolls, selection)
}

/// Rolls `count` six sided dice.
pub fn roll(count: usize) -> RollSequence {
    RollSequence::roll(count)
}

/// Same as `roll()` but allows you to choose the rng you prefer to use.
pub fn roll_with(count: usize, rng: &mut impl rand::Rng) -> RollSequence {
    RollSequence::roll_with(count, rng)
}
