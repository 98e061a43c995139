use rand::Rng;
use tracing::debug;

use crate::predicate::PredicateError;
use crate::roll::RollSequence;
use crate::spell::Catalog;

pub const MIN_DICE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("there is no spell number {0}")]
    UnknownSpellIndex(usize),
    #[error("there is no spell called {0:?}")]
    UnknownSpellName(String),
    #[error(transparent)]
    Predicate(#[from] PredicateError),
}

/// Everything the player has picked so far plus the last roll.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    dice_count: usize,
    selection: Vec<bool>,
    last_rolls: Option<RollSequence>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            dice_count: MIN_DICE,
            selection: vec![false; catalog.selectable_spells().len()],
            last_rolls: None,
        }
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog
    }
    pub fn dice_count(&self) -> usize {
        self.dice_count
    }
    pub fn selection(&self) -> &[bool] {
        &self.selection
    }
    pub fn last_rolls(&self) -> Option<&RollSequence> {
        self.last_rolls.as_ref()
    }

    /// The dice count will be clamped to at least 2.
    pub fn set_dice_count(&mut self, count: usize) {
        self.dice_count = count.max(MIN_DICE);
    }

    pub fn increment(&mut self) {
        self.dice_count += 1;
        debug!(dice_count = self.dice_count, "added a die");
    }

    /// Does nothing and returns false when already at the minimum.
    pub fn decrement(&mut self) -> bool {
        if self.dice_count <= MIN_DICE {
            return false;
        }
        self.dice_count -= 1;
        debug!(dice_count = self.dice_count, "removed a die");
        true
    }

    /// Flips the flag of the selectable spell at `index`, returning its new state.
    pub fn toggle(&mut self, index: usize) -> Result<bool, SessionError> {
        let flag = self
            .selection
            .get_mut(index)
            .ok_or(SessionError::UnknownSpellIndex(index))?;
        *flag = !*flag;
        debug!(index, enabled = *flag, "toggled spell");
        Ok(*flag)
    }

    pub fn toggle_by_name(&mut self, name: &str) -> Result<bool, SessionError> {
        let index = self
            .catalog
            .position(name)
            .ok_or_else(|| SessionError::UnknownSpellName(name.trim().to_string()))?;
        self.toggle(index)
    }

    pub fn roll_with(&mut self, rng: &mut impl Rng) -> &RollSequence {
        self.last_rolls
            .insert(RollSequence::roll_with(self.dice_count, rng))
    }

    /// Replaces the last roll with fixed values instead of rolling.
    pub fn set_rolls(&mut self, rolls: impl Into<RollSequence>) {
        self.last_rolls = Some(rolls.into());
    }

    /// Names of the spells castable with the last roll, empty before the first roll.
    pub fn matching_spells(&self) -> Result<Vec<&'static str>, SessionError> {
        match &self.last_rolls {
            Some(rolls) => Ok(self
                .catalog
                .matching_spells(rolls.values(), &self.selection)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn outcome(&self) -> Result<Option<Outcome>, SessionError> {
        let Some(rolls) = &self.last_rolls else {
            return Ok(None);
        };

        let spells = self.catalog.matching_spells(rolls.values(), &self.selection)?;
        Ok(Some(Outcome {
            rolls: rolls.clone(),
            spells,
        }))
    }
}

/// What a roll turned out to be good for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    rolls: RollSequence,
    spells: Vec<&'static str>,
}

impl Outcome {
    pub fn rolls(&self) -> &RollSequence {
        &self.rolls
    }
    pub fn spells(&self) -> &[&'static str] {
        &self.spells
    }
    pub fn is_miss(&self) -> bool {
        self.spells.is_empty()
    }
    pub fn is_burning_success(&self) -> bool {
        self.rolls.is_burning_success()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.rolls.to_plain())?;
        if self.is_miss() {
            return write!(f, "miss :(");
        }

        // A burning success only matters when something can be cast
        if self.is_burning_success() {
            writeln!(f, "burning success!")?;
        }
        write!(f, "can use:")?;
        for spell in &self.spells {
            write!(f, "\n- {spell}")?;
        }
        Ok(())
    }
}
