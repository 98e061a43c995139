use tracing::{debug, trace};

use crate::predicate::{
    has_equal_values, has_sequential_subset, has_subset_matching_sum, PredicateError,
};

/// The condition a roll has to meet for a spell to be castable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `size` dice adding up to `target`.
    SubsetSum { size: usize, target: i32 },
    /// `size` dice forming a run of consecutive values.
    Sequential { size: usize },
    /// At least `count` dice showing the same value.
    EqualValues { count: usize },
    /// Every die added together is at most the amount.
    TotalAtMost(i32),
    /// Every die added together is at least the amount.
    TotalAtLeast(i32),
    /// At least `at_least` dice showing `face`.
    CountOf { face: i32, at_least: usize },
}

impl Rule {
    pub fn matches(&self, rolls: &[i32]) -> Result<bool, PredicateError> {
        match *self {
            Rule::SubsetSum { size, target } => has_subset_matching_sum(rolls, size, target),
            Rule::Sequential { size } => has_sequential_subset(rolls, size),
            Rule::EqualValues { count } => has_equal_values(rolls, count),
            Rule::TotalAtMost(max) => Ok(total(rolls) <= max as i64),
            Rule::TotalAtLeast(min) => Ok(total(rolls) >= min as i64),
            Rule::CountOf { face, at_least } => {
                Ok(rolls.iter().filter(|&&roll| roll == face).count() >= at_least)
            }
        }
    }
}

fn total(rolls: &[i32]) -> i64 {
    rolls.iter().map(|&roll| roll as i64).sum()
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::SubsetSum { size, target } => write!(f, "{size} dice summing to {target}"),
            Rule::Sequential { size } => write!(f, "{size} dice in a row"),
            Rule::EqualValues { count } => write!(f, "{count} of a kind"),
            Rule::TotalAtMost(max) => write!(f, "total of {max} or less"),
            Rule::TotalAtLeast(min) => write!(f, "total of {min} or more"),
            Rule::CountOf { face, at_least } => write!(f, "{at_least} or more {face}s"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spell {
    name: &'static str,
    rule: Rule,
}

impl Spell {
    pub const fn new(name: &'static str, rule: Rule) -> Self {
        Self { name, rule }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn matches(&self, rolls: &[i32]) -> Result<bool, PredicateError> {
        let matched = self.rule.matches(rolls)?;
        trace!(spell = self.name, matched, "evaluated spell");
        Ok(matched)
    }
}

impl std::fmt::Display for Spell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.rule)
    }
}

/// Spells that are checked on every roll.
pub const DEFAULT_SPELLS: [Spell; 3] = [
    Spell::new("Enchant", Rule::SubsetSum { size: 2, target: 6 }),
    Spell::new("Light and Shadow", Rule::TotalAtMost(6)),
    Spell::new("Metamorphosis", Rule::EqualValues { count: 2 }),
];

/// Spells the player has to pick before they are checked.
pub const SELECTABLE_SPELLS: [Spell; 10] = [
    Spell::new("Chaos", Rule::SubsetSum { size: 2, target: 2 }),
    Spell::new("Scrying", Rule::SubsetSum { size: 2, target: 8 }),
    Spell::new("Phantasm", Rule::SubsetSum { size: 2, target: 10 }),
    Spell::new("Might", Rule::Sequential { size: 2 }),
    Spell::new("Ensoulment", Rule::Sequential { size: 3 }),
    Spell::new("Elements", Rule::TotalAtLeast(12)),
    Spell::new("Summoning", Rule::EqualValues { count: 3 }),
    Spell::new("Shaping", Rule::EqualValues { count: 4 }),
    Spell::new("Dreamwalker", Rule::SubsetSum { size: 2, target: 7 }),
    Spell::new("Chthonic Being", Rule::CountOf { face: 1, at_least: 2 }),
];

/// A fixed set of spells: the default ones are always checked, the selectable
/// ones only when the flag at the same position is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    default: &'static [Spell],
    selectable: &'static [Spell],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    pub const fn new(default: &'static [Spell], selectable: &'static [Spell]) -> Self {
        Self {
            default,
            selectable,
        }
    }

    pub fn standard() -> Self {
        Self::new(&DEFAULT_SPELLS, &SELECTABLE_SPELLS)
    }

    pub fn default_spells(&self) -> &'static [Spell] {
        self.default
    }
    pub fn selectable_spells(&self) -> &'static [Spell] {
        self.selectable
    }

    /// Finds a selectable spell's position, ignoring case.
    pub fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.selectable
            .iter()
            .position(|spell| spell.name.eq_ignore_ascii_case(name))
    }

    /// Names of every spell castable with `rolls`, selected spells first then
    /// the default ones, each group in declaration order.
    ///
    /// Missing flags count as unselected.
    pub fn matching_spells(
        &self,
        rolls: &[i32],
        selection: &[bool],
    ) -> Result<Vec<&'static str>, PredicateError> {
        let selected = self
            .selectable
            .iter()
            .zip(selection.iter().chain(std::iter::repeat(&false)))
            .filter(|(_, enabled)| **enabled)
            .map(|(spell, _)| spell);

        let mut names = Vec::new();
        for spell in selected.chain(self.default) {
            if spell.matches(rolls)? {
                names.push(spell.name);
            }
        }

        debug!(?rolls, matched = names.len(), "evaluated spells");
        Ok(names)
    }
}
