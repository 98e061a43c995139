use rand::{thread_rng, Rng};
use tracing::debug;

pub const DIE_SIDES: i32 = 6;
/// The first two dice have to add up to at least this for a burning success.
pub const BURNING_SUCCESS_THRESHOLD: i32 = 11;

/// The values shown by the dice of a single roll, in the order they were rolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollSequence {
    values: Vec<i32>,
}

impl RollSequence {
    pub fn new(values: Vec<i32>) -> Self {
        Self { values }
    }

    /// Rolls `count` six sided dice.
    /// Uses rand::thread_rng(), if you want to choose the rng yourself use `roll_with()`
    pub fn roll(count: usize) -> Self {
        Self::roll_with(count, &mut thread_rng())
    }

    /// Rolls `count` six sided dice with the rng specified.
    pub fn roll_with(count: usize, rng: &mut impl Rng) -> Self {
        let values: Vec<i32> = (0..count).map(|_| rng.gen_range(1..=DIE_SIDES)).collect();
        debug!(?values, "rolled dice");

        Self { values }
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.values.iter().map(|&v| v as i64).sum()
    }

    /// Purely cosmetic, only the first two dice count.
    pub fn is_burning_success(&self) -> bool {
        match self.values[..] {
            [first, second, ..] => {
                first as i64 + second as i64 >= BURNING_SUCCESS_THRESHOLD as i64
            }
            _ => false,
        }
    }

    /// The values separated by a single space, `5 6 2`.
    pub fn to_plain(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Vec<i32>> for RollSequence {
    fn from(values: Vec<i32>) -> Self {
        Self::new(values)
    }
}

impl std::fmt::Display for RollSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = self
            .values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{str}]")
    }
}
