use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PredicateError {
    /// Subset and run searches need at least one die to look for.
    #[error("subset size must be positive, got {0}")]
    SubsetSize(usize),
    /// Looking for a single die "of a kind" is meaningless.
    #[error("target number of equal dice must be at least 2, got {0}")]
    TargetCount(usize),
}

/// Returns true if exactly `subset_size` of the values, picked by position,
/// add up to `target_sum`.
///
/// Duplicate values count as separate dice, so `[3, 3]` has a pair summing to 6.
pub fn has_subset_matching_sum(
    values: &[i32],
    subset_size: usize,
    target_sum: i32,
) -> Result<bool, PredicateError> {
    if subset_size < 1 {
        return Err(PredicateError::SubsetSize(subset_size));
    }

    Ok(subset_sum(values, subset_size, target_sum as i64))
}

// Picking positions in increasing order visits every combination exactly once,
// which gives the same answer as removing each position in turn.
fn subset_sum(values: &[i32], subset_size: usize, target_sum: i64) -> bool {
    if subset_size == 1 {
        return values.iter().any(|&v| v as i64 == target_sum);
    }

    values.iter().enumerate().any(|(i, &value)| {
        subset_sum(&values[i + 1..], subset_size - 1, target_sum - value as i64)
    })
}

/// Returns true if `subset_size` of the values form a run of consecutive
/// integers, in any order.
///
/// A run of length 1 is always present, even in an empty roll.
pub fn has_sequential_subset(values: &[i32], subset_size: usize) -> Result<bool, PredicateError> {
    if subset_size < 1 {
        return Err(PredicateError::SubsetSize(subset_size));
    }

    Ok(sequential_subset(values, subset_size, None))
}

fn sequential_subset(values: &[i32], subset_size: usize, sequence_start: Option<i32>) -> bool {
    if subset_size == 1 {
        return sequence_start.map_or(true, |start| values.contains(&start));
    }

    values.iter().any(|&value| {
        if sequence_start.is_some_and(|start| start != value) {
            return false;
        }
        // Every later step looks for a strictly bigger value, so the die picked
        // here can never be picked again and the whole slice can be passed down.
        match value.checked_add(1) {
            Some(next) => sequential_subset(values, subset_size - 1, Some(next)),
            None => false,
        }
    })
}

/// Returns true if any value shows up at least `target_count` times.
pub fn has_equal_values(values: &[i32], target_count: usize) -> Result<bool, PredicateError> {
    if target_count < 2 {
        return Err(PredicateError::TargetCount(target_count));
    }

    let mut counts: HashMap<i32, usize> = HashMap::new();
    for &value in values {
        let count = counts.entry(value).or_insert(0);
        *count += 1;
        if *count == target_count {
            return Ok(true);
        }
    }

    Ok(false)
}
