//! Startup settings read from the environment.
use std::env;

use tracing::warn;

use crate::session::{Session, MIN_DICE};

/// Environment variables:
/// - `SPELL_DICE_COUNT` - How many dice to start with (default: 2, minimum: 2)
/// - `SPELL_DICE_SEED` - Seed for reproducible rolls (default: random)
/// - `SPELL_DICE_SPELLS` - Comma separated spells to pick at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub dice_count: usize,
    pub seed: Option<u64>,
    pub spells: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dice_count: MIN_DICE,
            seed: None,
            spells: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(count) = read::<usize>(&lookup, "SPELL_DICE_COUNT") {
            config.dice_count = count.max(MIN_DICE);
        }
        config.seed = read::<u64>(&lookup, "SPELL_DICE_SEED");
        if let Some(spells) = lookup("SPELL_DICE_SPELLS") {
            config.spells = split_names(&spells);
        }

        config
    }

    /// Builds the starting session, skipping spells that don't exist.
    pub fn session(&self) -> Session {
        let mut session = Session::default();
        session.set_dice_count(self.dice_count);

        for name in &self.spells {
            let Some(index) = session.catalog().position(name) else {
                warn!(spell = %name, "ignoring unknown spell");
                continue;
            };
            // Picking a spell twice should not drop it again
            if !session.selection()[index] {
                if let Err(err) = session.toggle(index) {
                    warn!(%err, "could not pick spell");
                }
            }
        }

        session
    }
}

pub fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn read<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = lookup(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, %value, "ignoring unparseable setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn test_reads_values() {
        let config = config_from(&[
            ("SPELL_DICE_COUNT", "4"),
            ("SPELL_DICE_SEED", " 42 "),
            ("SPELL_DICE_SPELLS", "Chaos, might,,"),
        ]);

        assert_eq!(config.dice_count, 4);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.spells, ["Chaos", "might"]);
    }

    #[test]
    fn test_clamps_and_ignores_bad_values() {
        let config = config_from(&[("SPELL_DICE_COUNT", "1"), ("SPELL_DICE_SEED", "soon")]);
        assert_eq!(config.dice_count, 2);
        assert_eq!(config.seed, None);

        let config = config_from(&[("SPELL_DICE_COUNT", "lots")]);
        assert_eq!(config.dice_count, 2);
    }

    #[test]
    fn test_session_picks_spells_once() {
        let config = Config {
            dice_count: 3,
            seed: None,
            spells: vec!["Chaos".into(), "chaos".into(), "Fireball".into(), "Shaping".into()],
        };

        let session = config.session();
        assert_eq!(session.dice_count(), 3);

        let picked: Vec<_> = session
            .selection()
            .iter()
            .enumerate()
            .filter(|&(_, &enabled)| enabled)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(picked, [0, 7]);
    }
}
