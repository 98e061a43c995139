use rand::Rng;
use winnow::{
    ascii::{dec_int, dec_uint, multispace0, multispace1, space1},
    combinator::{alt, cut_err, delimited, eof, preceded, separated, terminated},
    error::{
        StrContext::{Expected, Label},
        StrContextValue::Description,
    },
    token::rest,
    PResult, Parser,
};

use crate::session::{Session, SessionError};

pub const HELP: &str = "\
commands:
  roll, r               roll the dice
  +, more               add a die
  -, less               remove a die (at least 2)
  toggle, t <n|name>    pick or drop a spell
  set <v> <v> ...       use these values instead of rolling
  spells, ls            list the spells you can pick
  help, ?               show this message
  quit, q, exit         leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Roll,
    More,
    Less,
    Toggle(SpellRef),
    Set(Vec<i32>),
    Spells,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpellRef {
    /// Position as listed by `spells`, starting from 1.
    Number(usize),
    Name(String),
}

impl Command {
    pub fn parse(input: &str) -> Result<Command, String> {
        delimited(multispace0, parse_command, multispace0)
            .parse(input)
            .map_err(|e| e.to_string())
    }

    /// Applies the command to the session and returns what should be shown
    /// to the player. `Quit` does nothing, leaving is up to the caller.
    pub fn execute(
        &self,
        session: &mut Session,
        rng: &mut impl Rng,
    ) -> Result<String, SessionError> {
        let reply = match self {
            Command::Roll => {
                session.roll_with(rng);
                match session.outcome()? {
                    Some(outcome) => outcome.to_string(),
                    None => String::new(),
                }
            }
            Command::More => {
                session.increment();
                format!("dice count: {}", session.dice_count())
            }
            Command::Less => {
                if !session.decrement() {
                    return Ok(format!("dice count: {} (minimum)", session.dice_count()));
                }
                format!("dice count: {}", session.dice_count())
            }
            Command::Toggle(spell) => {
                let index = match spell {
                    SpellRef::Number(number) => number
                        .checked_sub(1)
                        .ok_or(SessionError::UnknownSpellIndex(0))?,
                    SpellRef::Name(name) => session
                        .catalog()
                        .position(name)
                        .ok_or_else(|| SessionError::UnknownSpellName(name.clone()))?,
                };
                let state = if session.toggle(index)? { "on" } else { "off" };
                format!("{}: {state}", session.catalog().selectable_spells()[index].name())
            }
            Command::Set(values) => {
                session.set_rolls(values.clone());
                match session.outcome()? {
                    Some(outcome) => outcome.to_string(),
                    None => String::new(),
                }
            }
            Command::Spells => list_spells(session),
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        };

        Ok(reply)
    }
}

fn list_spells(session: &Session) -> String {
    session
        .catalog()
        .selectable_spells()
        .iter()
        .zip(session.selection())
        .enumerate()
        .map(|(i, (spell, &enabled))| {
            let mark = if enabled { 'x' } else { ' ' };
            format!("{:>2}. [{mark}] {spell}", i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses roll values separated by spaces and/or commas, `1 5 6` or `1,5,6`.
pub fn parse_rolls(input: &str) -> Result<Vec<i32>, String> {
    delimited(multispace0, roll_values, multispace0)
        .parse(input)
        .map_err(|e| e.to_string())
}

fn parse_command(input: &mut &str) -> PResult<Command> {
    alt((
        alt(("roll", "r")).value(Command::Roll),
        alt(("+", "more")).value(Command::More),
        alt(("-", "less")).value(Command::Less),
        preceded((alt(("toggle", "t")), space1), cut_err(spell_ref)).map(Command::Toggle),
        preceded(("set", space1), cut_err(roll_values)).map(Command::Set),
        alt(("spells", "ls")).value(Command::Spells),
        alt(("help", "?")).value(Command::Help),
        alt(("quit", "exit", "q")).value(Command::Quit),
    ))
    .context(Label("command"))
    .parse_next(input)
}

fn spell_ref(input: &mut &str) -> PResult<SpellRef> {
    alt((
        terminated(dec_uint, (multispace0, eof)).map(SpellRef::Number),
        rest.verify(|name: &str| !name.trim().is_empty())
            .map(|name: &str| SpellRef::Name(name.trim().to_string())),
    ))
    .context(Expected(Description("spell number or name")))
    .parse_next(input)
}

fn roll_values(input: &mut &str) -> PResult<Vec<i32>> {
    separated(1.., dec_int::<_, i32, _>, roll_separator)
        .context(Expected(Description("roll values")))
        .parse_next(input)
}

fn roll_separator(input: &mut &str) -> PResult<()> {
    alt(((multispace0, ',', multispace0).void(), multispace1.void())).parse_next(input)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn test_parse_keywords() {
        let inputs = [
            ("roll", Command::Roll),
            ("r", Command::Roll),
            ("  roll  ", Command::Roll),
            ("+", Command::More),
            ("more", Command::More),
            ("-", Command::Less),
            ("less", Command::Less),
            ("spells", Command::Spells),
            ("ls", Command::Spells),
            ("help", Command::Help),
            ("?", Command::Help),
            ("quit", Command::Quit),
            ("q", Command::Quit),
            ("exit", Command::Quit),
        ];

        for (input, expected) in inputs {
            assert_eq!(Command::parse(input), Ok(expected), "{input:?}");
        }
    }

    #[test]
    fn test_parse_toggle() {
        assert_eq!(
            Command::parse("toggle 4"),
            Ok(Command::Toggle(SpellRef::Number(4)))
        );
        assert_eq!(
            Command::parse("t Chthonic Being "),
            Ok(Command::Toggle(SpellRef::Name("Chthonic Being".to_string())))
        );
        assert_eq!(
            Command::parse("toggle 4th"),
            Ok(Command::Toggle(SpellRef::Name("4th".to_string())))
        );
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(Command::parse("set 1 5 6"), Ok(Command::Set(vec![1, 5, 6])));
        assert_eq!(Command::parse("set 1, 5,6"), Ok(Command::Set(vec![1, 5, 6])));
        assert_eq!(Command::parse("set -2 0"), Ok(Command::Set(vec![-2, 0])));
    }

    #[test]
    fn test_parse_errors() {
        for input in ["", "rolls", "roll 3", "set", "set a b", "toggle", "toggle  ", "dance"] {
            assert!(Command::parse(input).is_err(), "{input:?}");
        }
    }

    #[test]
    fn test_parse_rolls() {
        assert_eq!(parse_rolls("3 4"), Ok(vec![3, 4]));
        assert_eq!(parse_rolls(" 6,6 ,1 "), Ok(vec![6, 6, 1]));
        assert!(parse_rolls("").is_err());
        assert!(parse_rolls("6,,6").is_err());
    }

    #[test]
    fn test_execute_set() {
        let mut session = Session::default();

        let reply = Command::Set(vec![3, 3])
            .execute(&mut session, &mut test_rng())
            .unwrap();
        assert_eq!(
            reply,
            "3 3\ncan use:\n- Enchant\n- Light and Shadow\n- Metamorphosis"
        );
    }

    #[test]
    fn test_execute_roll() {
        let mut session = Session::default();
        session.increment();

        Command::Roll.execute(&mut session, &mut test_rng()).unwrap();
        assert_eq!(session.last_rolls().map(|rolls| rolls.len()), Some(3));
    }

    #[test]
    fn test_execute_dice_count() {
        let mut session = Session::default();
        let mut rng = test_rng();

        assert_eq!(
            Command::Less.execute(&mut session, &mut rng),
            Ok("dice count: 2 (minimum)".to_string())
        );
        assert_eq!(
            Command::More.execute(&mut session, &mut rng),
            Ok("dice count: 3".to_string())
        );
        assert_eq!(
            Command::Less.execute(&mut session, &mut rng),
            Ok("dice count: 2".to_string())
        );
    }

    #[test]
    fn test_execute_toggle() {
        let mut session = Session::default();
        let mut rng = test_rng();

        assert_eq!(
            Command::Toggle(SpellRef::Number(1)).execute(&mut session, &mut rng),
            Ok("Chaos: on".to_string())
        );
        assert_eq!(
            Command::Toggle(SpellRef::Name("chaos".to_string())).execute(&mut session, &mut rng),
            Ok("Chaos: off".to_string())
        );
        assert_eq!(
            Command::Toggle(SpellRef::Number(0)).execute(&mut session, &mut rng),
            Err(SessionError::UnknownSpellIndex(0))
        );
        assert_eq!(
            Command::Toggle(SpellRef::Number(11)).execute(&mut session, &mut rng),
            Err(SessionError::UnknownSpellIndex(10))
        );
    }

    #[test]
    fn test_execute_spells() {
        let mut session = Session::default();
        session.toggle(1).unwrap();

        let reply = Command::Spells.execute(&mut session, &mut test_rng()).unwrap();
        let lines: Vec<_> = reply.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], " 1. [ ] Chaos (2 dice summing to 2)");
        assert_eq!(lines[1], " 2. [x] Scrying (2 dice summing to 8)");
        assert_eq!(lines[9], "10. [ ] Chthonic Being (2 or more 1s)");
    }
}
