use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use spell_dice::{
    command::{parse_rolls, Command, HELP},
    config::{split_names, Config},
};

/// Roll dice and find out which spells you can cast
#[derive(Parser)]
#[command(name = "spell-dice")]
#[command(version, about, long_about = None)]
struct Cli {
    /// How many dice to roll (at least 2)
    #[arg(short, long)]
    dice: Option<usize>,

    /// Seed for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Spell to pick, can be repeated or comma separated
    #[arg(short, long = "spell")]
    spells: Vec<String>,

    /// Check these values instead of rolling, then exit
    #[arg(long, conflicts_with = "once")]
    rolls: Option<String>,

    /// Roll once, show the result and exit
    #[arg(long)]
    once: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(dice) = cli.dice {
        config.dice_count = dice;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if !cli.spells.is_empty() {
        config.spells = cli.spells.iter().flat_map(|s| split_names(s)).collect();
    }

    let mut session = config.session();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(rolls) = cli.rolls {
        let values = parse_rolls(&rolls).map_err(anyhow::Error::msg)?;
        println!("{}", Command::Set(values).execute(&mut session, &mut rng)?);
        return Ok(());
    }
    if cli.once {
        println!("{}", Command::Roll.execute(&mut session, &mut rng)?);
        return Ok(());
    }

    run_interactive(&mut session, &mut rng)
}

fn run_interactive(session: &mut spell_dice::Session, rng: &mut StdRng) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{HELP}");
    println!("dice count: {}", session.dice_count());

    loop {
        print!("> ");
        stdout.flush().context("failed to write prompt")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("failed to read command")? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        match command.execute(session, rng) {
            Ok(reply) => println!("{reply}"),
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}
