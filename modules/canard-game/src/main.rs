use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ai_client::OpenAi;
use canard_common::{CanardError, Config, Fact};
use canard_game::acquirer::FactAcquirer;
use canard_game::session::{GameOutcome, GameSession, GameState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("canard=info".parse()?)
                .add_directive("canard_game=info".parse()?)
                .add_directive("canard_common=info".parse()?),
        )
        .init();

    info!("Canard starting...");

    // Load config
    let config = Config::from_env();
    config.log_redacted();

    let mut client = OpenAi::new(&config.openai_api_key, &config.model);
    if let Some(ref url) = config.openai_base_url {
        client = client.with_base_url(url);
    }

    let acquirer = FactAcquirer::new(Arc::new(client));

    println!("Fetching facts, this can take a moment...");
    let pool = match acquirer.acquire_initial_facts().await {
        Ok(pool) => pool,
        Err(CanardError::InsufficientFacts {
            true_count,
            false_count,
        }) => {
            error!(true_count, false_count, "Not enough facts to start the game");
            eprintln!(
                "Could not fetch enough facts to start the game \
                 (got {true_count} true and {false_count} false). Try again later."
            );
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let mut session = GameSession::new();
    session.start(pool);

    let stdin = io::stdin();

    while let Some(facts) = session.next_round() {
        let round = session.current_round().unwrap_or(0);
        println!();
        println!("Round {round}: which one is the canard?");
        for (i, fact) in facts.iter().enumerate() {
            println!("  {}) {}", i + 1, fact.statement);
        }

        let chosen = prompt_choice(&stdin, &facts);
        let delta = session.resolve_round(chosen);
        if delta > 0 {
            println!("Correct! That one was false. ({delta:+})");
        } else {
            println!("That one was true. ({delta:+})");
        }
        println!("Score: {}", session.score());
    }

    println!();
    if matches!(
        session.state(),
        GameState::GameOver {
            outcome: GameOutcome::PoolExhausted
        }
    ) {
        println!("Not enough facts left to continue. Ending the game early.");
    }
    println!("GAME OVER! Final score: {}", session.score());

    Ok(())
}

/// Read a 1-based choice from stdin, re-prompting until it parses.
fn prompt_choice<'a>(stdin: &io::Stdin, facts: &'a [Fact]) -> &'a Fact {
    loop {
        print!("Your pick [1-{}]: ", facts.len());
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            println!();
            println!("Input closed. Ending the game.");
            std::process::exit(0);
        }

        match line.trim().parse::<usize>() {
            Ok(n) if (1..=facts.len()).contains(&n) => return &facts[n - 1],
            _ => println!("Enter a number between 1 and {}.", facts.len()),
        }
    }
}
