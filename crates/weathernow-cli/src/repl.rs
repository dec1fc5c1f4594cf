//! Interactive line-based session.
//!
//! Each input line replaces the query text. Network completions are applied
//! as they arrive, interleaved with input on the same thread.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use weathernow_session::{Completions, SessionDriver};

use crate::render;

const HELP: &str = "Type a city name to see suggestions.
  /pick N   choose suggestion N
  /go       look up the current text (an empty line does the same)
  /quit     exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Edit(String),
    Submit,
    Pick(usize),
    Help,
    Quit,
}

fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Command::Submit;
    }

    let Some(command) = line.strip_prefix('/') else {
        return Command::Edit(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("go"), None) => Command::Submit,
        (Some("quit" | "q"), None) => Command::Quit,
        (Some("pick"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Pick(n - 1),
            _ => Command::Help,
        },
        _ => Command::Help,
    }
}

fn show(driver: &SessionDriver) {
    let text = render::render_state(driver.state());
    if !text.is_empty() {
        println!("{}\n", text);
    }
}

pub async fn run(mut driver: SessionDriver, mut completions: Completions) -> Result<()> {
    println!("Weather Now");
    println!("Check the current weather for any city\n");
    println!("{}\n", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    // Input closed: let outstanding lookups finish first
                    driver.settle(&mut completions).await;
                    show(&driver);
                    break;
                };

                match parse_line(&line) {
                    Command::Edit(text) => driver.on_query_change(text),
                    Command::Submit => {
                        driver.on_submit();
                        show(&driver);
                    }
                    Command::Pick(index) => {
                        if driver.pick_suggestion(index) {
                            println!("Selected {}\n", driver.state().query());
                        } else {
                            println!("No suggestion {}\n", index + 1);
                        }
                    }
                    Command::Help => println!("{}\n", HELP),
                    Command::Quit => break,
                }
            }
            Some(completion) = completions.recv() => {
                if driver.complete(completion) {
                    show(&driver);
                }
            }
        }
    }

    tracing::debug!("Interactive session ended");
    Ok(())
}
