//! Headless line protocol.
//!
//! Reads one command per line and answers each with one JSON line:
//!
//! ```text
//! pick <row> <col>                  first or second pick of a swap
//! swap <row> <col> <row> <col>      swap two cells directly
//! hint                              first available move
//! show                              board and score
//! expire                            end the game (time up)
//! restart                           new board, score back to zero
//! quit                              stop reading
//! ```
//!
//! An accepted swap is followed by one `wave` line per cascade wave. Blank
//! lines and lines starting with `#` are skipped. A bad command gets an
//! `error` reply and the driver carries on.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::config::AppConfig;
use crate::core::{
    EngineConfig, Grid, Hint, PickOutcome, ResolutionStep, Session, SessionSnapshot, SwapOutcome,
    TileSource,
};
use crate::event_log::{EventLog, LogEvent};
use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptConfig {
    pub engine: EngineConfig,
    pub seed: u32,
}

/// Parse `script [--seed N] [--size N] [--kinds N] [--min-run N]`.
///
/// Returns `Ok(None)` when the first argument is not `script`. Unset flags
/// keep the values from `base`.
pub fn parse_script_args(args: &[String], base: &AppConfig) -> Result<Option<ScriptConfig>> {
    if args.is_empty() || args[0] != "script" {
        return Ok(None);
    }

    let mut config = ScriptConfig {
        engine: base.engine,
        seed: base.seed,
    };
    let mut i = 1usize;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let v = args
            .get(i)
            .ok_or_else(|| anyhow!("script: missing value for {}", flag))?;
        match flag {
            "--seed" => {
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("script: invalid --seed value: {}", v))?;
            }
            "--size" => {
                config.engine.grid_size = parse_small(flag, v)?;
            }
            "--kinds" => {
                config.engine.tile_kinds = parse_small(flag, v)?;
            }
            "--min-run" => {
                config.engine.min_run = parse_small(flag, v)?;
            }
            other => {
                return Err(anyhow!("script: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Some(config))
}

fn parse_small(flag: &str, v: &str) -> Result<u8> {
    v.parse::<u8>()
        .map_err(|_| anyhow!("script: invalid {} value: {}", flag, v))
}

/// One parsed input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pick(Position),
    Swap(Position, Position),
    Hint,
    Show,
    Expire,
    Restart,
    Quit,
}

/// Parse one line. Positions are checked against a `size` x `size` board.
pub fn parse_command(line: &str, size: u8) -> Result<Command> {
    let mut words = line.split_whitespace();
    let name = words.next().ok_or_else(|| anyhow!("empty command"))?;
    let args: Vec<&str> = words.collect();

    let expect_args = |n: usize| -> Result<()> {
        if args.len() == n {
            Ok(())
        } else {
            Err(anyhow!("{}: expected {} arguments, got {}", name, n, args.len()))
        }
    };
    let pos = |i: usize| -> Result<Position> {
        let row = parse_coord(name, args[i], size)?;
        let col = parse_coord(name, args[i + 1], size)?;
        Ok(Position::new(row, col))
    };

    match name {
        "pick" => {
            expect_args(2)?;
            Ok(Command::Pick(pos(0)?))
        }
        "swap" => {
            expect_args(4)?;
            Ok(Command::Swap(pos(0)?, pos(2)?))
        }
        "hint" | "show" | "expire" | "restart" | "quit" => {
            expect_args(0)?;
            Ok(match name {
                "hint" => Command::Hint,
                "show" => Command::Show,
                "expire" => Command::Expire,
                "restart" => Command::Restart,
                _ => Command::Quit,
            })
        }
        other => Err(anyhow!("unknown command: {}", other)),
    }
}

fn parse_coord(name: &str, v: &str, size: u8) -> Result<u8> {
    let n = v
        .parse::<u8>()
        .map_err(|_| anyhow!("{}: invalid coordinate: {}", name, v))?;
    if n >= size {
        return Err(anyhow!(
            "{}: coordinate {} is outside the {}x{} grid",
            name,
            n,
            size,
            size
        ));
    }
    Ok(n)
}

/// One output line
#[derive(Debug, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum ScriptReply<'a> {
    Pick {
        #[serde(flatten)]
        outcome: &'a PickOutcome,
        score: u32,
    },
    Swap {
        from: Position,
        to: Position,
        #[serde(flatten)]
        outcome: &'a SwapOutcome,
        score: u32,
    },
    Wave(&'a ResolutionStep),
    Hint {
        hint: Option<Hint>,
    },
    Show {
        grid: &'a Grid,
        stuck: bool,
        #[serde(flatten)]
        snapshot: &'a SessionSnapshot,
    },
    Expired {
        score: u32,
        best_chain: u32,
    },
    Restart {
        episode_id: u32,
        grid: &'a Grid,
    },
    Ignored {
        command: &'static str,
    },
    Error {
        message: String,
    },
}

fn emit(out: &mut impl Write, reply: &ScriptReply<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, reply)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Run commands from `input` against `session` until `quit` or end of input.
pub fn run_script<S: TileSource>(
    session: &mut Session<S>,
    input: impl BufRead,
    mut out: impl Write,
    log: &mut EventLog,
) -> Result<()> {
    log_session_start(session, log);

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match parse_command(line, session.grid().size()) {
            Ok(command) => command,
            Err(e) => {
                emit(
                    &mut out,
                    &ScriptReply::Error {
                        message: e.to_string(),
                    },
                )?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        execute(session, command, &mut out, log)?;
        out.flush()?;
    }

    out.flush()?;
    Ok(())
}

fn execute<S: TileSource>(
    session: &mut Session<S>,
    command: Command,
    out: &mut impl Write,
    log: &mut EventLog,
) -> Result<()> {
    match command {
        Command::Pick(pos) => {
            let outcome = session.pick(pos);
            if let PickOutcome::Swapped {
                from,
                to,
                outcome: swap,
            } = &outcome
            {
                log.record(
                    session.episode_id(),
                    LogEvent::Swap {
                        from: *from,
                        to: *to,
                        outcome: swap,
                    },
                );
            }
            emit(
                out,
                &ScriptReply::Pick {
                    outcome: &outcome,
                    score: session.score(),
                },
            )?;
            if outcome.needs_resolve() {
                resolve_and_emit(session, out, log)?;
            }
        }
        Command::Swap(from, to) => match session.try_swap(from, to) {
            Some(outcome) => {
                log.record(
                    session.episode_id(),
                    LogEvent::Swap {
                        from,
                        to,
                        outcome: &outcome,
                    },
                );
                emit(
                    out,
                    &ScriptReply::Swap {
                        from,
                        to,
                        outcome: &outcome,
                        score: session.score(),
                    },
                )?;
                if outcome.is_accepted() {
                    resolve_and_emit(session, out, log)?;
                }
            }
            None => emit(out, &ScriptReply::Ignored { command: "swap" })?,
        },
        Command::Hint => {
            let hint = session.hint();
            log.record(session.episode_id(), LogEvent::Hint { hint });
            emit(out, &ScriptReply::Hint { hint })?;
        }
        Command::Show => {
            let snapshot = session.snapshot();
            emit(
                out,
                &ScriptReply::Show {
                    grid: session.grid(),
                    stuck: session.is_stuck(),
                    snapshot: &snapshot,
                },
            )?;
        }
        Command::Expire => {
            session.expire();
            let (score, best_chain) = (session.score(), session.ledger().best_chain());
            log.record(session.episode_id(), LogEvent::Expired { score, best_chain });
            emit(out, &ScriptReply::Expired { score, best_chain })?;
        }
        Command::Restart => {
            session.restart();
            log_session_start(session, log);
            emit(
                out,
                &ScriptReply::Restart {
                    episode_id: session.episode_id(),
                    grid: session.grid(),
                },
            )?;
        }
        Command::Quit => {}
    }
    Ok(())
}

fn resolve_and_emit<S: TileSource>(
    session: &mut Session<S>,
    out: &mut impl Write,
    log: &mut EventLog,
) -> Result<()> {
    let episode_id = session.episode_id();
    for step in session.resolve() {
        log.record(
            episode_id,
            LogEvent::Wave {
                chain_index: step.chain_index,
                matched: &step.matched,
                score_gained: step.score_gained,
                total_score: step.total_score,
            },
        );
        emit(out, &ScriptReply::Wave(&step))?;
    }
    Ok(())
}

fn log_session_start<S: TileSource>(session: &Session<S>, log: &mut EventLog) {
    log.record(
        session.episode_id(),
        LogEvent::SessionStart {
            seed: session.seed(),
            config: session.config(),
            grid: session.grid(),
        },
    );
}
