//! bg: CLI for the backgammon rules engine.
//!
//! Subcommands:
//! - sim: random-policy self-play with summary stats and NDJSON logs

use std::env;
use std::path::PathBuf;
use std::process;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use bg_core::{
    apply_move, destinations_from, movable_sources, remaining_dice, winner, Board, Color,
    MoveOutcome, SimConfig, Source, Status, To, TurnContext, UsedDie, RULESET_ID,
};

/// Turn cap per game; random play that runs this long is reported as
/// unfinished instead of looping forever.
const MAX_TURNS: u32 = 10_000;

struct GameLoggers {
    moves: bg_logging::NdjsonWriter,
    games: bg_logging::NdjsonWriter,
}

struct GameReport {
    winner: Option<Color>,
    moves_applied: u32,
    hits: u32,
}

/// One step of travel for the active color.
fn advance(color: Color, pos: usize, die: u8) -> usize {
    match color {
        Color::White => pos + die as usize,
        Color::Black => pos - die as usize,
    }
}

fn log_move(
    loggers: &mut GameLoggers,
    game_id: u64,
    ply: u32,
    color: Color,
    board: &Board,
    label: &str,
    die: u8,
) {
    let event = bg_logging::MoveEventV1 {
        event: "move",
        ts_ms: bg_logging::now_ms(),
        ruleset_id: RULESET_ID,
        game_id,
        ply,
        color: color.name(),
        label: label.to_string(),
        die,
        dice: board.dice.as_slice().to_vec(),
        points: board.points,
        bar: board.bar,
        off: board.off,
    };
    if let Err(e) = loggers.moves.write_event(&event) {
        eprintln!("Failed to write move event: {e:?}");
        process::exit(1);
    }
}

/// Play one game of random-policy self-play through the engine.
fn play_game(
    game_id: u64,
    ctx: &mut TurnContext,
    policy: &mut ChaCha8Rng,
    mut loggers: Option<&mut GameLoggers>,
) -> GameReport {
    let mut board = Board::start();
    let (mut color, opening_dice) = ctx.opening();
    board.turn = Some(color);
    board.dice = opening_dice;
    board.status = Status::Moving;

    let mut moves_applied = 0u32;
    let mut hits = 0u32;

    'game: for _turn in 0..MAX_TURNS {
        let mut used: Vec<UsedDie> = Vec::new();
        'turn: loop {
            let rem = remaining_dice(&board.dice, &used);
            if rem.is_empty() {
                break;
            }

            // Single-die steps for this iteration: bar entry, or the
            // cheapest path toward a randomly chosen destination.
            let steps: Vec<(Source, To)> = if board.bar_count(color) > 0 {
                let dests = destinations_from(&board, color, &rem, Source::Bar(color));
                if dests.is_empty() {
                    break; // entry is blocked, forfeit the rest of the turn
                }
                let d = &dests[policy.gen_range(0..dests.len())];
                vec![(Source::Bar(color), d.to)]
            } else {
                let sources: Vec<usize> = movable_sources(&board, color, &rem).into_iter().collect();
                if sources.is_empty() {
                    break; // no legal play with the remaining dice
                }
                let from = sources[policy.gen_range(0..sources.len())];
                let dests = destinations_from(&board, color, &rem, Source::Point(from));
                let dest = &dests[policy.gen_range(0..dests.len())];
                let mut steps = Vec::with_capacity(dest.dice.len());
                let mut pos = from;
                for (i, &die) in dest.dice.iter().enumerate() {
                    let last = i + 1 == dest.dice.len();
                    let to = match dest.to {
                        To::Off if last => To::Off,
                        _ => To::Point(advance(color, pos, die)),
                    };
                    steps.push((Source::Point(pos), to));
                    if let To::Point(p) = to {
                        pos = p;
                    }
                }
                steps
            };

            for (from, to) in steps {
                let rem = remaining_dice(&board.dice, &used);
                let outcome = apply_move(&board, color, from, to, &rem).unwrap_or_else(|e| {
                    eprintln!("Engine rejected structurally invalid input: {e}");
                    process::exit(1);
                });
                match outcome {
                    MoveOutcome::Applied(applied) => {
                        board = applied.board;
                        moves_applied += 1;
                        if applied.label.ends_with('*') {
                            hits += 1;
                        }
                        if let Some(loggers) = loggers.as_deref_mut() {
                            log_move(
                                loggers,
                                game_id,
                                moves_applied,
                                color,
                                &board,
                                &applied.label,
                                applied.die,
                            );
                        }
                        used.push(UsedDie {
                            value: applied.die,
                            label: applied.label,
                        });
                    }
                    // Enumerated moves apply cleanly; treat a rejection as
                    // the end of the turn rather than trusting this path.
                    MoveOutcome::Rejected => break 'turn,
                }
                if board.status == Status::GameOver {
                    break 'game;
                }
            }
        }
        color = color.opponent();
        board.turn = Some(color);
        board.dice = ctx.next_turn();
    }

    let report = GameReport {
        winner: winner(&board),
        moves_applied,
        hits,
    };
    if let Some(loggers) = loggers.as_deref_mut() {
        let event = bg_logging::GameResultEventV1 {
            event: "game_result",
            ts_ms: bg_logging::now_ms(),
            ruleset_id: RULESET_ID,
            game_id,
            plies: report.moves_applied,
            winner: report.winner.map(Color::name).unwrap_or("unfinished"),
            hits: report.hits,
            white_off: board.off_count(Color::White),
            black_off: board.off_count(Color::Black),
        };
        if let Err(e) = loggers.games.write_event(&event) {
            eprintln!("Failed to write game result event: {e:?}");
            process::exit(1);
        }
    }
    report
}

fn cmd_sim(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut games: Option<u32> = None;
    let mut seed: Option<u64> = None;
    let mut rng_mode = false;
    let mut out: Option<String> = None;
    let mut log_flush_every: Option<u64> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"bg sim

USAGE:
    bg sim [--config cfg.yaml] [--games N] [--seed S] [--rng] [--out DIR] [--log-flush-every N]

OPTIONS:
    --config PATH         Path to YAML config
    --games N             Number of games to play (default: 100)
    --seed S              Base seed for dice generation (default: 0)
    --rng                 Use a per-game PRNG dice stream instead of the
                          event-keyed deterministic stream
    --out DIR             Write match.json plus NDJSON logs under DIR
    --log-flush-every N   Flush NDJSON logs every N lines (0 disables)
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(args.get(i + 1).cloned().unwrap_or_default());
                i += 2;
            }
            "--games" => {
                games = Some(parse_flag(args, i, "--games"));
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_flag(args, i, "--seed"));
                i += 2;
            }
            "--rng" => {
                rng_mode = true;
                i += 1;
            }
            "--out" => {
                out = Some(args.get(i + 1).cloned().unwrap_or_default());
                i += 2;
            }
            "--log-flush-every" => {
                log_flush_every = Some(parse_flag(args, i, "--log-flush-every"));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `bg sim`: {}", other);
                eprintln!("Run `bg sim --help` for usage.");
                process::exit(1);
            }
        }
    }

    let mut cfg = match &config_path {
        Some(path) => SimConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }),
        None => SimConfig::default(),
    };
    if let Some(games) = games {
        cfg.games = games;
    }
    if let Some(seed) = seed {
        cfg.seed = seed;
    }
    if rng_mode {
        cfg.deterministic_chance = false;
    }
    if let Some(n) = log_flush_every {
        cfg.log_flush_every = n;
    }

    let mut loggers: Option<GameLoggers> = None;
    let mut manifest: Option<(PathBuf, bg_logging::MatchManifestV1)> = None;
    if let Some(out) = &out {
        let out_dir = PathBuf::from(out);
        let logs_dir = out_dir.join("logs");
        std::fs::create_dir_all(&logs_dir).unwrap_or_else(|e| {
            eprintln!("Failed to create logs dir: {e}");
            process::exit(1);
        });

        let config_hash = config_path.as_ref().and_then(|p| {
            std::fs::read(p)
                .ok()
                .map(|bytes| bg_logging::hash_config_bytes(&bytes))
        });
        let match_id = out_dir
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(out)
            .to_string();
        let m = bg_logging::MatchManifestV1 {
            match_manifest_version: bg_logging::MATCH_MANIFEST_VERSION,
            match_id,
            created_ts_ms: bg_logging::now_ms(),
            ruleset_id: RULESET_ID.to_string(),
            git_hash: bg_logging::try_git_hash(),
            config_hash,
            logs_dir: "logs".to_string(),
            games_completed: 0,
            white_wins: 0,
            black_wins: 0,
        };
        let match_json = out_dir.join("match.json");
        bg_logging::write_manifest_atomic(&match_json, &m).unwrap_or_else(|e| {
            eprintln!("Failed to write match manifest: {e:?}");
            process::exit(1);
        });
        manifest = Some((match_json, m));

        let open = |name: &str| {
            bg_logging::NdjsonWriter::open_append_with_flush(logs_dir.join(name), cfg.log_flush_every)
                .unwrap_or_else(|e| {
                    eprintln!("Failed to create {name}: {e:?}");
                    process::exit(1);
                })
        };
        loggers = Some(GameLoggers {
            moves: open("moves.ndjson"),
            games: open("games.ndjson"),
        });
    }

    let mut policy = ChaCha8Rng::seed_from_u64(cfg.seed ^ 0x5EED_0D1C_E000_0001);
    let mut white_wins = 0u64;
    let mut black_wins = 0u64;
    let mut unfinished = 0u64;
    let mut total_moves = 0u64;
    let mut total_hits = 0u64;

    for game_id in 0..cfg.games as u64 {
        let mut ctx = if cfg.deterministic_chance {
            TurnContext::new_event_keyed(cfg.seed, game_id)
        } else {
            TurnContext::new_rng(cfg.seed ^ game_id)
        };
        let report = play_game(game_id, &mut ctx, &mut policy, loggers.as_mut());
        match report.winner {
            Some(Color::White) => white_wins += 1,
            Some(Color::Black) => black_wins += 1,
            None => unfinished += 1,
        }
        total_moves += report.moves_applied as u64;
        total_hits += report.hits as u64;

        if let Some((match_json, m)) = manifest.as_mut() {
            m.games_completed = game_id + 1;
            m.white_wins = white_wins;
            m.black_wins = black_wins;
            if (game_id + 1) % 10 == 0 || game_id + 1 == cfg.games as u64 {
                let _ = bg_logging::write_manifest_atomic(match_json.as_path(), m);
            }
        }
    }

    if let Some(loggers) = loggers.as_mut() {
        let _ = loggers.moves.flush();
        let _ = loggers.games.flush();
    }

    let games = cfg.games.max(1) as f64;
    println!("Simulation:");
    println!("  - Games: {} (unfinished: {})", cfg.games, unfinished);
    println!(
        "  - White wins: {} ({:.1}%)",
        white_wins,
        white_wins as f64 / games * 100.0
    );
    println!(
        "  - Black wins: {} ({:.1}%)",
        black_wins,
        black_wins as f64 / games * 100.0
    );
    println!("  - Moves per game: {:.1}", total_moves as f64 / games);
    println!("  - Hits per game: {:.2}", total_hits as f64 / games);
}

fn parse_flag<T: std::str::FromStr>(args: &[String], i: usize, name: &str) -> T {
    args.get(i + 1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("Invalid or missing value for {name}");
            process::exit(1);
        })
}

fn print_help() {
    eprintln!(
        r#"bg - backgammon rules engine CLI

USAGE:
    bg <COMMAND> [OPTIONS]

COMMANDS:
    sim                 Run random-policy self-play games

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version

Run `bg <COMMAND> --help` for command usage.
"#
    );
}

fn print_version() {
    println!("bg {}", env!("CARGO_PKG_VERSION"));
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(0);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
        }
        "-V" | "--version" => {
            print_version();
        }
        "sim" => {
            cmd_sim(&args[2..]);
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Run `bg --help` for usage.");
            process::exit(1);
        }
    }
}
