// src/main.rs
//! Line-oriented demo front end. It owns the turn order and prompts; every
//! rule decision is delegated to `chess_rules::Board`.

use chess_rules::history;
use chess_rules::{Board, Color, Config, GameStatus, MoveError, Piece, PieceKind, PromotionHook, Square};
use lazy_static::lazy_static;
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::error::Error;
use std::io::{self, Write};

lazy_static! {
    // e2e4, e2-e4, "e2 e4", e7e8q
    static ref MOVE_RE: Regex = Regex::new(r"^([a-h][1-8])\s*-?\s*([a-h][1-8])([qrbn])?$")
        .expect("move pattern is valid");
}

// --- Input Parsing ---

#[derive(Debug)]
enum UserInput {
    Move { from: Square, to: Square, promotion: Option<PieceKind> },
    Command(Command),
}

#[derive(Debug)]
enum Command {
    Moves(Square), Undo, Random, Help, Quit,
    Save(Option<String>),
    Load(String),
}

fn parse_user_input(input: &str) -> Result<UserInput, String> {
    let trimmed = input.trim().to_lowercase();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command_word = parts.next().unwrap_or("");
    let argument = parts.next().unwrap_or("").trim();

    match command_word {
        "moves" => {
            return Square::from_algebraic(argument)
                .map(|sq| UserInput::Command(Command::Moves(sq)))
                .ok_or_else(|| format!("Invalid square: '{}'", argument));
        }
        "undo" => return Ok(UserInput::Command(Command::Undo)),
        "random" => return Ok(UserInput::Command(Command::Random)),
        "help" | "?" => return Ok(UserInput::Command(Command::Help)),
        "quit" | "exit" => return Ok(UserInput::Command(Command::Quit)),
        "save" => {
            let file = (!argument.is_empty()).then(|| argument.to_string());
            return Ok(UserInput::Command(Command::Save(file)));
        }
        "load" if !argument.is_empty() => return Ok(UserInput::Command(Command::Load(argument.to_string()))),
        _ => {}
    }

    let caps = MOVE_RE.captures(&trimmed)
        .ok_or_else(|| format!("Unrecognised input '{}'. Type 'help' for commands.", trimmed))?;
    // Both groups matched [a-h][1-8], so parsing cannot fail
    let from = Square::from_algebraic(&caps[1]).ok_or("bad origin square")?;
    let to = Square::from_algebraic(&caps[2]).ok_or("bad destination square")?;
    let promotion = caps.get(3).and_then(|m| m.as_str().chars().next()).and_then(PieceKind::from_char);
    Ok(UserInput::Move { from, to, promotion })
}

/// Asks on stdin when a pawn reaches the last rank without a choice typed.
struct PromptPromotion {
    preset: Option<PieceKind>,
}

impl PromotionHook for PromptPromotion {
    fn promotion_choice(&mut self, _pawn: &Piece, destination: Square) -> Option<PieceKind> {
        if self.preset.is_some() { return self.preset; }
        loop {
            print!("Promote pawn on {} to? (q=Queen, r=Rook, b=Bishop, n=Knight): ", destination);
            io::stdout().flush().ok()?;
            let mut line = String::new();
            match io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => return None, // board falls back to its default
                Ok(_) => match line.trim().chars().next().and_then(PieceKind::from_char) {
                    Some(kind) if kind.is_promotion_target() => return Some(kind),
                    _ => println!("Invalid choice. Please enter q, r, b, or n."),
                },
            }
        }
    }
}

fn play_random(board: &mut Board, turn: Color, rng: &mut StdRng) -> Result<(), MoveError> {
    let moves = board.all_legal_moves(turn);
    if moves.is_empty() {
        println!("{:?} has no legal moves.", turn);
        return Ok(());
    }
    let (from, to) = moves[rng.random_range(0..moves.len())];
    let record = board.try_move(from, to)?;
    println!("{:?} plays {}", turn, record.to_algebraic_string());
    Ok(())
}

// --- Main Loop ---

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = Config::load_or_default(chess_rules::config::DEFAULT_CONFIG_FILENAME);
    let mut board = Board::with_config(&config)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut turn = Color::White;
    info!("Starting with default promotion {:?}", config.default_promotion);

    println!("==============================");
    println!("|     Chess Rules Demo       |");
    println!("==============================");
    print_help(&config);

    'game_loop: loop {
        println!("------------------------------------------");
        println!("{}", board);

        match board.status(turn) {
            GameStatus::Checkmate => { println!("=== Checkmate: {:?} wins. ===", turn.opponent()); break 'game_loop; }
            GameStatus::Stalemate => { println!("=== Stalemate. ==="); break 'game_loop; }
            GameStatus::Check => println!("{:?} is in check.", turn),
            GameStatus::Ongoing => {}
        }

        print!("\n{:?} to move. Enter move (e.g. e2e4) or command: ", turn);
        io::stdout().flush()?;

        let mut input_line = String::new();
        match io::stdin().read_line(&mut input_line) {
            Ok(0) => { println!("\nEnd of input detected."); break 'game_loop; }
            Ok(_) => {}
            Err(e) => { error!("Error reading input: {}", e); continue 'game_loop; }
        }
        if input_line.trim().is_empty() { continue 'game_loop; }

        match parse_user_input(&input_line) {
            Ok(UserInput::Move { from, to, promotion }) => {
                match board.at_location(from) {
                    Ok(Some(piece)) if piece.color() != turn => {
                        println!("Error: that is not a {:?} piece.", turn);
                        continue 'game_loop;
                    }
                    _ => {}
                }
                let mut hook = PromptPromotion { preset: promotion };
                match board.try_move_with(from, to, &mut hook) {
                    Ok(_) => turn = turn.opponent(),
                    Err(e) => println!("Error making move: {}", e),
                }
            }
            Ok(UserInput::Command(command)) => match command {
                Command::Moves(sq) => {
                    let moves: Vec<String> = board.legal_moves(sq).iter().map(|m| m.to_algebraic()).collect();
                    println!("Legal destinations from {}: {}", sq, if moves.is_empty() { "-".to_string() } else { moves.join(" ") });
                }
                Command::Undo => match board.undo_move() {
                    Some(record) => { println!("Took back {}", record.to_algebraic_string()); turn = turn.opponent(); }
                    None => println!("Nothing to undo."),
                },
                Command::Random => match play_random(&mut board, turn, &mut rng) {
                    Ok(()) => turn = turn.opponent(),
                    Err(e) => println!("Error making move: {}", e),
                },
                Command::Save(file) => {
                    let path = file.unwrap_or_else(|| config.history_file.clone());
                    match board.save_history(&path) {
                        Ok(()) => println!("History saved to '{}'.", path),
                        Err(e) => println!("Error saving history: {}", e),
                    }
                }
                Command::Load(path) => {
                    let mut replayed = Board::with_config(&config)?;
                    match history::load_history(&path).map(|records| (replayed.replay(&records), records.len())) {
                        Ok((Ok(()), count)) => {
                            board = replayed;
                            turn = if count % 2 == 0 { Color::White } else { Color::Black };
                            println!("Replayed {} moves from '{}'.", count, path);
                        }
                        Ok((Err(e), _)) => println!("Error replaying '{}': {}", path, e),
                        Err(e) => println!("Error loading '{}': {}", path, e),
                    }
                }
                Command::Help => print_help(&config),
                Command::Quit => break 'game_loop,
            },
            Err(e) => println!("Input Error: {}", e),
        }
    }

    println!("\nGame session finished.");
    Ok(())
}

/// Prints available commands.
fn print_help(config: &Config) {
    println!("\nAvailable Commands:");
    println!("  <move>         Coordinate notation, e.g. e2e4 or e7e8n (promotion letter optional).");
    println!("  moves <sq>     List legal destinations for the piece on <sq>.");
    println!("  undo           Take back the last move.");
    println!("  random         Play a random legal move for the side to move.");
    println!("  save [file]    Save move history (default: {}).", config.history_file);
    println!("  load <file>    Replay a saved history from the starting position.");
    println!("  help           Show this help message.");
    println!("  quit / exit    Exit.");
    println!();
}
