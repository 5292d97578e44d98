//! Parsing of the commands typed at the prompt.

use chess_core::{Color, CoordMove, Piece, Square};

pub const HELP: &str = "\
commands:
  <square>            click a square (select, move or deselect)
  <from><to>          play a move, e.g. e2e4
  move <from><to>     same as above
  promote <q|r|b|n>   choose the piece for a pending promotion
  cancel              drop a pending promotion
  moves [square]      list legal moves
  new [white|black]   start a new game; a chosen side is turned to the bottom
  flip                flip the board
  board               show the board
  fen                 show the position string
  history             show the move list
  status              show the game status
  help                show this help
  quit                leave";

/// A command entered at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Click(Square),
    Move(CoordMove),
    Promote(Piece),
    Cancel,
    Moves(Option<Square>),
    New(Option<Color>),
    Flip,
    Board,
    Fen,
    History,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err("empty command".to_string());
        };
        let arg = parts.next();

        let command = match head.to_ascii_lowercase().as_str() {
            "move" | "m" => Command::Move(parse_move(arg.ok_or("move needs a move, e.g. e2e4")?)?),
            "promote" | "p" => Command::Promote(parse_promotion(
                arg.ok_or("promote needs a piece: q, r, b or n")?,
            )?),
            "cancel" => Command::Cancel,
            "moves" => Command::Moves(arg.map(parse_square).transpose()?),
            "new" => Command::New(arg.map(str::parse::<Color>).transpose()?),
            "flip" => Command::Flip,
            "board" | "b" => Command::Board,
            "fen" => Command::Fen,
            "history" => Command::History,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other if other.len() == 2 => Command::Click(parse_square(other)?),
            other if other.len() >= 4 => Command::Move(parse_move(other)?),
            other => return Err(format!("unknown command: {} (try help)", other)),
        };
        Ok(command)
    }
}

fn parse_square(s: &str) -> Result<Square, String> {
    Square::from_algebraic(&s.to_ascii_lowercase()).ok_or_else(|| format!("invalid square: {}", s))
}

fn parse_move(s: &str) -> Result<CoordMove, String> {
    CoordMove::parse(&s.to_ascii_lowercase()).ok_or_else(|| format!("invalid move: {}", s))
}

fn parse_promotion(s: &str) -> Result<Piece, String> {
    let mut chars = s.chars();
    match (chars.next().and_then(Piece::from_char), chars.next()) {
        (Some(piece), None) if piece.is_promotion_target() => Ok(piece),
        _ => Err(format!("cannot promote to {}", s)),
    }
}
