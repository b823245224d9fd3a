//! Terminal seat for `--human`: prompts on stdout, answers from stdin.

use std::io::{self, BufRead, BufReader, Stdin, Write};

use president::domain::{DeckSpec, GameEvent};
use president::players::{PromptKind, PromptView};
use president::{AiError, Announcer, MoveSource, Response};

/// Reads one answer per line.
///
/// Cards are separated by spaces, e.g. `Q,hearts Q,spades`; an empty line
/// or `fold` folds.
pub struct LineSource<R, W> {
    input: R,
    output: W,
}

impl LineSource<BufReader<Stdin>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead + Send, W: Write + Send> LineSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn show(&mut self, prompt: &PromptView) -> io::Result<()> {
        if let Some(reason) = &prompt.rejection {
            writeln!(self.output, "Refused: {reason}")?;
        }
        writeln!(self.output, "Your hand: {}", prompt.hand.join(" "))?;
        match &prompt.kind {
            PromptKind::Gift { receiver, count } => {
                writeln!(self.output, "Give {count} card(s) to seat {receiver}:")?;
            }
            PromptKind::Play => {
                if prompt.pile_top.is_empty() {
                    writeln!(self.output, "You lead.")?;
                } else {
                    writeln!(self.output, "On the pile: {}", prompt.pile_top.join(" "))?;
                }
                if prompt.revolution {
                    writeln!(self.output, "(revolution: values are reversed)")?;
                }
                write!(self.output, "Your play (cards or 'fold'): ")?;
            }
        }
        self.output.flush()
    }

    fn read_line(&mut self) -> Result<String, AiError> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| AiError::Internal(format!("reading answer: {e}")))?;
        if read == 0 {
            return Err(AiError::Cancelled);
        }
        Ok(line)
    }

    fn prompt(&mut self, prompt: &PromptView) -> Result<String, AiError> {
        self.show(prompt)
            .map_err(|e| AiError::Internal(format!("writing prompt: {e}")))?;
        self.read_line()
    }
}

/// Interpret a typed line.
pub fn parse_answer(line: &str) -> Response {
    let line = line.trim();
    if line.is_empty() || line.eq_ignore_ascii_case("fold") {
        return Response::Fold;
    }
    Response::Cards(line.split_whitespace().map(str::to_string).collect())
}

impl<R: BufRead + Send, W: Write + Send> MoveSource for LineSource<R, W> {
    fn ask_move(&mut self, prompt: &PromptView) -> Result<Response, AiError> {
        let line = self.prompt(prompt)?;
        Ok(parse_answer(&line))
    }

    fn ask_gift(&mut self, prompt: &PromptView) -> Result<Vec<String>, AiError> {
        let line = self.prompt(prompt)?;
        Ok(line.split_whitespace().map(str::to_string).collect())
    }
}

/// Narrates the game for a person at the terminal.
pub struct ConsoleAnnouncer<W> {
    names: Vec<String>,
    deck: DeckSpec,
    output: W,
}

impl<W: Write + Send> ConsoleAnnouncer<W> {
    pub fn new(names: Vec<String>, deck: DeckSpec, output: W) -> Self {
        Self {
            names,
            deck,
            output,
        }
    }

    fn name(&self, seat: u8) -> &str {
        self.names
            .get(seat as usize)
            .map(String::as_str)
            .unwrap_or("?")
    }

    fn line(&self, event: &GameEvent) -> Option<String> {
        let text = match event {
            GameEvent::GameStarted { game_no, .. } => format!("=== Game {game_no} ==="),
            GameEvent::TributePaid { from, to, count } => format!(
                "{} pays {count} card(s) to {}",
                self.name(*from),
                self.name(*to)
            ),
            GameEvent::GiftReturned { from, to, count } => format!(
                "{} returns {count} card(s) to {}",
                self.name(*from),
                self.name(*to)
            ),
            GameEvent::RoundStarted { round_no, start } => {
                format!("-- Round {round_no}, {} starts", self.name(*start))
            }
            GameEvent::CardsPlayed { seat, cards } => format!(
                "{} plays {}",
                self.name(*seat),
                self.deck.display_cards(cards)
            ),
            GameEvent::Folded { seat } => format!("{} folds", self.name(*seat)),
            GameEvent::Skipped { seat } => format!("{} is skipped", self.name(*seat)),
            GameEvent::Revolution { active: true } => "Revolution!".to_string(),
            GameEvent::Revolution { active: false } => "Order restored".to_string(),
            GameEvent::PlayerFinished { seat, finish } => {
                format!("{} is out ({finish:?})", self.name(*seat))
            }
            GameEvent::RoundEnded {
                taken_by: Some(seat),
                ..
            } => format!("{} takes the pile", self.name(*seat)),
            GameEvent::GameEnded { summary } => {
                let ladder: Vec<String> = summary
                    .standings
                    .iter()
                    .map(|s| format!("{}. {} ({})", s.position, self.name(s.seat), s.title.label()))
                    .collect();
                format!("Game over: {}", ladder.join(", "))
            }
            GameEvent::Aborted { reason } => format!("Game aborted: {reason}"),
            GameEvent::Cancelled => "Game cancelled".to_string(),
            _ => return None,
        };
        Some(text)
    }
}

impl<W: Write + Send> Announcer for ConsoleAnnouncer<W> {
    fn announce(&mut self, event: &GameEvent) {
        if let Some(text) = self.line(event) {
            let _ = writeln!(self.output, "{text}");
        }
    }
}

/// Ask on the terminal whether to deal another game.
pub fn ask_replay<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> bool {
    if write!(output, "Play another game? [y/N] ")
        .and_then(|_| output.flush())
        .is_err()
    {
        return false;
    }
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
    }
}
