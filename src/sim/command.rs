/// Input tokens and the commands they map to.
///
/// The keyboard layer turns raw key events into `Token`s; the loop turns
/// tokens into `Command`s. Tokens with no command are dropped.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Token {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Enter,
    Exit,
    Space,
    Char(char),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Jump,
    Left,
    Right,
    ResetVertical,
    Crouch,
    Respawn,
    /// Longer tick delay.
    SlowDown,
    /// Shorter tick delay.
    SpeedUp,
    Exit,
}

impl Command {
    pub fn from_token(token: Token) -> Option<Command> {
        match token {
            Token::Space | Token::Up | Token::PageUp => Some(Command::Jump),
            Token::Right => Some(Command::Right),
            Token::Left => Some(Command::Left),
            Token::Char('r') => Some(Command::ResetVertical),
            Token::Char('c') => Some(Command::Crouch),
            Token::Char('z') => Some(Command::Respawn),
            Token::Char('+') => Some(Command::SlowDown),
            Token::Char('-') => Some(Command::SpeedUp),
            Token::Exit => Some(Command::Exit),
            _ => None,
        }
    }
}
