//! Inline markup parser
//!
//! An incremental state machine fed one source character at a time. Plain
//! characters come out as [`ParseEvent::Visible`]; text between a pair of
//! delimiters is gathered into a [`Command`] of the form
//! `¦name=arg1,arg2¦` and emitted when the closing delimiter is seen.

/// Delimiter that opens and closes inline commands
pub const DEFAULT_DELIMITER: char = '¦';

/// Inline directive gathered between two delimiters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Command {
    /// Command name, possibly empty
    pub name: String,
    /// Arguments in source order
    pub arguments: Vec<String>,
}

impl Command {
    /// Create a command from a name and arguments
    pub fn new(name: impl Into<String>, arguments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parser states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Passing characters through
    #[default]
    Normal,
    /// Between the opening delimiter and `=`
    GatheringCommandName,
    /// After `=`, collecting comma-separated arguments
    GatheringArguments,
}

/// Result of feeding a character that has an effect downstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// A character to lay out, spaces included
    Visible(char),
    /// A completed command, ready to execute
    Command(Command),
}

/// Incremental markup parser
#[derive(Debug, Clone)]
pub struct MarkupParser {
    delimiter: char,
    state: ParserState,
    pending: Command,
    argument: String,
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupParser {
    /// Create a parser using [`DEFAULT_DELIMITER`]
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    /// Create a parser with a custom delimiter
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            state: ParserState::Normal,
            pending: Command::default(),
            argument: String::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Delimiter in use
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Drop any half-gathered command and return to `Normal`
    pub fn reset(&mut self) {
        self.state = ParserState::Normal;
        self.pending = Command::default();
        self.argument.clear();
    }

    /// Consume one source character
    pub fn feed(&mut self, ch: char) -> Option<ParseEvent> {
        match self.state {
            ParserState::Normal => {
                if ch == self.delimiter {
                    self.pending = Command::default();
                    self.argument.clear();
                    self.state = ParserState::GatheringCommandName;
                    None
                } else {
                    Some(ParseEvent::Visible(ch))
                }
            }
            ParserState::GatheringCommandName => match ch {
                c if c == self.delimiter => Some(self.finish()),
                '=' => {
                    self.state = ParserState::GatheringArguments;
                    None
                }
                ' ' => None,
                c => {
                    self.pending.name.push(c);
                    None
                }
            },
            ParserState::GatheringArguments => match ch {
                c if c == self.delimiter => {
                    if !self.argument.is_empty() {
                        let argument = std::mem::take(&mut self.argument);
                        self.pending.arguments.push(argument);
                    }
                    Some(self.finish())
                }
                ',' => {
                    let argument = std::mem::take(&mut self.argument);
                    self.pending.arguments.push(argument);
                    None
                }
                ' ' => None,
                c => {
                    self.argument.push(c);
                    None
                }
            },
        }
    }

    fn finish(&mut self) -> ParseEvent {
        self.state = ParserState::Normal;
        self.argument.clear();
        ParseEvent::Command(std::mem::take(&mut self.pending))
    }
}
