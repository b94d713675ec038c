//! Interactive collection of values for missing variables.

use std::io::{
    BufRead,
    IsTerminal,
    StdinLock,
    Stdout,
    Write,
};

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::{
    EnvCheckError,
    EnvCheckResult,
};

/// Values entered by the operator, in prompt order.
pub type Answers = Vec<(String, String)>;

/// Text shown when asking for `name`.
pub fn prompt_message(name: &str) -> String {
    format!("Enter a value for {}: ", name)
}

/// Something that can ask the operator for variable values.
///
/// Implementors only provide [`prompt`](Self::prompt); the provided
/// [`prompt_for_values`](Self::prompt_for_values) asks for each name in
/// order, one at a time.
pub trait Prompter {
    /// Asks for a single value. Any string, including an empty one, is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`EnvCheckError::PromptInterrupted`] when the operator cancels.
    fn prompt(&mut self, name: &str) -> EnvCheckResult<String>;

    /// Asks for every name in `names`, in order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first prompt error.
    fn prompt_for_values(&mut self, names: &[String]) -> EnvCheckResult<Answers> {
        names
            .iter()
            .map(|name| Ok((name.clone(), self.prompt(name)?)))
            .collect()
    }
}

/// Prompts over any reader/writer pair, one line per answer.
///
/// End of input is treated as an interrupt.
///
/// # Examples
///
/// ```rust
/// use envcheck::{LinePrompter, Prompter};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut output = Vec::new();
/// let mut prompter = LinePrompter::new("1\na b\n".as_bytes(), &mut output);
/// let answers = prompter.prompt_for_values(&["X".to_string(), "Y".to_string()])?;
/// assert_eq!(answers[1], ("Y".to_string(), "a b".to_string()));
/// # Ok(())
/// # }
/// ```
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Creates a prompter reading answers from `reader` and writing prompts
    /// to `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn prompt(&mut self, name: &str) -> EnvCheckResult<String> {
        let io_error = |e: std::io::Error| EnvCheckError::Prompt(e.to_string());
        write!(self.writer, "{}", prompt_message(name)).map_err(io_error)?;
        self.writer.flush().map_err(io_error)?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).map_err(io_error)? == 0 {
            return Err(EnvCheckError::PromptInterrupted {
                name: name.to_string(),
            });
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

/// Prompter bound to the controlling terminal.
///
/// Uses a `rustyline` editor when stdin is a terminal and falls back to plain
/// line reading when input is piped.
pub enum TerminalPrompter {
    /// Interactive line editor.
    Editor(Box<DefaultEditor>),
    /// Piped stdin.
    Lines(LinePrompter<StdinLock<'static>, Stdout>),
}

impl TerminalPrompter {
    /// Picks the line editor or the piped fallback based on stdin.
    ///
    /// # Errors
    ///
    /// Returns [`EnvCheckError::Prompt`] if the line editor cannot be set up.
    pub fn new() -> EnvCheckResult<Self> {
        if std::io::stdin().is_terminal() {
            let editor = DefaultEditor::new().map_err(|e| EnvCheckError::Prompt(e.to_string()))?;
            Ok(Self::Editor(Box::new(editor)))
        } else {
            Ok(Self::Lines(LinePrompter::new(
                std::io::stdin().lock(),
                std::io::stdout(),
            )))
        }
    }
}

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, name: &str) -> EnvCheckResult<String> {
        match self {
            Self::Editor(editor) => match editor.readline(&prompt_message(name)) {
                Ok(line) => Ok(line),
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    Err(EnvCheckError::PromptInterrupted {
                        name: name.to_string(),
                    })
                }
                Err(e) => Err(EnvCheckError::Prompt(e.to_string())),
            },
            Self::Lines(lines) => lines.prompt(name),
        }
    }
}
