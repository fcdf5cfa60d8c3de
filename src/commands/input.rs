use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::io;

/// A source of interactive input lines.
///
/// `Ok(None)` means the user closed the input (Ctrl-C / Ctrl-D).
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

impl LineReader for Editor<(), DefaultHistory> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.add_history_entry(trimmed);
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        }
    }
}
