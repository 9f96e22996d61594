//! # Console
//!
//! Line-oriented input and output for the menus.
//!
//! Every prompt reads exactly one line. The reader and writer are injected,
//! so the binary wraps locked stdin/stdout and the tests wrap a `Cursor` and
//! a `Vec<u8>`.

use std::fmt::Display;
use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{CliError, CliResult};

/// Menu input/output over any buffered reader and writer.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Gives the writer back (tests inspect the captured output).
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints one line.
    pub fn say(&mut self, line: impl Display) -> CliResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Prints an empty line.
    pub fn blank(&mut self) -> CliResult<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Reads one line without its line terminator.
    ///
    /// Bytes that are not UTF-8 become `U+FFFD`, so a garbled line fails
    /// parsing and is asked again like any other bad answer.
    ///
    /// ## Errors
    /// * `InputClosed` - the reader is at end of file
    pub fn read_line(&mut self) -> CliResult<String> {
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(CliError::InputClosed);
        }

        let mut line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                debug!(bytes = e.as_bytes().len(), "Input line is not valid UTF-8");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Prints `text` (no newline) and reads the answer.
    pub fn prompt(&mut self, text: &str) -> CliResult<String> {
        write!(self.output, "{}", text)?;
        self.read_line()
    }

    /// Prints `text` on its own line and reads the answer.
    pub fn ask(&mut self, text: &str) -> CliResult<String> {
        self.say(text)?;
        self.read_line()
    }

    /// Reads a menu choice, re-prompting until the line is a number.
    pub fn read_choice(&mut self) -> CliResult<i64> {
        loop {
            let line = self.prompt("Please make your choice: ")?;
            match line.trim().parse::<i64>() {
                Ok(choice) => return Ok(choice),
                Err(_) => self.say("Your input is invalid!")?,
            }
        }
    }

    /// Asks until `parse` accepts the answer, printing each rejection.
    pub fn ask_until<T, E, F>(&mut self, text: &str, mut parse: F) -> CliResult<T>
    where
        E: Display,
        F: FnMut(&str) -> Result<T, E>,
    {
        loop {
            let line = self.ask(text)?;
            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(format!("Invalid input: {}", e))?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_read_line_strips_terminators() {
        let mut c = console("alice\r\nbob\n");
        assert_eq!(c.read_line().unwrap(), "alice");
        assert_eq!(c.read_line().unwrap(), "bob");
        assert!(matches!(c.read_line(), Err(CliError::InputClosed)));
    }

    #[test]
    fn test_read_choice_reprompts_on_garbage() {
        let mut c = console("abc\n\n 7 \n");
        assert_eq!(c.read_choice().unwrap(), 7);

        let out = output(c);
        assert_eq!(out.matches("Your input is invalid!").count(), 2);
        assert_eq!(out.matches("Please make your choice: ").count(), 3);
    }

    #[test]
    fn test_read_choice_eof() {
        let mut c = console("x\n");
        assert!(matches!(c.read_choice(), Err(CliError::InputClosed)));
    }

    #[test]
    fn test_invalid_utf8_is_asked_again() {
        let mut c = Console::new(Cursor::new(b"\xff\xfe\n2\n".to_vec()), Vec::new());
        assert_eq!(c.read_choice().unwrap(), 2);

        let out = output(c);
        assert_eq!(out.matches("Your input is invalid!").count(), 1);
    }

    #[test]
    fn test_invalid_utf8_text_is_replaced() {
        let mut c = Console::new(Cursor::new(b"caf\xe9\r\n".to_vec()), Vec::new());
        assert_eq!(c.read_line().unwrap(), "caf\u{FFFD}");
    }

    #[test]
    fn test_ask_until() {
        let mut c = console("zero\n0\n12\n");
        let n: u32 = c
            .ask_until("How many?", |s| match s.parse::<u32>() {
                Ok(0) => Err("must be positive".to_string()),
                Ok(n) => Ok(n),
                Err(e) => Err(e.to_string()),
            })
            .unwrap();
        assert_eq!(n, 12);

        let out = output(c);
        assert_eq!(out.matches("How many?").count(), 3);
        assert!(out.contains("Invalid input: must be positive"));
    }
}
