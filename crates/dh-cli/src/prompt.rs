//! Line-oriented prompting over any reader/writer pair

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::time::Duration;

/// Asks questions on `W` and reads answers from `R`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a full line
    pub fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", line.as_ref())
    }

    /// Print `question` and read one line, without its line ending
    ///
    /// End of input is an `UnexpectedEof` error.
    pub fn ask(&mut self, question: impl AsRef<str>) -> io::Result<String> {
        write!(self.output, "{}", question.as_ref())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask until the answer parses as `T`
    pub fn ask_parsed<T: FromStr>(
        &mut self,
        question: impl AsRef<str>,
        retry: impl AsRef<str>,
    ) -> io::Result<T> {
        let mut answer = self.ask(question)?;
        loop {
            match answer.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => answer = self.ask(retry.as_ref())?,
            }
        }
    }

    /// Presentational pause
    pub fn pause(&mut self, duration: Duration) -> io::Result<()> {
        self.output.flush()?;
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
        Ok(())
    }

    /// Consume the prompter and return its writer
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_strips_line_ending() {
        let mut prompter = Prompter::new(Cursor::new("Alice\r\nBob\n"), Vec::new());
        assert_eq!(prompter.ask("first: ").unwrap(), "Alice");
        assert_eq!(prompter.ask("second: ").unwrap(), "Bob");

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output, "first: second: ");
    }

    #[test]
    fn test_ask_parsed_retries() {
        let mut prompter = Prompter::new(Cursor::new("eleven\n-3\n 11 \n"), Vec::new());
        let value: u64 = prompter.ask_parsed("prime: ", "again: ").unwrap();
        assert_eq!(value, 11);

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output, "prime: again: again: ");
    }

    #[test]
    fn test_eof() {
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());
        let err = prompter.ask("name: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
