use std::io::{Cursor, Read, Stderr, Stdin, Stdout, Write};

/// Abstracts stdin/stdout/stderr for dependency injection and testability.
pub trait ConsoleIO<IN: Read, OUT: Write, ERR: Write> {
    fn stdin(&mut self) -> &mut IN;
    fn stdout(&mut self) -> &mut OUT;
    fn stderr(&mut self) -> &mut ERR;
}

/// Real implementation that uses the process streams.
pub struct StdIO {
    stdin: Stdin,
    stdout: Stdout,
    stderr: Stderr,
}

impl StdIO {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
            stdout: std::io::stdout(),
            stderr: std::io::stderr(),
        }
    }
}

impl Default for StdIO {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleIO<Stdin, Stdout, Stderr> for StdIO {
    fn stdin(&mut self) -> &mut Stdin {
        &mut self.stdin
    }

    fn stdout(&mut self) -> &mut Stdout {
        &mut self.stdout
    }

    fn stderr(&mut self) -> &mut Stderr {
        &mut self.stderr
    }
}

/// Test implementation that reads stdin from a buffer and captures output
/// into byte buffers.
#[derive(Default)]
pub struct BufferedIO {
    stdin: Cursor<Vec<u8>>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl BufferedIO {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffered IO whose stdin yields the given content.
    #[must_use]
    pub fn with_stdin(content: &str) -> Self {
        Self {
            stdin: Cursor::new(content.as_bytes().to_vec()),
            ..Self::default()
        }
    }

    /// Returns the captured stdout content as a string.
    pub fn stdout_to_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Returns the captured stderr content as a string.
    pub fn stderr_to_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

impl ConsoleIO<Cursor<Vec<u8>>, Vec<u8>, Vec<u8>> for BufferedIO {
    fn stdin(&mut self) -> &mut Cursor<Vec<u8>> {
        &mut self.stdin
    }

    fn stdout(&mut self) -> &mut Vec<u8> {
        &mut self.stdout
    }

    fn stderr(&mut self) -> &mut Vec<u8> {
        &mut self.stderr
    }
}
