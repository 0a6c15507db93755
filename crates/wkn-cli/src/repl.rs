//! Line-reading front end of the interactive loop.

use std::io::{self, BufRead, Write};

use wkn_db::{DatabaseStore, Interpreter};

pub const PROMPT: &str = "wkn> ";

/// Read lines from `input` until `exit` or end of input, printing every reply
/// line to `output`.
///
/// Command failures are part of the reply; only I/O errors on `input` or
/// `output` end the loop with an error. Input bytes that are not UTF-8 are
/// replaced with U+FFFD.
pub fn run<S, R, W>(interpreter: &mut Interpreter<S>, mut input: R, mut output: W) -> io::Result<()>
where
    S: DatabaseStore,
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let line = String::from_utf8_lossy(&buf);
        let reply = interpreter.execute(line.trim());
        for reply_line in &reply.lines {
            writeln!(output, "{}", reply_line)?;
        }
        if reply.is_exit() {
            return Ok(());
        }
    }
}
