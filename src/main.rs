use anyhow::Context;
use std::ffi::OsString;
use std::io::{self, Write};
use termion::event::Key;
use termion::input::TermRead;
use termion::raw::IntoRawMode;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // A line given on the command line is split once, like the interactive
    // prompt would.
    if let Some(line) = line_arg(std::env::args_os())? {
        return report(&line);
    }

    loop {
        print!("$ ");
        io::stdout().flush()?;

        match read_line()? {
            Some(line) if line.trim().is_empty() => continue,
            Some(line) => report(&line)?,
            None => return Ok(()),
        }
    }
}

/// The line passed as the first argument, if any.
fn line_arg(mut args: impl Iterator<Item = OsString>) -> anyhow::Result<Option<String>> {
    args.nth(1)
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow::anyhow!("argument is not valid UTF-8: {:?}", arg))
        })
        .transpose()
}

fn report(line: &str) -> anyhow::Result<()> {
    let mut args =
        argsplit::split(line).with_context(|| format!("failed to split {:?}", line))?;
    let mut stdout = io::stdout().lock();
    argsplit::write_report(&mut args, &mut stdout).context("failed to write arguments")?;
    stdout.flush()?;
    Ok(())
}

/// Reads one line in raw mode. Returns `None` on Ctrl-D at an empty line or
/// when input is closed.
fn read_line() -> anyhow::Result<Option<String>> {
    // Enter raw mode to handle input character by character
    let mut stdout = io::stdout()
        .into_raw_mode()
        .context("failed to enter raw mode")?;
    let mut buffer = String::new();

    for key in io::stdin().keys() {
        match key.context("failed to read input")? {
            Key::Ctrl('c') => {
                write!(stdout, "\r\n")?;
                return Ok(Some(String::new()));
            }
            Key::Ctrl('d') => {
                if buffer.is_empty() {
                    write!(stdout, "\r\n")?;
                    return Ok(None);
                }
            }
            Key::Char('\n') | Key::Char('\r') => {
                write!(stdout, "\r\n")?;
                return Ok(Some(buffer));
            }
            Key::Backspace => {
                if buffer.pop().is_some() {
                    // Move cursor back, erase char with space, move back again
                    write!(stdout, "\x08 \x08")?;
                    stdout.flush()?;
                }
            }
            Key::Char(c) => {
                buffer.push(c);
                write!(stdout, "{}", c)?;
                stdout.flush()?;
            }
            _ => {}
        }
    }

    // Input closed
    Ok((!buffer.is_empty()).then_some(buffer))
}
