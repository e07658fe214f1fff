//! Colored terminal output for export commands

use std::io::{self, Write};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose, self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.marked(
            "✓",
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            message,
        )
    }

    /// Print an error message (always shown, on stderr)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || writeln!(&mut buffer, " {}", message).is_err()
            || bufwtr.print(&buffer).is_err()
        {
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print a verbose message (only in verbose mode)
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.marked("→", ColorSpec::new().set_fg(Some(Color::Blue)), message)
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.marked("⋯", ColorSpec::new().set_fg(Some(Color::Magenta)), message)
    }

    /// Print a section header
    pub fn section(&self, title: &str) -> io::Result<()> {
        self.write(|buffer| {
            writeln!(buffer)?;
            buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
            writeln!(buffer, "═══ {} ═══", title)?;
            buffer.reset()
        })
    }

    /// Print an aligned `key: value` line
    pub fn field(&self, key: &str, value: &str) -> io::Result<()> {
        self.write(|buffer| {
            buffer.set_color(ColorSpec::new().set_bold(true))?;
            write!(buffer, "  {:<10}", key)?;
            buffer.reset()?;
            writeln!(buffer, " {}", value)
        })
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.write(|buffer| writeln!(buffer, "    {}", message))
    }

    /// Print a plain message
    pub fn println(&self, message: &str) -> io::Result<()> {
        self.write(|buffer| writeln!(buffer, "{}", message))
    }

    fn marked(&self, mark: &str, color: &ColorSpec, message: &str) -> io::Result<()> {
        self.write(|buffer| {
            buffer.set_color(color)?;
            write!(buffer, "{}", mark)?;
            buffer.reset()?;
            writeln!(buffer, " {}", message)
        })
    }

    fn write(&self, render: impl FnOnce(&mut Buffer) -> io::Result<()>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        render(&mut buffer)?;
        self.bufwtr.print(&buffer)
    }
}
