use std::{
    fmt,
    fs::File,
    io::{self, Write},
    path::Path,
};

/// A destination for one severity level.
///
/// `is_console` is decided when the destination is built and controls whether
/// escape sequences are emitted. Standard output and standard error start with
/// it set, everything else starts without it.
pub struct Output {
    writer: Box<dyn Write + Send>,
    is_console: bool,
}

impl Output {
    pub fn new<W: Write + Send + 'static>(writer: W, is_console: bool) -> Self {
        Self {
            writer: Box::new(writer),
            is_console,
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout(), true)
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr(), true)
    }

    /// Any writer that is not an interactive console.
    pub fn writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self::new(writer, false)
    }

    /// Discards everything written to it.
    pub fn sink() -> Self {
        Self::new(io::sink(), false)
    }

    /// Opens `path` for appending, creating it if it does not exist.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        Ok(Self::writer(open_append(path)?))
    }

    /// Overrides the console flag.
    pub fn with_color(self, is_console: bool) -> Self {
        Self { is_console, ..self }
    }

    pub fn is_console(&self) -> bool {
        self.is_console
    }

    pub(crate) fn stream(&mut self) -> &mut dyn Write {
        &mut self.writer
    }
}

/// Opens `path` for appending, creating it if missing.
pub(crate) fn open_append<P: AsRef<Path>>(path: P) -> Result<File, std::io::Error> {
    File::options().create(true).append(true).open(path)
}

impl Default for Output {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("is_console", &self.is_console)
            .finish_non_exhaustive()
    }
}
