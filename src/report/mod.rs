use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Step,
    Info,
    Pass,
    Warn,
    Fail,
}

impl Level {
    /// Warnings and failures belong on stderr, everything else on stdout.
    pub fn is_error_stream(&self) -> bool {
        matches!(self, Level::Warn | Level::Fail)
    }

    fn glyph(&self) -> &'static str {
        match self {
            Level::Step | Level::Info => "",
            Level::Pass => "✓ ",
            Level::Warn => "⚠ ",
            Level::Fail => "✗ ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Plain rendering, without colors.
    pub fn render(&self) -> String {
        format!("{}{}", self.level.glyph(), self.message)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Sink for the human-readable progress and failure lines.
pub trait Reporter: Send {
    fn emit(&mut self, diagnostic: Diagnostic);

    fn step(&mut self, message: &str) {
        self.emit(Diagnostic::new(Level::Step, message));
    }

    fn info(&mut self, message: &str) {
        self.emit(Diagnostic::new(Level::Info, message));
    }

    fn pass(&mut self, message: &str) {
        self.emit(Diagnostic::new(Level::Pass, message));
    }

    fn warn(&mut self, message: &str) {
        self.emit(Diagnostic::new(Level::Warn, message));
    }

    fn fail(&mut self, message: &str) {
        self.emit(Diagnostic::new(Level::Fail, message));
    }
}

/// Writes to the terminal: stdout for progress, stderr for problems.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let glyph = diagnostic.level.glyph();
        match diagnostic.level {
            Level::Step => println!("\n{}", diagnostic.message.bold()),
            Level::Info => println!("{}", diagnostic.message),
            Level::Pass => println!("{}{}", glyph.green(), diagnostic.message),
            Level::Warn => eprintln!("{}{}", glyph.yellow(), diagnostic.message),
            Level::Fail => eprintln!("{}{}", glyph.red(), diagnostic.message),
        }
    }
}

/// Keeps every diagnostic in emission order.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn lines(&self) -> Vec<String> {
        self.diagnostics.iter().map(Diagnostic::render).collect()
    }

    /// Lines that would have gone to stderr.
    pub fn error_lines(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .filter(|d| d.level.is_error_stream())
            .map(Diagnostic::render)
            .collect()
    }

    pub fn count(&self, level: Level) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.diagnostics.iter().any(|d| d.message.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
