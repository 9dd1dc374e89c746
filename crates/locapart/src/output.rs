//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Tables use `tabled`
//! rows built by each command; structured formats serialize the domain
//! values themselves; plain emits one id per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use locapart_core::ReservationStatus;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

/// Rendering settings resolved from the global flags.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Output {
    pub fn from_global(global: &GlobalOpts) -> Self {
        Self {
            format: global.output,
            color: should_color(global.color),
            quiet: global.quiet,
        }
    }

    /// Render `data` as a list and print it.
    pub fn list<T, R>(&self, data: &[T], to_row: impl Fn(&T) -> R, id_fn: impl Fn(&T) -> String)
    where
        T: Serialize,
        R: Tabled,
    {
        let out = match self.format {
            OutputFormat::Table => {
                let rows: Vec<R> = data.iter().map(to_row).collect();
                Table::new(rows).with(Style::rounded()).to_string()
            }
            OutputFormat::Json => render_json(data, false),
            OutputFormat::JsonCompact => render_json(data, true),
            OutputFormat::Yaml => render_yaml(data),
            OutputFormat::Plain => data.iter().map(id_fn).collect::<Vec<_>>().join("\n"),
        };
        self.print(&out);
    }

    /// Render a single value; `detail` produces the table-mode text.
    pub fn single<T: Serialize + ?Sized>(&self, data: &T, detail: impl Fn(&T) -> String) {
        let out = match self.format {
            OutputFormat::Table | OutputFormat::Plain => detail(data),
            OutputFormat::Json => render_json(data, false),
            OutputFormat::JsonCompact => render_json(data, true),
            OutputFormat::Yaml => render_yaml(data),
        };
        self.print(&out);
    }

    /// One-line confirmation on stderr, silenced by `--quiet`.
    pub fn note(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    /// Status label, colored when enabled.
    pub fn status(&self, status: ReservationStatus) -> String {
        let label = status.to_string();
        match (self.color, status) {
            (false, _) => label,
            (true, ReservationStatus::Active) => label.green().to_string(),
            (true, ReservationStatus::Cancelled) => label.red().to_string(),
        }
    }

    /// Placeholder for a foreign key whose parent is not cached.
    pub fn missing(&self, id: i64) -> String {
        let text = format!("#{id}");
        if self.color {
            text.dimmed().to_string()
        } else {
            text
        }
    }

    fn print(&self, output: &str) {
        if self.quiet || output.is_empty() {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{output}");
    }
}

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.expect("domain values always serialize to JSON")
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("domain values always serialize to YAML")
}
