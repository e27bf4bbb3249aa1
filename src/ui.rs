use console::{Term, style};
use std::{env, fmt::Display};

use js_mutant::mutant::{ApiMutant, MutantStatus};
use js_mutant::report::format_mutant;

/// Small UI helper:
/// - normal mode: human output to stdout, errors to stderr
/// - `--json` mode: ALL human output to stderr (stdout stays machine-readable JSON)
/// - fancy styling only on a real TTY and when NO_COLOR/CI are not set
#[derive(Debug, Clone)]
pub struct Ui {
    out: Term,
    err: Term,
    fancy: bool,
    enabled: bool,

    // Number of files reported through `file_error`.
    file_errors: u64,
}

impl Ui {
    pub fn new(json: bool) -> Self {
        // In --json mode, keep stdout clean for JSON and send all human output to stderr.
        let out = if json { Term::stderr() } else { Term::stdout() };
        let err = Term::stderr();

        // Fancy output must only activate when the actual stream used for human output is a TTY.
        let out_is_tty = out.is_term();

        let no_color = env::var_os("NO_COLOR").is_some();
        let in_ci = env::var_os("CI").is_some();

        let fancy = out_is_tty && !no_color && !in_ci;

        Self {
            out,
            err,
            fancy,
            enabled: true,
            file_errors: 0,
        }
    }

    /// Useful for unit tests to avoid noisy output.
    #[cfg(test)]
    pub fn silent() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            fancy: false,
            enabled: false,
            file_errors: 0,
        }
    }

    fn write_out(&self, s: &str) {
        if self.enabled {
            let _ = self.out.write_line(s);
        }
    }

    fn write_err(&self, s: &str) {
        if self.enabled {
            let _ = self.err.write_line(s);
        }
    }

    pub fn line(&self, msg: impl Display) {
        self.write_out(&msg.to_string());
    }

    pub fn title(&self, msg: impl Display) {
        let s = msg.to_string();
        if self.fancy {
            self.write_out(&style(s).bold().to_string());
        } else {
            self.write_out(&s);
        }
    }

    pub fn error(&self, msg: impl Display) {
        let s = msg.to_string();
        if self.fancy {
            self.write_err(&style(s).red().bold().to_string());
        } else {
            self.write_err(&s);
        }
    }

    /// One line per mutant.
    ///
    /// In non-fancy mode this is exactly [`format_mutant`], so snapshot
    /// tests stay stable (they set NO_COLOR=1 anyway).
    pub fn mutant(&self, m: &ApiMutant) {
        if !self.fancy {
            self.line(format_mutant(m));
            return;
        }

        let ignored = m.status == Some(MutantStatus::Ignored);
        let tag = if ignored {
            style("IGNORED").yellow().bold()
        } else {
            style("PLACED").green().bold()
        };

        self.line(format!(
            "{tag} #{id} {file}:{line}:{column} {mutator}: {replacement:?}",
            id = m.id,
            file = m.file_name,
            line = m.location.start.line + 1,
            column = m.location.start.column + 1,
            mutator = style(&m.mutator_name).cyan(),
            replacement = m.replacement,
        ));
    }

    /// A file that could not be instrumented; keeps stderr/stdout routing consistent.
    pub fn file_error(&mut self, msg: impl Display) {
        self.file_errors += 1;
        self.error(msg);
    }

    pub fn file_errors(&self) -> u64 {
        self.file_errors
    }

    #[cfg(test)]
    pub fn is_fancy(&self) -> bool {
        self.fancy && self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_fancy_requires_fancy_and_enabled() {
        let base = Ui::silent();

        let mut a = base.clone();
        a.fancy = true;
        assert!(!a.is_fancy());

        let mut b = base.clone();
        b.enabled = true;
        assert!(!b.is_fancy());

        let mut c = base.clone();
        c.fancy = true;
        c.enabled = true;
        assert!(c.is_fancy());
    }

    #[test]
    fn file_error_increments_counter() {
        let mut ui = Ui::silent();
        assert_eq!(ui.file_errors(), 0);
        ui.file_error("boom");
        ui.file_error("boom2");
        assert_eq!(ui.file_errors(), 2);
    }
}
