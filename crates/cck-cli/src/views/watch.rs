use super::Palette;
use cck_runtime::TickOutcome;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub fn print_header(palette: &Palette, root: &Path, output: &Path, interval: Duration) {
    println!("{} {}", palette.label("Watching:"), root.display());
    println!(
        "{}",
        palette.dim(&format!(
            "Interval: {}s, Output: {}",
            interval.as_secs(),
            output.display()
        ))
    );
    println!("{}", palette.dim("Press Ctrl+C to stop"));
    println!();
}

pub fn print_stopped(palette: &Palette) {
    println!();
    println!("{}", palette.dim("Watch stopped"));
}

/// One console line per tick that did something. `Unchanged` prints nothing.
pub struct TickView<'a> {
    outcome: &'a TickOutcome,
    palette: Palette,
}

impl<'a> TickView<'a> {
    pub fn new(outcome: &'a TickOutcome, palette: Palette) -> Self {
        Self { outcome, palette }
    }
}

impl fmt::Display for TickView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            TickOutcome::Baseline { files, written } => write!(
                f,
                "{} {} files{}",
                self.palette.success("Synced:"),
                files,
                if *written { "" } else { " (document already current)" }
            ),
            TickOutcome::Synced {
                events,
                persisted,
                written,
            } => {
                write!(
                    f,
                    "{} {} change(s)",
                    self.palette.notice("Change detected:"),
                    events.len()
                )?;
                for event in events.iter().take(5) {
                    write!(f, "\n  {} {}", event.kind.symbol(), event.path)?;
                }
                if events.len() > 5 {
                    write!(f, "\n  ... and {} more", events.len() - 5)?;
                }
                if *persisted > 0 {
                    let note = format!("{} recorded in history", persisted);
                    write!(f, "\n  {}", self.palette.dim(&note))?;
                }
                if *written {
                    write!(f, "\n{}", self.palette.success("Synced"))
                } else {
                    write!(f, "\n{}", self.palette.dim("Document already current"))
                }
            }
            TickOutcome::Unchanged => Ok(()),
        }
    }
}
