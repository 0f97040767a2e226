//! Show operation module
//!
//! Displays one installation: the bundle it runs, its last action and the
//! parameters and outputs recorded for it.

use std::fmt::Write;

use console::Style;

use crate::bundle::render_value;
use crate::error::Result;
use crate::installation::{Installation, InstallationStatus, InstallationStore};

/// High-level show operation
pub struct ShowOperation<'a> {
    installations: &'a dyn InstallationStore,
}

impl<'a> ShowOperation<'a> {
    pub fn new(installations: &'a dyn InstallationStore) -> Self {
        Self { installations }
    }

    pub fn execute(&self, name: &str) -> Result<()> {
        let record = self.installations.read(name)?;
        print!("{}", render(&record));
        Ok(())
    }
}

/// Render an installation for the terminal
pub fn render(record: &Installation) -> String {
    let bold = Style::new().bold();
    let status = match record.status {
        InstallationStatus::Succeeded => Style::new().green(),
        InstallationStatus::Failed => Style::new().red(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", Style::new().bold().yellow().apply_to(&record.name));
    let _ = writeln!(
        out,
        "  {} {} {}",
        bold.apply_to("Bundle:"),
        record.bundle.name,
        record.bundle.version
    );
    if let Some(reference) = &record.bundle_reference {
        let _ = writeln!(out, "  {} {reference}", bold.apply_to("Reference:"));
    }
    let _ = writeln!(out, "  {} {}", bold.apply_to("Digest:"), record.bundle_digest);
    let _ = writeln!(
        out,
        "  {} {} ({})",
        bold.apply_to("Last action:"),
        record.action,
        status.apply_to(record.status)
    );
    let _ = writeln!(
        out,
        "  {} {}",
        bold.apply_to("Created:"),
        record.created.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
        out,
        "  {} {}",
        bold.apply_to("Modified:"),
        record.modified.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if !record.parameters.is_empty() {
        let _ = writeln!(out, "  {}", bold.apply_to("Parameters:"));
        for (name, value) in &record.parameters {
            let _ = writeln!(out, "    {name}: {value}");
        }
    }

    if !record.outputs.is_empty() {
        let _ = writeln!(out, "  {}", bold.apply_to("Outputs:"));
        for (name, value) in &record.outputs {
            let _ = writeln!(out, "    {name}: {}", render_value(value));
        }
    }

    out
}
