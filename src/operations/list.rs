//! List operation module
//!
//! Lists every known installation with its bundle and last action.

use console::Style;

use crate::error::Result;
use crate::installation::InstallationStore;

/// High-level list operation
pub struct ListOperation<'a> {
    installations: &'a dyn InstallationStore,
}

impl<'a> ListOperation<'a> {
    pub fn new(installations: &'a dyn InstallationStore) -> Self {
        Self { installations }
    }

    pub fn execute(&self) -> Result<()> {
        let lines = self.lines()?;
        if lines.is_empty() {
            println!("No installations found.");
            return Ok(());
        }

        println!("Installations ({}):", lines.len());
        println!();
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }

    /// One line per installation, sorted by name
    fn lines(&self) -> Result<Vec<String>> {
        let names = self.installations.list()?;
        let mut lines = Vec::with_capacity(names.len());
        for name in names {
            let record = self.installations.read(&name)?;
            lines.push(format!(
                "  {}  {} {}  {} ({})",
                Style::new().bold().yellow().apply_to(&record.name),
                record.bundle.name,
                record.bundle.version,
                record.action,
                record.status
            ));
        }
        Ok(lines)
    }
}
