//! Progress display while dependencies run

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress over the dependencies of one run
pub struct DependencyProgress {
    pb: ProgressBar,
}

impl DependencyProgress {
    /// Create a progress bar over `total` dependencies
    ///
    /// The bar draws to stderr and stays hidden when stderr is not a terminal.
    pub fn new(total: usize) -> Self {
        let pb = ProgressBar::new(total as u64);
        if let Ok(bar_style) =
            ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(bar_style.progress_chars("#>-"));
        }
        Self { pb }
    }

    /// Announce the dependency about to run
    pub fn start(&self, alias: &str) {
        // suspend rather than println: println is a no-op on a hidden bar
        self.pb
            .suspend(|| println!("Executing dependency {}...", style(alias).cyan().bold()));
        self.pb.set_message(alias.to_string());
    }

    pub fn inc(&self) {
        self.pb.inc(1);
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}
