//! Host shell for running the wizard outside an IDE.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use platwiz_core::{application::ports::HostShell, error::WizardResult};

/// Stand-alone host: there is never an open solution, and modeless state is
/// only tracked.
#[derive(Debug)]
pub struct LocalHost {
    modeless: AtomicBool,
}

impl LocalHost {
    pub fn new() -> Self {
        Self {
            modeless: AtomicBool::new(true),
        }
    }

    /// Whether modeless UI is currently allowed.
    pub fn is_modeless(&self) -> bool {
        self.modeless.load(Ordering::SeqCst)
    }
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostShell for LocalHost {
    fn close_solution(&self) -> WizardResult<()> {
        debug!("No solution open");
        Ok(())
    }

    fn set_modeless(&self, enabled: bool) {
        debug!(enabled, "Modeless UI");
        self.modeless.store(enabled, Ordering::SeqCst);
    }
}
