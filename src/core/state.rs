//! # Application State
//!
//! Everything a screen may touch, in one place. Screens receive `&mut App`
//! on every run; nothing else is shared between them.
//!
//! ```text
//! App
//! ├── engine: RentalEngine<Box<dyn RecordStore>>  // records + lifecycle
//! ├── page_size: usize                            // rows per list page
//! └── status_message: String                      // last outcome, one line
//! ```

use crate::core::billing::BillingPolicy;
use crate::core::config::ResolvedConfig;
use crate::core::model::Timestamp;
use crate::core::rental::RentalEngine;
use crate::core::store::RecordStore;

pub struct App {
    pub engine: RentalEngine<Box<dyn RecordStore>>,
    pub page_size: usize,
    pub status_message: String,
    clock: fn() -> Timestamp,
}

impl App {
    pub fn new(store: Box<dyn RecordStore>, policy: BillingPolicy, page_size: usize) -> Self {
        Self {
            engine: RentalEngine::new(store, policy),
            page_size,
            status_message: String::new(),
            clock: chrono::Utc::now,
        }
    }

    pub fn from_config(store: Box<dyn RecordStore>, config: &ResolvedConfig) -> Self {
        Self::new(store, config.billing, config.page_size)
    }

    /// Replace the wall clock, so screens can be driven at fixed times.
    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> Timestamp {
        (self.clock)()
    }

    /// Set the one-line status shown under the current screen.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Take the pending status message, leaving it empty.
    pub fn take_status(&mut self) -> String {
        std::mem::take(&mut self.status_message)
    }
}
