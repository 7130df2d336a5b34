//! Common utilities and helper functions shared across commands.

use crate::error::Result;
use crate::storage::EventStore;

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub db: EventStore,
}

impl CommandContext {
    /// Initialize common command context with the event store
    pub fn new(verbose: bool) -> Result<Self> {
        if verbose {
            println!("Opening event store...");
        }
        let db = EventStore::new()?;
        Ok(Self { db })
    }
}

/// Court time as "MM:SS"
pub fn format_minutes(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Plus-minus with its conventional explicit sign
pub fn format_plus_minus(value: i32) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}
