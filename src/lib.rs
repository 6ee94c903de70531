#![doc(test(attr(deny(warnings))))]

//! Sales Core keeps the books of a small shop: products, sales and cash
//! deliveries in a local store, plus daily, weekly and monthly sales reports
//! that can be shown on the console or exported as documents.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Sales Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }
}
