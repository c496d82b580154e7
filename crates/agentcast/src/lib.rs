//! Broadcast targeting for a real-estate agent collaboration platform.
//!
//! When one agent publishes a notice (a buyer need, a piece of market
//! intelligence, a general message), the `broadcast` module decides which
//! other agents should receive it, based on category subscriptions,
//! declared geographic coverage, and price-range overlap, and hands the
//! matched recipients to an outbound delivery queue as a single batch.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod onboarding;
pub mod telemetry;
