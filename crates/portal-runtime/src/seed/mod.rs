//! # Seed Module
//!
//! Demo data loaded into empty stores on first start.
//!
//! ## Initialization Sequence
//!
//! 1. Skip entirely if the identity store already has accounts
//! 2. Create the four demo accounts (admin, two associations, officer)
//! 3. Import the two demo applications (`GI001`, `GI002`)
//! 4. Import the two demo violations (`NONGI001`, `NONGI002`)
//!
//! Imports bump the id sequences, so the first live filing is `GI003` and
//! the first live report is `NONGI003`.

pub mod demo;

pub use demo::{demo_applications, demo_users, demo_violations, seed_demo, SeedError, SeedSummary};
