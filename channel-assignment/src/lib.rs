//! Console input assignment for live technical riders.
//!
//! Given a band roster and a mixing-console layout, [`engine::assign`]
//! patches vocal, guitar and bass inputs one per performer, keyboard inputs
//! as left/right pairs, and the whole drum section to a single drummer.

pub mod audit;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod layout;
pub mod roster;
pub mod web;

pub use engine::{assign, assign_channels, AssignmentOutcome, Channel, ChannelLayout, Instrument, Performer};
pub use error::{Error, Result};
