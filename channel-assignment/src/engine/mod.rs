pub mod types;
pub mod sides;
pub mod one_to_one;
pub mod stereo_pair;
pub mod multi_channel;
pub mod assign;

pub use types::{
    AssignmentOutcome, Channel, ChannelLayout, Instrument, Performer, Side, SkipReason,
    SkippedPerformer,
};
pub use sides::side_from_label;
pub use assign::{assign, assign_channels};
