use std::fs;
use std::path::Path;

use tracing::info;

use crate::engine::{Channel, ChannelLayout, Instrument};
use crate::error::Result;

/// Standard festival console: 21 inputs across the five sections.
/// Unused inputs are marked not applicable rather than removed.
pub fn default_layout() -> ChannelLayout {
    ChannelLayout::new()
        .with_section(
            Instrument::Vocals,
            vec![
                Channel::new("vocal-1", "Lead Vocal", true),
                Channel::new("vocal-2", "Backup Vocal 1", true),
                Channel::new("vocal-3", "Backup Vocal 2", false),
            ],
        )
        .with_section(
            Instrument::Guitar,
            vec![
                Channel::new("guitar-1", "Guitar 1", true),
                Channel::new("guitar-2", "Guitar 2", false),
            ],
        )
        .with_section(
            Instrument::Bass,
            vec![
                Channel::new("bass-1", "Bass DI", true),
                Channel::new("bass-2", "Bass Mic", false),
            ],
        )
        .with_section(
            Instrument::Keyboard,
            vec![
                Channel::new("keyboard-1", "Keyboard Left", true),
                Channel::new("keyboard-2", "Keyboard Right", true),
                Channel::new("keyboard-3", "Synth Left", false),
                Channel::new("keyboard-4", "Synth Right", false),
            ],
        )
        .with_section(
            Instrument::Drums,
            vec![
                Channel::new("drum-1", "Kick In", true),
                Channel::new("drum-2", "Kick Out", true),
                Channel::new("drum-3", "Snare Top", true),
                Channel::new("drum-4", "Snare Bottom", false),
                Channel::new("drum-5", "Hi Hat", true),
                Channel::new("drum-6", "Rack Tom 1", true),
                Channel::new("drum-7", "Rack Tom 2", true),
                Channel::new("drum-8", "Floor Tom", false),
                Channel::new("drum-9", "Over Head Left", true),
                Channel::new("drum-10", "Over Head Right", true),
            ],
        )
}

/// Loads a console layout from a JSON file
pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<ChannelLayout> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let layout: ChannelLayout = serde_json::from_str(&content)?;
    info!(
        path = %path.display(),
        channels = layout.channel_count(),
        "loaded console layout"
    );
    Ok(layout)
}
