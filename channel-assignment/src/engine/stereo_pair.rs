use std::collections::HashSet;

use tracing::{debug, warn};

use super::sides::channel_side;
use super::types::{ChannelLayout, Instrument, Performer, Side};

/// Phase 2: each keyboardist takes the i-th open left and i-th open right input.
/// Returns ids of open keyboard channels with no recognizable side.
pub fn assign_stereo_pairs(
    layout: &mut ChannelLayout,
    roster: &[&Performer],
    assigned: &mut HashSet<String>,
    order: &mut Vec<String>,
) -> Vec<String> {
    let Some(channels) = layout.section_mut(Instrument::Keyboard) else {
        return Vec::new();
    };

    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut unpaired = Vec::new();
    for (idx, channel) in channels.iter().enumerate() {
        if !channel.is_available() {
            continue;
        }
        match channel_side(channel) {
            Some(Side::Left) => left.push(idx),
            Some(Side::Right) => right.push(idx),
            None => {
                warn!(channel = %channel.id, label = %channel.label, "keyboard input has no stereo side, leaving it open");
                unpaired.push(channel.id.clone());
            }
        }
    }

    let candidates: Vec<&Performer> = roster
        .iter()
        .copied()
        .filter(|p| p.plays(Instrument::Keyboard) && !assigned.contains(&p.name))
        .collect();

    for ((l, r), performer) in left.into_iter().zip(right).zip(candidates) {
        debug!(
            left = %channels[l].id,
            right = %channels[r].id,
            performer = %performer.name,
            "keyboard pair"
        );
        channels[l].assigned_to = Some(performer.name.clone());
        channels[r].assigned_to = Some(performer.name.clone());
        assigned.insert(performer.name.clone());
        order.push(performer.name.clone());
    }

    unpaired
}
