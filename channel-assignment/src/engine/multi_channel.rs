use std::collections::HashSet;

use tracing::debug;

use super::types::{ChannelLayout, Instrument, Performer};

/// Phase 3: the first eligible drummer takes every open drum input.
/// One kit per event; other drummers get nothing.
pub fn assign_multi_channel(
    layout: &mut ChannelLayout,
    roster: &[&Performer],
    assigned: &mut HashSet<String>,
    order: &mut Vec<String>,
) {
    let Some(channels) = layout.section_mut(Instrument::Drums) else {
        return;
    };

    if !channels.iter().any(|c| c.is_available()) {
        return;
    }

    let Some(drummer) = roster
        .iter()
        .copied()
        .find(|p| p.plays(Instrument::Drums) && !assigned.contains(&p.name))
    else {
        return;
    };

    let mut count = 0;
    for channel in channels.iter_mut().filter(|c| c.is_available()) {
        channel.assigned_to = Some(drummer.name.clone());
        count += 1;
    }
    debug!(performer = %drummer.name, channels = count, "drum kit");

    assigned.insert(drummer.name.clone());
    order.push(drummer.name.clone());
}
