use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::multi_channel::assign_multi_channel;
use super::one_to_one::assign_one_to_one;
use super::stereo_pair::assign_stereo_pairs;
use super::types::{AssignmentOutcome, ChannelLayout, Performer, SkipReason, SkippedPerformer};

/// Assigns console inputs to the roster and returns the populated layout.
/// The caller's layout is left untouched.
pub fn assign(layout: &ChannelLayout, roster: &[Performer]) -> ChannelLayout {
    assign_channels(layout, roster).layout
}

/// Runs the three phases in order: one-to-one sections, keyboard pairs, drums.
/// A performer placed in one phase is never considered again.
pub fn assign_channels(layout: &ChannelLayout, roster: &[Performer]) -> AssignmentOutcome {
    let (normalized, skipped) = normalize_roster(roster);
    let eligible: Vec<&Performer> = normalized.iter().collect();

    let mut result = layout.clone();
    let mut assigned: HashSet<String> = HashSet::new();
    let mut order: Vec<String> = Vec::new();

    assign_one_to_one(&mut result, &eligible, &mut assigned, &mut order);
    let unpaired_keyboard = assign_stereo_pairs(&mut result, &eligible, &mut assigned, &mut order);
    assign_multi_channel(&mut result, &eligible, &mut assigned, &mut order);

    info!(
        performers = eligible.len(),
        assigned = order.len(),
        skipped = skipped.len(),
        open_channels = result.unassigned_applicable(),
        "channel assignment complete"
    );

    AssignmentOutcome {
        layout: result,
        assigned_performers: order,
        skipped,
        unpaired_keyboard,
    }
}

/// Drops entries that would corrupt assigned-set tracking. Keeps roster order.
/// Names are trimmed so whitespace variants collapse onto one identity.
fn normalize_roster(roster: &[Performer]) -> (Vec<Performer>, Vec<SkippedPerformer>) {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut eligible = Vec::with_capacity(roster.len());
    let mut skipped = Vec::new();

    for performer in roster {
        let name = performer.name.trim();
        let reason = if name.is_empty() {
            warn!("skipping roster entry with empty name");
            Some(SkipReason::EmptyName)
        } else if !seen.insert(name) {
            warn!(performer = %name, "skipping duplicate roster entry");
            Some(SkipReason::DuplicateName)
        } else if performer.instruments.is_empty() {
            debug!(performer = %name, "no instruments, not assignable");
            Some(SkipReason::NoInstruments)
        } else {
            None
        };

        match reason {
            Some(reason) => skipped.push(SkippedPerformer {
                name: name.to_string(),
                reason,
            }),
            None => eligible.push(Performer {
                name: name.to_string(),
                instruments: performer.instruments.clone(),
            }),
        }
    }

    (eligible, skipped)
}
