use std::collections::HashSet;

use tracing::debug;

use super::types::{ChannelLayout, Instrument, Performer};

/// Phase 1: vocals, guitar and bass get one channel per performer.
/// The i-th open channel of a section goes to the i-th eligible performer.
pub fn assign_one_to_one(
    layout: &mut ChannelLayout,
    roster: &[&Performer],
    assigned: &mut HashSet<String>,
    order: &mut Vec<String>,
) {
    for section in Instrument::ONE_TO_ONE {
        let Some(channels) = layout.section_mut(section) else {
            continue;
        };

        let candidates: Vec<&Performer> = roster
            .iter()
            .copied()
            .filter(|p| p.plays(section) && !assigned.contains(&p.name))
            .collect();

        let open = channels.iter_mut().filter(|c| c.is_available());
        for (channel, performer) in open.zip(candidates) {
            debug!(%section, channel = %channel.id, performer = %performer.name, "one-to-one");
            channel.assigned_to = Some(performer.name.clone());
            assigned.insert(performer.name.clone());
            order.push(performer.name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Channel;

    fn run(layout: &mut ChannelLayout, roster: &[Performer]) -> HashSet<String> {
        let refs: Vec<&Performer> = roster.iter().collect();
        let mut assigned = HashSet::new();
        let mut order = Vec::new();
        assign_one_to_one(layout, &refs, &mut assigned, &mut order);
        assigned
    }

    #[test]
    fn test_pairs_by_position() {
        let mut layout = ChannelLayout::new().with_section(
            Instrument::Vocals,
            vec![
                Channel::new("vocal-1", "Lead Vocal", true),
                Channel::new("vocal-2", "Backup Vocal 1", true),
            ],
        );
        let roster = vec![
            Performer::new("Ana", &[Instrument::Vocals]),
            Performer::new("Ben", &[Instrument::Vocals]),
            Performer::new("Cal", &[Instrument::Vocals]),
        ];

        let assigned = run(&mut layout, &roster);

        let vocals = layout.section(Instrument::Vocals).unwrap();
        assert_eq!(vocals[0].assigned_to.as_deref(), Some("Ana"));
        assert_eq!(vocals[1].assigned_to.as_deref(), Some("Ben"));
        assert!(!assigned.contains("Cal"));
    }

    #[test]
    fn test_skips_closed_and_taken_channels() {
        let mut layout = ChannelLayout::new().with_section(
            Instrument::Guitar,
            vec![
                Channel::new("guitar-1", "Guitar 1", false),
                Channel {
                    assigned_to: Some("House".to_string()),
                    ..Channel::new("guitar-2", "Guitar 2", true)
                },
                Channel::new("guitar-3", "Guitar 3", true),
            ],
        );
        let roster = vec![Performer::new("Gus", &[Instrument::Guitar])];

        run(&mut layout, &roster);

        let guitar = layout.section(Instrument::Guitar).unwrap();
        assert_eq!(guitar[0].assigned_to, None);
        assert_eq!(guitar[1].assigned_to.as_deref(), Some("House"));
        assert_eq!(guitar[2].assigned_to.as_deref(), Some("Gus"));
    }

    #[test]
    fn test_unplaced_vocalist_can_take_bass() {
        let mut layout = ChannelLayout::new()
            .with_section(Instrument::Vocals, vec![Channel::new("vocal-1", "Lead Vocal", true)])
            .with_section(Instrument::Bass, vec![Channel::new("bass-1", "Bass DI", true)]);
        let roster = vec![
            Performer::new("Lead", &[Instrument::Vocals]),
            Performer::new("Double", &[Instrument::Vocals, Instrument::Bass]),
        ];

        run(&mut layout, &roster);

        assert_eq!(
            layout.section(Instrument::Bass).unwrap()[0].assigned_to.as_deref(),
            Some("Double")
        );
    }

    #[test]
    fn test_placed_performer_is_not_reused() {
        let mut layout = ChannelLayout::new()
            .with_section(Instrument::Vocals, vec![Channel::new("vocal-1", "Lead Vocal", true)])
            .with_section(Instrument::Guitar, vec![Channel::new("guitar-1", "Guitar 1", true)]);
        let roster = vec![Performer::new("Solo", &[Instrument::Vocals, Instrument::Guitar])];

        run(&mut layout, &roster);

        assert_eq!(layout.section(Instrument::Guitar).unwrap()[0].assigned_to, None);
    }
}
