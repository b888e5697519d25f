//! Post-assignment checks of the console rules.
//!
//! The engine never produces these violations on its own, but layouts that
//! arrive partly assigned (house engineers, previous runs, hand edits) can.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::engine::sides::channel_side;
use crate::engine::{ChannelLayout, Instrument, Side};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Performer holds inputs in more than one section
    CrossSection {
        performer: String,
        sections: Vec<Instrument>,
    },
    /// More than one vocal/guitar/bass input for the same performer
    MultipleChannelsInSection {
        performer: String,
        section: Instrument,
        count: usize,
    },
    /// Keyboard inputs that do not form left/right pairs
    UnbalancedKeyboardPair {
        performer: String,
        left: usize,
        right: usize,
    },
    /// Drum inputs shared by several performers
    SplitDrumKit { performers: Vec<String> },
    /// Kit partly assigned while applicable drum inputs stay open
    OpenDrumInputs { count: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::CrossSection { performer, sections } => {
                let names: Vec<&str> = sections.iter().map(|s| s.as_str()).collect();
                write!(f, "{} is patched into several sections: {}", performer, names.join(", "))
            }
            Violation::MultipleChannelsInSection { performer, section, count } => {
                write!(f, "{} holds {} {} inputs (max 1)", performer, count, section)
            }
            Violation::UnbalancedKeyboardPair { performer, left, right } => {
                write!(f, "{} has {} left / {} right keyboard inputs", performer, left, right)
            }
            Violation::SplitDrumKit { performers } => {
                write!(f, "drum kit split between {}", performers.join(", "))
            }
            Violation::OpenDrumInputs { count } => {
                write!(f, "{} applicable drum inputs left open next to an assigned kit", count)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Inputs held per performer
    pub channel_counts: BTreeMap<String, usize>,
    pub violations: Vec<Violation>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks an assigned layout against the patching rules
pub fn audit(layout: &ChannelLayout) -> AuditReport {
    let mut report = AuditReport::default();
    let mut sections_by_performer: BTreeMap<&str, BTreeSet<Instrument>> = BTreeMap::new();

    for (section, channels) in layout.sections() {
        let mut per_performer: BTreeMap<&str, usize> = BTreeMap::new();
        for name in channels.iter().filter_map(|c| c.assigned_to.as_deref()) {
            *per_performer.entry(name).or_insert(0) += 1;
            *report.channel_counts.entry(name.to_string()).or_insert(0) += 1;
            sections_by_performer.entry(name).or_default().insert(section);
        }

        match section {
            Instrument::Vocals | Instrument::Guitar | Instrument::Bass => {
                for (performer, count) in per_performer.iter().filter(|(_, c)| **c > 1) {
                    report.violations.push(Violation::MultipleChannelsInSection {
                        performer: performer.to_string(),
                        section,
                        count: *count,
                    });
                }
            }
            Instrument::Keyboard => {
                for performer in per_performer.keys() {
                    let held = channels
                        .iter()
                        .filter(|c| c.assigned_to.as_deref() == Some(*performer));
                    let (mut left, mut right) = (0, 0);
                    for channel in held {
                        match channel_side(channel) {
                            Some(Side::Left) => left += 1,
                            Some(Side::Right) => right += 1,
                            None => {}
                        }
                    }
                    let total = per_performer[performer];
                    if left != right || left + right != total {
                        report.violations.push(Violation::UnbalancedKeyboardPair {
                            performer: performer.to_string(),
                            left,
                            right,
                        });
                    }
                }
            }
            Instrument::Drums => {
                if per_performer.len() > 1 {
                    report.violations.push(Violation::SplitDrumKit {
                        performers: per_performer.keys().map(|p| p.to_string()).collect(),
                    });
                }
                let open = channels.iter().filter(|c| c.is_available()).count();
                if !per_performer.is_empty() && open > 0 {
                    report.violations.push(Violation::OpenDrumInputs { count: open });
                }
            }
        }
    }

    for (performer, sections) in sections_by_performer {
        if sections.len() > 1 {
            report.violations.push(Violation::CrossSection {
                performer: performer.to_string(),
                sections: sections.into_iter().collect(),
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{assign, Channel, Performer};
    use crate::layout::default_layout;

    fn taken(id: &str, label: &str, who: &str) -> Channel {
        Channel {
            assigned_to: Some(who.to_string()),
            ..Channel::new(id, label, true)
        }
    }

    #[test]
    fn test_engine_output_is_clean() {
        let roster = vec![
            Performer::new("Lí-Lí Octave", &[Instrument::Vocals]),
            Performer::new("Maya Bass", &[Instrument::Bass]),
            Performer::new("Kim", &[Instrument::Keyboard]),
            Performer::new("Dee", &[Instrument::Drums]),
        ];
        let result = assign(&default_layout(), &roster);

        let report = audit(&result);

        assert!(report.is_clean(), "{:?}", report.violations);
        assert_eq!(report.channel_counts["Dee"], 8);
        assert_eq!(report.channel_counts["Kim"], 2);
        assert_eq!(report.channel_counts["Maya Bass"], 1);
    }

    #[test]
    fn test_hand_patched_layout_violations() {
        let layout = ChannelLayout::new()
            .with_section(
                Instrument::Vocals,
                vec![taken("vocal-1", "Lead Vocal", "Ana"), taken("vocal-2", "Backup Vocal", "Ana")],
            )
            .with_section(Instrument::Keyboard, vec![taken("keyboard-1", "Keys Left", "Kim")])
            .with_section(
                Instrument::Drums,
                vec![
                    taken("drum-1", "Kick In", "Dee"),
                    taken("drum-2", "Snare Top", "Ana"),
                    Channel::new("drum-3", "Hi Hat", true),
                ],
            );

        let report = audit(&layout);

        assert!(report.violations.contains(&Violation::MultipleChannelsInSection {
            performer: "Ana".to_string(),
            section: Instrument::Vocals,
            count: 2,
        }));
        assert!(report.violations.contains(&Violation::UnbalancedKeyboardPair {
            performer: "Kim".to_string(),
            left: 1,
            right: 0,
        }));
        assert!(report.violations.contains(&Violation::SplitDrumKit {
            performers: vec!["Ana".to_string(), "Dee".to_string()],
        }));
        assert!(report.violations.contains(&Violation::OpenDrumInputs { count: 1 }));
        assert!(report.violations.contains(&Violation::CrossSection {
            performer: "Ana".to_string(),
            sections: vec![Instrument::Vocals, Instrument::Drums],
        }));
    }

    #[test]
    fn test_violation_messages() {
        let v = Violation::OpenDrumInputs { count: 2 };
        assert_eq!(v.to_string(), "2 applicable drum inputs left open next to an assigned kit");
    }
}
