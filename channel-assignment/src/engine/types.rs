use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Instrument capability tag. Doubles as the console section name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    #[serde(alias = "vocal")]
    Vocals,
    Guitar,
    Bass,
    #[serde(alias = "keyboards", alias = "keys")]
    Keyboard,
    #[serde(alias = "drum")]
    Drums,
}

impl Instrument {
    /// Sections filled strictly one channel per performer, in this order
    pub const ONE_TO_ONE: [Instrument; 3] = [Instrument::Vocals, Instrument::Guitar, Instrument::Bass];

    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::Vocals => "vocals",
            Instrument::Guitar => "guitar",
            Instrument::Bass => "bass",
            Instrument::Keyboard => "keyboard",
            Instrument::Drums => "drums",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Instrument {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vocals" | "vocal" => Ok(Instrument::Vocals),
            "guitar" => Ok(Instrument::Guitar),
            "bass" => Ok(Instrument::Bass),
            "keyboard" | "keyboards" | "keys" => Ok(Instrument::Keyboard),
            "drums" | "drum" => Ok(Instrument::Drums),
            other => Err(format!("unknown instrument: {}", other)),
        }
    }
}

/// Stereo side of a keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// One input slot on the mixing console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(alias = "input")]
    pub label: String,
    #[serde(default = "default_applicable")]
    pub applicable: bool,
    /// Explicit stereo side; when absent the label decides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(
        rename = "assignedTo",
        alias = "assigned_to",
        default,
        serialize_with = "none_as_empty",
        deserialize_with = "empty_as_none"
    )]
    pub assigned_to: Option<String>,
}

fn default_applicable() -> bool {
    true
}

// Unassigned inputs travel as "" on the wire
fn none_as_empty<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl Channel {
    pub fn new(id: &str, label: &str, applicable: bool) -> Self {
        Channel {
            id: id.to_string(),
            label: label.to_string(),
            applicable,
            side: None,
            assigned_to: None,
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Applicable and not yet carrying an assignee
    pub fn is_available(&self) -> bool {
        self.applicable && self.assigned_to.is_none()
    }
}

/// Section name -> channels in console order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelLayout {
    pub sections: BTreeMap<Instrument, Vec<Channel>>,
}

impl ChannelLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, section: Instrument, channels: Vec<Channel>) -> Self {
        self.sections.insert(section, channels);
        self
    }

    pub fn section(&self, section: Instrument) -> Option<&[Channel]> {
        self.sections.get(&section).map(|c| c.as_slice())
    }

    pub fn section_mut(&mut self, section: Instrument) -> Option<&mut Vec<Channel>> {
        self.sections.get_mut(&section)
    }

    /// Sections present, in phase order
    pub fn sections(&self) -> impl Iterator<Item = (Instrument, &[Channel])> {
        self.sections.iter().map(|(s, c)| (*s, c.as_slice()))
    }

    pub fn channel_count(&self) -> usize {
        self.sections.values().map(|c| c.len()).sum()
    }

    /// Applicable channels still without an assignee
    pub fn unassigned_applicable(&self) -> usize {
        self.sections
            .values()
            .flatten()
            .filter(|c| c.is_available())
            .count()
    }
}

/// A band member eligible for channel assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performer {
    pub name: String,
    #[serde(default)]
    pub instruments: BTreeSet<Instrument>,
}

impl Performer {
    pub fn new(name: &str, instruments: &[Instrument]) -> Self {
        Performer {
            name: name.to_string(),
            instruments: instruments.iter().copied().collect(),
        }
    }

    pub fn plays(&self, instrument: Instrument) -> bool {
        self.instruments.contains(&instrument)
    }
}

/// Why a roster entry took no part in assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    EmptyName,
    NoInstruments,
    DuplicateName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPerformer {
    pub name: String,
    pub reason: SkipReason,
}

/// Result of one assignment run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub layout: ChannelLayout,
    /// Performers that received at least one channel, in assignment order
    pub assigned_performers: Vec<String>,
    pub skipped: Vec<SkippedPerformer>,
    /// Eligible keyboard channels with no recognizable side
    pub unpaired_keyboard: Vec<String>,
}
