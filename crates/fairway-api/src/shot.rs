//! Shot and round types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Club used for a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Club {
    Driver,
    #[serde(rename = "3-Wood")]
    ThreeWood,
    #[serde(rename = "5-Wood")]
    FiveWood,
    Hybrid,
    #[serde(rename = "2-Iron")]
    TwoIron,
    #[serde(rename = "3-Iron")]
    ThreeIron,
    #[serde(rename = "4-Iron")]
    FourIron,
    #[serde(rename = "5-Iron")]
    FiveIron,
    #[serde(rename = "6-Iron")]
    SixIron,
    #[serde(rename = "7-Iron")]
    SevenIron,
    #[serde(rename = "8-Iron")]
    EightIron,
    #[serde(rename = "9-Iron")]
    NineIron,
    #[serde(rename = "Pitching Wedge")]
    PitchingWedge,
    #[serde(rename = "Gap Wedge")]
    GapWedge,
    #[serde(rename = "Sand Wedge")]
    SandWedge,
    #[serde(rename = "Lob Wedge")]
    LobWedge,
    Putter,
}

impl Club {
    /// Every club, longest first, in the order the shot form lists them
    pub const ALL: [Club; 17] = [
        Club::Driver,
        Club::ThreeWood,
        Club::FiveWood,
        Club::Hybrid,
        Club::TwoIron,
        Club::ThreeIron,
        Club::FourIron,
        Club::FiveIron,
        Club::SixIron,
        Club::SevenIron,
        Club::EightIron,
        Club::NineIron,
        Club::PitchingWedge,
        Club::GapWedge,
        Club::SandWedge,
        Club::LobWedge,
        Club::Putter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Club::Driver => "Driver",
            Club::ThreeWood => "3-Wood",
            Club::FiveWood => "5-Wood",
            Club::Hybrid => "Hybrid",
            Club::TwoIron => "2-Iron",
            Club::ThreeIron => "3-Iron",
            Club::FourIron => "4-Iron",
            Club::FiveIron => "5-Iron",
            Club::SixIron => "6-Iron",
            Club::SevenIron => "7-Iron",
            Club::EightIron => "8-Iron",
            Club::NineIron => "9-Iron",
            Club::PitchingWedge => "Pitching Wedge",
            Club::GapWedge => "Gap Wedge",
            Club::SandWedge => "Sand Wedge",
            Club::LobWedge => "Lob Wedge",
            Club::Putter => "Putter",
        }
    }
}

impl fmt::Display for Club {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a club or outcome name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Club {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Club::ALL
            .into_iter()
            .find(|club| club.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseNameError {
                kind: "club",
                value: s.to_string(),
            })
    }
}

/// Where a shot finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShotOutcome {
    Fairway,
    Green,
    Rough,
    Bunker,
    #[serde(rename = "Water Hazard")]
    WaterHazard,
    #[serde(rename = "Out of Bounds")]
    OutOfBounds,
    #[serde(rename = "In the Hole")]
    InTheHole,
}

impl ShotOutcome {
    pub const ALL: [ShotOutcome; 7] = [
        ShotOutcome::Fairway,
        ShotOutcome::Green,
        ShotOutcome::Rough,
        ShotOutcome::Bunker,
        ShotOutcome::WaterHazard,
        ShotOutcome::OutOfBounds,
        ShotOutcome::InTheHole,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShotOutcome::Fairway => "Fairway",
            ShotOutcome::Green => "Green",
            ShotOutcome::Rough => "Rough",
            ShotOutcome::Bunker => "Bunker",
            ShotOutcome::WaterHazard => "Water Hazard",
            ShotOutcome::OutOfBounds => "Out of Bounds",
            ShotOutcome::InTheHole => "In the Hole",
        }
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShotOutcome {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ShotOutcome::ALL
            .into_iter()
            .find(|outcome| outcome.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseNameError {
                kind: "outcome",
                value: s.to_string(),
            })
    }
}

/// A single logged shot. Immutable once it is part of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    pub hole: u32,
    pub par: u32,
    pub club: Club,
    /// Yards
    pub distance: u32,
    pub outcome: ShotOutcome,
}

/// An ordered session of shots; insertion order is play order
pub type Round = Vec<Shot>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn club_names_round_trip_through_from_str() {
        for club in Club::ALL {
            assert_eq!(club.name().parse::<Club>().unwrap(), club);
        }
        assert_eq!("sand wedge".parse::<Club>().unwrap(), Club::SandWedge);
        assert!("Spoon".parse::<Club>().is_err());
    }

    #[test]
    fn outcome_parse_is_case_insensitive() {
        assert_eq!(
            "water hazard".parse::<ShotOutcome>().unwrap(),
            ShotOutcome::WaterHazard
        );
        let err = "Lake".parse::<ShotOutcome>().unwrap_err();
        assert_eq!(err.kind, "outcome");
    }

    #[test]
    fn shot_serializes_with_display_names() {
        let shot = Shot {
            hole: 1,
            par: 4,
            club: Club::SevenIron,
            distance: 150,
            outcome: ShotOutcome::InTheHole,
        };
        let json = serde_json::to_value(&shot).unwrap();
        assert_eq!(json["club"], "7-Iron");
        assert_eq!(json["outcome"], "In the Hole");
    }

    #[test]
    fn round_loads_from_stored_json() {
        let json = r#"[{"hole":2,"par":3,"club":"Pitching Wedge","distance":120,"outcome":"Bunker"}]"#;
        let round: Round = serde_json::from_str(json).unwrap();
        assert_eq!(round.len(), 1);
        assert_eq!(round[0].club, Club::PitchingWedge);
        assert_eq!(round[0].outcome, ShotOutcome::Bunker);
    }
}
