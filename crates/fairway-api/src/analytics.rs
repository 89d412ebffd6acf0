//! Derived round statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Club, ShotOutcome};

/// Average carry for one club
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubDistance {
    pub club: Club,
    /// Mean distance in yards, rounded to the nearest yard
    pub avg: u32,
}

/// Summary of a non-empty round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundAnalytics {
    pub total_strokes: u32,
    pub total_par: u32,
    /// Strokes minus par; negative is under par
    pub score_vs_par: i64,
    pub outcomes: BTreeMap<ShotOutcome, u32>,
    /// Sorted by average distance, longest first
    pub avg_club_distances: Vec<ClubDistance>,
    /// Fairway-in-regulation percentage (0-100)
    pub fir: f64,
    /// Green-in-regulation percentage (0-100)
    pub gir: f64,
}

impl RoundAnalytics {
    pub fn outcome_count(&self, outcome: ShotOutcome) -> u32 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Percentage of all strokes that finished with `outcome`
    pub fn outcome_share(&self, outcome: ShotOutcome) -> f64 {
        if self.total_strokes == 0 {
            return 0.0;
        }
        self.outcome_count(outcome) as f64 / self.total_strokes as f64 * 100.0
    }

    /// Score relative to par as golfers write it: "+2", "-1", "E"
    pub fn score_label(&self) -> String {
        match self.score_vs_par {
            0 => "E".to_string(),
            n if n > 0 => format!("+{}", n),
            n => n.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoundAnalytics {
        let mut outcomes = BTreeMap::new();
        outcomes.insert(ShotOutcome::Fairway, 1);
        outcomes.insert(ShotOutcome::Green, 3);
        RoundAnalytics {
            total_strokes: 4,
            total_par: 3,
            score_vs_par: 1,
            outcomes,
            avg_club_distances: vec![],
            fir: 0.0,
            gir: 0.0,
        }
    }

    #[test]
    fn outcome_share_is_percentage_of_strokes() {
        let analytics = sample();
        assert_eq!(analytics.outcome_share(ShotOutcome::Green), 75.0);
        assert_eq!(analytics.outcome_share(ShotOutcome::Bunker), 0.0);
    }

    #[test]
    fn score_label_formats_sign() {
        let mut analytics = sample();
        assert_eq!(analytics.score_label(), "+1");
        analytics.score_vs_par = 0;
        assert_eq!(analytics.score_label(), "E");
        analytics.score_vs_par = -2;
        assert_eq!(analytics.score_label(), "-2");
    }

    #[test]
    fn outcomes_serialize_keyed_by_name() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["outcomes"]["Green"], 3);
        assert_eq!(json["totalStrokes"], 4);
    }
}
