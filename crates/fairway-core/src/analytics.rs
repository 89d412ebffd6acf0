//! Round analytics engine

use fairway_api::{Club, ClubDistance, RoundAnalytics, Shot, ShotOutcome};
use std::collections::{BTreeMap, HashSet};

/// Holes assumed when computing green-in-regulation, whatever was played
pub const GIR_HOLES: u32 = 18;

/// Derive round statistics. An empty round has no analytics.
pub fn compute(round: &[Shot]) -> Option<RoundAnalytics> {
    if round.is_empty() {
        return None;
    }

    let total_strokes = round.len() as u32;

    // Par comes from the first shot logged on each hole
    let mut holes_seen = HashSet::new();
    let total_par: u32 = round
        .iter()
        .filter(|shot| holes_seen.insert(shot.hole))
        .map(|shot| shot.par)
        .sum();

    let mut outcomes = BTreeMap::new();
    for shot in round {
        *outcomes.entry(shot.outcome).or_insert(0) += 1;
    }

    let fir_opportunities: Vec<&Shot> = round
        .iter()
        .filter(|shot| shot.par > 3 && shot.club == Club::Driver)
        .collect();
    let fir_hits = fir_opportunities
        .iter()
        .filter(|shot| shot.outcome == ShotOutcome::Fairway)
        .count();
    let fir = if fir_opportunities.is_empty() {
        0.0
    } else {
        fir_hits as f64 / fir_opportunities.len() as f64 * 100.0
    };

    let greens = outcomes.get(&ShotOutcome::Green).copied().unwrap_or(0);
    let gir = greens as f64 / GIR_HOLES as f64 * 100.0;

    Some(RoundAnalytics {
        total_strokes,
        total_par,
        score_vs_par: total_strokes as i64 - total_par as i64,
        outcomes,
        avg_club_distances: average_club_distances(round),
        fir,
        gir,
    })
}

/// Mean distance per club, longest first. Putts and zero-yard entries are ignored.
///
/// Clubs with equal averages stay in the order they were first logged.
fn average_club_distances(round: &[Shot]) -> Vec<ClubDistance> {
    let mut totals: Vec<(Club, u64, u32)> = Vec::new();
    for shot in round {
        if shot.club == Club::Putter || shot.distance == 0 {
            continue;
        }
        match totals.iter_mut().find(|(club, _, _)| *club == shot.club) {
            Some(entry) => {
                entry.1 += u64::from(shot.distance);
                entry.2 += 1;
            }
            None => totals.push((shot.club, u64::from(shot.distance), 1)),
        }
    }

    let mut averages: Vec<ClubDistance> = totals
        .into_iter()
        .map(|(club, sum, n)| ClubDistance {
            club,
            avg: (sum as f64 / f64::from(n)).round() as u32,
        })
        .collect();
    averages.sort_by(|a, b| b.avg.cmp(&a.avg));
    averages
}
