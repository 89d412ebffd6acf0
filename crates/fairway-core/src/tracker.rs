//! Shot tracker: the current round and the prefilled next shot

use fairway_api::{Club, Round, RoundAnalytics, Shot, ShotOutcome};
use fairway_config::DEFAULT_PAR;
use fairway_store::{RecordKey, RecordStore, RecordStoreExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{ShotError, TrackerResult, compute};

/// Values prefilled for the next shot entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotDraft {
    pub hole: u32,
    pub par: u32,
    pub club: Club,
    pub distance: u32,
    pub outcome: ShotOutcome,
}

impl ShotDraft {
    /// The draft for the first shot of a round
    pub fn initial(default_par: u32) -> Self {
        Self {
            hole: 1,
            par: default_par,
            club: Club::Driver,
            distance: 250,
            outcome: ShotOutcome::Fairway,
        }
    }

    /// The draft a round would leave behind if it were logged shot by shot
    pub fn after(round: &[Shot], default_par: u32) -> Self {
        let mut draft = Self::initial(default_par);
        if let Some(last) = round.last() {
            draft.advance(last, default_par);
        }
        draft
    }

    pub fn to_shot(&self) -> Shot {
        Shot {
            hole: self.hole,
            par: self.par,
            club: self.club,
            distance: self.distance,
            outcome: self.outcome,
        }
    }

    /// Carry a logged shot forward. Holing out moves to the next hole.
    fn advance(&mut self, logged: &Shot, default_par: u32) {
        self.club = logged.club;
        self.distance = logged.distance;
        self.outcome = logged.outcome;
        if logged.outcome == ShotOutcome::InTheHole {
            self.hole = logged.hole + 1;
            self.par = default_par;
        } else {
            self.hole = logged.hole;
            self.par = logged.par;
        }
    }
}

impl Default for ShotDraft {
    fn default() -> Self {
        Self::initial(DEFAULT_PAR)
    }
}

pub fn validate_shot(shot: &Shot) -> Result<(), ShotError> {
    if shot.hole < 1 {
        return Err(ShotError::InvalidHole(shot.hole));
    }
    if shot.par < 1 {
        return Err(ShotError::InvalidPar(shot.par));
    }
    Ok(())
}

/// Owns the current round. The whole round is rewritten on every change.
pub struct ShotTracker {
    store: Arc<dyn RecordStore>,
    round: Round,
    draft: ShotDraft,
    default_par: u32,
}

impl ShotTracker {
    /// Load the stored round; an unreadable round starts empty
    pub fn load(store: Arc<dyn RecordStore>, default_par: u32) -> Self {
        let round: Round = store.load_record(RecordKey::Round).unwrap_or_default();
        let draft = ShotDraft::after(&round, default_par);

        debug!(shots = round.len(), next_hole = draft.hole, "Round loaded");

        Self {
            store,
            round,
            draft,
            default_par,
        }
    }

    pub fn round(&self) -> &[Shot] {
        &self.round
    }

    pub fn draft(&self) -> &ShotDraft {
        &self.draft
    }

    /// Append a shot and persist the round.
    ///
    /// If the round cannot be saved the shot is dropped again and the draft
    /// is left as it was.
    pub fn add_shot(&mut self, shot: Shot) -> TrackerResult<()> {
        validate_shot(&shot)?;

        self.round.push(shot);
        if let Err(e) = self.store.save_record(RecordKey::Round, &self.round) {
            self.round.pop();
            warn!(error = %e, "Failed to save round, shot discarded");
            return Err(e.into());
        }

        if let Some(logged) = self.round.last() {
            self.draft.advance(logged, self.default_par);
            info!(
                hole = logged.hole,
                club = %logged.club,
                outcome = %logged.outcome,
                strokes = self.round.len(),
                "Shot logged"
            );
        }
        Ok(())
    }

    /// Discard every shot and start over from hole 1
    pub fn clear_round(&mut self) -> TrackerResult<()> {
        let previous = std::mem::take(&mut self.round);
        if let Err(e) = self.store.save_record(RecordKey::Round, &self.round) {
            self.round = previous;
            warn!(error = %e, "Failed to clear round");
            return Err(e.into());
        }

        self.draft = ShotDraft::initial(self.default_par);
        info!(discarded = previous.len(), "Round cleared");
        Ok(())
    }

    pub fn analytics(&self) -> Option<RoundAnalytics> {
        compute(&self.round)
    }
}
