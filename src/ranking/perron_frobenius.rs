//! Perron-Frobenius ranking.
//!
//! Players are scored by the leading eigenvector of a pairwise dominance
//! matrix built from head-to-head goal totals:
//!
//! 1. aggregate goals per ordered pair ([`HeadToHead`]),
//! 2. `A[i][j] = h((s_ij + 1) / (s_ij + s_ji + 2))`, or 0 if `i` and `j` never met,
//! 3. take the eigenvalue with the largest real part and its eigenvector,
//! 4. primary points are `trunc(|v_i| * scale)` with `v` of unit length.
//!
//! Secondary points count results: 1 per win, 0.5 per draw.

use nalgebra::linalg::{Schur, SVD};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

use crate::config::PerronFrobeniusConfig;
use crate::models::{Match, MatchOutcome, Player, PlayerId};

use super::dominance::pair_dominance;
use super::head_to_head::HeadToHead;
use super::strategy::{RankingStrategy, ScorePair, ScoreSheet};
use super::RankingError;

/// Leading eigenpair of a dominance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadEigenvector {
    /// Real part of the selected eigenvalue
    pub value: f64,

    /// Component-wise absolute eigenvector, unit 2-norm
    pub vector: DVector<f64>,

    /// The selected eigenvalue is complex or shares its real part with another
    pub degenerate: bool,
}

/// Eigenvector-based dominance ranking.
#[derive(Debug, Clone, Default)]
pub struct PerronFrobeniusStrategy {
    config: PerronFrobeniusConfig,
}

impl PerronFrobeniusStrategy {
    pub const NAME: &'static str = "perron_frobenius";

    pub fn new(config: PerronFrobeniusConfig) -> Self {
        Self { config }
    }

    /// Dominance matrix in the table's player order, zero diagonal.
    pub fn dominance_matrix(table: &HeadToHead) -> DMatrix<f64> {
        let n = table.player_count();
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                0.0
            } else {
                pair_dominance(table.record(i, j))
            }
        })
    }

    /// Leading eigenpair of `matrix`.
    ///
    /// The eigenvalue with the largest real part wins, the first one on exact
    /// ties. Its eigenvector is the right singular vector of `matrix - λI`
    /// belonging to the smallest singular value. A 1×1 matrix yields `[1]`.
    pub fn lead_eigenvector(
        &self,
        matrix: &DMatrix<f64>,
    ) -> Result<LeadEigenvector, RankingError> {
        let n = matrix.nrows();
        if n <= 1 {
            return Ok(LeadEigenvector {
                value: if n == 1 { matrix[(0, 0)] } else { 0.0 },
                vector: DVector::from_element(n, 1.0),
                degenerate: false,
            });
        }

        let eigenvalues: Vec<(f64, f64)> = Schur::try_new(
            matrix.clone(),
            f64::EPSILON,
            self.config.max_eigen_iterations,
        )
        .ok_or_else(|| {
            RankingError::DegenerateMatrix(format!(
                "Schur decomposition did not converge within {} iterations",
                self.config.max_eigen_iterations
            ))
        })?
        .complex_eigenvalues()
        .iter()
        .map(|ev| (ev.re, ev.im))
        .collect();

        let (lead_re, lead_im) = select_lead(&eigenvalues);
        let tolerance = self.config.eigen_tolerance * lead_re.abs().max(1.0);
        let ties = eigenvalues
            .iter()
            .filter(|(re, _)| (re - lead_re).abs() <= tolerance)
            .count();
        let degenerate = lead_im.abs() > tolerance || ties > 1;

        let shifted = matrix - DMatrix::identity(n, n) * lead_re;
        let svd = SVD::try_new(
            shifted,
            false,
            true,
            f64::EPSILON,
            self.config.max_eigen_iterations,
        )
        .ok_or_else(|| {
            RankingError::DegenerateMatrix("eigenvector decomposition did not converge".to_string())
        })?;
        let v_t = svd.v_t.as_ref().ok_or_else(|| {
            RankingError::DegenerateMatrix("eigenvector basis was not computed".to_string())
        })?;

        let null_index = svd
            .singular_values
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(index, _)| index)
            .unwrap_or(0);
        let vector = v_t.row(null_index).transpose().map(f64::abs);

        Ok(LeadEigenvector {
            value: lead_re,
            vector,
            degenerate,
        })
    }

    /// Secondary points for (home, away).
    pub fn secondary_points(m: &Match) -> (f64, f64) {
        match m.outcome() {
            MatchOutcome::HomeWin => (1.0, 0.0),
            MatchOutcome::AwayWin => (0.0, 1.0),
            MatchOutcome::Draw => (0.5, 0.5),
        }
    }

    fn scaled(&self, component: f64) -> i64 {
        (component * f64::from(self.config.scale)).trunc() as i64
    }
}

/// Eigenvalue `(re, im)` with the largest real part, first on ties.
fn select_lead(eigenvalues: &[(f64, f64)]) -> (f64, f64) {
    let mut lead = eigenvalues[0];
    for ev in &eigenvalues[1..] {
        if ev.0 > lead.0 {
            lead = *ev;
        }
    }
    lead
}

fn entry<'a>(
    sheet: &'a mut ScoreSheet,
    id: &PlayerId,
) -> Result<&'a mut ScorePair, RankingError> {
    sheet
        .get_mut(id)
        .ok_or_else(|| RankingError::InvalidInput(format!("unknown player {id}")))
}

impl RankingStrategy for PerronFrobeniusStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn compute_score_pairs(
        &self,
        players: &[Player],
        matches: &[Match],
    ) -> Result<ScoreSheet, RankingError> {
        let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        let table = HeadToHead::build(&ids, matches)?;
        let mut sheet: ScoreSheet = ids.iter().map(|id| (*id, ScorePair::default())).collect();

        if table.any_played() {
            let matrix = Self::dominance_matrix(&table);
            let lead = self.lead_eigenvector(&matrix)?;

            if lead.degenerate {
                if self.config.reject_degenerate {
                    return Err(RankingError::DegenerateMatrix(format!(
                        "dominant eigenvalue {:.6} is not unique over {} players",
                        lead.value,
                        table.player_count()
                    )));
                }
                warn!(
                    eigenvalue = lead.value,
                    players = table.player_count(),
                    "Dominant eigenvalue is not unique; match graph is likely disconnected"
                );
            }

            for (index, id) in table.player_ids().iter().enumerate() {
                entry(&mut sheet, id)?.primary += self.scaled(lead.vector[index]);
            }
            debug!(eigenvalue = lead.value, "Computed leading eigenvector");
        }

        for m in matches {
            let (home, away) = Self::secondary_points(m);
            entry(&mut sheet, &m.home_player_id)?.secondary += home;
            entry(&mut sheet, &m.away_player_id)?.secondary += away;
        }

        Ok(sheet)
    }
}
