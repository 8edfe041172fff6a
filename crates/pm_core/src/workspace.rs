//! Tactical Workspace
//!
//! Owns the current analysis result and reads the shared selection to
//! answer what each view needs: per-play views, ranked candidates for the
//! chosen match-1 play, and comparison metrics for the chosen pair.

use std::sync::Arc;

use crate::analysis::similarity::{find_record, select_candidates, Candidate};
use crate::analysis::{ComparisonMetrics, PlayView};
use crate::api::parse_response;
use crate::config::ViewConfig;
use crate::error::Result;
use crate::models::{MatchSide, Play, TacticalAnalysis};
use crate::state::SelectionStore;

pub struct TacticalWorkspace {
    store: SelectionStore,
    config: ViewConfig,
    analysis: Option<Arc<TacticalAnalysis>>,
}

impl TacticalWorkspace {
    pub fn new(store: SelectionStore, config: ViewConfig) -> Self {
        Self {
            store,
            config,
            analysis: None,
        }
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn analysis(&self) -> Option<&Arc<TacticalAnalysis>> {
        self.analysis.as_ref()
    }

    /// Replace the dataset with a parsed backend body.
    ///
    /// On error nothing changes. On success the selection is cleared, since
    /// play ids from the previous dataset no longer mean anything.
    pub fn load_response(&mut self, body: &str) -> Result<Arc<TacticalAnalysis>> {
        let analysis = TacticalAnalysis::from_json(body).map_err(|err| {
            log::warn!("workspace: keeping previous analysis: {}", err);
            err
        })?;
        Ok(self.replace(analysis))
    }

    /// `load_response` from a raw HTTP status and body.
    pub fn load_http_response(&mut self, status: u16, body: &str) -> Result<Arc<TacticalAnalysis>> {
        let analysis = parse_response(status, body, TacticalAnalysis::from_json).map_err(|err| {
            log::warn!("workspace: keeping previous analysis: {}", err);
            err
        })?;
        Ok(self.replace(analysis))
    }

    pub fn replace(&mut self, analysis: TacticalAnalysis) -> Arc<TacticalAnalysis> {
        let analysis = Arc::new(analysis);
        log::info!(
            "workspace: loaded {} + {} plays, {} similarity records",
            analysis.match1.plays().len(),
            analysis.match2.plays().len(),
            analysis.similarities.len()
        );
        self.analysis = Some(Arc::clone(&analysis));
        self.store.clear_selection();
        analysis
    }

    /// View config adjusted to the pitch length the backend reported.
    pub fn effective_config(&self) -> ViewConfig {
        let reported = self
            .analysis
            .as_ref()
            .and_then(|a| a.configuration.pitch_length);
        self.config.with_pitch_length(reported)
    }

    pub fn plays(&self, side: MatchSide) -> &[Play] {
        match &self.analysis {
            Some(analysis) => analysis.dataset(side).plays(),
            None => &[],
        }
    }

    pub fn play_views(&self, side: MatchSide) -> Vec<PlayView> {
        let config = self.effective_config();
        self.plays(side)
            .iter()
            .map(|play| PlayView::build(play, &config))
            .collect()
    }

    pub fn selected_play(&self, side: MatchSide) -> Option<&Play> {
        let state = self.store.get_state();
        let id = match side {
            MatchSide::Match1 => state.selected_play1?,
            MatchSide::Match2 => state.selected_play2?,
        };
        self.analysis.as_ref()?.find_play(side, id)
    }

    /// Top candidates from match 2 for the selected match-1 play.
    pub fn candidates(&self) -> Vec<Candidate<'_>> {
        let (Some(analysis), Some(play1)) =
            (self.analysis.as_ref(), self.store.get_state().selected_play1)
        else {
            return Vec::new();
        };
        select_candidates(&analysis.similarities, &analysis.match2, play1, self.config.top_k)
    }

    /// Metrics for the selected pair, when both plays are chosen and exist.
    pub fn comparison(&self) -> Option<ComparisonMetrics> {
        let play1 = self.selected_play(MatchSide::Match1)?;
        let play2 = self.selected_play(MatchSide::Match2)?;
        let analysis = self.analysis.as_ref()?;
        let config = self.effective_config();

        let view1 = PlayView::build(play1, &config);
        let view2 = PlayView::build(play2, &config);
        Some(ComparisonMetrics::new(
            view1.metrics,
            view2.metrics,
            find_record(&analysis.similarities, play1.play_id, play2.play_id),
        ))
    }

    pub fn overlay_active(&self) -> bool {
        self.store.get_state().overlay_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PitchThird;
    use crate::AnalysisError;

    fn body() -> String {
        serde_json::json!({
            "match1": {"plays": {"plays_data": [
                {"play_id": 1, "duration": 6.0, "passes": [
                    {"passer_x": 0.0, "passer_y": 0.0, "receiver_x": 10.0, "receiver_y": 0.0},
                    {"passer_x": 12.0, "passer_y": 0.0, "receiver_x": 20.0, "receiver_y": 0.0}
                ]}
            ]}},
            "match2": {"plays": {"plays_data": [
                {"play_id": 2, "duration": 4.0, "passes": [
                    {"passer_x": 0.0, "passer_y": 0.0, "receiver_x": 0.0, "receiver_y": 5.0}
                ]}
            ]}},
            "similarities": [
                {"play1_id": 1, "play2_id": 2, "similarity_score": 0.6, "play2_passes": 1},
                {"play1_id": 1, "play2_id": 8, "similarity_score": 0.9, "play2_passes": 4}
            ]
        })
        .to_string()
    }

    fn workspace() -> TacticalWorkspace {
        let mut ws = TacticalWorkspace::new(SelectionStore::new(), ViewConfig::default());
        ws.load_response(&body()).unwrap();
        ws
    }

    #[test]
    fn test_candidates_follow_selection() {
        let ws = workspace();
        assert!(ws.candidates().is_empty());

        ws.store().select_play1(Some(1));
        let candidates = ws.candidates();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].play_id(), 8);
        assert!(candidates[0].play.is_none());
        assert_eq!(candidates[1].play.map(|p| p.play_id), Some(2));
    }

    #[test]
    fn test_comparison_needs_both_plays() {
        let ws = workspace();
        ws.store().select_play1(Some(1));
        assert!(ws.comparison().is_none());

        ws.store().select_play2(Some(2));
        let cmp = ws.comparison().unwrap();
        assert_eq!(cmp.similarity_score, Some(0.6));
        assert_eq!(cmp.play1.pass_count, 2);
        // chained: 0->10, 10->20
        assert!((cmp.play1.total_distance - 20.0).abs() < 1e-9);
        assert_eq!(cmp.pass_count_delta, -1);
    }

    #[test]
    fn test_bad_response_keeps_previous() {
        let mut ws = workspace();
        ws.store().select_play1(Some(1));

        let err = ws.load_response(r#"{"match1": {}}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingKey(_)));
        assert_eq!(ws.plays(MatchSide::Match1).len(), 1);
        assert_eq!(ws.store().get_state().selected_play1, Some(1));

        let err = ws.load_http_response(500, r#"{"error": "Analysis timeout"}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::Transport { status: 500, .. }));
        assert!(ws.analysis().is_some());
    }

    #[test]
    fn test_new_dataset_clears_selection() {
        let mut ws = workspace();
        ws.store().select_play1(Some(1));
        ws.store().select_play2(Some(2));
        ws.load_response(&body()).unwrap();
        assert_eq!(ws.store().get_state().selected_play1, None);
        assert_eq!(ws.store().get_state().selected_play2, None);
    }

    #[test]
    fn test_overlay_flag() {
        let ws = workspace();
        ws.store().set_ghost_mode(true);
        assert!(!ws.overlay_active());
        ws.store().select_play1(Some(1));
        ws.store().select_play2(Some(2));
        assert!(ws.overlay_active());
    }

    #[test]
    fn test_reported_pitch_length_changes_pitch_zones() {
        let views_for = |pitch_length: f64| {
            let body = serde_json::json!({
                "configuration": {"pitch_length": pitch_length},
                "match1": {"plays": {"plays_data": [
                    {"play_id": 1, "duration": 5.0, "passes": [
                        {"passer_x": 10.0, "passer_y": 0.0, "receiver_x": 50.0, "receiver_y": 0.0},
                        {"passer_x": 50.0, "passer_y": 0.0, "receiver_x": 90.0, "receiver_y": 0.0}
                    ]}
                ]}},
                "match2": {"plays": {"plays_data": []}},
                "similarities": []
            });
            let mut ws = TacticalWorkspace::new(SelectionStore::new(), ViewConfig::default());
            ws.load_response(&body.to_string()).unwrap();
            assert_eq!(ws.effective_config().pitch_length, pitch_length);
            ws.play_views(MatchSide::Match1)
        };

        let standard = views_for(105.0);
        let long = views_for(1000.0);
        assert_ne!(standard, long);
        assert_eq!(
            standard[0].pitch_zones,
            vec![PitchThird::Defensive, PitchThird::Middle, PitchThird::Attacking]
        );
        assert_eq!(long[0].pitch_zones, vec![PitchThird::Defensive]);
        assert_eq!(standard[0].zones, long[0].zones);
    }

    #[test]
    fn test_empty_workspace() {
        let ws = TacticalWorkspace::new(SelectionStore::new(), ViewConfig::default());
        assert!(ws.plays(MatchSide::Match2).is_empty());
        assert!(ws.play_views(MatchSide::Match1).is_empty());
        ws.store().select_play1(Some(1));
        assert!(ws.candidates().is_empty());
        assert!(ws.comparison().is_none());
    }
}
