//! Play Match CLI Library
//!
//! Loading and text rendering for the terminal viewer.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pm_core::api::{TacticalUpload, UploadedFile};
use pm_core::{Candidate, ComparisonMetrics, PlayView, TacticalWorkspace, ViewConfig};

/// Read an analysis response from disk into `workspace`.
pub fn load_analysis(workspace: &mut TacticalWorkspace, path: &Path) -> Result<()> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read analysis file: {}", path.display()))?;
    workspace
        .load_response(&body)
        .with_context(|| format!("Invalid analysis file: {}", path.display()))?;
    Ok(())
}

/// Config from `path`, or the default preset.
pub fn load_config(path: Option<&Path>, top_k: Option<usize>) -> Result<ViewConfig> {
    let mut config = match path {
        Some(p) => ViewConfig::from_json_file(p)
            .with_context(|| format!("Failed to load config: {}", p.display()))?,
        None => ViewConfig::default(),
    };
    if let Some(k) = top_k {
        config.top_k = k;
    }
    config.validate()?;
    Ok(config)
}

/// Validate a pair of match files the way the upload form does.
pub fn check_match_files(match1: &Path, match2: &Path) -> Result<()> {
    let read = |path: &Path| -> Result<UploadedFile> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(UploadedFile::new(name, bytes))
    };
    let upload = TacticalUpload {
        match1: Some(read(match1)?),
        match2: Some(read(match2)?),
    };
    upload.validate()?;
    Ok(())
}

pub fn render_play_table(views: &[PlayView]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5}  {:<8} {:>6} {:>9} {:>9} {:>9} {:>8}  Zones",
        "Play", "Team", "Passes", "Avg dist", "Max dist", "Total", "Dur (s)"
    );
    for view in views {
        let m = &view.metrics;
        let _ = writeln!(
            out,
            "{:>5}  {:<8} {:>6} {:>9.2} {:>9.2} {:>9.2} {:>8.1}  {}",
            view.play_id,
            view.team.as_deref().unwrap_or("-"),
            m.pass_count,
            m.average_distance,
            m.max_distance,
            m.total_distance,
            m.duration,
            view.zone_summary()
        );
    }
    out
}

pub fn render_passes(view: &PlayView) -> String {
    let mut out = String::new();
    for pass in &view.passes {
        let n = &pass.normalized;
        let _ = writeln!(
            out,
            "  #{:<2} ({:>5.1},{:>5.1}) -> ({:>5.1},{:>5.1})  {:<9} -> {:<9} {:>7.2}  {}",
            pass.index + 1,
            n.passer_x_norm,
            n.passer_y_norm,
            n.receiver_x_norm,
            n.receiver_y_norm,
            pass.origin_zone.label(),
            pass.destination_zone.label(),
            pass.distance,
            pass.direction.label()
        );
    }
    out
}

pub fn render_candidates(play1_id: u32, candidates: &[Candidate<'_>]) -> String {
    let mut out = String::new();
    if candidates.is_empty() {
        let _ = writeln!(out, "No similar plays found for play {}", play1_id);
        return out;
    }
    let _ = writeln!(out, "Most similar plays to play {}:", play1_id);
    for c in candidates {
        let detail = match c.play {
            Some(play) => format!("{} passes, team {}", play.pass_count(), play.team_label()),
            None => format!("{} passes, play data unavailable", c.record.play2_passes),
        };
        let _ = writeln!(
            out,
            "  {}. play {:<4} {:>3.0}%  ({})",
            c.rank,
            c.play_id(),
            c.record.score_percent(),
            detail
        );
    }
    out
}

pub fn render_comparison(cmp: &ComparisonMetrics) -> String {
    let mut out = String::new();
    let score = cmp
        .similarity_score
        .map(|s| format!("{:.0}%", s * 100.0))
        .unwrap_or_else(|| "n/a".to_string());
    let _ = writeln!(out, "Similarity: {}", score);
    let _ = writeln!(out, "{:<14} {:>10} {:>10} {:>10}", "", "Play 1", "Play 2", "Delta");
    let _ = writeln!(
        out,
        "{:<14} {:>10} {:>10} {:>+10}",
        "Passes", cmp.play1.pass_count, cmp.play2.pass_count, cmp.pass_count_delta
    );
    let _ = writeln!(
        out,
        "{:<14} {:>10.2} {:>10.2} {:>+10.2}",
        "Avg distance", cmp.play1.average_distance, cmp.play2.average_distance, cmp.average_distance_delta
    );
    let _ = writeln!(
        out,
        "{:<14} {:>10.2} {:>10.2} {:>+10.2}",
        "Total distance", cmp.play1.total_distance, cmp.play2.total_distance, cmp.total_distance_delta
    );
    let _ = writeln!(
        out,
        "{:<14} {:>10.1} {:>10.1} {:>+10.1}",
        "Duration (s)", cmp.play1.duration, cmp.play2.duration, cmp.duration_delta
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_core::{MatchSide, SelectionStore};
    use std::io::Write;

    const BODY: &str = r#"{
        "match1": {"plays": {"plays_data": [
            {"play_id": 0, "team": "home", "duration": 5.0, "passes": [
                {"passer_x": 0.0, "passer_y": 0.0, "receiver_x": 30.0, "receiver_y": 40.0}
            ]}
        ]}},
        "match2": {"plays": {"plays_data": []}},
        "similarities": [{"play1_id": 0, "play2_id": 6, "similarity_score": 0.87, "play2_passes": 4}]
    }"#;

    fn workspace() -> TacticalWorkspace {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BODY.as_bytes()).unwrap();
        let mut ws = TacticalWorkspace::new(SelectionStore::new(), ViewConfig::default());
        load_analysis(&mut ws, file.path()).unwrap();
        ws
    }

    #[test]
    fn test_play_table() {
        let ws = workspace();
        let table = render_play_table(&ws.play_views(MatchSide::Match1));
        assert!(table.contains("home"));
        assert!(table.contains("50.00"));
        assert!(table.contains("Defensive, Attack"));
    }

    #[test]
    fn test_candidates_with_missing_play() {
        let ws = workspace();
        ws.store().select_play1(Some(0));
        let text = render_candidates(0, &ws.candidates());
        assert!(text.contains("play 6"));
        assert!(text.contains("87%"));
        assert!(text.contains("play data unavailable"));

        assert!(render_candidates(3, &[]).contains("No similar plays"));
    }

    #[test]
    fn test_check_match_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("m1.json");
        let bad = dir.path().join("m2.json");
        std::fs::write(&good, "[]").unwrap();
        std::fs::write(&bad, "{").unwrap();

        assert!(check_match_files(&good, &good).is_ok());
        assert!(check_match_files(&good, &bad).is_err());
    }

    #[test]
    fn test_config_override() {
        let cfg = load_config(None, Some(5)).unwrap();
        assert_eq!(cfg.top_k, 5);
        assert!(load_config(None, Some(0)).is_err());
    }
}
