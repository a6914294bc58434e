// Unit tests for domain models

use super::*;

#[test]
fn test_time_spec_parse_seconds() {
    let time = TimeSpec::parse("110").unwrap();
    assert_eq!(time.seconds, 110.0);

    let time = TimeSpec::parse(" 42.5 ").unwrap();
    assert_eq!(time.seconds, 42.5);
}

#[test]
fn test_time_spec_parse_mm_ss() {
    let time = TimeSpec::parse("01:50.5").unwrap();
    assert_eq!(time.seconds, 110.5);
}

#[test]
fn test_time_spec_parse_hh_mm_ss() {
    let time = TimeSpec::parse("1:02:03.5").unwrap();
    assert_eq!(time.seconds, 3723.5);
}

#[test]
fn test_time_spec_parse_invalid() {
    assert!(TimeSpec::parse("invalid").is_err());
    assert!(TimeSpec::parse("00:60").is_err());
    assert!(TimeSpec::parse("1:60:00").is_err());
    assert!(TimeSpec::parse("-10").is_err());
    assert!(TimeSpec::parse("inf").is_err());
    assert!(TimeSpec::parse("1:2:3:4").is_err());
}

#[test]
fn test_time_spec_display() {
    assert_eq!(TimeSpec::from_seconds(110.0).to_string(), "1:50.000");
    assert_eq!(TimeSpec::from_seconds(3723.5).to_string(), "1:02:03.500");
}

#[test]
fn test_clip_spec_valid() {
    let clip = ClipSpec::new("abc", 30.0, 45.0).unwrap();
    assert_eq!(clip.video_id(), "abc");
    assert_eq!(clip.duration(), 15.0);
    assert!(!clip.is_past_end(44.9));
    assert!(clip.is_past_end(45.0));
    assert!(clip.is_past_end(46.0));
}

#[test]
fn test_clip_spec_deserialize_checks_bounds() {
    let clip: ClipSpec =
        serde_json::from_str(r#"{"video_id":"abc","start_sec":30.0,"end_sec":45.0}"#).unwrap();
    assert_eq!(clip.start_sec(), 30.0);
    assert_eq!(clip.end_sec(), 45.0);

    let inverted = serde_json::from_str::<ClipSpec>(r#"{"video_id":"abc","start_sec":50.0,"end_sec":10.0}"#);
    assert!(inverted.is_err());
}

#[test]
fn test_clip_spec_zero_start_allowed() {
    assert!(ClipSpec::new("abc", 0.0, 0.5).is_ok());
}

#[test]
fn test_clip_spec_invalid() {
    assert!(matches!(
        ClipSpec::new("abc", 45.0, 30.0),
        Err(DomainError::InvalidTimeRange(_))
    ));
    assert!(matches!(
        ClipSpec::new("abc", 30.0, 30.0),
        Err(DomainError::InvalidTimeRange(_))
    ));
    assert!(matches!(
        ClipSpec::new("abc", -1.0, 30.0),
        Err(DomainError::InvalidTimeRange(_))
    ));
    assert!(matches!(
        ClipSpec::new("abc", 0.0, f64::NAN),
        Err(DomainError::InvalidTimeRange(_))
    ));
    assert!(matches!(
        ClipSpec::new("  ", 0.0, 10.0),
        Err(DomainError::InvalidClip(_))
    ));
}

#[test]
fn test_playback_state_defaults() {
    let state = PlaybackState::default();
    assert!(!state.is_playing);
    assert!(state.is_looping);
    assert!(state.is_captions_on);
}

#[test]
fn test_controller_phase_from_parts() {
    let mut state = PlaybackState::default();
    assert_eq!(ControllerPhase::from_parts(false, &state), ControllerPhase::Unbound);
    assert_eq!(ControllerPhase::from_parts(true, &state), ControllerPhase::BoundPaused);
    state.is_playing = true;
    assert_eq!(ControllerPhase::from_parts(false, &state), ControllerPhase::Unbound);
    assert_eq!(ControllerPhase::from_parts(true, &state), ControllerPhase::BoundPlaying);
}

#[test]
fn test_control_labels_reflect_flags() {
    let labels = ControlLabels::for_state(&PlaybackState::default());
    assert_eq!(labels.looping, "Loop: ON");
    assert_eq!(labels.captions, "CC: ON");

    let labels = ControlLabels::for_state(&PlaybackState::with_preferences(false, false));
    assert_eq!(
        labels.as_vec(),
        vec!["Play from start", "Pause", "Loop: OFF", "CC: OFF"]
    );
}

#[test]
fn test_focus_target_text_entry() {
    assert!(!FocusTarget::none().accepts_text());
    assert!(!FocusTarget::element("button").accepts_text());
    assert!(FocusTarget::element("input").accepts_text());
    assert!(FocusTarget::element("TEXTAREA").accepts_text());
    assert!(FocusTarget::content_editable("div").accepts_text());
}

#[test]
fn test_mount_point_presence() {
    assert!(MountPoint::new("player").is_present());
    assert!(!MountPoint::new("").is_present());
}

#[test]
fn test_player_command_display() {
    let seek = PlayerCommand::SeekTo {
        seconds: 30.0,
        allow_seek_ahead: true,
    };
    assert_eq!(seek.to_string(), "seekTo(30, true)");
    assert_eq!(PlayerCommand::Play.to_string(), "playVideo()");
    assert_eq!(
        PlayerCommand::LoadModule("captions".to_string()).to_string(),
        "loadModule(\"captions\")"
    );
}

fn entry(id: u64, start: f64, end: f64) -> ClipEntry {
    ClipEntry {
        id,
        video_id: "Ks-_Mh1QhMc".to_string(),
        start_sec: start,
        end_sec: end,
        title: None,
    }
}

#[test]
fn test_catalog_newest_first() {
    let catalog = ClipCatalog::new(vec![entry(1, 0.0, 5.0), entry(3, 1.0, 2.0), entry(2, 4.0, 8.0)])
        .unwrap();
    let ids: Vec<u64> = catalog.newest_first().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(catalog.len(), 3);
}

#[test]
fn test_catalog_rejects_invalid_entries() {
    assert!(ClipCatalog::new(vec![entry(1, 10.0, 5.0)]).is_err());
    assert!(ClipCatalog::new(vec![entry(1, 0.0, 5.0), entry(1, 1.0, 2.0)]).is_err());
}

#[test]
fn test_catalog_lookup() {
    let catalog = ClipCatalog::new(vec![entry(7, 110.0, 140.0)]).unwrap();
    assert_eq!(catalog.get(7).unwrap().start_sec, 110.0);
    assert_eq!(catalog.get(8), Err(DomainError::ClipNotFound(8)));
}

#[test]
fn test_review_score_bounds() {
    assert!(ReviewScore::new(0).is_err());
    assert_eq!(ReviewScore::new(1).unwrap().value(), 1);
    assert_eq!(ReviewScore::new(5).unwrap().value(), 5);
    assert_eq!(ReviewScore::new(6), Err(DomainError::InvalidScore(6)));
}
