//! Integration tests for track generation through the public entry points.
//!
//! These tests cover:
//! - The minimal and degenerate scenarios callers rely on
//! - Difficulty clamping and its effect on the segment mix
//! - The stateful generator and the pure function agreeing
//! - Saving and loading tracks in every export format

use trackgen::builders::{TrackBuilder, TrackGenerator, generate};
use trackgen::config::{GeneratorConfig, SelectionTable, SplitBranch};
use trackgen::export::{self, EditorTrack, GeoAnchor};
use trackgen::{Branch, SegmentGeometry, SegmentKind};

#[test]
fn test_minimal_track() {
    let mut generator = TrackGenerator::new();
    generator.generate_track_with_seed(1, 0.0);
    let track = generator.generate_track(100.0, 1);

    assert_eq!(track.segments.len(), 1);
    assert!(track.checkpoints.len() >= 2);

    let finish = track.checkpoints.last().unwrap();
    assert!(finish.is_finish);
    assert!((finish.distance - 100.0).abs() < 1e-9);
    assert_eq!(finish.position, track.segments[0].end_pos);
}

#[test]
fn test_degenerate_input_is_empty_not_fatal() {
    let mut generator = TrackGenerator::new();
    let track = generator.generate_track(0.0, 0);

    assert!(track.segments.is_empty());
    assert!(track.checkpoints.is_empty());
    assert_eq!(track.metadata.segment_count, 0);
    assert_eq!(track.stats.total_length, 0.0);
}

#[test]
fn test_negative_length_is_empty() {
    let track = generate(&GeneratorConfig::new(5, 0.5), -100.0, 10);
    assert!(track.is_empty());
    assert!(track.finish().is_none());
}

#[test]
fn test_extreme_length_generates_bounded_track() {
    for seed in 0..30 {
        let track = generate(&GeneratorConfig::new(seed, 0.5), 1e300, 20);

        assert_eq!(track.segments.len(), 20);
        assert_eq!(track.checkpoints.len(), 9);
        for segment in &track.segments {
            assert!(segment.features.len() <= 64);
            assert!(segment.end_pos.is_finite());
        }
    }

    let single = generate(&GeneratorConfig::new(13, 0.5), 1e300, 1);
    assert_eq!(single.segments.len(), 1);
}

#[test]
fn test_aggregate_stats_never_exceed_segment_count() {
    for seed in 0..25 {
        let mut generator = TrackGenerator::new();
        generator.set_seed(seed);
        generator.set_difficulty(1.0);
        generator.generate_track(2500.0, 50);

        let stats = generator.track_stats().unwrap();
        let tallied = stats.corner_segments
            + stats.straight_segments
            + stats.hill_segments
            + stats.chicane_segments;
        assert!(tallied <= 50, "seed {seed}: {tallied} tallied");
        assert_eq!(stats.segment_counts.values().sum::<usize>(), 50);
    }
}

#[test]
fn test_difficulty_clamping() {
    for (out_of_range, clamped) in [(-5.0, 0.0), (5.0, 1.0)] {
        let mut a = TrackGenerator::new();
        a.set_seed(77);
        a.set_difficulty(out_of_range);

        let mut b = TrackGenerator::new();
        b.set_seed(77);
        b.set_difficulty(clamped);

        assert_eq!(a.generate_track(1000.0, 20), b.generate_track(1000.0, 20));
    }
}

#[test]
fn test_difficulty_shifts_segment_mix() {
    let mix = |difficulty: f64| {
        let mut counts = std::collections::BTreeMap::new();
        for seed in 0..200 {
            let track = TrackBuilder::new()
                .seed(seed)
                .difficulty(difficulty)
                .segments(50)
                .build();
            for (kind, n) in track.stats.segment_counts {
                *counts.entry(kind).or_insert(0usize) += n;
            }
        }
        counts
    };

    let easy = mix(0.0);
    let hard = mix(1.0);

    assert!(easy[&SegmentKind::Straight] > hard[&SegmentKind::Straight]);
    for kind in [SegmentKind::Hairpin, SegmentKind::Chicane, SegmentKind::Jump] {
        assert!(hard[&kind] > easy[&kind], "{kind} not biased by difficulty");
    }
}

#[test]
fn test_split_branch_choice_is_recorded() {
    let table = SelectionTable::default();
    assert!(table.probability(SegmentKind::Split, 0.5) > 0.0);

    for branch in [SplitBranch::Left, SplitBranch::Right] {
        let config = GeneratorConfig::new(0, 1.0).with_split_branch(branch);
        let splits: Vec<Branch> = (0..100)
            .map(|seed| config.clone().with_seed(seed))
            .flat_map(|seeded| generate(&seeded, 2000.0, 40).segments)
            .filter_map(|segment| match segment.geometry {
                SegmentGeometry::Split { taken, .. } => Some(taken),
                _ => None,
            })
            .collect();

        assert!(!splits.is_empty());
        let expected = match branch {
            SplitBranch::Right => Branch::Right,
            _ => Branch::Left,
        };
        assert!(splits.iter().all(|taken| *taken == expected));
    }
}

#[test]
fn test_json_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.json");
    let track = TrackBuilder::new().seed(2024).difficulty(0.9).segments(40).build();

    export::save_track(&path, &track).unwrap();
    let loaded = export::load_track(&path).unwrap();

    assert_eq!(loaded, track);
}

#[test]
fn test_editor_export_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.json");
    let track = TrackBuilder::new().seed(11).segments(25).build();
    let editor = export::to_editor_track(&track, "Seed 11");

    std::fs::write(&path, serde_json::to_string_pretty(&editor).unwrap()).unwrap();
    let loaded: EditorTrack =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(loaded, editor);
    assert_eq!(loaded.nodes.len(), track.centerline().len());
}

#[test]
fn test_gpx_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.gpx");
    let track = TrackBuilder::new().seed(3).build();

    export::save_gpx(&path, &track, "Seed 3", &GeoAnchor::default()).unwrap();
    let file = std::io::BufReader::new(std::fs::File::open(&path).unwrap());
    let parsed = gpx::read(file).unwrap();

    assert_eq!(parsed.tracks.len(), 1);
    let points = &parsed.tracks[0].segments[0].points;
    assert_eq!(points.len(), track.centerline().len());

    let anchor = GeoAnchor::default();
    let first = points[0].point();
    assert!((first.y() - anchor.lat).abs() < 1e-6);
    assert!((first.x() - anchor.lon).abs() < 1e-6);
    assert_eq!(points[0].elevation, Some(anchor.elevation));
}

#[test]
fn test_config_file_drives_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "seed": 99, "difficulty": 0.25, "split_branch": "right", "checkpoint_count": 4 }"#,
    )
    .unwrap();

    let config = GeneratorConfig::from_json_file(&path).unwrap();
    assert_eq!(config.split_branch, SplitBranch::Right);

    let track = generate(&config, 1000.0, 20);
    assert_eq!(track.checkpoints.len(), 5);

    let equivalent = GeneratorConfig::new(99, 0.25)
        .with_split_branch(SplitBranch::Right)
        .with_checkpoint_count(4);
    assert_eq!(track, generate(&equivalent, 1000.0, 20));
}
