//! Replay tests: position trails, charts and blades/spoons.

use bumps_core::{
    decoder::DecodeOptions,
    error::BumpsError,
    event::Event,
    notation,
    replay::{self, TrailPoint},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn town_2020(options: DecodeOptions, results: &str) -> Event {
    let doc = format!(
        "Set,Town Bumps\nShort,Town\nGender,M\nYear,2020\nDays,2\n\n\
         Division,Jesus 1,Caius 1,Downing 1\n\
         Division,Jesus 2,Caius 2,Downing 2\n\n\
         Results\n{results}"
    );
    notation::read_notation(&doc, options).unwrap()
}

fn positions(trail: &[TrailPoint]) -> Vec<usize> {
    trail.iter().map(|p| p.pos).collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn trail_follows_crew_across_division_boundary() {
    let event = town_2020(DecodeOptions::default(), "ur uu\nrrr rrrr");

    // Downing 1 is bumped out of the top division, Jesus 2 takes its place.
    let downing = replay::position_trail(&event, 0, 2).unwrap();
    let jesus_2 = replay::position_trail(&event, 1, 0).unwrap();

    assert_eq!(positions(&downing), vec![3, 4, 4]);
    assert_eq!(positions(&jesus_2), vec![4, 3, 3]);
    assert_eq!(
        downing.iter().map(|p| p.day).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn trail_stops_at_first_unraced_day() {
    let event = town_2020(DecodeOptions { allow_partial: true }, "ur uu");

    let trail = replay::position_trail(&event, 0, 0).unwrap();
    assert_eq!(trail, vec![TrailPoint { day: 0, pos: 1 }, TrailPoint { day: 1, pos: 2 }]);
}

#[test]
fn chart_covers_every_crew_and_division() {
    let event = town_2020(DecodeOptions::default(), "ur uu\nrrr rrrr");
    let chart = replay::chart(&event).unwrap();

    assert_eq!(chart.year, 2020);
    assert_eq!(chart.crews.len(), 6);
    assert_eq!(chart.divisions.len(), 2);
    assert_eq!((chart.divisions[1].start, chart.divisions[1].length), (4, 3));

    let caius_1 = &chart.crews[1];
    assert_eq!(caius_1.name, "Caius 1");
    assert_eq!(positions(&caius_1.values), vec![2, 1, 1]);
    assert!(caius_1.blades);
    assert!(!caius_1.spoons);

    let caius_2 = &chart.crews[4];
    assert_eq!(positions(&caius_2.values), vec![5, 6, 6]);
    assert!(caius_2.spoons, "held the bottom of the field after being bumped");
}

#[test]
fn chart_serializes_for_plotting() {
    let event = town_2020(DecodeOptions::default(), "ur uu\nrrr rrrr");
    let json = serde_json::to_value(replay::chart(&event).unwrap()).unwrap();

    assert_eq!(json["crews"][0]["name"], "Jesus 1");
    assert_eq!(json["crews"][0]["values"][1]["pos"], 2);
    assert_eq!(json["divisions"][0]["start"], 1);
}

#[test]
fn chart_rejects_mismatched_completion_table() {
    let mut event = town_2020(DecodeOptions::default(), "ur uu\nrrr rrrr");
    event.completed.pop();

    let err = replay::chart(&event).unwrap_err();
    assert!(matches!(err, BumpsError::StructuralMismatch { expected: 2, found: 1 }));
}

#[test]
fn blades_needs_a_gain_every_day() {
    assert!(replay::is_blades(&[5, 4, 3, 2, 1]));
    assert!(!replay::is_blades(&[5, 4, 3, 3, 1]));
    assert!(replay::is_blades(&[2, 1, 1]), "rowing over at the head still counts");
}

#[test]
fn spoons_needs_a_loss_every_day() {
    assert!(replay::is_spoons(&[1, 2, 3, 4], 5));
    assert!(!replay::is_spoons(&[1, 2, 2, 4], 5));
    assert!(replay::is_spoons(&[4, 5, 5], 5), "rowing over at the bottom still counts");
}
