use horary::aspects::{time_to_perfection, AspectKind};
use horary::ephemeris::{Body, BodyPosition, ChartSnapshot};
use horary::perfection::{
    LinearAspectClock, PerfectionOutcome, PerfectionResolver, Quality, NO_PROHIBITION_REASON,
};
use horary::western::DignityReception;
use horary_config::PerfectionConfig;

const J2000: f64 = 2_451_545.0;

/// Scripted contact times keyed by (significator lon, third body lon, kind).
fn scripted(
    entries: Vec<(f64, f64, AspectKind, f64)>,
) -> impl Fn(&BodyPosition, &BodyPosition, AspectKind, f64, f64) -> f64 {
    move |sig: &BodyPosition, other: &BodyPosition, kind: AspectKind, _jd: f64, _horizon: f64| {
        entries
            .iter()
            .find(|(a, b, k, _)| *a == sig.lon && *b == other.lon && *k == kind)
            .map_or(f64::INFINITY, |(_, _, _, t)| *t)
    }
}

/// Sun and Venus as significators, both early in Aries.
fn significators() -> ChartSnapshot {
    ChartSnapshot::new(J2000)
        .with(Body::Sun, 10.0, 1.0)
        .with(Body::Venus, 15.0, 1.2)
}

fn resolve_with(
    config: &PerfectionConfig,
    chart: &ChartSnapshot,
    entries: Vec<(f64, f64, AspectKind, f64)>,
    days_ahead: f64,
) -> PerfectionOutcome {
    let clock = scripted(entries);
    PerfectionResolver::new(config, &clock, &DignityReception).resolve(
        chart,
        Body::Sun,
        Body::Venus,
        days_ahead,
    )
}

fn resolve(
    chart: &ChartSnapshot,
    entries: Vec<(f64, f64, AspectKind, f64)>,
    days_ahead: f64,
) -> PerfectionOutcome {
    resolve_with(&PerfectionConfig::default(), chart, entries, days_ahead)
}

#[test]
fn test_slower_body_collects() {
    let chart = significators().with(Body::Saturn, 12.0, 0.1);
    let outcome = resolve(
        &chart,
        vec![
            (10.0, 12.0, AspectKind::Conjunction, 3.0),
            (15.0, 12.0, AspectKind::Conjunction, 7.0),
        ],
        10.0,
    );

    match &outcome {
        PerfectionOutcome::Collection { collector, event } => {
            assert_eq!(*collector, Body::Saturn);
            assert_eq!(event.t_event, 7.0);
            assert_eq!(event.aspect, AspectKind::Conjunction);
            assert_eq!(event.quality, Quality::Easier);
            // Saturn stands in the Sun's exaltation
            assert!(event.reception);
            assert_eq!(
                event.reason,
                "Perfection by collection (conjunction): positive (easier)"
            );
        }
        other => panic!("expected collection, got {other:?}"),
    }
}

#[test]
fn test_faster_body_translates() {
    let chart = significators().with(Body::Mercury, 12.0, 1.8);
    let outcome = resolve(
        &chart,
        vec![
            (10.0, 12.0, AspectKind::Conjunction, 3.0),
            (15.0, 12.0, AspectKind::Conjunction, 7.0),
        ],
        10.0,
    );

    assert!(matches!(
        outcome,
        PerfectionOutcome::Translation { translator: Body::Mercury, .. }
    ));
    assert_eq!(outcome.t_event(), Some(7.0));
}

#[test]
fn test_middle_speed_body_prohibits_first_significator() {
    let chart = significators().with(Body::Mars, 12.0, 1.1);
    let outcome = resolve(
        &chart,
        vec![
            (10.0, 12.0, AspectKind::Conjunction, 3.0),
            (15.0, 12.0, AspectKind::Conjunction, 7.0),
        ],
        10.0,
    );

    assert_eq!(
        outcome,
        PerfectionOutcome::Prohibition {
            significator: Body::Sun,
            prohibitor: Body::Mars,
            event: horary::perfection::OutcomeEvent {
                t_event: 3.0,
                aspect: AspectKind::Conjunction,
                quality: Quality::Easier,
                reception: false,
                reason: "mars conjoins sun before perfection".to_string(),
            },
        }
    );
    assert!(outcome.is_prohibited());
    assert_eq!(outcome.mediator(), Some(Body::Mars));
}

#[test]
fn test_single_future_leg_prohibits() {
    let chart = significators().with(Body::Saturn, 12.0, 0.1);
    let outcome = resolve(
        &chart,
        vec![(15.0, 12.0, AspectKind::Square, 4.0)],
        10.0,
    );

    match &outcome {
        PerfectionOutcome::Prohibition {
            significator,
            prohibitor,
            event,
        } => {
            assert_eq!(*significator, Body::Venus);
            assert_eq!(*prohibitor, Body::Saturn);
            assert_eq!(event.t_event, 4.0);
            assert_eq!(event.quality, Quality::Difficult);
            assert_eq!(event.reason, "saturn squares venus before perfection");
        }
        other => panic!("expected prohibition, got {other:?}"),
    }
}

#[test]
fn test_translation_carries_a_past_contact() {
    // Mercury left the Sun two days ago and reaches Venus in five.
    let entries = vec![
        (10.0, 12.0, AspectKind::Conjunction, -2.0),
        (15.0, 12.0, AspectKind::Conjunction, 5.0),
    ];

    let chart = significators().with(Body::Mercury, 12.0, 1.8);
    let outcome = resolve(&chart, entries.clone(), 10.0);
    assert!(matches!(
        outcome,
        PerfectionOutcome::Translation { translator: Body::Mercury, .. }
    ));
    assert_eq!(outcome.t_event(), Some(5.0));

    // A slow body with the same contacts only gets in the way.
    let chart = significators().with(Body::Saturn, 12.0, 0.1);
    let outcome = resolve(&chart, entries, 10.0);
    assert!(matches!(
        outcome,
        PerfectionOutcome::Prohibition { significator: Body::Venus, prohibitor: Body::Saturn, .. }
    ));
}

#[test]
fn test_past_contact_before_sign_entry_is_not_carried() {
    // Mercury entered Aries about a day ago, after the supposed contact.
    let chart = significators().with(Body::Mercury, 2.0, 1.8);
    let entries = vec![
        (10.0, 2.0, AspectKind::Conjunction, -2.0),
        (15.0, 2.0, AspectKind::Conjunction, 5.0),
    ];

    let outcome = resolve(&chart, entries.clone(), 10.0);
    assert!(matches!(
        outcome,
        PerfectionOutcome::Prohibition { significator: Body::Venus, prohibitor: Body::Mercury, .. }
    ));

    let relaxed = PerfectionConfig {
        allow_out_of_sign: true,
        ..PerfectionConfig::default()
    };
    let outcome = resolve_with(&relaxed, &chart, entries, 10.0);
    assert!(matches!(
        outcome,
        PerfectionOutcome::Translation { translator: Body::Mercury, .. }
    ));
}

#[test]
fn test_earliest_event_wins_across_bodies() {
    let chart = significators()
        .with(Body::Mars, 12.0, 1.1)
        .with(Body::Jupiter, 13.0, 1.1);
    let outcome = resolve(
        &chart,
        vec![
            (10.0, 12.0, AspectKind::Square, 5.0),
            (15.0, 13.0, AspectKind::Square, 3.0),
        ],
        10.0,
    );

    assert_eq!(outcome.mediator(), Some(Body::Jupiter));
    assert_eq!(outcome.t_event(), Some(3.0));
}

#[test]
fn test_contact_after_sign_exit_needs_out_of_sign_allowance() {
    // Venus leaves Aries in a little over four days.
    let chart = ChartSnapshot::new(J2000)
        .with(Body::Sun, 10.0, 1.0)
        .with(Body::Venus, 25.0, 1.2)
        .with(Body::Mars, 12.0, 1.1);
    let entries = vec![(25.0, 12.0, AspectKind::Conjunction, 6.0)];

    let strict = resolve(&chart, entries.clone(), 10.0);
    assert_eq!(
        strict,
        PerfectionOutcome::None {
            reason: NO_PROHIBITION_REASON.to_string()
        }
    );

    let relaxed = PerfectionConfig {
        allow_out_of_sign: true,
        ..PerfectionConfig::default()
    };
    let outcome = resolve_with(&relaxed, &chart, entries, 10.0);
    assert!(outcome.is_prohibited());
    assert_eq!(outcome.t_event(), Some(6.0));
}

#[test]
fn test_contact_at_or_after_perfection_is_ignored() {
    let chart = significators().with(Body::Mars, 12.0, 1.1);
    let outcome = resolve(
        &chart,
        vec![(10.0, 12.0, AspectKind::Conjunction, 10.0)],
        10.0,
    );
    assert_eq!(outcome.reason(), NO_PROHIBITION_REASON);
    assert!(outcome.event().is_none());
}

#[test]
fn test_missing_significator_yields_none() {
    let chart = ChartSnapshot::new(J2000)
        .with(Body::Sun, 10.0, 1.0)
        .with(Body::Mars, 12.0, 1.1);
    let outcome = resolve(
        &chart,
        vec![(10.0, 12.0, AspectKind::Conjunction, 3.0)],
        10.0,
    );
    assert_eq!(outcome.reason(), NO_PROHIBITION_REASON);
}

/// Mars applying to Saturn with the Moon just past Mars and closing on Saturn.
fn moon_translates_mars_to_saturn() -> ChartSnapshot {
    ChartSnapshot::new(J2000)
        .with(Body::Mars, 10.0, 0.5)
        .with(Body::Saturn, 20.0, 0.05)
        .with(Body::Moon, 12.0, 13.0)
}

#[test]
fn test_linear_clock_finds_lunar_translation() {
    let chart = moon_translates_mars_to_saturn();
    let mars = chart.get(Body::Mars).unwrap();
    let saturn = chart.get(Body::Saturn).unwrap();
    let days_ahead = time_to_perfection(mars, saturn, AspectKind::Conjunction);
    assert!((days_ahead - 10.0 / 0.45).abs() < 1e-9);

    let config = PerfectionConfig::default();
    let resolver = PerfectionResolver::new(&config, &LinearAspectClock, &DignityReception);
    let outcome = resolver.resolve(&chart, Body::Mars, Body::Saturn, days_ahead);

    match &outcome {
        PerfectionOutcome::Translation { translator, event } => {
            assert_eq!(*translator, Body::Moon);
            assert_eq!(event.aspect, AspectKind::Conjunction);
            assert!((event.t_event - 8.0 / 12.95).abs() < 1e-9);
            // Mars rules Aries and receives the Moon
            assert!(event.reception);
        }
        other => panic!("expected translation, got {other:?}"),
    }
}

#[test]
fn test_resolution_is_deterministic() {
    let chart = moon_translates_mars_to_saturn();
    let config = PerfectionConfig::default();
    let resolver = PerfectionResolver::new(&config, &LinearAspectClock, &DignityReception);

    let first = resolver.resolve(&chart, Body::Mars, Body::Saturn, 22.0);
    let second = resolver.resolve(&chart, Body::Mars, Body::Saturn, 22.0);
    assert_eq!(first, second);
    assert_eq!(
        resolver.scan(&chart, Body::Mars, Body::Saturn, 22.0),
        resolver.scan(&chart, Body::Mars, Body::Saturn, 22.0)
    );
}

#[test]
fn test_outcome_serializes_with_type_tag() {
    let chart = moon_translates_mars_to_saturn();
    let config = PerfectionConfig::default();
    let resolver = PerfectionResolver::new(&config, &LinearAspectClock, &DignityReception);
    let outcome = resolver.resolve(&chart, Body::Mars, Body::Saturn, 22.0);

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["type"], "translation");
    assert_eq!(json["translator"], "moon");
    assert_eq!(json["aspect"], "conjunction");
    assert_eq!(json["quality"], "easier");
    assert_eq!(json["reception"], true);

    let none = PerfectionOutcome::None {
        reason: NO_PROHIBITION_REASON.to_string(),
    };
    let text = serde_json::to_string(&none).unwrap();
    assert_eq!(text, r#"{"type":"none","reason":"No prohibitions detected"}"#);
    let back: PerfectionOutcome = serde_json::from_str(&text).unwrap();
    assert_eq!(back, none);
}

#[test]
fn test_moon_separating_from_one_square_translates_to_the_other() {
    // The Moon left Mars's square 0.16 days ago. Its other square to Mars
    // is two weeks off, long after it leaves Cancer.
    let chart = ChartSnapshot::new(J2000)
        .with(Body::Mars, 10.0, 0.5)
        .with(Body::Saturn, 20.0, 0.05)
        .with(Body::Moon, 102.0, 13.0);
    let mars = chart.get(Body::Mars).unwrap();
    let saturn = chart.get(Body::Saturn).unwrap();
    let days_ahead = time_to_perfection(mars, saturn, AspectKind::Conjunction);

    let config = PerfectionConfig::default();
    let resolver = PerfectionResolver::new(&config, &LinearAspectClock, &DignityReception);
    let outcome = resolver.resolve(&chart, Body::Mars, Body::Saturn, days_ahead);

    match &outcome {
        PerfectionOutcome::Translation { translator, event } => {
            assert_eq!(*translator, Body::Moon);
            assert_eq!(event.aspect, AspectKind::Square);
            assert!((event.t_event - 8.0 / 12.95).abs() < 1e-9);
            assert_eq!(event.quality, Quality::Difficult);
            assert!(!event.reception);
            assert_eq!(
                event.reason,
                "Perfection by translation (square): positive with difficulty"
            );
        }
        other => panic!("expected translation, got {other:?}"),
    }
}

#[test]
fn test_no_perfection_ahead_yields_none() {
    let chart = significators().with(Body::Mars, 12.0, 1.1);
    let entries = vec![(10.0, 12.0, AspectKind::Square, 3.0)];

    for days_ahead in [f64::NAN, 0.0, -5.0] {
        let outcome = resolve(&chart, entries.clone(), days_ahead);
        assert_eq!(outcome.reason(), NO_PROHIBITION_REASON);
        assert_eq!(outcome.t_event(), None);
    }

    let config = PerfectionConfig::default();
    let clock = scripted(entries);
    let resolver = PerfectionResolver::new(&config, &clock, &DignityReception);
    assert!(resolver
        .scan(&chart, Body::Sun, Body::Venus, f64::NAN)
        .is_empty());
}

#[test]
fn test_difficult_collection_softened_by_reception() {
    let chart = significators().with(Body::Saturn, 12.0, 0.1);
    let outcome = resolve(
        &chart,
        vec![
            (10.0, 12.0, AspectKind::Square, 3.0),
            (15.0, 12.0, AspectKind::Square, 7.0),
        ],
        10.0,
    );

    match &outcome {
        PerfectionOutcome::Collection { collector, event } => {
            assert_eq!(*collector, Body::Saturn);
            assert_eq!(event.t_event, 7.0);
            assert_eq!(event.quality, Quality::Difficult);
            assert!(event.reception);
            assert_eq!(
                event.reason,
                concat!(
                    "Perfection by collection (square): ",
                    "positive with difficulty (softened by reception)"
                )
            );
        }
        other => panic!("expected collection, got {other:?}"),
    }
}

#[test]
fn test_difficult_translation_without_reception() {
    // Jupiter in Cancer: no dignity in Aries, and neither significator has
    // one in Cancer.
    let chart = significators().with(Body::Jupiter, 100.0, 1.5);
    let outcome = resolve(
        &chart,
        vec![
            (10.0, 100.0, AspectKind::Opposition, 3.0),
            (15.0, 100.0, AspectKind::Opposition, 7.0),
        ],
        10.0,
    );

    match &outcome {
        PerfectionOutcome::Translation { translator, event } => {
            assert_eq!(*translator, Body::Jupiter);
            assert_eq!(event.quality, Quality::Difficult);
            assert!(!event.reception);
            assert_eq!(
                event.reason,
                "Perfection by translation (opposition): positive with difficulty"
            );
        }
        other => panic!("expected translation, got {other:?}"),
    }
}

#[test]
fn test_retrograde_speeds_compare_by_magnitude() {
    let retrograde_venus = || {
        ChartSnapshot::new(J2000)
            .with(Body::Sun, 10.0, 1.0)
            .with(Body::Venus, 15.0, -1.2)
    };
    let entries = |lon: f64| {
        vec![
            (10.0, lon, AspectKind::Conjunction, 3.0),
            (15.0, lon, AspectKind::Conjunction, 7.0),
        ]
    };

    // 1.1 is faster than -1.2 as a signed number but slower in magnitude.
    let chart = retrograde_venus().with(Body::Mercury, 12.0, 1.1);
    let outcome = resolve(&chart, entries(12.0), 10.0);
    assert!(matches!(
        outcome,
        PerfectionOutcome::Prohibition { significator: Body::Sun, prohibitor: Body::Mercury, .. }
    ));
    assert_eq!(outcome.t_event(), Some(3.0));

    let chart = retrograde_venus().with(Body::Mercury, 12.0, 1.5);
    let outcome = resolve(&chart, entries(12.0), 10.0);
    assert!(matches!(
        outcome,
        PerfectionOutcome::Translation { translator: Body::Mercury, .. }
    ));

    // A retrograde Saturn is still the slowest body.
    let chart = retrograde_venus().with(Body::Saturn, 12.0, -0.1);
    let outcome = resolve(&chart, entries(12.0), 10.0);
    assert!(matches!(
        outcome,
        PerfectionOutcome::Collection { collector: Body::Saturn, .. }
    ));
}
