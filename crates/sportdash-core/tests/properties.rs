use chrono::{DateTime, NaiveDate};
use pretty_assertions::assert_eq;
use sportdash_core::{
    normalize_date, parse_indication_text, parse_report_text, ActivityFlag, IndicationParser,
    NormalizedDate, ParseRequest, ParsedIndication, ReportParser, RequestError, TextParser,
};

fn iso(year: i32, month: u32, day: u32) -> Option<NormalizedDate> {
    Some(NormalizedDate::Iso(
        NaiveDate::from_ymd_opt(year, month, day).unwrap(),
    ))
}

/// Deterministic byte noise, so failures reproduce.
fn noise(len: usize, mut seed: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (seed >> 33) as u8
        })
        .collect()
}

#[test]
fn canonical_iso_dates_are_returned_as_is() {
    for date in ["2025-01-03", "1999-12-31", "2024-02-29"] {
        let normalized = normalize_date(date).unwrap();
        assert_eq!(normalized.to_string(), date);
        assert!(normalized.is_recognized());
    }
}

#[test]
fn dutch_spellings_agree() {
    for input in ["3-1-2025", "03-01-2025", "3/1/2025", "3 januari 2025", "3 jan 2025", "3 Jan. 2025"] {
        assert_eq!(normalize_date(input), iso(2025, 1, 3), "{input}");
    }
}

#[test]
fn placeholders_are_absent() {
    assert_eq!(normalize_date("-"), None);
    assert_eq!(normalize_date(""), None);
    assert_eq!(normalize_date("   "), None);
}

#[test]
fn unknown_dates_keep_their_text() {
    assert_eq!(
        normalize_date("volgende week"),
        Some(NormalizedDate::Unrecognized("volgende week".to_string()))
    );
    assert_eq!(normalize_date("volgende week").unwrap().to_string(), "volgende week");
}

#[test]
fn parsing_never_panics() {
    for text in ["", " ", "\n\n\t", ":", "-\n-\n-", "Naam:", "Naam:\n", "X\nX"] {
        let _ = parse_indication_text(text);
        let _ = parse_report_text(text);
    }

    for seed in [1, 7, 42] {
        let bytes = noise(10_000, seed);
        let text = String::from_utf8_lossy(&bytes);
        let _ = parse_indication_text(&text);
        let _ = parse_report_text(&text);
    }
}

#[test]
fn empty_input_gives_unknown_subject() {
    let record = parse_indication_text("");
    assert_eq!(record.subject_name, "Onbekend");
    assert_eq!(record, ParsedIndication::default());
}

#[test]
fn activity_mark_needs_an_x() {
    let record = parse_indication_text("Sport                    X\nMuziek");
    assert_eq!(record.activity_flags, vec![ActivityFlag::Sport]);
}

#[test]
fn combinable_is_tri_state() {
    assert_eq!(parse_indication_text("Naam: Jan").combinable_with_peer, None);
    let record = parse_indication_text(
        "Kan gecombineerd worden met groepsgenoot en andere indicatie?: Ja, mits begeleid",
    );
    assert_eq!(record.combinable_with_peer, Some(true));
}

#[test]
fn range_on_the_next_line() {
    let record = parse_indication_text("Indicatie afgegeven van - tot:\n14-11-2025 - 01-12-2025");
    assert_eq!(record.validity_range_text, "14-11-2025 - 01-12-2025");
    assert_eq!(record.valid_from, iso(2025, 11, 14));
    assert_eq!(record.valid_until, iso(2025, 12, 1));
}

#[test]
fn learning_goals_not_applicable_in_any_case() {
    for goals in ["n.v.t", "N.V.T.", "nvt", "Nvt, eerst wennen"] {
        let record = parse_indication_text(&format!("Leerdoelen: {goals}"));
        assert_eq!(record.learning_goals, "N.v.t.", "{goals}");
    }
}

#[test]
fn long_sections_are_truncated() {
    let text = format!("Onderbouwing:\n{}", "é".repeat(5000));
    let record = parse_indication_text(&text);
    assert_eq!(record.justification_text.chars().count(), 3000);
}

#[test]
fn report_confidence() {
    let at = DateTime::from_timestamp(1_760_000_000, 0).unwrap();
    let parser = ReportParser::new();

    let complete = parser.parse_at(
        "Aanwezig: 7\nSfeer: gezellig\nVerloop: volleybal\nIncidenten: geen",
        at,
    );
    assert_eq!(complete.confidence_score, 1.0);
    assert!(!complete.needs_review(0.7));

    let empty = parser.parse_at("", at);
    assert_eq!(empty.confidence_score, 0.0);
    assert_eq!(
        empty.missing_fields,
        vec!["presentYouth", "mood", "sessionSummary", "incidents"]
    );
    assert!(empty.needs_review(0.7));

    let partial = parser.parse_at("Aanwezig: 7\nVerloop: volleybal", at);
    assert!(partial.confidence_score < 0.7);
    assert!(partial.needs_review(0.7));
}

#[test]
fn request_bodies() {
    assert_eq!(ParseRequest::from_json(r#"{"text": "Naam: Jan"}"#).unwrap(), "Naam: Jan");

    let missing = ParseRequest::from_json("{}").unwrap_err();
    assert!(matches!(missing, RequestError::MissingText));
    assert_eq!(missing.status_code(), 400);

    let malformed = ParseRequest::from_json("Naam: Jan").unwrap_err();
    assert!(matches!(malformed, RequestError::MalformedBody(_)));
    assert_eq!(malformed.status_code(), 400);
}

#[test]
fn parsing_is_deterministic() {
    let text = "Naam: Jan\nSport X\nGeldig van: 1 mei 2025\nGeldig tot: 1 juni 2025";
    assert_eq!(parse_indication_text(text), parse_indication_text(text));
}

#[test]
fn parsers_are_shared_across_threads() {
    let indications = IndicationParser::new();
    let reports = ReportParser::new();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let indications = &indications;
                let reports = &reports;
                scope.spawn(move || {
                    let record = indications.parse(&format!("Naam: Jongere {i}\nMuziek X"));
                    let report = reports.parse(&format!("Aanwezig: {i}"));
                    (record, report)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let (record, report) = handle.join().unwrap();
            assert_eq!(record.subject_name, format!("Jongere {i}"));
            assert_eq!(record.activity_flags, vec![ActivityFlag::Music]);
            assert_eq!(report.present_youth, Some(i as u32));
        }
    });
}
