use intake_core::body_part::BodyPart;
use intake_core::error::ValidationError;
use intake_core::ids::CASE_ID_FLOOR;
use intake_core::models::pain_entry::PainEntry;
use intake_core::models::pain_map::{EMPTY_PAYLOAD, PainBodyMap, decode_entries};

const CASE: i64 = 1_042;

fn sample_map() -> PainBodyMap {
    let mut map = PainBodyMap::new(CASE).unwrap();
    map.set_entry("head", true, false, 8, "throbbing").unwrap();
    map.set_entry("shoulders", true, true, 6, "").unwrap();
    map.set_entry("low_back", false, true, 9, "worse when sitting").unwrap();
    map
}

#[test]
fn new_map_is_empty_and_unsaved() {
    let map = PainBodyMap::new(CASE).unwrap();
    assert_eq!(map.id(), None);
    assert_eq!(map.case_id(), CASE);
    assert_eq!(map.form_type(), "pain_body_map");
    assert_eq!(map.payload_text(), EMPTY_PAYLOAD);
    assert!(map.entries().is_empty());
    assert!(map.is_valid_record());
}

#[test]
fn case_id_below_floor_is_rejected() {
    let err = PainBodyMap::new(CASE_ID_FLOOR - 1).unwrap_err();
    assert_eq!(err, ValidationError::InvalidCaseId(CASE_ID_FLOOR - 1));

    let mut map = PainBodyMap::new(CASE).unwrap();
    assert!(map.set_case_id(0).is_err());
    assert_eq!(map.case_id(), CASE);
}

#[test]
fn payload_round_trips_through_decode() {
    let map = sample_map();
    let decoded = decode_entries(map.payload_text());
    assert_eq!(&decoded.entries, map.entries());
    assert_eq!(decoded.rejected, 0);

    let rebuilt = PainBodyMap::from_parts(
        5_000_000,
        CASE,
        map.payload_text(),
        "",
        map.created_at(),
        map.updated_at(),
    )
    .unwrap();
    assert_eq!(rebuilt.entries(), map.entries());
    assert_eq!(rebuilt.id(), Some(5_000_000));
}

#[test]
fn payload_lists_entries_head_to_feet() {
    let mut map = PainBodyMap::new(CASE).unwrap();
    map.set_entry("feet", false, false, 2, "").unwrap();
    map.set_entry("head", false, false, 3, "").unwrap();
    let payload = map.payload_text();
    assert!(payload.find("\"head\"").unwrap() < payload.find("\"feet\"").unwrap());
}

#[test]
fn set_entry_overwrites_instead_of_merging() {
    let mut map = sample_map();
    map.set_entry("head", false, true, 2, "").unwrap();
    let head = map.entry("head").unwrap();
    assert!(!head.left);
    assert!(head.right);
    assert_eq!(head.intensity, 2);
    assert_eq!(head.note, "");
}

#[test]
fn invalid_set_entry_leaves_record_untouched() {
    let mut map = sample_map();
    let entries_before = map.entries().clone();
    let payload_before = map.payload_text().to_string();

    assert!(matches!(
        map.set_entry("tail", true, false, 3, ""),
        Err(ValidationError::UnknownBodyPart(_))
    ));
    assert_eq!(
        map.set_entry("knees", true, false, 11, ""),
        Err(ValidationError::IntensityOutOfRange(11))
    );
    assert!(map.set_entry("knees", true, false, -1, "").is_err());
    assert!(matches!(
        map.set_entry("knees", true, false, 4, &"x".repeat(501)),
        Err(ValidationError::TooLong { max: 500, .. })
    ));

    assert_eq!(map.entries(), &entries_before);
    assert_eq!(map.payload_text(), payload_before);
}

#[test]
fn note_at_limit_is_accepted() {
    let mut map = PainBodyMap::new(CASE).unwrap();
    map.set_entry("neck", false, false, 1, &"é".repeat(500)).unwrap();
    assert!(map.has_entry("neck"));
}

#[test]
fn put_entry_uses_entry_location() {
    let mut map = PainBodyMap::new(CASE).unwrap();
    map.put_entry(PainEntry::new(BodyPart::Wrists, true, false, 4, "typing"))
        .unwrap();
    assert!(map.has_entry("wrists"));

    let err = map.put_entry(PainEntry::default()).unwrap_err();
    assert_eq!(err, ValidationError::UnknownBodyPart(String::new()));
}

#[test]
fn aggregates_ignore_zero_intensity() {
    let mut map = sample_map();
    map.set_entry("knees", false, false, 0, "").unwrap();

    assert_eq!(map.affected_count(), 3);
    assert_eq!(map.max_intensity(), 9);
    assert!((map.average_intensity() - 7.67).abs() < 0.01);
    assert_eq!(
        map.entries_at_or_above(8),
        vec![BodyPart::Head, BodyPart::LowBack]
    );
    assert_eq!(map.entries_at_or_above(0).len(), 4);
}

#[test]
fn aggregates_on_empty_map_are_zero() {
    let map = PainBodyMap::new(CASE).unwrap();
    assert_eq!(map.affected_count(), 0);
    assert_eq!(map.max_intensity(), 0);
    assert_eq!(map.average_intensity(), 0.0);
}

#[test]
fn side_aggregation() {
    let map = sample_map();
    assert_eq!(map.left_affected(), vec![BodyPart::Head, BodyPart::Shoulders]);
    assert_eq!(map.right_affected(), vec![BodyPart::Shoulders, BodyPart::LowBack]);
    assert_eq!(map.bilateral_affected(), vec![BodyPart::Shoulders]);
}

#[test]
fn sides_without_pain_are_not_affected() {
    let mut map = PainBodyMap::new(CASE).unwrap();
    map.set_entry("hips", true, true, 0, "").unwrap();
    assert!(map.left_affected().is_empty());
    assert!(map.bilateral_affected().is_empty());
}

#[test]
fn payload_replace_drops_previous_entries() {
    let mut map = sample_map();
    map.set_payload_text(
        r#"{"jaw":{"body_part":"jaw","side_left":true,"side_right":true,"pain_level":5,"comments":"TMJ"}}"#,
    );
    assert!(map.has_entry("jaw"));
    assert!(!map.has_entry("head"));
    assert_eq!(map.entry("jaw").unwrap().note, "TMJ");
    assert_eq!(map.entries().len(), 1);
}

#[test]
fn lenient_parse_keeps_what_it_can() {
    let mut map = PainBodyMap::new(CASE).unwrap();
    map.set_payload_text(
        r#"{
            "knees": {"pain_level": 3, "colour": "red"},
            "tail": {"body_part": "tail", "pain_level": 2},
            "neck": {"body_part": "neck", "pain_level": "high"},
            "chest": {"body_part": "chest", "pain_level": 14},
            "hands": {"body_part": "feet", "side_left": true, "pain_level": 1}
        }"#,
    );

    let knees = map.entry("knees").unwrap();
    assert_eq!(knees.location, "knees");
    assert_eq!(knees.intensity, 3);
    assert!(!knees.left);
    assert_eq!(knees.note, "");

    assert!(!map.has_entry("neck"));
    assert!(!map.has_entry("chest"));
    assert_eq!(map.entry("hands").unwrap().location, "hands");
    assert!(!map.has_entry("feet"));
    assert_eq!(map.entries().len(), 2);
    assert_eq!(map.rejected_entries(), 3);
}

#[test]
fn skipped_payload_entries_fail_the_record_guard() {
    let mut map = PainBodyMap::new(CASE).unwrap();
    map.set_payload_text(
        r#"{"chest":{"body_part":"chest","pain_level":14},"tail":{"pain_level":3}}"#,
    );
    assert!(map.entries().is_empty());
    assert_eq!(map.rejected_entries(), 2);
    assert!(!map.is_valid_record());
    assert_eq!(
        map.check_payload(),
        Err(ValidationError::RejectedPayloadEntries(2))
    );

    // Re-encoding from the map makes the text agree with it again.
    map.set_entry("chest", false, false, 4, "").unwrap();
    assert_eq!(map.rejected_entries(), 0);
    assert!(map.is_valid_record());
}

#[test]
fn unparseable_payload_yields_no_entries() {
    let mut map = sample_map();
    map.set_payload_text("not json at all");
    assert!(map.entries().is_empty());
    assert_eq!(map.payload_text(), "not json at all");

    assert!(!map.is_valid_record());

    map.set_payload_text("[1, 2, 3]");
    assert!(map.entries().is_empty());
    assert_eq!(map.rejected_entries(), 1);

    map.clear_all();
    assert!(map.is_valid_record());
}

#[test]
fn quotes_and_braces_in_notes_survive() {
    let mut map = PainBodyMap::new(CASE).unwrap();
    let note = r#"says it "feels like {needles}" \ sharp"#;
    map.set_entry("forearms", true, false, 7, note).unwrap();

    let decoded = decode_entries(map.payload_text());
    assert_eq!(decoded.entries[&BodyPart::Forearms].note, note);
}

#[test]
fn remove_entry_is_a_no_op_for_missing_keys() {
    let mut map = sample_map();
    let payload = map.payload_text().to_string();
    assert!(!map.remove_entry("knees"));
    assert!(!map.remove_entry("not_a_part"));
    assert_eq!(map.payload_text(), payload);

    assert!(map.remove_entry("head"));
    assert!(!map.has_entry("head"));
    assert!(!map.payload_text().contains("\"head\""));
}

#[test]
fn clear_all_is_idempotent() {
    let mut map = sample_map();
    map.clear_all();
    assert_eq!(map.affected_count(), 0);
    assert_eq!(map.payload_text(), EMPTY_PAYLOAD);
    map.clear_all();
    assert_eq!(map.payload_text(), EMPTY_PAYLOAD);
    assert!(map.entries().is_empty());
}

#[test]
fn additional_notes_limit() {
    let mut map = PainBodyMap::new(CASE).unwrap();
    map.set_additional_notes("x".repeat(2000)).unwrap();
    assert!(map.set_additional_notes("x".repeat(2001)).is_err());
    assert_eq!(map.additional_notes().len(), 2000);
}

#[test]
fn entry_json_uses_payload_labels() {
    let entry = PainEntry::new(BodyPart::LowBack, false, true, 9, "disc");
    let value: serde_json::Value = serde_json::from_str(&entry.to_json()).unwrap();
    assert_eq!(value["body_part"], "low_back");
    assert_eq!(value["side_left"], false);
    assert_eq!(value["side_right"], true);
    assert_eq!(value["pain_level"], 9);
    assert_eq!(value["comments"], "disc");

    let partial = PainEntry::from_json(r#"{"pain_level": 4}"#).unwrap();
    assert_eq!(partial.intensity, 4);
    assert_eq!(partial.location, "");
    assert!(PainEntry::from_json(r#"{"pain_level": "four"}"#).is_err());
}
