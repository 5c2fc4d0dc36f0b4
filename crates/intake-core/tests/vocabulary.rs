use intake_core::body_part::BodyPart;
use intake_core::error::ValidationError;
use intake_core::ids::{CASE_ID_FLOOR, FormKind, ID_RANGE, is_valid_case_id};

#[test]
fn body_part_keys_parse_back() {
    for part in BodyPart::ALL {
        assert_eq!(part.as_str().parse::<BodyPart>(), Ok(part));
    }
    assert_eq!(
        "Low_Back".parse::<BodyPart>(),
        Err(ValidationError::UnknownBodyPart("Low_Back".to_string()))
    );
}

#[test]
fn body_part_order_is_head_to_feet() {
    let mut sorted = BodyPart::ALL;
    sorted.sort();
    assert_eq!(sorted, BodyPart::ALL);
    assert_eq!(BodyPart::ALL.first(), Some(&BodyPart::Head));
    assert_eq!(BodyPart::ALL.last(), Some(&BodyPart::Feet));
}

#[test]
fn body_part_labels() {
    assert_eq!(BodyPart::LowBack.label(), "Low back");
    assert_eq!(BodyPart::Head.label(), "Head");
}

#[test]
fn case_id_floor() {
    assert!(is_valid_case_id(CASE_ID_FLOOR));
    assert!(!is_valid_case_id(CASE_ID_FLOOR - 1));
    assert!(!is_valid_case_id(-5));
}

#[test]
fn form_id_blocks_do_not_overlap() {
    for kind in FormKind::ALL {
        assert!(kind.contains(kind.id_base()));
        assert!(!kind.contains(kind.id_base() + ID_RANGE));
        assert_eq!(FormKind::of_id(kind.id_base() + 17), Some(kind));
        assert!(kind.id_base() > CASE_ID_FLOOR);
    }
    assert_eq!(FormKind::of_id(CASE_ID_FLOOR), None);
}
