use intake_core::error::ValidationError;
use intake_core::ids::FormKind;
use intake_instruments::instruments::gad7::Gad7;
use intake_instruments::instruments::pc_ptsd5::PcPtsd5;
use intake_instruments::instruments::phq9::Phq9;
use intake_instruments::error::InstrumentError;
use intake_instruments::inventory::Inventory;
use intake_instruments::{Instrument, all_instruments, get_instrument};

const CASE: i64 = 1_500;

#[test]
fn new_inventory_has_one_zero_answer_per_item() {
    let form = Inventory::<Phq9>::new(CASE).unwrap();
    assert_eq!(form.answers(), &[0; 9]);
    assert_eq!(form.total_score(), 0);
    assert_eq!(form.severity().unwrap().label, "minimal");
    assert_eq!(form.form_type(), "depression_inventory");
    assert_eq!(form.id(), None);
}

#[test]
fn invalid_case_id_is_rejected() {
    assert_eq!(
        Inventory::<Gad7>::new(12).unwrap_err(),
        ValidationError::InvalidCaseId(12)
    );
}

#[test]
fn phq9_severity_bands() {
    let mut form = Inventory::<Phq9>::new(CASE).unwrap();
    form.set_answers(&[3, 3, 2, 2, 1, 1, 0, 0, 0]).unwrap();
    assert_eq!(form.total_score(), 12);
    assert_eq!(form.severity().unwrap().label, "moderate");

    form.set_answers(&[3; 9]).unwrap();
    assert_eq!(form.total_score(), 27);
    assert_eq!(form.severity().unwrap().label, "severe");
}

#[test]
fn set_answer_rejects_out_of_scale_values() {
    let mut form = Inventory::<Gad7>::new(CASE).unwrap();
    form.set_answer(0, 2).unwrap();
    assert!(matches!(
        form.set_answer(1, 4),
        Err(ValidationError::AnswerOutOfRange { item: 1, value: 4, max: 3, .. })
    ));
    assert!(matches!(
        form.set_answer(7, 1),
        Err(ValidationError::UnknownItem { item: 7, .. })
    ));
    assert_eq!(form.answers(), &[2, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn set_answers_is_all_or_nothing() {
    let mut form = Inventory::<Gad7>::new(CASE).unwrap();
    form.set_answers(&[1, 1, 1]).unwrap();
    assert!(form.set_answers(&[2, 2, -1]).is_err());
    assert_eq!(form.answers(), &[1, 1, 1, 0, 0, 0, 0]);
    assert!(form.set_answers(&[0; 8]).is_err());
}

#[test]
fn yes_no_screen_threshold() {
    let mut form = Inventory::<PcPtsd5>::new(CASE).unwrap();
    form.set_answers(&[1, 1, 1, 0, 0]).unwrap();
    assert_eq!(form.severity().unwrap().label, "negative");
    form.set_answer(4, 1).unwrap();
    assert_eq!(form.severity().unwrap().label, "positive");
    assert!(form.set_answer(0, 2).is_err());
}

#[test]
fn rehydration_normalises_stored_answers() {
    let now = jiff::Timestamp::now();
    let form = Inventory::<Gad7>::from_parts(3_000_004, CASE, vec![1, 9, 2], "", now, now).unwrap();
    assert_eq!(form.answers(), &[1, 0, 2, 0, 0, 0, 0]);
    assert!(form.is_valid_record());
    assert_eq!(form.id(), Some(3_000_004));
}

#[test]
fn notes_limit() {
    let mut form = Inventory::<Phq9>::new(CASE).unwrap();
    assert!(form.set_notes("n".repeat(2001)).is_err());
    form.set_notes("follow up in two weeks").unwrap();
    assert!(form.summary_text().contains("Notes: follow up in two weeks"));
}

#[test]
fn summary_lists_items_and_total() {
    let mut form = Inventory::<PcPtsd5>::new(CASE).unwrap();
    form.set_answers(&[1, 0, 1, 1, 1]).unwrap();
    let text = form.summary_text();
    assert!(text.starts_with("## PC-PTSD-5"));
    assert!(text.contains("Been constantly on guard, watchful, or easily startled: yes"));
    assert!(text.contains("Total: 4 / 5 (positive)"));
}

#[test]
fn bands_cover_every_possible_total() {
    for instrument in all_instruments() {
        for total in 0..=instrument.max_total() {
            assert!(
                instrument.interpret(total).is_some(),
                "{} has no band for {total}",
                instrument.name()
            );
        }
    }
}

#[test]
fn instruments_have_distinct_kinds_and_item_columns() {
    let instruments = all_instruments();
    let kinds: Vec<FormKind> = instruments.iter().map(|i| i.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            FormKind::DepressionInventory,
            FormKind::AnxietyInventory,
            FormKind::TraumaScreen
        ]
    );
    for instrument in &instruments {
        for item in instrument.items() {
            assert!(item.id.starts_with(instrument.id()));
        }
    }
}

#[test]
fn lookup_by_id() {
    assert_eq!(get_instrument("gad7").unwrap().name(), "GAD-7");
    assert!(matches!(
        get_instrument("beck"),
        Err(InstrumentError::UnknownInstrument(id)) if id == "beck"
    ));
    assert_eq!(Phq9.max_total(), 27);
}
