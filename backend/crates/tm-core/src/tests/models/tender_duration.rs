use crate::{MAX_TENDER_DAYS, TenderDuration};
use crate::tests::fixtures::at;

#[test]
fn test_tender_duration_units() {
    assert_eq!(TenderDuration::parse("2 Minggu"), TenderDuration::Days(14));
    assert_eq!(TenderDuration::parse("1 Bulan"), TenderDuration::Months(1));
    assert_eq!(TenderDuration::parse("10 HARI"), TenderDuration::Days(10));
    assert_eq!(TenderDuration::parse("21"), TenderDuration::Days(21));
}

#[test]
fn test_tender_duration_unparsable_defaults_to_thirty_days() {
    assert_eq!(TenderDuration::parse("secepatnya"), TenderDuration::Days(30));
    assert_eq!(TenderDuration::parse(""), TenderDuration::Days(30));
    assert_eq!(TenderDuration::parse("3 tahun"), TenderDuration::Days(30));
}

#[test]
fn test_tender_duration_deadline() {
    let start = at(2025, 1, 31, 0);

    assert_eq!(
        TenderDuration::Days(14).deadline_from(at(2025, 1, 1, 0)),
        at(2025, 1, 15, 0)
    );
    // Calendar months clamp to the end of a shorter month.
    assert_eq!(
        TenderDuration::Months(1).deadline_from(start),
        at(2025, 2, 28, 0)
    );
}

#[test]
fn test_tender_duration_past_the_calendar_falls_back_to_thirty_days() {
    let start = at(2025, 1, 1, 0);

    for duration in [
        TenderDuration::parse("999999999 hari"),
        TenderDuration::parse("999999999999 Minggu"),
        TenderDuration::Days(i64::MAX),
        TenderDuration::Months(u32::MAX),
    ] {
        assert_eq!(duration.deadline_from(start), at(2025, 1, 31, 0), "{duration:?}");
    }
}

#[test]
fn test_tender_duration_exact_parse_and_limit() {
    assert_eq!(TenderDuration::parse_exact("secepatnya"), None);
    assert_eq!(TenderDuration::parse_exact("99999999999999999999 hari"), None);
    assert_eq!(TenderDuration::parse_exact("2 Minggu"), Some(TenderDuration::Days(14)));

    assert!(TenderDuration::Days(MAX_TENDER_DAYS).is_within_limit());
    assert!(TenderDuration::Months(12).is_within_limit());
    assert!(!TenderDuration::Days(0).is_within_limit());
    assert!(!TenderDuration::Days(999_999_999).is_within_limit());
    assert!(!TenderDuration::Months(13).is_within_limit());
}
