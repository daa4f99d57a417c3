use crate::Installment;

#[test]
fn test_installment_titles() {
    assert_eq!(Installment::First.title(), "Termin 1 & 2");
    assert_eq!(Installment::Unit(3).title(), "Termin 3");
}

#[test]
fn test_installment_parse() {
    assert_eq!(Installment::parse("Termin 1 & 2"), Installment::First);
    assert_eq!(Installment::parse("termin 1&2"), Installment::First);
    assert_eq!(Installment::parse("Termin 4"), Installment::Unit(4));
    assert_eq!(
        Installment::parse("Down payment"),
        Installment::Other("Down payment".to_string())
    );
    assert_eq!(
        Installment::parse("Termin 2"),
        Installment::Other("Termin 2".to_string())
    );
}

#[test]
fn test_installment_number() {
    assert_eq!(Installment::First.number(), Some(1));
    assert_eq!(Installment::Unit(5).number(), Some(5));
    assert_eq!(Installment::Other(String::new()).number(), None);
}
