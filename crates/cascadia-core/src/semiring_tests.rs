use crate::{Semiring, log10_to_cost};

#[test]
fn arc_types() {
    assert_eq!(Semiring::Log.arc_type(), "log");
    assert_eq!(Semiring::Tropical.arc_type(), "standard");
}

#[test]
fn long_names() {
    assert_eq!(Semiring::from_name("log"), Some(Semiring::Log));
    assert_eq!(Semiring::from_name("tropical"), Some(Semiring::Tropical));
    assert_eq!(Semiring::from_name("standard"), Some(Semiring::Tropical));
    assert_eq!(Semiring::from_name("trop"), Some(Semiring::Tropical));
    assert_eq!(Semiring::from_name("real"), None);
}

#[test]
fn letters_roundtrip() {
    for semiring in [Semiring::Log, Semiring::Tropical] {
        assert_eq!(Semiring::from_letter(semiring.letter()), Some(semiring));
    }
    assert_eq!(Semiring::from_letter('w'), None);
}

#[test]
fn cost_conversion() {
    assert_eq!(log10_to_cost(0.0), 0.0);
    assert!((log10_to_cost(-1.0) - std::f64::consts::LN_10).abs() < 1e-12);
    assert!((log10_to_cost(-2.0) - 2.0 * std::f64::consts::LN_10).abs() < 1e-12);
}

#[test]
fn display_uses_long_names() {
    assert_eq!(Semiring::Log.to_string(), "log");
    assert_eq!(Semiring::Tropical.to_string(), "tropical");
}
