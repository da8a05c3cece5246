use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;
use tourforge::error::TourForgeError;
use tourforge::geometry::City;
use tourforge::loader::{load_cities, parse_cities, parse_order};

fn city_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file
}

#[test]
fn test_loader_keeps_file_order() {
    let file = city_file("0 0\n10 -3\n-7 4\n");
    let cities = load_cities(file.path()).unwrap();
    assert_eq!(
        cities,
        vec![City::new(0, 0), City::new(10, -3), City::new(-7, 4)]
    );
}

#[test]
fn test_loader_ignores_blank_trailing_lines() {
    let file = city_file("1 1\n2 2\n\n\n");
    assert_eq!(load_cities(file.path()).unwrap().len(), 2);
}

#[rstest]
#[case("1 2 3\n4 5\n", "exactly 2 numbers")]
#[case("1\n4 5\n", "exactly 2 numbers")]
#[case("1 a\n4 5\n", "not an integer")]
#[case("1.5 2\n4 5\n", "not an integer")]
#[case("4 5\n", "at least 2 cities")]
#[case("4 5\n4 5\n", "duplicate city")]
fn test_loader_rejects_bad_input(#[case] body: &str, #[case] needle: &str) {
    let err = parse_cities(body.as_bytes()).unwrap_err();
    match err {
        TourForgeError::Validation(msg) => assert!(msg.contains(needle), "{}", msg),
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_cities("/definitely/not/here/cities.txt").unwrap_err();
    assert!(matches!(err, TourForgeError::Io(_)));
}

#[test]
fn test_parse_order() {
    let cities = parse_cities("0 0\n0 1\n1 1\n1 0\n".as_bytes()).unwrap();
    let tour = parse_order("0, 1,2,3", &cities).unwrap();
    assert!((tour.length() - 4.0).abs() < 1e-12);

    assert!(parse_order("0,1,2", &cities).is_err());
    assert!(parse_order("0,1,2,2", &cities).is_err());
    assert!(parse_order("0,1,2,9", &cities).is_err());
    assert!(parse_order("0,1,x,3", &cities).is_err());
}
