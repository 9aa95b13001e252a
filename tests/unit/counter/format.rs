use super::*;

#[test]
fn groups_thousands() {
    assert_eq!(format_count(0, None), "0");
    assert_eq!(format_count(999, None), "999");
    assert_eq!(format_count(1_000, None), "1,000");
    assert_eq!(format_count(1_234_567, None), "1,234,567");
    assert_eq!(format_count(-45_000, None), "-45,000");
    assert_eq!(format_count(i64::MIN, None), "-9,223,372,036,854,775,808");
}

#[test]
fn appends_suffix() {
    assert_eq!(format_count(110, Some("+")), "110+");
    assert_eq!(format_count(2_500, Some(" users")), "2,500 users");
}
