use chrono::DateTime;
use hearth_types::{Error, Timestamp};
use proptest::prelude::*;

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parse_canonical_form() {
    let ts = Timestamp::parse("2017-09-28T21:03:54.052298").unwrap();
    assert_eq!(ts.to_iso(), "2017-09-28T21:03:54.052298");
}

#[test]
fn parse_without_fraction_renders_six_digits() {
    let ts = Timestamp::parse("2017-09-28T21:03:54").unwrap();
    assert_eq!(ts.to_iso(), "2017-09-28T21:03:54.000000");
}

#[test]
fn parse_truncates_below_microseconds() {
    let ts = Timestamp::parse("2017-09-28T21:03:54.052298999").unwrap();
    assert_eq!(ts.to_iso(), "2017-09-28T21:03:54.052298");
}

#[test]
fn parse_empty_is_invalid() {
    assert!(matches!(
        Timestamp::parse(""),
        Err(Error::InvalidTimestamp(s)) if s.is_empty()
    ));
}

#[test]
fn parse_garbage_is_invalid() {
    assert!(Timestamp::parse("yesterday").is_err());
    assert!(Timestamp::parse("2017-09-28").is_err());
    assert!(Timestamp::parse("2017-13-28T21:03:54.052298").is_err());
}

#[test]
fn from_str_matches_parse() {
    let a: Timestamp = "2017-09-28T21:03:54.052302".parse().unwrap();
    let b = Timestamp::parse("2017-09-28T21:03:54.052302").unwrap();
    assert_eq!(a, b);
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn now_round_trips_through_text() {
    let ts = Timestamp::now();
    assert_eq!(Timestamp::parse(&ts.to_iso()).unwrap(), ts);
}

#[test]
fn now_has_microsecond_precision() {
    use chrono::Timelike;
    let ts = Timestamp::now();
    assert_eq!(ts.as_naive().nanosecond() % 1_000, 0);
}

// ── Ordering & tick ──────────────────────────────────────────────

#[test]
fn ordering_follows_time() {
    let a = Timestamp::parse("2017-09-28T21:03:54.052298").unwrap();
    let b = Timestamp::parse("2017-09-28T21:03:54.052302").unwrap();
    assert!(a < b);
    assert!(b > a);
    assert_eq!(a.max(b), b);
}

#[test]
fn tick_is_strictly_monotonic() {
    let t1 = Timestamp::now();
    let t2 = t1.tick();
    let t3 = t2.tick();
    assert!(t1 < t2);
    assert!(t2 < t3);
}

#[test]
fn tick_steps_one_microsecond_when_clock_is_behind() {
    let far = Timestamp::parse("9999-12-31T23:59:59.000000").unwrap();
    assert_eq!(far.tick().to_iso(), "9999-12-31T23:59:59.000001");
}

#[test]
fn tick_jumps_to_now_when_clock_is_ahead() {
    let old = Timestamp::parse("2001-01-01T00:00:00.000000").unwrap();
    let before = Timestamp::now();
    let ticked = old.tick();
    assert!(ticked >= before);
}

// ── Display & serde ──────────────────────────────────────────────

#[test]
fn display_is_value_form_not_iso() {
    let ts = Timestamp::parse("2017-09-28T21:03:54.052298").unwrap();
    assert_eq!(ts.to_string(), "2017-09-28 21:03:54.052298");
}

#[test]
fn serializes_as_iso_string() {
    let ts = Timestamp::parse("2017-09-28T21:03:54.052298").unwrap();
    assert_eq!(
        serde_json::to_string(&ts).unwrap(),
        r#""2017-09-28T21:03:54.052298""#
    );
    let back: Timestamp = serde_json::from_str(r#""2017-09-28T21:03:54.052298""#).unwrap();
    assert_eq!(back, ts);
}

#[test]
fn deserialize_rejects_bad_text() {
    assert!(serde_json::from_str::<Timestamp>(r#""""#).is_err());
    assert!(serde_json::from_str::<Timestamp>("12345").is_err());
}

proptest! {
    #[test]
    fn iso_text_reparses_to_same_value(micros in 0i64..253_402_300_799_999_999) {
        let naive = DateTime::from_timestamp_micros(micros).unwrap().naive_utc();
        let ts = Timestamp::from_naive(naive);
        prop_assert_eq!(Timestamp::parse(&ts.to_iso()).unwrap(), ts);
    }
}
