use crate::builder::tests::utils::{repo, ScriptedPrompter};
use crate::builder::{build_trip, Mode};
use crate::duration::Duration;
use crate::error::BuildError;
use crate::itinerary::Itinerary;
use crate::roster::trip_records;
use chrono::NaiveDate;

const BAD_DUTY_DAY: &str = "\
# 9003 CHECK IN AT 11:00
10JUN2018
10JUN 1100 0100 MEX 1200 GDL 1307 0107 0010 737
DH0200 GDL 1317 TIJ 1447 1517 0130 737
0237BL 0000CRD 0237TL 0600DY
TOTALS 2:37TL 1:07BL 1:30CR 6:00TAFB
";

const BAD_TRIP_TOTAL: &str = "\
# 9004 CHECK IN AT 08:00
15JUN2018
15JUN 0800 0100 MEX 0900 GDL 1007 0107 0010 737
0200 GDL 1017 TIJ 1117 1147 0100 737
0207BL 0000CRD 0207TL 0347DY
TOTALS 2:07TL 2:07BL 0:00CR 9:00TAFB
";

#[test]
fn test_duty_day_mismatch_retracts_deadhead_rows() {
    let record = trip_records(BAD_DUTY_DAY).next().unwrap();
    let mut repo = repo();
    let err = build_trip(&record, Mode::Postpone, &mut repo, &mut ScriptedPrompter::silent())
        .unwrap_err();

    assert_eq!(
        err,
        BuildError::DutyDayMismatch {
            computed: Duration::parse("0417").unwrap(),
            declared: Duration::parse("0600").unwrap(),
        }
    );

    // Both rows went in while the day was building; the deadhead and
    // everything after it came back out, the operating leg stayed.
    assert_eq!(repo.store().deleted, vec![1]);
    assert_eq!(repo.store().rows(), 1);
    let (_, survivor) = repo.store().events().next().unwrap();
    assert_eq!(survivor.name, "0100");
}

#[test]
fn test_final_mode_repairs_rejected_event_in_place() {
    let record = trip_records(BAD_DUTY_DAY).next().unwrap();
    let mut repo = repo();
    let replacement = Itinerary::new(
        NaiveDate::from_ymd_opt(2018, 6, 10)
            .unwrap()
            .and_hms_opt(13, 17, 0)
            .unwrap(),
        NaiveDate::from_ymd_opt(2018, 6, 10)
            .unwrap()
            .and_hms_opt(16, 30, 0)
            .unwrap(),
    );
    let mut prompter = ScriptedPrompter::with_repairs(&[true, false], vec![replacement]);
    let trip = build_trip(&record, Mode::Final, &mut repo, &mut prompter).unwrap();

    let day = &trip.duty_days[0];
    assert_eq!(day.events[1].itinerary, replacement);
    assert_eq!(day.duration(), Duration::parse("0600").unwrap());
    assert_eq!(trip.duration(), Duration::parse("6:00").unwrap());

    // Only the rejected event's row was rewritten; nothing was deleted.
    assert_eq!(repo.store().updated, vec![1]);
    assert!(repo.store().deleted.is_empty());
    assert_eq!(repo.store().rows(), 2);
}

#[test]
fn test_trip_total_mismatch_keeps_all_rows() {
    let record = trip_records(BAD_TRIP_TOTAL).next().unwrap();
    let mut repo = repo();
    let err = build_trip(&record, Mode::Postpone, &mut repo, &mut ScriptedPrompter::silent())
        .unwrap_err();

    assert_eq!(
        err,
        BuildError::TripMismatch {
            computed: Duration::parse("3:47").unwrap(),
            declared: Duration::parse("9:00").unwrap(),
        }
    );
    assert!(repo.store().deleted.is_empty());
    assert_eq!(repo.store().rows(), 2);
}
