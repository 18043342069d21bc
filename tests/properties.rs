//! Property tests for the attendance and payroll engine.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use proptest::prelude::*;
use rust_decimal::Decimal;

use attendance_engine::calculation::{
    aggregate_attendance, calculate_payroll, haversine_distance, resolve_working_days,
    resolve_zone, round_output,
};
use attendance_engine::models::{
    AttendanceRecord, AttendanceStatus, CheckinZone, GeoPoint, HolidayCalendar,
    WorkingHoursConfig,
};

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn schedule() -> WorkingHoursConfig {
    WorkingHoursConfig {
        user_id: None,
        start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        break_duration_minutes: 60,
        work_days: vec![
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ],
        is_active: true,
    }
}

fn record(date: NaiveDate, check_in_minutes: u32, hours_worked: Decimal) -> AttendanceRecord {
    let check_in = date.and_hms_opt(8, 0, 0).unwrap() + Duration::minutes(check_in_minutes.into());
    AttendanceRecord {
        user_id: "u_prop".to_string(),
        date,
        check_in: Some(check_in),
        check_out: None,
        status: AttendanceStatus::Present,
        hours_worked,
        overtime_hours: Decimal::ZERO,
        location: None,
    }
}

fn september_days() -> Vec<NaiveDate> {
    NaiveDate::from_ymd_opt(2026, 9, 1)
        .unwrap()
        .iter_days()
        .take_while(|d| d.month() == 9)
        .collect()
}

fn run_payroll(records: &[AttendanceRecord], base_salary: Decimal) -> Decimal {
    calculate_payroll(
        records,
        base_salary,
        Decimal::new(15, 1),
        9,
        2026,
        &schedule(),
        &HolidayCalendar::new(),
    )
    .unwrap()
    .net_salary
}

fn hours() -> impl Strategy<Value = Decimal> {
    (0i64..=1000).prop_map(|centi| Decimal::new(centi, 2))
}

proptest! {
    #[test]
    fn present_plus_absent_is_working_days(
        start_offset in 0i64..365,
        span in 0i64..120,
        off_day in 0usize..7,
        holiday_offsets in prop::collection::vec(0i64..120, 0..10),
        present_mask in prop::collection::vec(any::<bool>(), 120),
    ) {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(start_offset);
        let end = start + Duration::days(span);
        let holidays: HolidayCalendar = holiday_offsets
            .iter()
            .map(|o| start + Duration::days(*o))
            .collect();
        let off_day = ALL_WEEKDAYS[off_day];

        let records: Vec<AttendanceRecord> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .zip(&present_mask)
            .filter(|(_, present)| **present)
            .map(|(d, _)| record(d, 90, Decimal::new(65, 1)))
            .collect();

        let working_days = resolve_working_days(start, end, off_day, &holidays);
        let stats = aggregate_attendance(&records, start, end, &schedule(), &holidays, off_day).unwrap();

        prop_assert_eq!(stats.working_days as usize, working_days.len());
        prop_assert_eq!(stats.present_days + stats.absent_days, stats.working_days);
        prop_assert!(working_days.iter().all(|d| d.weekday() != off_day && !holidays.contains(*d)));
    }

    #[test]
    fn rates_stay_within_bounds(
        check_ins in prop::collection::vec(0u32..600, 0..30),
        day_hours in prop::collection::vec(hours(), 30),
        overtime in prop::collection::vec(hours(), 30),
    ) {
        let days = september_days();
        let records: Vec<AttendanceRecord> = check_ins
            .iter()
            .zip(&days)
            .zip(day_hours.iter().zip(&overtime))
            .map(|((minutes, date), (worked, extra))| {
                let mut r = record(*date, *minutes, *worked);
                r.overtime_hours = *extra;
                r
            })
            .collect();

        let stats = aggregate_attendance(
            &records,
            days[0],
            days[days.len() - 1],
            &schedule(),
            &HolidayCalendar::new(),
            Weekday::Mon,
        )
        .unwrap();

        let hundred = Decimal::ONE_HUNDRED;
        for rate in [
            stats.attendance_rate_pct,
            stats.punctuality_rate_pct,
            stats.on_time_rate_pct,
        ] {
            prop_assert!(rate >= Decimal::ZERO && rate <= hundred, "rate {} out of range", rate);
        }
        prop_assert!(stats.overtime_rate_pct >= Decimal::ZERO);
    }

    #[test]
    fn zone_centre_is_always_inside(
        latitude in -90.0f64..=90.0,
        longitude in -180.0f64..=180.0,
        radius in 0.0f64..10_000.0,
    ) {
        let zone = CheckinZone {
            name: "Zone".to_string(),
            latitude,
            longitude,
            radius_meters: radius,
            is_active: true,
        };
        let centre = GeoPoint::new(latitude, longitude).unwrap();

        let result = resolve_zone(centre, &[zone]);
        prop_assert!(result.in_zone);
        prop_assert_eq!(haversine_distance(centre, centre), 0.0);
    }

    #[test]
    fn haversine_is_symmetric_and_bounded(
        a in (-90.0f64..=90.0, -180.0f64..=180.0),
        b in (-90.0f64..=90.0, -180.0f64..=180.0),
    ) {
        let a = GeoPoint::new(a.0, a.1).unwrap();
        let b = GeoPoint::new(b.0, b.1).unwrap();

        let ab = haversine_distance(a, b);
        let ba = haversine_distance(b, a);
        prop_assert!(!ab.is_nan());
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!(ab <= std::f64::consts::PI * 6_371_000.0 + 1e-6);
    }

    #[test]
    fn net_salary_is_monotonic_in_regular_hours(
        base_salary in 1_000i64..20_000,
        day in 0usize..26,
        low in 0i64..=650,
        high in 0i64..=650,
    ) {
        let (low, high) = (low.min(high), low.max(high));
        let base_salary = Decimal::new(base_salary, 0);
        let days: Vec<NaiveDate> = september_days()
            .into_iter()
            .filter(|d| d.weekday() != Weekday::Mon)
            .collect();

        let month = |worked: Decimal| -> Vec<AttendanceRecord> {
            days.iter()
                .enumerate()
                .map(|(i, d)| {
                    let h = if i == day { worked } else { Decimal::new(65, 1) };
                    record(*d, 90, h)
                })
                .collect()
        };

        let net_low = run_payroll(&month(Decimal::new(low, 2)), base_salary);
        let net_high = run_payroll(&month(Decimal::new(high, 2)), base_salary);
        prop_assert!(net_high >= net_low, "{} < {}", net_high, net_low);
    }

    #[test]
    fn total_hours_is_sum_of_present_record_hours(
        day_hours in prop::collection::vec(hours(), 30),
        statuses in prop::collection::vec(0u8..4, 30),
    ) {
        let records: Vec<AttendanceRecord> = september_days()
            .into_iter()
            .zip(day_hours.iter().zip(&statuses))
            .map(|(d, (worked, status))| {
                let mut r = record(d, 90, *worked);
                r.status = match status {
                    0 => AttendanceStatus::Absent,
                    1 => AttendanceStatus::OnLeave,
                    _ => AttendanceStatus::Present,
                };
                r
            })
            .collect();

        let expected: Decimal = records
            .iter()
            .filter(|r| r.is_present())
            .map(|r| r.hours_worked)
            .sum();

        let result = calculate_payroll(
            &records,
            Decimal::new(5000, 0),
            Decimal::new(15, 1),
            9,
            2026,
            &schedule(),
            &HolidayCalendar::new(),
        )
        .unwrap();

        prop_assert_eq!(result.hours.total_hours, round_output(expected));
    }
}
