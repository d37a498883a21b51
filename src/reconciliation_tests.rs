// src/reconciliation_tests.rs

#[cfg(test)]
mod tests {
    use crate::aggregate::*;
    use crate::export::*;
    use crate::model::*;
    use crate::roster::*;
    use crate::timezone::{IanaTimeZones, TimeZoneConverter};
    use crate::variance::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    // Reads the instant as a bare minute count so tests can pin exact local minutes.
    struct FixedMinutes;

    impl TimeZoneConverter for FixedMinutes {
        fn to_local_minutes(&self, instant: &str, _zone: &str) -> Option<u32> {
            instant.parse().ok()
        }

        fn format(&self, instant: &str, _zone: &str) -> Option<String> {
            let minutes: u32 = instant.parse().ok()?;
            Some(format!("{:02}:{:02}", minutes / 60, minutes % 60))
        }
    }

    fn ten_to_six() -> ResolvedSchedule {
        ResolvedSchedule {
            start_time: "10:00".to_string(),
            end_time: "18:00".to_string(),
            is_scheduled: true,
        }
    }

    fn punch_in(minutes: u32) -> AttendanceRecord {
        AttendanceRecord {
            status: Some("present".to_string()),
            clock_in: Some(minutes.to_string()),
            ..Default::default()
        }
    }

    fn employee(n: usize) -> Employee {
        Employee {
            id: format!("emp-{}", n),
            user_id: UserProfile {
                id: format!("usr-{}", n),
                first_name: Some(format!("Person{}", n)),
                ..Default::default()
            },
            working_timezone: Some("UTC".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn every_employee_gets_exactly_one_daily_row() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        for count in [0usize, 1, 7] {
            let employees: Vec<Employee> = (0..count).map(employee).collect();
            // Records for some employees, plus one for somebody not on the list.
            let mut attendance: Vec<AttendanceRecord> = (0..count)
                .step_by(2)
                .map(|n| AttendanceRecord {
                    user_id: AttendanceUserRef { id: format!("usr-{}", n), ..Default::default() },
                    status: Some("present".to_string()),
                    ..Default::default()
                })
                .collect();
            attendance.push(AttendanceRecord {
                user_id: AttendanceUserRef { id: "usr-ghost".to_string(), ..Default::default() },
                ..Default::default()
            });

            let rows = build_daily_rows(&employees, &attendance, &[], date, GRACE_PERIOD_MINUTES, &IanaTimeZones);
            assert_eq!(rows.len(), count);
            for (row, emp) in rows.iter().zip(&employees) {
                assert_eq!(row.employee_id, emp.id);
            }
        }
    }

    #[test]
    fn grace_window_is_inclusive_on_both_sides() {
        let schedule = ten_to_six();
        let at = |m: u32| classify(&schedule, Some(&punch_in(m)), Some("UTC"), 15, &FixedMinutes).flags;

        assert!(at(584).is_early_arrival);
        assert!(!at(585).is_early_arrival);
        assert!(!at(585).is_late_arrival);
        assert!(!at(615).is_late_arrival);
        assert!(at(616).is_late_arrival);
    }

    #[test]
    fn departure_grace_window_mirrors_arrival() {
        let schedule = ten_to_six();
        let out = |m: u32| {
            let rec = AttendanceRecord {
                clock_in: Some("600".to_string()),
                clock_out: Some(m.to_string()),
                ..Default::default()
            };
            classify(&schedule, Some(&rec), Some("UTC"), 15, &FixedMinutes).flags
        };
        assert!(out(1064).is_early_departure);
        assert!(!out(1065).is_early_departure);
        assert!(!out(1095).is_late_departure);
        assert!(out(1096).is_late_departure);
    }

    #[test]
    fn grace_period_is_configurable() {
        let schedule = ten_to_six();
        let c = classify(&schedule, Some(&punch_in(611)), Some("UTC"), 10, &FixedMinutes);
        assert!(c.flags.is_late_arrival);
        assert_eq!(c.status, AttendanceStatus::Late);
    }

    #[test]
    fn scheduled_without_punches_is_absent() {
        let rec = AttendanceRecord {
            status: Some("Not logged in yet".to_string()),
            ..Default::default()
        };
        let c = classify(&ten_to_six(), Some(&rec), Some("UTC"), 15, &IanaTimeZones);
        assert_eq!(c.status, AttendanceStatus::Absent);
        assert_eq!(c.status.as_str(), "absent");
        assert!(!c.flags.any());
    }

    #[test]
    fn monthly_total_is_exact_to_two_places() {
        let month: Month = "2024-06".parse().unwrap();
        let mut records = HashMap::new();
        for day in 1..=20u32 {
            let date = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
            let hours = if day == 7 { 8.333 } else { 8.0 };
            records.insert(
                range_key(date),
                AttendanceRecord {
                    status: Some("present".to_string()),
                    total_hours: Some(hours),
                    ..Default::default()
                },
            );
        }
        let attendance = vec![EmployeeAttendanceRange {
            user_id: AttendanceUserRef {
                id: "usr-0".to_string(),
                employee_id: Some("emp-0".to_string()),
                working_timezone: None,
            },
            attendance: records,
        }];

        let grid = build_monthly_grid(&[employee(0)], &[], &attendance, month, &IanaTimeZones);
        let data = &grid[0];
        assert_eq!(data.monthly_data.len(), 30);
        let placeholders = data
            .monthly_data
            .values()
            .filter(|cell| cell.total_hours == HoursCell::Missing)
            .count();
        assert_eq!(placeholders, 10);

        let summed: Decimal = data.monthly_data.values().map(|c| c.total_hours.value()).sum();
        assert_eq!(data.monthly_total, summed.round_dp(2));
        assert_eq!(data.monthly_total, dec!(160.33));
    }

    #[test]
    fn roster_strings_resolve_to_documented_shapes() {
        let shift = ResolvedSchedule::from(&RosterDayEntry::parse("Shift 09:00-17:30"));
        assert_eq!(shift.start_time, "09:00");
        assert_eq!(shift.end_time, "17:30");
        assert!(shift.is_scheduled);

        assert!(!ResolvedSchedule::from(&RosterDayEntry::parse("OFF")).is_scheduled);

        let fixed = ResolvedSchedule::from(&RosterDayEntry::parse("10:00"));
        assert_eq!((fixed.start_time.as_str(), fixed.end_time.as_str()), ("10:00", "10:00"));
        assert!(fixed.is_scheduled);
    }

    #[test]
    fn csv_variance_column_reads_on_time_without_flags() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let rows = build_daily_rows(&[employee(0)], &[], &[], date, 15, &IanaTimeZones);
        assert!(!rows[0].flags.any());
        assert_eq!(variance_text(&rows[0]), ON_TIME);
        let csv = daily_csv(&rows).unwrap();
        assert!(csv.lines().nth(1).unwrap().contains("\"On Time\""));
    }

    #[test]
    fn unscheduled_rows_never_carry_late_arrival() {
        let unscheduled = ResolvedSchedule::unscheduled();
        for minutes in [0u32, 300, 600, 616, 900, 1439] {
            let c = classify(&unscheduled, Some(&punch_in(minutes)), Some("UTC"), 15, &FixedMinutes);
            assert!(!c.is_scheduled);
            assert!(!c.flags.is_late_arrival);
            assert!(!c.flags.any());
        }
    }

    #[test]
    fn daily_check_in_display_uses_converter() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let attendance = vec![AttendanceRecord {
            user_id: AttendanceUserRef { id: "usr-0".to_string(), ..Default::default() },
            clock_in: Some("605".to_string()),
            ..punch_in(605)
        }];
        let roster = vec![RosterWeekEntry {
            employee: EmployeeRef { id: "emp-0".to_string() },
            schedule: WeekSchedule { monday: Some("10:00 - 18:00".to_string()), ..Default::default() },
        }];
        let rows = build_daily_rows(&[employee(0)], &attendance, &roster, date, 15, &FixedMinutes);
        assert_eq!(rows[0].check_in, "10:05");
        assert_eq!(rows[0].status, AttendanceStatus::Present);
    }
}
