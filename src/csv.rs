use crate::store::{AttendanceRecord, Student};

/// Always-quoted CSV field, embedded quotes doubled. The exporter quotes
/// name and email unconditionally so a missing email still shows as "".
pub fn quote_field(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub fn ensure_csv_filename(name: &str) -> String {
    if name.ends_with(".csv") {
        name.to_string()
    } else {
        format!("{name}.csv")
    }
}

pub fn default_export_filename(class_name: &str) -> String {
    format!("{}_attendance", class_name.replace(' ', "_"))
}

/// Flatten a class's records into CSV text.
///
/// Header `date,studentName,studentEmail,status`; records oldest date
/// first, roster order within a record. A roster student missing from a
/// record's entries gets no row, and entries whose student has left the
/// roster are skipped. Rows are newline-joined with no trailing newline.
pub fn build_attendance_csv(records: &[&AttendanceRecord], roster: &[&Student]) -> String {
    let mut rows = vec!["date,studentName,studentEmail,status".to_string()];

    let mut ordered: Vec<&AttendanceRecord> = records.to_vec();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));

    for r in ordered {
        for s in roster {
            let Some(status) = r.entries.get(&s.id) else {
                continue;
            };
            rows.push(format!(
                "{},{},{},{}",
                r.date,
                quote_field(&s.name),
                quote_field(s.email.as_deref().unwrap_or("")),
                status.as_str()
            ));
        }
    }

    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Status;
    use std::collections::BTreeMap;

    fn student(id: &str, name: &str, email: Option<&str>) -> Student {
        Student {
            id: id.to_string(),
            class_id: "c1".to_string(),
            name: name.to_string(),
            email: email.map(|e| e.to_string()),
            created_at: 0,
        }
    }

    fn record(date: &str, pairs: &[(&str, Status)]) -> AttendanceRecord {
        let entries: BTreeMap<String, Status> = pairs
            .iter()
            .map(|(id, st)| (id.to_string(), *st))
            .collect();
        AttendanceRecord {
            id: format!("r-{date}"),
            class_id: "c1".to_string(),
            date: date.to_string(),
            entries,
            created_at: 0,
        }
    }

    #[test]
    fn rows_are_ordered_oldest_first_and_fields_quoted() {
        let ann = student("s1", "Ann Lee", None);
        let roster = vec![&ann];
        let feb = record("2024-02-01", &[("s1", Status::Present)]);
        let jan = record("2024-01-15", &[("s1", Status::Present)]);
        let records = vec![&feb, &jan];

        let csv = build_attendance_csv(&records, &roster);
        assert_eq!(
            csv,
            "date,studentName,studentEmail,status\n\
             2024-01-15,\"Ann Lee\",\"\",present\n\
             2024-02-01,\"Ann Lee\",\"\",present"
        );
    }

    #[test]
    fn embedded_quotes_and_commas_are_escaped() {
        let s = student("s1", "Lee, Ann \"Annie\"", Some("ann@example.com"));
        let roster = vec![&s];
        let r = record("2024-02-01", &[("s1", Status::Absent)]);
        let records = vec![&r];

        let csv = build_attendance_csv(&records, &roster);
        let row = csv.lines().nth(1).expect("data row");
        assert_eq!(
            row,
            "2024-02-01,\"Lee, Ann \"\"Annie\"\"\",\"ann@example.com\",absent"
        );
    }

    #[test]
    fn students_without_entries_and_stale_entries_are_skipped() {
        let ann = student("s1", "Ann", None);
        let bob = student("s2", "Bob", None);
        let roster = vec![&ann, &bob];
        // s2 has no entry; s9 is no longer rostered.
        let r = record("2024-02-01", &[("s1", Status::Present), ("s9", Status::Absent)]);
        let records = vec![&r];

        let csv = build_attendance_csv(&records, &roster);
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], "2024-02-01,\"Ann\",\"\",present");
    }

    #[test]
    fn header_only_when_no_records() {
        let ann = student("s1", "Ann", None);
        let roster = vec![&ann];
        let csv = build_attendance_csv(&[], &roster);
        assert_eq!(csv, "date,studentName,studentEmail,status");
    }

    #[test]
    fn filename_gets_csv_suffix_once() {
        assert_eq!(ensure_csv_filename("sheet"), "sheet.csv");
        assert_eq!(ensure_csv_filename("sheet.csv"), "sheet.csv");
    }

    #[test]
    fn default_filename_underscores_class_name() {
        assert_eq!(
            default_export_filename("Period 3 Math"),
            "Period_3_Math_attendance"
        );
    }
}
