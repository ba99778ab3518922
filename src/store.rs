use std::collections::BTreeMap;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Present,
    Absent,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Present => "present",
            Status::Absent => "absent",
        }
    }

    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "present" => Some(Status::Present),
            "absent" => Some(Status::Absent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassItem {
    pub id: String,
    pub name: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct Student {
    pub id: String,
    pub class_id: String,
    pub name: String,
    pub email: Option<String>,
    pub created_at: i64,
}

/// One saved sheet. At most one exists per (class_id, date); saving again
/// for the same pair replaces the whole record, entries included.
#[derive(Debug, Clone)]
pub struct AttendanceRecord {
    pub id: String,
    pub class_id: String,
    pub date: String,
    pub entries: BTreeMap<String, Status>,
    pub created_at: i64,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn non_empty_trimmed(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// The whole application store. Classes and students are append-only;
/// records are replaced by (class_id, date). Nothing is persisted.
#[derive(Debug, Default)]
pub struct Store {
    classes: Vec<ClassItem>,
    students: Vec<Student>,
    records: Vec<AttendanceRecord>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    pub fn classes(&self) -> &[ClassItem] {
        &self.classes
    }

    pub fn class(&self, class_id: &str) -> Option<&ClassItem> {
        self.classes.iter().find(|c| c.id == class_id)
    }

    /// Whitespace-only names create nothing.
    pub fn create_class(&mut self, name: &str) -> Option<&ClassItem> {
        let name = non_empty_trimmed(name)?;
        self.classes.push(ClassItem {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: now_millis(),
        });
        self.classes.last()
    }

    /// No-op (returns None) when the class is unknown or the name is empty.
    pub fn create_student(
        &mut self,
        class_id: &str,
        name: &str,
        email: Option<&str>,
    ) -> Option<&Student> {
        if self.class(class_id).is_none() {
            return None;
        }
        let name = non_empty_trimmed(name)?;
        let email = email.and_then(non_empty_trimmed);
        self.students.push(Student {
            id: Uuid::new_v4().to_string(),
            class_id: class_id.to_string(),
            name,
            email,
            created_at: now_millis(),
        });
        self.students.last()
    }

    /// Roster of a class, in creation order.
    pub fn roster(&self, class_id: &str) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.class_id == class_id)
            .collect()
    }

    /// A class's records, newest date first.
    pub fn records_for_class(&self, class_id: &str) -> Vec<&AttendanceRecord> {
        let mut out: Vec<&AttendanceRecord> = self
            .records
            .iter()
            .filter(|r| r.class_id == class_id)
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }

    /// Upsert by the (class_id, date) natural key: any existing record for
    /// the pair is dropped and the submitted entries stored wholesale.
    /// Entries for students no longer rostered are kept as-is; the views
    /// simply skip them.
    pub fn upsert_record(
        &mut self,
        class_id: &str,
        date: &str,
        entries: BTreeMap<String, Status>,
    ) -> &AttendanceRecord {
        self.records
            .retain(|r| !(r.class_id == class_id && r.date == date));
        self.records.push(AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            class_id: class_id.to_string(),
            date: date.to_string(),
            entries,
            created_at: now_millis(),
        });
        &self.records[self.records.len() - 1]
    }

    /// round(100 * present / total) over the class's full record set, or
    /// None when the class has no records yet. The caller renders None as
    /// a placeholder; it must never be computed as zero.
    pub fn attendance_percent(&self, class_id: &str, student_id: &str) -> Option<u32> {
        let mut total = 0usize;
        let mut present = 0usize;
        for r in self.records.iter().filter(|r| r.class_id == class_id) {
            total += 1;
            if r.entries.get(student_id) == Some(&Status::Present) {
                present += 1;
            }
        }
        if total == 0 {
            return None;
        }
        Some((100.0 * present as f64 / total as f64).round() as u32)
    }
}

pub fn percent_label(percent: Option<u32>) -> String {
    match percent {
        Some(p) => format!("{p}%"),
        None => "—".to_string(),
    }
}

/// Per-session editing state: the selected class, the sheet date, and the
/// unsaved draft entries for that class/date.
#[derive(Debug)]
pub struct Session {
    pub active_class_id: Option<String>,
    pub attendance_date: String,
    pub draft: BTreeMap<String, Status>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            active_class_id: None,
            attendance_date: today_iso(),
            draft: BTreeMap::new(),
        }
    }

    /// Re-run the draft against the current roster: keep a prior status for
    /// every student still rostered, default the rest to absent. Idempotent;
    /// runs whenever the active class, the date, or the roster changes.
    pub fn reseed(&mut self, roster: &[&Student]) {
        self.draft = seed_draft(&self.draft, roster);
    }
}

pub fn seed_draft(
    prior: &BTreeMap<String, Status>,
    roster: &[&Student],
) -> BTreeMap<String, Status> {
    let mut seeded = BTreeMap::new();
    for s in roster {
        let status = prior.get(&s.id).copied().unwrap_or(Status::Absent);
        seeded.insert(s.id.clone(), status);
    }
    seeded
}

/// YYYY-MM-DD in local time, matching the date picker's default.
pub fn today_iso() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
