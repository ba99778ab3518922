use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::store::Status;
use serde_json::json;

struct HandlerErr {
    code: &'static str,
    message: String,
}

impl HandlerErr {
    fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, None)
    }
}

fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr {
            code: "bad_params",
            message: format!("missing {}", key),
        })
}

fn active_class_id(state: &AppState) -> Result<String, HandlerErr> {
    state
        .session
        .active_class_id
        .clone()
        .ok_or_else(|| HandlerErr {
            code: "no_active_class",
            message: "select a class first".to_string(),
        })
}

fn parse_iso_date(s: &str) -> Result<String, HandlerErr> {
    let t = s.trim();
    if chrono::NaiveDate::parse_from_str(t, "%Y-%m-%d").is_err() {
        return Err(HandlerErr {
            code: "bad_params",
            message: "date must be YYYY-MM-DD".to_string(),
        });
    }
    Ok(t.to_string())
}

fn parse_status(params: &serde_json::Value) -> Result<Status, HandlerErr> {
    let raw = get_required_str(params, "status")?;
    Status::parse(&raw).ok_or_else(|| HandlerErr {
        code: "bad_params",
        message: "status must be present or absent".to_string(),
    })
}

fn sheet_open(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    let class_id = active_class_id(state)?;
    let rows: Vec<serde_json::Value> = state
        .store
        .roster(&class_id)
        .iter()
        .map(|s| {
            // Missing keys read as absent, same default the seeder applies.
            let status = state
                .session
                .draft
                .get(&s.id)
                .copied()
                .unwrap_or(Status::Absent);
            json!({
                "studentId": s.id,
                "name": s.name,
                "status": status.as_str(),
            })
        })
        .collect();

    Ok(json!({
        "classId": class_id,
        "date": state.session.attendance_date,
        "rows": rows,
    }))
}

fn set_date(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let date = parse_iso_date(&get_required_str(params, "date")?)?;
    state.session.attendance_date = date.clone();
    state.reseed_draft();
    Ok(json!({ "date": date }))
}

fn set_status(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let class_id = active_class_id(state)?;
    let student_id = get_required_str(params, "studentId")?;
    let status = parse_status(params)?;

    let rostered = state
        .store
        .roster(&class_id)
        .iter()
        .any(|s| s.id == student_id);
    if !rostered {
        return Err(HandlerErr {
            code: "not_found",
            message: "student not found".to_string(),
        });
    }

    state.session.draft.insert(student_id, status);
    Ok(json!({ "ok": true }))
}

fn mark_all(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let class_id = active_class_id(state)?;
    let status = parse_status(params)?;

    let student_ids: Vec<String> = state
        .store
        .roster(&class_id)
        .iter()
        .map(|s| s.id.clone())
        .collect();
    let marked = student_ids.len();
    for id in student_ids {
        state.session.draft.insert(id, status);
    }
    Ok(json!({ "ok": true, "marked": marked }))
}

fn save(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let class_id = active_class_id(state)?;
    let date = state.session.attendance_date.clone();
    let entries = state.session.draft.clone();
    let saved = entries.len();

    let record = state.store.upsert_record(&class_id, &date, entries);
    Ok(json!({
        "recordId": record.id,
        "date": record.date,
        "savedEntries": saved,
    }))
}

fn history(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    let class_id = active_class_id(state)?;
    let records: Vec<serde_json::Value> = state
        .store
        .records_for_class(&class_id)
        .iter()
        .map(|r| {
            let present = r
                .entries
                .values()
                .filter(|st| **st == Status::Present)
                .count();
            json!({
                "id": r.id,
                "date": r.date,
                "presentCount": present,
                "absentCount": r.entries.len() - present,
                "createdAt": r.created_at,
            })
        })
        .collect();

    Ok(json!({ "classId": class_id, "records": records }))
}

fn respond(id: &str, result: Result<serde_json::Value, HandlerErr>) -> serde_json::Value {
    match result {
        Ok(value) => ok(id, value),
        Err(error) => error.response(id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.sheetOpen" => Some(respond(&req.id, sheet_open(state))),
        "attendance.setDate" => Some(respond(&req.id, set_date(state, &req.params))),
        "attendance.setStatus" => Some(respond(&req.id, set_status(state, &req.params))),
        "attendance.markAll" => Some(respond(&req.id, mark_all(state, &req.params))),
        "attendance.save" => Some(respond(&req.id, save(state))),
        "attendance.history" => Some(respond(&req.id, history(state))),
        _ => None,
    }
}
