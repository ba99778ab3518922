use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::store::percent_label;
use serde_json::json;

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(class_id) = state.session.active_class_id.clone() else {
        return ok(&req.id, json!({ "students": [] }));
    };

    let students: Vec<serde_json::Value> = state
        .store
        .roster(&class_id)
        .iter()
        .map(|s| {
            let percent = state.store.attendance_percent(&class_id, &s.id);
            json!({
                "id": s.id,
                "name": s.name,
                "email": s.email,
                "createdAt": s.created_at,
                "attendancePercent": percent_label(percent),
            })
        })
        .collect();

    ok(&req.id, json!({ "classId": class_id, "students": students }))
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(class_id) = state.session.active_class_id.clone() else {
        return err(&req.id, "no_active_class", "select a class first", None);
    };

    let name = match req.params.get("name").and_then(|v| v.as_str()) {
        Some(v) => v.trim().to_string(),
        None => return err(&req.id, "bad_params", "missing name", None),
    };
    if name.is_empty() {
        return err(&req.id, "bad_params", "name must not be empty", None);
    }
    let email = req.params.get("email").and_then(|v| v.as_str());

    let Some(created) = state.store.create_student(&class_id, &name, email) else {
        return err(&req.id, "not_found", "class not found", None);
    };
    let student_id = created.id.clone();

    // Roster changed; the new student enters the draft as absent.
    state.reseed_draft();

    ok(&req.id, json!({ "studentId": student_id, "name": name }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        _ => None,
    }
}
