use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_classes_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    // Include basic counts so the UI can show a useful dashboard.
    let classes: Vec<serde_json::Value> = state
        .store
        .classes()
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "name": c.name,
                "createdAt": c.created_at,
                "studentCount": state.store.roster(&c.id).len(),
                "recordCount": state.store.records_for_class(&c.id).len(),
            })
        })
        .collect();

    ok(
        &req.id,
        json!({
            "classes": classes,
            "activeClassId": state.session.active_class_id,
        }),
    )
}

fn handle_classes_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match req.params.get("name").and_then(|v| v.as_str()) {
        Some(v) => v.trim().to_string(),
        None => return err(&req.id, "bad_params", "missing name", None),
    };
    if name.is_empty() {
        return err(&req.id, "bad_params", "name must not be empty", None);
    }

    let Some(created) = state.store.create_class(&name) else {
        return err(&req.id, "bad_params", "name must not be empty", None);
    };
    let class_id = created.id.clone();

    // A new class becomes the active one; the draft follows it.
    state.session.active_class_id = Some(class_id.clone());
    state.reseed_draft();

    ok(&req.id, json!({ "classId": class_id, "name": name }))
}

fn handle_classes_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match req.params.get("classId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing classId", None),
    };
    if state.store.class(&class_id).is_none() {
        return err(&req.id, "not_found", "class not found", None);
    }

    state.session.active_class_id = Some(class_id.clone());
    state.reseed_draft();

    ok(&req.id, json!({ "ok": true, "activeClassId": class_id }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_classes_list(state, req)),
        "classes.create" => Some(handle_classes_create(state, req)),
        "classes.select" => Some(handle_classes_select(state, req)),
        _ => None,
    }
}
