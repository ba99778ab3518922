use std::path::PathBuf;

use crate::csv::{build_attendance_csv, default_export_filename};
use crate::export::write_export;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_export_attendance_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(class_id) = state.session.active_class_id.clone() else {
        return err(&req.id, "no_active_class", "select a class first", None);
    };
    let out_dir = match req.params.get("outDir").and_then(|v| v.as_str()) {
        Some(v) => PathBuf::from(v),
        None => return err(&req.id, "bad_params", "missing outDir", None),
    };

    let class_name = match state.store.class(&class_id) {
        Some(c) => c.name.clone(),
        None => return err(&req.id, "not_found", "class not found", None),
    };
    let filename = req
        .params
        .get("filename")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| default_export_filename(&class_name));

    let records = state.store.records_for_class(&class_id);
    let roster = state.store.roster(&class_id);
    let csv = build_attendance_csv(&records, &roster);
    let rows_exported = csv.lines().count().saturating_sub(1);

    let path = match write_export(&out_dir, &filename, &csv) {
        Ok(p) => p,
        Err(e) => {
            return err(
                &req.id,
                "export_failed",
                e.to_string(),
                Some(json!({ "outDir": out_dir.to_string_lossy() })),
            )
        }
    };

    ok(
        &req.id,
        json!({
            "ok": true,
            "path": path.to_string_lossy(),
            "rowsExported": rows_exported,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "export.attendanceCsv" => Some(handle_export_attendance_csv(state, req)),
        _ => None,
    }
}
