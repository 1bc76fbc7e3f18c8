//! `rcpt derive` specs
//!
//! End-to-end checks of next-step resolution, guidance, action gating and
//! fallback reporting.

use crate::prelude::*;

const FRESH: &str = r#"{"preflight": {"done": false}}"#;

const READY: &str = r#"{
  "preflight": {"done": true},
  "amazon": {"downloaded": true, "confirmed": true, "printed": true},
  "rakuten": {"downloaded": true, "confirmed": true, "printed": true},
  "providers": {"pending_total": 0, "step_done": true}
}"#;

fn derive_json(snapshot: &str, extra: &[&str]) -> serde_json::Value {
    let project = Project::empty();
    let path = project.file("status.json", snapshot);
    let mut args = vec!["derive", path.to_str().unwrap(), "-o", "json"];
    args.extend_from_slice(extra);
    project.rcpt().args(&args).passes().json()
}

#[test]
fn fresh_month_points_at_preflight() {
    let json = derive_json(FRESH, &["--period", "2026-09"]);
    assert_eq!(json["next_step"]["step"], "preflight");
    assert_eq!(json["guidance"]["href"], "/expense-workflow?ym=2026-09#step-preflight");
    assert_eq!(json["fallback"]["count"], 0);
}

#[test]
fn nothing_downloaded_offers_either_source() {
    let json = derive_json(r#"{"preflight": {"done": true}}"#, &[]);
    assert_eq!(json["next_step"]["step"], "amazon_or_rakuten_download");
    assert_eq!(json["next_step"]["origin"], "inferred");
}

#[test]
fn open_print_decision_comes_first() {
    let json = derive_json(
        r#"{"preflight": {"done": true}, "amazon": {"downloaded": true, "confirmed": false}}"#,
        &[],
    );
    assert_eq!(json["next_step"]["step"], "amazon_decide_print");
}

#[test]
fn running_reconcile_uses_running_guidance() {
    let json = derive_json(r#"{"preflight": {"done": true}, "running_mode": "mf_reconcile"}"#, &[]);
    assert_eq!(json["guidance"]["message"], "Reconciliation with MF is running.");
    assert_eq!(json["guidance"]["link_label"], "View reconciliation");
    assert_eq!(json["blocks"]["mf_reconcile"], "running");

    let actions = json["actions"].as_array().unwrap();
    assert!(actions.iter().all(|a| a["enabled"] == false));
    assert_eq!(actions[0]["blocked"][0]["kind"], "task_running");
}

#[test]
fn unknown_backend_step_is_inferred_and_reported() {
    let json = derive_json(r#"{"preflight": {"done": true}, "next_step": "legacy_step_x"}"#, &[]);
    assert_eq!(json["next_step"]["step"], "amazon_or_rakuten_download");
    assert_eq!(json["next_step"]["unrecognized_hint"], "legacy_step_x");
    assert_eq!(json["fallback"]["fallback_type"], "next_step_unknown");
    assert_eq!(json["fallback"]["step"], "legacy_step_x");
    assert_eq!(json["fallback"]["count"], 1);
}

#[test]
fn known_backend_step_is_trusted() {
    let json = derive_json(r#"{"next_step": " MF_Reconcile "}"#, &[]);
    assert_eq!(json["next_step"]["step"], "mf_reconcile");
    assert_eq!(json["next_step"]["origin"], "backend");
}

#[test]
fn backend_allowed_modes_win() {
    let json = derive_json(r#"{"allowed_run_modes": ["mf_reconcile", " ", "mf_reconcile"]}"#, &[]);
    assert_eq!(json["allowed_modes"]["origin"], "backend");
    assert_eq!(json["allowed_modes"]["modes"], serde_json::json!(["mf_reconcile"]));
}

#[test]
fn ready_month_enables_reconcile_but_not_close() {
    let json = derive_json(READY, &[]);
    let actions = json["actions"].as_array().unwrap();
    let find = |name: &str| actions.iter().find(|a| a["action"] == name).unwrap().clone();

    assert_eq!(find("mf_reconcile")["enabled"], true);
    let close = find("month_close");
    assert_eq!(close["enabled"], false);
    assert_eq!(close["blocked"][0]["kind"], "checklist_incomplete");
    assert_eq!(close["blocked"][0]["missing"], serde_json::json!(["mf_reconciled"]));
}

#[test]
fn checklist_flag_unblocks_close() {
    let json = derive_json(READY, &["--checklist-complete"]);
    let actions = json["actions"].as_array().unwrap();
    let close = actions.iter().find(|a| a["action"] == "month_close").unwrap();
    assert_eq!(close["enabled"], true);
}

#[test]
fn reads_snapshot_from_stdin() {
    cli()
        .args(&["derive", "-"])
        .stdin(FRESH)
        .passes()
        .stdout_has("Next step: Preflight check (preflight, inferred)")
        .stdout_has("Open preflight /expense-workflow#step-preflight");
}

#[test]
fn text_output_for_ready_month() {
    let project = Project::empty();
    let path = project.file("status.json", READY);
    project
        .rcpt()
        .args(&["derive", path.to_str().unwrap(), "--period", "2026-09"])
        .passes()
        .stdout_has("Next step: Reconcile with MF (mf_reconcile, inferred)")
        .stdout_has("/expense-workflow?ym=2026-09#step-mf-reconcile")
        .stdout_has("Allowed modes: (inferred)")
        .stdout_has("blocked: Checklist incomplete: MF reconciliation is done.")
        .stdout_lacks("Fallbacks:");
}

#[test]
fn text_output_for_empty_snapshot() {
    cli().args(&["derive"]).stdin("{}").passes().stdout_eq(
        "\
Next step: Preflight check (preflight, inferred)
  Run the preflight check.
  Downloads need fresh sessions for every receipt source and a valid MF linkage.
  Open preflight /expense-workflow#step-preflight

Blocks:
  preflight                 pending
  amazon                    pending
  rakuten                   pending
  provider_ingest           pending
  mf_bulk_upload_task       pending
  mf_reconcile              pending

Tasks:
  amazon                    pending (download pending, print pending)
  rakuten                   pending (download pending, print pending)

Allowed modes: (inferred)
  preflight, preflight_mf

Actions:
  preflight                 enabled
  preflight_mf              enabled
  amazon_download           blocked: Workflow order: finish the earlier steps first.
  amazon_print              blocked: Workflow order: finish the earlier steps first.
  rakuten_download          blocked: Workflow order: finish the earlier steps first.
  rakuten_print             blocked: Workflow order: finish the earlier steps first.
  provider_ingest           blocked: Workflow order: finish the earlier steps first.
  import_provider_receipts  blocked: Workflow order: finish the earlier steps first.
  mf_bulk_upload            blocked: Workflow order: finish the earlier steps first.
  mf_csv_import             blocked: Workflow order: finish the earlier steps first.
  mf_reconcile              blocked: Workflow order: finish the earlier steps first.
  archive_outputs           blocked: Checklist incomplete: every downloaded source is printed, MF reconciliation is done.
  month_close               blocked: Checklist incomplete: every downloaded source is printed, MF reconciliation is done.
",
    );
}

#[test]
fn fallbacks_are_logged_to_stderr() {
    cli()
        .args(&["derive"])
        .stdin(r#"{"next_step": "legacy_step_x"}"#)
        .passes()
        .stdout_has("Fallbacks:\n  next_step_unknown")
        .stderr_has("guidance fallback");
}

#[test]
fn fail_on_fallback_exits_three() {
    cli()
        .args(&["derive", "--fail-on-fallback"])
        .stdin(r#"{"next_step_reason": "quota_exceeded"}"#)
        .exits(3)
        .stderr_has("1 guidance fallback(s) recorded; latest: next_step_reason_unknown");
}

#[test]
fn fail_on_fallback_passes_clean_snapshot() {
    cli().args(&["derive", "--fail-on-fallback"]).stdin(FRESH).passes();
}

#[test]
fn malformed_snapshot_fails() {
    cli().args(&["derive"]).stdin("{oops").exits(1).stderr_has("invalid snapshot JSON in stdin");
}

#[test]
fn missing_snapshot_file_fails() {
    let project = Project::empty();
    project
        .rcpt()
        .args(&["derive", "absent.json"])
        .exits(1)
        .stderr_has("failed to read snapshot absent.json");
}

#[test]
fn invalid_period_is_a_usage_error() {
    cli()
        .args(&["derive", "--period", "2026-13"])
        .stdin(FRESH)
        .exits(2)
        .stderr_has("invalid month 13");
}
