use inspection_gutters::{
    Activation, DiagnosticResult, EditorId, GutterConfig, GutterMarker, HeadlessWorkspace,
    InspectionGutters, InspectionReport, MarkerSeverity,
};
use pretty_assertions::assert_eq;

const GUTTER: &str = "inspection-gutter";

fn single_file(path: &str) -> (InspectionGutters<HeadlessWorkspace>, EditorId) {
    let mut ws = HeadlessWorkspace::new();
    let pane = ws.active_pane();
    let editor = ws.open_in_pane(pane, path).unwrap();
    (InspectionGutters::new(ws), editor)
}

fn error_at(message: &str, line: usize) -> InspectionReport {
    InspectionReport::new(vec![DiagnosticResult::error(message, line, 0)])
}

fn marker(severity: MarkerSeverity, tooltip: &str) -> GutterMarker {
    let config = GutterConfig::default();
    let severity_class = match severity {
        MarkerSeverity::Error => config.error_class,
        MarkerSeverity::Warning => config.warning_class,
    };
    GutterMarker {
        severity,
        class: config.marker_class,
        severity_class,
        tooltip: tooltip.to_string(),
    }
}

#[test]
fn test_single_error_on_active_editor() {
    let (mut gutters, editor) = single_file("/f.js");

    gutters.set("linter", "/f.js", error_at("x", 2), None);

    assert_eq!(
        gutters.host().markers(editor, GUTTER),
        vec![(2, marker(MarkerSeverity::Error, "x"))]
    );
}

#[test]
fn test_error_wins_over_warning_from_another_source() {
    let (mut gutters, editor) = single_file("/f.js");

    gutters.set("compiler", "/f.js", error_at("broken", 2), None);
    gutters.set(
        "linter",
        "/f.js",
        InspectionReport::new(vec![DiagnosticResult::warning("style", 2, 4)]),
        None,
    );

    assert_eq!(
        gutters.host().markers(editor, GUTTER),
        vec![(2, marker(MarkerSeverity::Error, "broken"))]
    );
    assert_eq!(gutters.query("/f.js").len(), 2);
}

#[test]
fn test_empty_report_clears_markers() {
    let (mut gutters, editor) = single_file("/f.js");

    gutters.set("linter", "/f.js", error_at("x", 2), None);
    gutters.set("linter", "/f.js", InspectionReport::empty(), None);

    assert!(gutters.host().markers(editor, GUTTER).is_empty());
    assert!(gutters.store().contains_file("/f.js"));
}

#[test]
fn test_inactive_document_is_stored_but_not_redrawn() {
    let mut ws = HeadlessWorkspace::new();
    let left = ws.active_pane();
    let right = ws.split_pane();
    let background = ws.open_in_pane(right, "/g.js").unwrap();
    ws.open_in_pane(left, "/f.js").unwrap();

    let mut gutters = InspectionGutters::new(ws);
    let outcome = gutters
        .try_set("linter", "/g.js", error_at("later", 7), None)
        .unwrap();

    assert_eq!(outcome.stored, 1);
    assert_eq!(outcome.rendered, None);
    assert_eq!(
        gutters.query("/g.js"),
        vec![DiagnosticResult::error("later", 7, 0)]
    );
    assert!(gutters.host().markers(background, GUTTER).is_empty());

    // Focusing the pane and refreshing draws it.
    gutters.host_mut().set_active_pane(right).unwrap();
    let refreshed = gutters.refresh_active().unwrap();
    assert_eq!(refreshed, Some((background, 1)));
    assert_eq!(
        gutters.host().markers(background, GUTTER),
        vec![(7, marker(MarkerSeverity::Error, "later"))]
    );
}

#[test]
fn test_unopened_file_is_stored_and_drawn_once_opened() {
    let (mut gutters, _) = single_file("/f.js");
    let pane = gutters.host().active_pane();

    let outcome = gutters
        .try_set("linter", "/later.js", error_at("x", 3), None)
        .unwrap();
    assert_eq!(outcome.stored, 1);
    assert_eq!(outcome.rendered, None);
    assert_eq!(gutters.query("/later.js").len(), 1);

    let editor = gutters.host_mut().open_in_pane(pane, "/later.js").unwrap();
    assert_eq!(gutters.refresh_active().unwrap(), Some((editor, 1)));
    assert_eq!(
        gutters.host().markers(editor, GUTTER),
        vec![(3, marker(MarkerSeverity::Error, "x"))]
    );
}

#[test]
fn test_closed_editor_discards_markers_until_fresh_set() {
    let mut ws = HeadlessWorkspace::new();
    let pane = ws.active_pane();
    let editor = ws.open_in_pane(pane, "/f.js").unwrap();
    let mut gutters = InspectionGutters::new(ws);
    gutters.set("linter", "/f.js", error_at("x", 2), None);

    // Switch the only pane to another file: `/f.js`'s editor is no longer visible.
    gutters.host_mut().open_in_pane(pane, "/other.js").unwrap();
    gutters.set("linter", "/other.js", InspectionReport::empty(), None);

    assert!(!gutters.registered_editors().contains(&editor));
    assert_eq!(
        gutters.host().gutter_list(editor).unwrap(),
        &["linenumbers".to_string()]
    );
    assert!(gutters.host().markers(editor, GUTTER).is_empty());
    assert!(gutters.query("/f.js").is_empty());

    // Reopen: gutter comes back empty; a publish from another source shows only its result.
    gutters.host_mut().open_in_pane(pane, "/f.js").unwrap();
    assert_eq!(gutters.refresh_active().unwrap(), Some((editor, 0)));
    assert!(gutters.host().markers(editor, GUTTER).is_empty());

    gutters.set(
        "spell",
        "/f.js",
        InspectionReport::new(vec![DiagnosticResult::meta("typo", 5, 0)]),
        None,
    );
    assert_eq!(
        gutters.host().markers(editor, GUTTER),
        vec![(5, marker(MarkerSeverity::Warning, "typo"))]
    );
}

#[test]
fn test_closing_document_disposes_editor_and_reopen_starts_empty() {
    let mut ws = HeadlessWorkspace::new();
    let pane = ws.active_pane();
    let old_editor = ws.open_in_pane(pane, "/f.js").unwrap();
    let mut gutters = InspectionGutters::new(ws);
    gutters.set("linter", "/f.js", error_at("x", 2), None);

    let doc = gutters.host().document_id_for_path("/f.js").unwrap();
    gutters.host_mut().close_document(doc).unwrap();
    gutters.set("linter", "/unrelated.js", InspectionReport::empty(), None);
    assert!(gutters.registered_editors().is_empty());
    assert!(gutters.query("/f.js").is_empty());

    let new_editor = gutters.host_mut().open_in_pane(pane, "/f.js").unwrap();
    assert_ne!(new_editor, old_editor);
    assert_eq!(gutters.refresh_active().unwrap(), Some((new_editor, 0)));
    assert_eq!(gutters.registered_editors(), &[new_editor]);
}

#[test]
fn test_warning_meta_and_unknown_share_non_error_style() {
    let (mut gutters, editor) = single_file("/f.js");

    let report = InspectionReport::from_json_str(
        r#"{"errors":[
            {"type":"problem_type_warning","message":"w","pos":{"line":1,"ch":0}},
            {"type":"problem_type_meta","message":"m","pos":{"line":2,"ch":0}},
            {"type":"problem_type_style","message":"s","pos":{"line":3,"ch":0}},
            {"type":"problem_type_error","message":"e","pos":{"line":4,"ch":0}}
        ]}"#,
    )
    .unwrap();
    gutters.set("linter", "/f.js", report, None);

    assert_eq!(
        gutters.host().markers(editor, GUTTER),
        vec![
            (1, marker(MarkerSeverity::Warning, "w")),
            (2, marker(MarkerSeverity::Warning, "m")),
            (3, marker(MarkerSeverity::Warning, "s")),
            (4, marker(MarkerSeverity::Error, "e")),
        ]
    );
}

#[test]
fn test_set_json_with_errors_only_filter() {
    let (mut gutters, editor) = single_file("/f.js");

    let outcome = gutters
        .set_json(
            "linter",
            "/f.js",
            r#"{"errors":[
                {"type":"problem_type_warning","message":"w","pos":{"line":1,"ch":0}},
                {"type":"problem_type_error","message":"e","pos":{"line":3,"ch":2}}
            ]}"#,
            Some(serde_json::from_str(r#"{"error":true}"#).unwrap()),
        )
        .unwrap();

    assert_eq!(outcome.stored, 1);
    assert_eq!(outcome.rendered, Some((editor, 1)));
    assert_eq!(
        gutters.host().markers(editor, GUTTER),
        vec![(3, marker(MarkerSeverity::Error, "e"))]
    );

    assert!(
        gutters
            .set_json("linter", "/f.js", "not json", None)
            .is_err()
    );
}

#[test]
fn test_custom_config_names_flow_to_host() {
    let config = GutterConfig::from_json_str(
        r#"{"gutter_name":"lint","error_class":"lint-error","line_number_gutter":"numbers"}"#,
    )
    .unwrap();
    let mut ws = HeadlessWorkspace::with_default_gutters(vec![
        "breakpoints".to_string(),
        "numbers".to_string(),
    ]);
    let pane = ws.active_pane();
    let editor = ws.open_in_pane(pane, "/f.js").unwrap();

    let mut gutters = InspectionGutters::with_config(ws, config);
    gutters.set("linter", "/f.js", error_at("x", 0), None);

    assert_eq!(
        gutters.host().gutter_list(editor).unwrap(),
        &[
            "breakpoints".to_string(),
            "lint".to_string(),
            "numbers".to_string(),
        ]
    );
    let placed = gutters.host().marker_at(editor, "lint", 0).unwrap();
    assert_eq!(placed.severity_class, "lint-error");
}

#[test]
fn test_activation_is_idempotent_and_teardown_removes_gutters() {
    let mut ws = HeadlessWorkspace::new();
    let pane = ws.active_pane();
    let editor = ws.open_in_pane(pane, "/f.js").unwrap();

    let mut activation = Activation::new();
    assert!(!activation.is_active());
    assert!(activation.activate(ws, GutterConfig::default()));
    assert!(!activation.activate(HeadlessWorkspace::new(), GutterConfig::default()));

    let gutters = activation.gutters_mut().unwrap();
    gutters.set("linter", "/f.js", error_at("x", 2), None);
    assert_eq!(gutters.host().markers(editor, GUTTER).len(), 1);

    let host = activation.deactivate().unwrap().unwrap();
    assert!(!activation.is_active());
    assert_eq!(
        host.gutter_list(editor).unwrap(),
        &["linenumbers".to_string()]
    );
    assert!(host.markers(editor, GUTTER).is_empty());
    assert!(activation.deactivate().unwrap().is_none());
}

#[test]
fn test_ranked_view_matches_rendered_markers() {
    let (mut gutters, editor) = single_file("/f.js");

    gutters.set(
        "a",
        "/f.js",
        InspectionReport::new(vec![
            DiagnosticResult::warning("w10", 10, 0),
            DiagnosticResult::error("e2", 2, 0),
        ]),
        None,
    );
    gutters.set(
        "b",
        "/f.js",
        InspectionReport::new(vec![
            DiagnosticResult::meta("m10", 10, 0),
            DiagnosticResult::error("e100000", 100_000, 0),
        ]),
        None,
    );

    let lines: Vec<usize> = gutters.ranked("/f.js").iter().map(|r| r.line()).collect();
    assert_eq!(lines, vec![2, 100_000, 10]);

    let rendered: Vec<(usize, String)> = gutters
        .host()
        .markers(editor, GUTTER)
        .into_iter()
        .map(|(line, m)| (line, m.tooltip))
        .collect();
    assert_eq!(
        rendered,
        vec![
            (2, "e2".to_string()),
            (10, "w10".to_string()),
            (100_000, "e100000".to_string()),
        ]
    );
}
