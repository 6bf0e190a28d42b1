use inspection_gutters::{
    Activation, DiagnosticResult, EditorId, GutterConfig, HeadlessWorkspace, InspectionReport,
    KindFilter,
};
use tracing_subscriber::EnvFilter;

fn dump(activation: &Activation<HeadlessWorkspace>, label: &str, editors: &[(&str, EditorId)]) {
    let Some(gutters) = activation.gutters() else {
        return;
    };
    let gutter = &gutters.config().gutter_name;
    println!("-- {label}");
    for (path, editor) in editors {
        let columns = gutters
            .host()
            .gutter_list(*editor)
            .unwrap_or_default()
            .join(", ");
        println!("  {path} [{columns}]");
        for (line, marker) in gutters.host().markers(*editor, gutter) {
            println!("    line {line}: {:?} {:?}", marker.severity, marker.tooltip);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut ws = HeadlessWorkspace::new();
    let left = ws.active_pane();
    let right = ws.split_pane();
    let lib = ws.open_in_pane(right, "/src/lib.rs").unwrap();
    let main = ws.open_in_pane(left, "/src/main.rs").unwrap();
    let editors = [("/src/main.rs", main), ("/src/lib.rs", lib)];

    let mut activation = Activation::new();
    activation.activate(ws, GutterConfig::default());
    let Some(gutters) = activation.gutters_mut() else {
        return;
    };

    gutters.set(
        "compiler",
        "/src/main.rs",
        InspectionReport::new(vec![
            DiagnosticResult::error("mismatched types", 4, 8),
            DiagnosticResult::warning("unused import", 0, 4),
        ]),
        None,
    );
    gutters.set(
        "clippy",
        "/src/main.rs",
        InspectionReport::new(vec![
            DiagnosticResult::warning("needless borrow", 4, 2),
            DiagnosticResult::meta("consider `matches!`", 9, 0),
        ]),
        Some(
            KindFilter {
                error: true,
                warning: true,
                meta: false,
            }
            .into(),
        ),
    );
    // Not active: stored, not drawn.
    gutters.set(
        "compiler",
        "/src/lib.rs",
        InspectionReport::new(vec![DiagnosticResult::error("unresolved import", 1, 0)]),
        None,
    );
    dump(&activation, "after publishing", &editors);

    if let Some(gutters) = activation.gutters_mut() {
        let _ = gutters.host_mut().set_active_pane(right);
        if let Err(err) = gutters.refresh_active() {
            eprintln!("refresh failed: {err}");
        }
    }
    dump(&activation, "after focusing the right pane", &editors);

    match activation.deactivate() {
        Ok(Some(host)) => println!("deactivated; main.rs gutters: {:?}", host.gutter_list(main)),
        Ok(None) => {}
        Err(err) => eprintln!("deactivate failed: {err}"),
    }
}
