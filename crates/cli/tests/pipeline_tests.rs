//! End-to-end tests against the built binary: extract, load, audit,
//! check-months, verify, and the exit code contract.

use std::path::Path;
use std::process::{Command, Output};

use rust_xlsxwriter::Workbook;

const QZL: &str = env!("CARGO_BIN_EXE_qzl");

fn qzl(dir: &Path, args: &[&str]) -> Output {
    Command::new(QZL)
        .current_dir(dir)
        .env_remove("QZL_WORKBOOK")
        .env_remove("QZL_STORE")
        .env_remove("QZL_CSV_DIR")
        .env_remove("QZL_YEAR")
        .env_remove("QZL_TOLERANCE")
        .env_remove("QZL_CELL_POLICY")
        .args(args)
        .output()
        .expect("run qzl")
}

fn code(output: &Output) -> i32 {
    output.status.code().expect("exit code")
}

fn stdout_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect()
}

/// Builds a workbook whose totals are internally consistent, with a
/// hook to shift one Ventas month for drift tests.
fn write_workbook(path: &Path, ventas_enero: f64) {
    let mut wb = Workbook::new();

    // Resumen: areas on rows 3-4, TOTAL on row 11.
    let sheet = wb.add_worksheet().set_name("Resumen").unwrap();
    let ventas: Vec<f64> = (0..12)
        .map(|i| if i == 0 { ventas_enero } else { 100.0 + i as f64 })
        .collect();
    let operaciones: Vec<f64> = (0..12).map(|i| 50.0 + i as f64).collect();
    for (row, (label, months)) in [(3u32, ("Ventas", &ventas)), (4, ("Operaciones", &operaciones))]
    {
        sheet.write_string(row, 1, label).unwrap();
        for (i, v) in months.iter().enumerate() {
            sheet.write_number(row, 2 + i as u16, *v).unwrap();
        }
        sheet
            .write_number(row, 14, months.iter().sum::<f64>())
            .unwrap();
    }
    sheet.write_string(11, 1, "TOTAL").unwrap();
    let mut total_annual = 0.0;
    for i in 0..12 {
        let v = ventas[i] + operaciones[i];
        total_annual += v;
        sheet.write_number(11, 2 + i as u16, v).unwrap();
    }
    sheet.write_number(11, 14, total_annual).unwrap();

    // PPTO: two centers from row 6, rollup after.
    let sheet = wb
        .add_worksheet()
        .set_name("PPTO")
        .unwrap();
    let centers = [
        ("C100", "Ventas Norte", [10.0, 20.0, 30.0, 40.0, 50.0, 60.0]),
        ("C200", "Bodega", [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
    ];
    let mut rollup = 0.0;
    for (n, (centro, denom, months)) in centers.iter().enumerate() {
        let row = 6 + n as u32;
        sheet.write_string(row, 0, "GTQ").unwrap();
        sheet.write_string(row, 1, *centro).unwrap();
        sheet.write_string(row, 2, *denom).unwrap();
        for (i, v) in months.iter().enumerate() {
            sheet.write_number(row, 6 + i as u16, *v).unwrap();
        }
        let annual = months.iter().sum::<f64>();
        sheet.write_number(row, 12, annual).unwrap();
        rollup += annual;
    }
    sheet.write_string(8, 0, "Total general").unwrap();
    sheet.write_number(8, 12, rollup).unwrap();

    // Data: header row plus two postings.
    let sheet = wb.add_worksheet().set_name("Data").unwrap();
    let headers = [
        "Centro de coste",
        "Valor/Moneda objeto",
        "Fe.contabilización",
        "Usuario",
    ];
    for (col, h) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *h).unwrap();
    }
    for (row, (centro, valor, fecha)) in
        [(1u32, ("C100", 250.5, "2025-03-15")), (2, ("C200", -40.0, "2025-06-02"))]
    {
        sheet.write_string(row, 0, centro).unwrap();
        sheet.write_number(row, 1, valor).unwrap();
        sheet.write_string(row, 2, fecha).unwrap();
        sheet.write_string(row, 3, "mlopez").unwrap();
    }

    // Reclasificación de gastos: same header vocabulary, one row.
    let sheet = wb.add_worksheet().set_name("Reclasificación de gastos").unwrap();
    for (col, h) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *h).unwrap();
    }
    sheet.write_string(1, 0, "C100").unwrap();
    sheet.write_number(1, 1, 5.0).unwrap();
    sheet.write_string(1, 2, "2025-02-01").unwrap();

    // Cuentas: actuals from row 2.
    let sheet = wb.add_worksheet().set_name("Cuentas").unwrap();
    let actuals = [
        ("Ventas", "600100", "enero", 80.0),
        ("Ventas", "600200", "febrero", 20.0),
        ("Operaciones", "600300", "enero", 9.0),
    ];
    for (n, (area, cuenta, mes, valor)) in actuals.iter().enumerate() {
        let row = 2 + n as u32;
        sheet.write_string(row, 1, *area).unwrap();
        sheet.write_string(row, 2, "General").unwrap();
        sheet.write_string(row, 3, "mlopez").unwrap();
        sheet.write_string(row, 4, *cuenta).unwrap();
        sheet.write_string(row, 5, "Gastos").unwrap();
        sheet.write_string(row, 6, "M1").unwrap();
        sheet.write_string(row, 9, *mes).unwrap();
        sheet.write_number(row, 10, *valor).unwrap();
    }

    wb.save(path).unwrap();
}

#[test]
fn extract_writes_csvs_and_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let wb = dir.path().join("ksb.xlsx");
    write_workbook(&wb, 100.0);

    let out = qzl(
        dir.path(),
        &["--workbook", "ksb.xlsx", "extract", "--out", "exports"],
    );
    assert_eq!(code(&out), 0, "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let exports = dir.path().join("exports");
    for name in [
        "resumen_presupuesto.csv",
        "presupuesto_detallado.csv",
        "transacciones.csv",
        "reclasificaciones.csv",
        "cuentas_reales.csv",
        "summary.csv",
    ] {
        assert!(exports.join(name).exists(), "missing {name}");
    }

    // 3 resumen rows (2 areas + TOTAL) times 12 months, plus header.
    let resumen = std::fs::read_to_string(exports.join("resumen_presupuesto.csv")).unwrap();
    assert_eq!(resumen.lines().count(), 37);
}

#[test]
fn load_then_audit_is_consistent() {
    let dir = tempfile::tempdir().unwrap();
    let wb = dir.path().join("ksb.xlsx");
    write_workbook(&wb, 100.0);

    let out = qzl(dir.path(), &["--workbook", "ksb.xlsx", "load"]);
    assert_eq!(code(&out), 0, "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("quetzal.db").exists());

    let out = qzl(dir.path(), &["--workbook", "ksb.xlsx", "--json", "audit"]);
    assert_eq!(code(&out), 0, "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let lines = stdout_lines(&out);
    let summary = lines.last().expect("summary line");
    assert_eq!(summary["inconsistent"], 0);
    assert!(lines
        .iter()
        .filter(|l| l.get("status").is_some())
        .all(|l| l["status"] == "consistent"));
    // Every collection shows up as an entity somewhere.
    for entity in ["Ventas", "TOTAL", "PPTO", "Data", "Reclasificación"] {
        assert!(
            lines.iter().any(|l| l.get("entity") == Some(&serde_json::json!(entity))),
            "no report line for {entity}"
        );
    }
}

#[test]
fn audit_flags_drift_between_workbook_and_store() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = dir.path().join("loaded.xlsx");
    let drifted = dir.path().join("drifted.xlsx");
    write_workbook(&loaded, 100.0);
    write_workbook(&drifted, 600.0);

    let out = qzl(dir.path(), &["--workbook", "loaded.xlsx", "load"]);
    assert_eq!(code(&out), 0);

    let out = qzl(dir.path(), &["--workbook", "drifted.xlsx", "--json", "audit"]);
    assert_eq!(code(&out), 3, "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let lines = stdout_lines(&out);
    let ventas = lines
        .iter()
        .find(|l| l.get("entity") == Some(&serde_json::json!("Ventas")))
        .expect("ventas line");
    assert_eq!(ventas["status"], "inconsistent");
    assert_eq!(ventas["difference"], 500.0);
}

#[test]
fn audit_honors_the_tolerance_flag() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = dir.path().join("loaded.xlsx");
    let drifted = dir.path().join("drifted.xlsx");
    write_workbook(&loaded, 100.0);
    write_workbook(&drifted, 100.4);

    let out = qzl(dir.path(), &["--workbook", "loaded.xlsx", "load"]);
    assert_eq!(code(&out), 0);

    // Default tolerance 1.0 absorbs the 0.4 drift.
    let out = qzl(dir.path(), &["--workbook", "drifted.xlsx", "audit"]);
    assert_eq!(code(&out), 0);

    // A tolerance equal to the difference does not: consistency needs
    // the difference strictly below it.
    let out = qzl(
        dir.path(),
        &["--workbook", "drifted.xlsx", "--tolerance", "0.4", "audit"],
    );
    assert_eq!(code(&out), 3);
}

#[test]
fn check_months_passes_on_a_consistent_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let wb = dir.path().join("ksb.xlsx");
    write_workbook(&wb, 100.0);

    let out = qzl(dir.path(), &["--workbook", "ksb.xlsx", "check-months"]);
    assert_eq!(code(&out), 0, "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn check_months_flags_a_stale_annual_cell() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.xlsx");
    {
        let mut book = Workbook::new();
        let sheet = book.add_worksheet().set_name("Resumen").unwrap();
        sheet.write_string(3, 1, "Ventas").unwrap();
        for col in 2..14u16 {
            sheet.write_number(3, col, 10.0).unwrap();
        }
        // Month cells sum to 120 but the annual cell says 150.
        sheet.write_number(3, 14, 150.0).unwrap();
        book.add_worksheet().set_name("PPTO").unwrap();
        let data = book.add_worksheet().set_name("Data").unwrap();
        data.write_string(0, 0, "Valor/Moneda objeto").unwrap();
        book.add_worksheet().set_name("Cuentas").unwrap();
        book.save(&broken).unwrap();
    }

    let out = qzl(dir.path(), &["--workbook", "broken.xlsx", "--json", "check-months"]);
    assert_eq!(code(&out), 3, "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let lines = stdout_lines(&out);
    let ventas = lines
        .iter()
        .find(|l| l.get("entity") == Some(&serde_json::json!("Ventas")) && l["status"] == "inconsistent")
        .expect("inconsistent ventas line");
    assert_eq!(ventas["difference"], 30.0);
}

#[test]
fn verify_requires_an_existing_store() {
    let dir = tempfile::tempdir().unwrap();
    let out = qzl(dir.path(), &["verify"]);
    assert_eq!(code(&out), 4, "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn load_then_verify_is_consistent() {
    let dir = tempfile::tempdir().unwrap();
    let wb = dir.path().join("ksb.xlsx");
    write_workbook(&wb, 100.0);

    let out = qzl(dir.path(), &["--workbook", "ksb.xlsx", "load"]);
    assert_eq!(code(&out), 0);

    let out = qzl(dir.path(), &["--json", "verify"]);
    assert_eq!(code(&out), 0, "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let lines = stdout_lines(&out);
    let counts: Vec<_> = lines
        .iter()
        .filter(|l| l.get("documents").is_some())
        .collect();
    assert_eq!(counts.len(), 5);
    let resumen = counts
        .iter()
        .find(|l| l["collection"] == "resumen_presupuesto")
        .unwrap();
    assert_eq!(resumen["documents"], 36);
}

#[test]
fn missing_workbook_setting_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = qzl(dir.path(), &["audit"]);
    assert_eq!(code(&out), 2);
    assert!(String::from_utf8_lossy(&out.stderr).contains("workbook"));
}

#[test]
fn missing_workbook_file_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let out = qzl(dir.path(), &["--workbook", "nope.xlsx", "extract"]);
    assert_eq!(code(&out), 4);
}

#[test]
fn a_workbook_missing_a_sheet_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    // Readable file, but not the export we audit: no Cuentas sheet.
    {
        let mut book = Workbook::new();
        let sheet = book.add_worksheet().set_name("Resumen").unwrap();
        sheet.write_string(3, 1, "Ventas").unwrap();
        for col in 2..14u16 {
            sheet.write_number(3, col, 10.0).unwrap();
        }
        sheet.write_number(3, 14, 120.0).unwrap();
        book.add_worksheet().set_name("PPTO").unwrap();
        let data = book.add_worksheet().set_name("Data").unwrap();
        data.write_string(0, 0, "Valor/Moneda objeto").unwrap();
        book.save(dir.path().join("partial.xlsx")).unwrap();
    }

    let out = qzl(dir.path(), &["--workbook", "partial.xlsx", "extract"]);
    assert_eq!(code(&out), 4, "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Cuentas"));
}

#[test]
fn malformed_cell_fails_fast_unless_zero_fill() {
    let dir = tempfile::tempdir().unwrap();
    let wb = dir.path().join("ksb.xlsx");
    write_workbook(&wb, 100.0);
    // Corrupt a month cell with text by rebuilding the sheet.
    {
        let mut book = Workbook::new();
        let sheet = book.add_worksheet().set_name("Resumen").unwrap();
        sheet.write_string(3, 1, "Ventas").unwrap();
        sheet.write_string(3, 2, "pendiente").unwrap();
        for col in 3..14u16 {
            sheet.write_number(3, col, 1.0).unwrap();
        }
        // Annual assumes enero held 1.0, so zero-filling leaves a gap.
        sheet.write_number(3, 14, 12.0).unwrap();
        book.add_worksheet().set_name("PPTO").unwrap();
        let data = book.add_worksheet().set_name("Data").unwrap();
        data.write_string(0, 0, "Valor/Moneda objeto").unwrap();
        book.add_worksheet().set_name("Cuentas").unwrap();
        book.save(dir.path().join("bad.xlsx")).unwrap();
    }

    let out = qzl(dir.path(), &["--workbook", "bad.xlsx", "check-months"]);
    assert_eq!(code(&out), 5, "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stderr).contains("pendiente"));

    let out = qzl(
        dir.path(),
        &["--workbook", "bad.xlsx", "--zero-fill", "check-months"],
    );
    // Zero-filled months no longer match the annual cell, so the run
    // completes and reports the mismatch instead of aborting.
    assert_eq!(code(&out), 3);
}

#[test]
fn config_file_supplies_the_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let wb = dir.path().join("ksb.xlsx");
    write_workbook(&wb, 100.0);
    std::fs::write(
        dir.path().join("quetzal.toml"),
        "workbook = \"ksb.xlsx\"\nstore = \"audit.db\"\n",
    )
    .unwrap();

    let out = qzl(dir.path(), &["load"]);
    assert_eq!(code(&out), 0, "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("audit.db").exists());
}
