use std::path::Path;

use quetzal_config::{ConfigError, Settings};
use quetzal_core::{BudgetRow, CuentaRecord, PptoRecord, ResumenRecord, TransaccionRecord};
use quetzal_extract::ppto::CostCenterRow;
use quetzal_extract::{cuentas, layout, ppto, resumen, transacciones, ExtractError, Provenance};
use quetzal_io::{BudgetWorkbook, IoError, SqliteStore};
use quetzal_recon::FlatRow;

use crate::exit_codes::{
    EXIT_ERROR, EXIT_MALFORMED, EXIT_SOURCE_UNAVAILABLE, EXIT_USAGE,
};

/// A failure with the exit code it maps to.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
}

impl CliError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::usage(e.to_string())
    }
}

impl From<IoError> for CliError {
    fn from(e: IoError) -> Self {
        let code = match &e {
            // A sheet missing from an otherwise readable workbook means
            // the export is not the one we audit, same as a missing file.
            IoError::Workbook { .. } | IoError::Sheet { .. } => EXIT_SOURCE_UNAVAILABLE,
            _ => EXIT_ERROR,
        };
        Self::new(code, e.to_string())
    }
}

impl From<ExtractError> for CliError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::Io(inner) => inner.into(),
            ExtractError::MalformedCell { .. } | ExtractError::MissingColumn { .. } => {
                Self::new(EXIT_MALFORMED, e.to_string())
            }
        }
    }
}

/// Resolved settings plus output mode, shared by every command.
pub struct Context {
    pub settings: Settings,
    pub json: bool,
}

impl Context {
    pub fn workbook_path(&self) -> Result<&Path, CliError> {
        self.settings
            .workbook
            .as_deref()
            .ok_or_else(|| CliError::usage("no workbook configured; pass --workbook or set it in quetzal.toml"))
    }

    pub fn open_workbook(&self) -> Result<BudgetWorkbook, CliError> {
        Ok(BudgetWorkbook::open(self.workbook_path()?)?)
    }

    /// Opens the store, creating the file if needed. Used by `load`.
    pub fn open_store(&self) -> Result<SqliteStore, CliError> {
        Ok(SqliteStore::open(&self.settings.store)?)
    }

    /// Opens an existing store. Commands that only read refuse to
    /// create an empty file, that would silently verify nothing.
    pub fn open_existing_store(&self) -> Result<SqliteStore, CliError> {
        if !self.settings.store.exists() {
            return Err(CliError::new(
                EXIT_SOURCE_UNAVAILABLE,
                format!("store not found: {}", self.settings.store.display()),
            ));
        }
        Ok(SqliteStore::open(&self.settings.store)?)
    }

    pub fn provenance(&self) -> Result<Provenance, CliError> {
        let path = self.workbook_path()?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Provenance::now(self.settings.year, source))
    }
}

/// Everything the pipeline reads out of one workbook pass.
pub struct WorkbookData {
    pub prov: Provenance,
    pub resumen_rows: Vec<BudgetRow>,
    pub resumen_flat: Vec<FlatRow>,
    pub ppto_rows: Vec<CostCenterRow>,
    pub ppto_grand_total: Option<f64>,
    pub data_total: f64,
    pub reclas_total: Option<f64>,
    pub resumen: Vec<ResumenRecord>,
    pub ppto: Vec<PptoRecord>,
    pub transacciones: Vec<TransaccionRecord>,
    pub reclasificaciones: Vec<TransaccionRecord>,
    pub cuentas: Vec<CuentaRecord>,
}

/// Reads every sheet the layout contract names. The reclassification
/// sheet is the only optional one; exports without it are common.
pub fn read_workbook(ctx: &Context) -> Result<WorkbookData, CliError> {
    let policy = ctx.settings.cell_policy;
    let prov = ctx.provenance()?;
    let mut wb = ctx.open_workbook()?;
    let names = wb.sheet_names();

    let resumen_sheet = wb.table(layout::resumen::SHEET)?;
    let resumen_rows = resumen::budget_rows(&resumen_sheet, policy)?;
    let resumen_flat = resumen::flat_rows(&resumen_sheet, policy)?;
    let resumen_records = resumen::records(&resumen_rows, &prov);

    let ppto_sheet = wb.table(layout::ppto::SHEET)?;
    let ppto_rows = ppto::cost_center_rows(&ppto_sheet, policy)?;
    let ppto_grand_total = ppto::grand_total(&ppto_sheet, policy)?;
    let ppto_records = ppto::records(&ppto_rows, &prov);

    let data_sheet = wb.table(layout::data::SHEET)?;
    for header in transacciones::missing_headers(&data_sheet)? {
        eprintln!(
            "note: {}: header {header:?} not found, its field will be empty",
            layout::data::SHEET
        );
    }
    let data_total = transacciones::total_value(&data_sheet, policy)?;
    let transacciones_records = transacciones::records(&data_sheet, &prov, policy, None)?;

    let (reclasificaciones, reclas_total) =
        if names.iter().any(|n| n == layout::data::RECLASIFICACION_SHEET) {
            let sheet = wb.table(layout::data::RECLASIFICACION_SHEET)?;
            for header in transacciones::missing_headers(&sheet)? {
                eprintln!(
                    "note: {}: header {header:?} not found, its field will be empty",
                    layout::data::RECLASIFICACION_SHEET
                );
            }
            (
                transacciones::records(&sheet, &prov, policy, Some("reclasificacion"))?,
                Some(transacciones::total_value(&sheet, policy)?),
            )
        } else {
            (Vec::new(), None)
        };

    let cuentas_sheet = wb.table(layout::cuentas::SHEET)?;
    let cuentas_records = cuentas::records(&cuentas_sheet, &prov, policy)?;

    Ok(WorkbookData {
        prov,
        resumen_rows,
        resumen_flat,
        ppto_rows,
        ppto_grand_total,
        data_total,
        reclas_total,
        resumen: resumen_records,
        ppto: ppto_records,
        transacciones: transacciones_records,
        reclasificaciones,
        cuentas: cuentas_records,
    })
}
