use std::fs::File;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::{info, info_span};

use ross_codec::write_records;
use ross_ingest::{read_movements_file, read_text_file};
use ross_model::{CATALOG, Record};
use ross_output::{
    XmlOptions, facility_code_from_file_name, group_movements, movements_xml, sha256_hex,
};
use ross_validate::{Selection, ValidatedFile, validate_file};

use crate::cli::{ExportArgs, ImportXmlArgs, InputArgs, ValidateArgs, XmlArgs};
use crate::summary::{align_column, apply_table_style, header_cell};
use crate::types::{ExportResult, ImportResult, XmlResult};

/// Read and validate the input file.
pub fn load_and_validate(input: &InputArgs) -> Result<ValidatedFile> {
    let start = Instant::now();
    let text = read_text_file(&input.file)
        .with_context(|| format!("read {}", input.file.display()))?;
    let validated = validate_file(&text, &input.validation_options(), input.parse_options());
    info!(
        records = validated.records.len(),
        accepted = validated.report.metrics.accepted_records,
        duration_ms = start.elapsed().as_millis(),
        "input validated"
    );
    Ok(validated)
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidatedFile> {
    let span = info_span!("validate", file = %args.input.file.display());
    let _guard = span.enter();
    load_and_validate(&args.input)
}

pub fn run_export(args: &ExportArgs) -> Result<ExportResult> {
    let span = info_span!("export", file = %args.input.file.display());
    let _guard = span.enter();

    let validated = load_and_validate(&args.input)?;
    let selection = Selection::from(args.select);
    let selected = validated.select(selection);
    let written = write_records(create(&args.output)?, selected)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(written, output = %args.output.display(), "records exported");

    Ok(ExportResult {
        output: args.output.clone(),
        selection,
        written,
        total: validated.records.len(),
    })
}

pub fn run_xml(args: &XmlArgs) -> Result<XmlResult> {
    let span = info_span!("xml", file = %args.input.file.display());
    let _guard = span.enter();

    let validated = load_and_validate(&args.input)?;
    let accepted: Vec<Record> = validated.accepted().into_iter().cloned().collect();

    let facility_code = args.facility_code.clone().unwrap_or_else(|| {
        let name = args
            .input
            .file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        facility_code_from_file_name(name)
    });
    let mut options = XmlOptions::default().with_facility_code(facility_code.clone());
    if let Some(product) = &args.product {
        options = options.with_product(product.clone());
    }

    let start = Instant::now();
    let xml = movements_xml(&accepted, &options).context("generate movement XML")?;
    std::fs::write(&args.output, &xml)
        .with_context(|| format!("write {}", args.output.display()))?;
    let digest = sha256_hex(&xml);
    info!(
        records = accepted.len(),
        duration_ms = start.elapsed().as_millis(),
        %digest,
        "movement XML generated"
    );

    Ok(XmlResult {
        output: args.output.clone(),
        facility_code,
        records: accepted.len(),
        skipped: validated.report.metrics.rejected_records,
        movements: group_movements(&accepted).len(),
        digest,
    })
}

pub fn run_import_xml(args: &ImportXmlArgs) -> Result<ImportResult> {
    let span = info_span!("import_xml", file = %args.file.display());
    let _guard = span.enter();

    let records = read_movements_file(&args.file)
        .with_context(|| format!("import {}", args.file.display()))?;
    let written = write_records(create(&args.output)?, &records)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(written, output = %args.output.display(), "movement XML imported");

    Ok(ImportResult {
        output: args.output.clone(),
        records: written,
    })
}

/// The field layout as a table.
pub fn fields_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Name"),
        header_cell("Width"),
        header_cell("Start"),
        header_cell("End"),
        header_cell("Kind"),
        header_cell("Requiredness"),
    ]);
    apply_table_style(&mut table);
    for index in [0, 2, 3, 4] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for descriptor in &CATALOG {
        let span = descriptor.id.span();
        let requiredness = if descriptor.must_be_blank {
            "filler".to_string()
        } else {
            descriptor.requiredness.to_string()
        };
        table.add_row(vec![
            Cell::new(descriptor.id.order()),
            Cell::new(descriptor.name),
            Cell::new(descriptor.width),
            Cell::new(span.start + 1),
            Cell::new(span.end),
            Cell::new(descriptor.kind),
            Cell::new(requiredness),
        ]);
    }
    table
}

pub fn run_fields() -> Result<()> {
    println!("{}", fields_table());
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("create {}", path.display()))
}
