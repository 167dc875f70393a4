use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, Date32Builder, Float64Builder, StringBuilder, UInt64Builder},
    csv::WriterBuilder,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use chrono::Datelike;
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{fs::File, path::Path, sync::Arc};
use tracing::info;

use crate::load::columns::COLUMNS;
use crate::model::PlantingRecord;

/// Download name offered by the dashboard.
pub const EXPORT_FILE_NAME: &str = "filtered_tree_planting.csv";
pub const CSV_MEDIA_TYPE: &str = "text/csv";

// 1970-01-01 counted from 0001-01-01
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Arrow schema of the exported table: the eight source columns, in source order.
pub fn export_schema() -> Schema {
    let ty = |i: usize| match i {
        1 => DataType::Date32,
        2 => DataType::UInt64,
        0 | 3 => DataType::Utf8,
        _ => DataType::Float64,
    };
    let nullable = |i: usize| !matches!(i, 0 | 3 | 4 | 5);
    Schema::new(
        COLUMNS
            .iter()
            .enumerate()
            .map(|(i, name)| Field::new(*name, ty(i), nullable(i)))
            .collect::<Vec<_>>(),
    )
}

/// Columnar copy of the retained set.
pub fn to_record_batch(records: &[&PlantingRecord]) -> Result<RecordBatch> {
    let n = records.len();
    let mut gps = StringBuilder::new();
    let mut date = Date32Builder::with_capacity(n);
    let mut seedlings = UInt64Builder::with_capacity(n);
    let mut month_year = StringBuilder::new();
    let mut lat = Float64Builder::with_capacity(n);
    let mut lon = Float64Builder::with_capacity(n);
    let mut temperature = Float64Builder::with_capacity(n);
    let mut rainfall = Float64Builder::with_capacity(n);

    for r in records {
        gps.append_value(&r.gps_raw);
        date.append_option(
            r.planting_date
                .map(|d| d.num_days_from_ce() - EPOCH_DAYS_FROM_CE),
        );
        seedlings.append_option(r.seedlings_planted);
        month_year.append_value(&r.month_year);
        lat.append_value(r.latitude);
        lon.append_value(r.longitude);
        temperature.append_option(r.temperature);
        rainfall.append_option(r.rainfall);
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(gps.finish()),
        Arc::new(date.finish()),
        Arc::new(seedlings.finish()),
        Arc::new(month_year.finish()),
        Arc::new(lat.finish()),
        Arc::new(lon.finish()),
        Arc::new(temperature.finish()),
        Arc::new(rainfall.finish()),
    ];
    RecordBatch::try_new(Arc::new(export_schema()), columns).context("building export batch")
}

/// CSV with a header row; absent values are empty fields.
pub fn to_csv_bytes(records: &[&PlantingRecord]) -> Result<Vec<u8>> {
    let batch = to_record_batch(records)?;
    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .with_header(true)
            .with_date_format("%Y-%m-%d".to_string())
            .build(&mut buf);
        writer.write(&batch).context("writing csv export")?;
    }
    Ok(buf)
}

pub fn write_csv(records: &[&PlantingRecord], path: &Path) -> Result<()> {
    let bytes = to_csv_bytes(records)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), rows = records.len(), "wrote csv export");
    Ok(())
}

/// Same table as the CSV export, as a Snappy-compressed Parquet file.
pub fn write_parquet(records: &[&PlantingRecord], path: &Path) -> Result<()> {
    let batch = to_record_batch(records)?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .context("creating Arrow writer for export")?;
    writer.write(&batch).context("writing export batch")?;
    writer.close().context("closing export writer")?;
    info!(path = %path.display(), rows = records.len(), "wrote parquet export");
    Ok(())
}
