use super::TableDump;
use crate::error::NlsqlError;

/// Renders a header line followed by one line per row. Quoting follows RFC 4180.
pub fn render_csv(dump: &TableDump) -> Result<Vec<u8>, NlsqlError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&dump.columns)?;
    for row in &dump.rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|err| NlsqlError::IoError(err.into_error()))
}
