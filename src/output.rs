use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use csv::{ReaderBuilder, WriterBuilder};
use tokio::{fs::File, io::AsyncWriteExt};

use crate::model::HEADER;
use crate::{info_time, Error, ProductRecord, Result};

const DELIMITER: u8 = b';';
const BOM: &str = "\u{feff}";

/// `"<query> <YYYY-MM-DD>.csv"`, path separators in the query are replaced with `_`.
pub fn output_file_name(query: &str, date: NaiveDate) -> String {
    let query = query.replace(['/', '\\'], "_");
    format!("{query} {}.csv", date.format("%Y-%m-%d"))
}

/// Writes the products to `dir` as a BOM prefixed, `;` separated csv with a header row.
/// Returns the path of the written file. An empty collection writes nothing.
pub async fn write_products(
    records: &[ProductRecord],
    query: &str,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf> {
    if records.is_empty() {
        return Err(Error::EmptyResult);
    }
    let local_now = Local::now();

    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_writer(BOM.as_bytes().to_vec());
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;

    let path = dir.join(output_file_name(query, date));
    let mut file = File::create(&path).await?;
    file.write_all(&bytes).await?;
    file.flush().await?;
    info_time!(
        local_now,
        "Wrote {} products to file: {}",
        records.len(),
        path.display()
    );

    Ok(path)
}

/// Reads back a file written by [`write_products`].
pub async fn read_products(path: &Path) -> Result<Vec<ProductRecord>> {
    let bytes = tokio::fs::read(path).await?;
    let bytes = bytes.strip_prefix(BOM.as_bytes()).unwrap_or(&bytes);

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .from_reader(bytes);
    let records = reader
        .deserialize()
        .collect::<core::result::Result<Vec<ProductRecord>, _>>()?;
    Ok(records)
}
