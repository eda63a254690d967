//! CSV bulk-ingest parsing
//!
//! Uploads are headerless CSV with positional columns. The whole file
//! is parsed before anything is written; one malformed row rejects the
//! entire request.

use serde::de::DeserializeOwned;

use crate::{Error, Result};

pub fn parse_rows<T: DeserializeOwned>(data: &[u8]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: T =
            record.map_err(|e| Error::InvalidArgument(format!("malformed csv row: {e}")))?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(Error::InvalidArgument("empty csv upload".to_string()));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewChair, NewEstate};

    const CHAIR_ROW: &str =
        "1,Aeron,mesh chair,thumb.png,15000,100,60,60,black,reclining,office,50,10";

    #[test]
    fn chair_rows_parse_in_column_order() {
        let rows: Vec<NewChair> = parse_rows(CHAIR_ROW.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].name, "Aeron");
        assert_eq!(rows[0].price, 15000);
        assert_eq!(rows[0].kind, "office");
        assert_eq!(rows[0].stock, 10);
    }

    #[test]
    fn estate_rows_parse_in_column_order() {
        let row = "7,Sun Heights,bright,thumb.png,1-2-3 Chuo,35.6,139.7,80000,200,90,parking,42";
        let rows: Vec<NewEstate> = parse_rows(row.as_bytes()).unwrap();
        assert_eq!(rows[0].id, 7);
        assert_eq!(rows[0].address, "1-2-3 Chuo");
        assert_eq!(rows[0].latitude, 35.6);
        assert_eq!(rows[0].door_width, 90);
        assert_eq!(rows[0].popularity, 42);
    }

    #[test]
    fn malformed_row_rejects_whole_upload() {
        let data = format!("{CHAIR_ROW}\n2,broken,row");
        let result: Result<Vec<NewChair>> = parse_rows(data.as_bytes());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn non_numeric_field_rejected() {
        let data = CHAIR_ROW.replace("15000", "cheap");
        let result: Result<Vec<NewChair>> = parse_rows(data.as_bytes());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn empty_upload_rejected() {
        let result: Result<Vec<NewChair>> = parse_rows(b"");
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
