//! Raw byte access for tabular sources: local files or HTTP(S) URLs,
//! optionally gzip-compressed.

use flate2::read::GzDecoder;
use std::io::Read;
use tracing::debug;

use crate::error::DataSourceError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads source data from a local file path or fetches it over HTTP.
///
/// Gzip content is detected by its magic bytes and decompressed, so
/// `hour.csv.gz` and `hour.csv` are interchangeable.
#[tracing::instrument(fields(source = %location))]
pub fn read_source(location: &str) -> Result<Vec<u8>, DataSourceError> {
    let bytes = if location.starts_with("http://") || location.starts_with("https://") {
        fetch_bytes(location)?
    } else {
        std::fs::read(location)?
    };
    debug!(bytes = bytes.len(), "Source bytes read");

    maybe_decompress(bytes)
}

/// Performs a blocking GET and returns the body. Non-2xx responses are errors.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>, DataSourceError> {
    let resp = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

fn maybe_decompress(bytes: Vec<u8>) -> Result<Vec<u8>, DataSourceError> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }

    let mut out = Vec::new();
    GzDecoder::new(bytes.as_slice())
        .read_to_end(&mut out)
        .map_err(DataSourceError::Decompress)?;
    debug!(decompressed = out.len(), "Gzip source decompressed");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::env;
    use std::fs;
    use std::io::Write;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_read_plain_file() {
        let path = temp_path("bike_dashboard_source_plain.csv");
        fs::write(&path, "dteday,cnt\n2011-01-01,985\n").unwrap();

        let bytes = read_source(&path).unwrap();
        assert_eq!(bytes, b"dteday,cnt\n2011-01-01,985\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_gzip_file() {
        let path = temp_path("bike_dashboard_source_gz.csv.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"dteday,cnt\n2011-01-02,801\n").unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let bytes = read_source(&path).unwrap();
        assert_eq!(bytes, b"dteday,cnt\n2011-01-02,801\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_source(&temp_path("bike_dashboard_does_not_exist.csv")).unwrap_err();
        assert!(matches!(err, DataSourceError::Io(_)));
    }

    #[test]
    fn test_corrupt_gzip_fails() {
        let err = maybe_decompress(vec![0x1f, 0x8b, 0x00, 0x01]).unwrap_err();
        assert!(matches!(err, DataSourceError::Decompress(_)));
    }
}
