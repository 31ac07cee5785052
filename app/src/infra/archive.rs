//! Upload archive for configuration versions.
//!
//! A gzip-compressed tar holding exactly one regular file, `main.tf`.

use std::io::{self, Write as _};

use chrono::Utc;
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::domain::ValidatedConfig;

/// Name of the single file inside the archive.
pub const CONFIG_FILE_NAME: &str = "main.tf";

const CONFIG_FILE_MODE: u32 = 0o644;

/// Pack validated configuration text into a tar.gz archive.
///
/// # Errors
///
/// Returns an error if writing to the in-memory encoder fails.
pub fn pack_configuration(config: &ValidatedConfig) -> io::Result<Vec<u8>> {
    let contents = config.as_str().as_bytes();

    let mut header = tar::Header::new_gnu();
    header.set_path(CONFIG_FILE_NAME)?;
    header.set_entry_type(tar::EntryType::Regular);
    header.set_mode(CONFIG_FILE_MODE);
    header.set_size(contents.len() as u64);
    header.set_mtime(u64::try_from(Utc::now().timestamp()).unwrap_or(0));
    header.set_cksum();

    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.append(&header, contents)?;
    let mut encoder = builder.into_inner()?;
    encoder.flush()?;
    encoder.finish()
}
