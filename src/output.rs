//! Result rendering for the console and result files.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use zeroize::Zeroizing;

use crate::crypto::{Address, Keypair};
use crate::error::{Error, Result};

/// Renders a found keypair as the two result lines.
pub fn render(keypair: &Keypair) -> Zeroizing<String> {
    Zeroizing::new(format!(
        "address: {}\nprivate key hex: {}\n",
        keypair.address().to_checksum(),
        keypair.private_key_hex().as_str()
    ))
}

/// Renders the verify output line.
pub fn render_address(address: &Address) -> String {
    format!("address: {}\n", address.to_checksum())
}

/// Writes the result to `path`, or to stdout when no path is given.
pub fn write_result(keypair: &Keypair, path: Option<&Path>) -> Result<()> {
    let text = render(keypair);
    match path {
        Some(path) => write_file(path, text.as_bytes()).map_err(|source| Error::Output {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = create_private(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

/// Creates or truncates a file readable only by the owner.
#[cfg(unix)]
fn create_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
