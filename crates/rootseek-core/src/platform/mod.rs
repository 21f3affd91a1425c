/// Platform-specific functionality — discovery of local filesystem roots.
use std::path::PathBuf;

/// Every local filesystem root a whole-machine search should start from.
///
/// On Windows this is every drive letter that currently resolves
/// (`C:\`, `D:\`, ...). Elsewhere the single `/` root covers everything.
#[cfg(windows)]
pub fn local_roots() -> Vec<PathBuf> {
    let roots: Vec<PathBuf> = (b'A'..=b'Z')
        .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
        .filter(|root| root.exists())
        .collect();

    if roots.is_empty() {
        tracing::warn!("No drive letters resolved; falling back to C:\\");
        return vec![PathBuf::from("C:\\")];
    }
    roots
}

/// Every local filesystem root a whole-machine search should start from.
///
/// On Windows this is every drive letter that currently resolves
/// (`C:\`, `D:\`, ...). Elsewhere the single `/` root covers everything.
#[cfg(not(windows))]
pub fn local_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("/")]
}
