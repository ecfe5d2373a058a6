use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Zámek patří k výstupu: `<outfile>.lock` vedle něj.
/// Běhy s různými výstupy se navzájem neblokují.
pub fn lock_path(outfile: &Path) -> PathBuf {
    let mut name: OsString = outfile.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".lock");
    outfile.with_file_name(name)
}

/// `None` = lock soubor nejde vytvořit, běh pokračuje bez zámku.
/// O tom, jestli se výstup zapíše, rozhoduje až samotný zápis.
pub fn open(outfile: &Path) -> Option<fd_lock::RwLock<File>> {
    let path = lock_path(outfile);
    match File::create(&path) {
        Ok(f) => Some(fd_lock::RwLock::new(f)),
        Err(e) => {
            warn!("Failed to create lock file at {:?}: {} (continuing without lock)", path, e);
            None
        }
    }
}
