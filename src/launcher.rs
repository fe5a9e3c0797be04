// src/launcher.rs

use log::info;
use std::{io, path::Path};

/// Hands a picked file to something that can show it to the user.
pub trait Opener {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Opens the file with the system's default application and returns
/// without waiting for it.
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        open::that_detached(path)?;
        info!(
            "Asked the system to open '{}' with its default application.",
            path.display()
        );
        Ok(())
    }
}

/// Opens nothing. Used with `--no-open`.
pub struct DryRunOpener;

impl Opener for DryRunOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        info!("Not opening '{}' (--no-open).", path.display());
        Ok(())
    }
}
