use crate::io::{self, LoadFilters};
use crate::model::Roster;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge le modèle d'entrée depuis un support.
    fn load(&self, filters: &LoadFilters) -> anyhow::Result<Roster>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            anyhow::bail!("input file not found: {}", path.display());
        }
        Ok(Self { path })
    }
}

impl Storage for JsonStorage {
    fn load(&self, filters: &LoadFilters) -> anyhow::Result<Roster> {
        io::load_roster_json(&self.path, filters)
    }
}

/// Écrit un fichier de manière atomique (fichier temporaire + rename).
pub fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}
