//! JSON helpers for files in ~/.pippin/.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.pippin/ directory path, creating it if needed.
pub fn pippin_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".pippin");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.pippin/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(pippin_dir()?.join(filename))
}

/// Load a JSON file from ~/.pippin/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    let path = match data_path(filename) {
        Ok(p) => p,
        Err(_) => return T::default(),
    };
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring invalid {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to ~/.pippin/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = data_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
