//! Replay file storage with Zstd compression.
//!
//! Replays are stored as compressed binary files in `{dir}/{hash}.r`.
//! Data is serialized with `bincode` before compression to minimize size.

use crate::models::replay::ReplayData;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zstd::stream::{decode_all, encode_all};

/// Default directory for replay files.
pub const REPLAY_DIR: &str = "data/r";

/// Get the path for a replay file given its hash.
pub fn replay_path(dir: &Path, hash: &str) -> PathBuf {
    dir.join(format!("{}.r", hash))
}

/// Save replay data to a compressed binary file.
/// Returns the path to the file.
pub fn save_replay(dir: &Path, hash: &str, data: &ReplayData) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = replay_path(dir, hash);
    let mut file = File::create(&path)?;

    let binary_data =
        bincode::serde::encode_to_vec(data, bincode::config::standard()).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )
        })?;

    let compressed_data = encode_all(&binary_data[..], 21)?;
    file.write_all(&compressed_data)?;

    log::info!(
        "REPLAY: saved {} ({} inputs, mods {:#x})",
        path.display(),
        data.inputs.len(),
        data.legacy_mods.bits()
    );
    Ok(path)
}

/// Load and decompress replay data from file.
pub fn load_replay(dir: &Path, hash: &str) -> std::io::Result<ReplayData> {
    load_replay_from_path(&replay_path(dir, hash))
}

/// Load replay data from a specific path.
///
/// The header is validated, so a replay whose variant or inputs do not
/// describe a real layout is reported as `InvalidData`.
pub fn load_replay_from_path(path: &Path) -> std::io::Result<ReplayData> {
    let file = File::open(path)?;
    let binary_data = decode_all(file)?;

    let (data, _len): (ReplayData, usize) =
        bincode::serde::decode_from_slice(&binary_data, bincode::config::standard()).map_err(
            |e| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Deserialization error: {}", e),
                )
            },
        )?;

    data.validate()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    Ok(data)
}

/// Delete a replay file.
pub fn delete_replay(dir: &Path, hash: &str) -> std::io::Result<()> {
    let path = replay_path(dir, hash);
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Check if a replay file exists.
pub fn replay_exists(dir: &Path, hash: &str) -> bool {
    replay_path(dir, hash).exists()
}
