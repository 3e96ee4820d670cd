//! Streaming checksums for staged and packaged files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use coursechef_shared::{ChefError, Result};

/// Compute the SHA-256 of a file, reading in 8 KiB chunks.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| ChefError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let read = file.read(&mut buffer).map_err(|e| ChefError::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_content_hashes() {
        let path = std::env::temp_dir().join(format!(
            "chef-checksum-test-{}.txt",
            uuid::Uuid::now_v7()
        ));
        std::fs::write(&path, "hello world").unwrap();

        let hash = sha256_file(&path).unwrap();
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = sha256_file(Path::new("/nonexistent/file.zip")).unwrap_err();
        assert!(matches!(err, ChefError::Io { .. }));
    }
}
