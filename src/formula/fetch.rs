use crate::error::Result;
use crate::process::CommandRunner;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Download and checksum collaborator
pub trait Fetcher: Send + Sync {
    /// Fetch `url` into the file at `dest`
    fn download(&self, url: &str, dest: &Path) -> Result<()>;

    /// Lower-case hex SHA-256 of a file
    fn digest(&self, path: &Path) -> Result<String> {
        sha256_file(path)
    }
}

/// Streamed SHA-256 of a file's contents
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Downloads with `curl`, failing on HTTP errors and following redirects
pub struct CurlFetcher {
    runner: CommandRunner,
}

impl CurlFetcher {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        CurlFetcher {
            runner: CommandRunner::new("curl", working_dir),
        }
    }
}

impl Fetcher for CurlFetcher {
    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let dest = dest.to_string_lossy();
        self.runner.run(&["-fsSL", "-o", dest.as_ref(), url])?;
        Ok(())
    }
}
