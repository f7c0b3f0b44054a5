use crate::domain::ports::ContentComparator;
use crate::utils::error::{DiffError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Strategy {
    #[default]
    Byte,
    Sha256,
}

impl Strategy {
    pub fn build(self) -> Box<dyn ContentComparator> {
        match self {
            Strategy::Byte => Box::new(ByteComparator),
            Strategy::Sha256 => Box::new(HashComparator::new()),
        }
    }
}

fn file_len(path: &Path) -> Result<u64> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| DiffError::io(path, e))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| DiffError::io(path, e))?;
    Ok(BufReader::with_capacity(CHUNK_SIZE, file))
}

/// 盡量填滿 buffer，回傳實際讀到的位元組數 (0 表示 EOF)
fn read_chunk(reader: &mut impl Read, buf: &mut [u8], path: &Path) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(DiffError::io(path, e)),
        }
    }
    Ok(filled)
}

/// 逐塊比對位元組，先比大小
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteComparator;

impl ContentComparator for ByteComparator {
    fn name(&self) -> &'static str {
        "byte"
    }

    fn equal(&self, a: &Path, b: &Path) -> Result<bool> {
        if file_len(a)? != file_len(b)? {
            return Ok(false);
        }

        let mut reader_a = open(a)?;
        let mut reader_b = open(b)?;
        let mut buf_a = vec![0u8; CHUNK_SIZE];
        let mut buf_b = vec![0u8; CHUNK_SIZE];

        loop {
            let n_a = read_chunk(&mut reader_a, &mut buf_a, a)?;
            let n_b = read_chunk(&mut reader_b, &mut buf_b, b)?;

            // 檔案在比對途中被改動時長度可能不同
            if n_a != n_b || buf_a[..n_a] != buf_b[..n_b] {
                return Ok(false);
            }
            if n_a == 0 {
                return Ok(true);
            }
        }
    }
}

/// SHA-256 摘要比對；同一次執行中每個檔案只雜湊一次
#[derive(Debug, Default)]
pub struct HashComparator {
    digests: RefCell<HashMap<PathBuf, [u8; 32]>>,
}

impl HashComparator {
    pub fn new() -> Self {
        Self::default()
    }

    fn digest(&self, path: &Path) -> Result<[u8; 32]> {
        if let Some(digest) = self.digests.borrow().get(path) {
            return Ok(*digest);
        }

        let mut reader = open(path)?;
        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = read_chunk(&mut reader, &mut buf, path)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hasher.finalize());
        self.digests.borrow_mut().insert(path.to_path_buf(), digest);
        Ok(digest)
    }
}

impl ContentComparator for HashComparator {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn equal(&self, a: &Path, b: &Path) -> Result<bool> {
        if file_len(a)? != file_len(b)? {
            return Ok(false);
        }
        Ok(self.digest(a)? == self.digest(b)?)
    }
}

/// 所有副本兩兩相同才回傳 true；0 或 1 個副本視為相同
pub fn all_identical<C>(comparator: &C, copies: &[PathBuf]) -> Result<bool>
where
    C: ContentComparator + ?Sized,
{
    for (i, first) in copies.iter().enumerate() {
        for second in &copies[i + 1..] {
            if !comparator.equal(first, second)? {
                tracing::debug!(
                    "{} differs from {} ({})",
                    first.display(),
                    second.display(),
                    comparator.name()
                );
                return Ok(false);
            }
        }
    }
    Ok(true)
}
