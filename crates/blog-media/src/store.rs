//! Image store - file lifecycle for entity attachments

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{imageops::FilterType, ImageFormat};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{debug, instrument};

use blog_core::{DomainError, DomainResult};

/// Length of the random part of a stored filename
pub const FILENAME_LEN: usize = 64;

/// Avatars are resized to this square dimension before writing
pub const AVATAR_DIMENSION: u32 = 256;

/// Which attachment slot an image belongs to. Each kind stores its files in
/// its own subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// User avatar, resized to `AVATAR_DIMENSION` on store
    Avatar,
    /// Article image, stored at original resolution
    Article,
    /// Comment image, stored at original resolution
    Comment,
}

impl ImageKind {
    /// Subdirectory name under the store root
    pub fn dir(self) -> &'static str {
        match self {
            Self::Avatar => "avatars",
            Self::Article => "articles",
            Self::Comment => "comments",
        }
    }

    /// Target dimensions applied before writing, if any
    fn resize_to(self) -> Option<(u32, u32)> {
        match self {
            Self::Avatar => Some((AVATAR_DIMENSION, AVATAR_DIMENSION)),
            Self::Article | Self::Comment => None,
        }
    }
}

/// File-backed image store rooted at a configured upload directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `root`. Directories are created lazily on the
    /// first store into each kind.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute path of a stored file
    pub fn path_of(&self, kind: ImageKind, filename: &str) -> PathBuf {
        self.root.join(kind.dir()).join(filename)
    }

    /// Decode `bytes`, resize if the kind prescribes it, and write the result
    /// under a fresh random filename. Returns the stored filename.
    ///
    /// A payload that does not decode as an image fails with
    /// `IncorrectImage` before any file is written.
    #[instrument(skip(self, bytes), fields(kind = ?kind, len = bytes.len()))]
    pub fn store(&self, bytes: &[u8], kind: ImageKind) -> DomainResult<String> {
        let mut img =
            image::load_from_memory(bytes).map_err(|_| DomainError::IncorrectImage)?;

        if let Some((w, h)) = kind.resize_to() {
            img = img.resize_exact(w, h, FilterType::Lanczos3);
        }

        let mut encoded = Vec::new();
        img.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
            .map_err(|e| DomainError::InternalError(format!("image encode failed: {e}")))?;

        let dir = self.root.join(kind.dir());
        std::fs::create_dir_all(&dir).map_err(|e| DomainError::IoError(e.to_string()))?;

        let filename = free_filename(&dir);
        std::fs::write(dir.join(&filename), &encoded)
            .map_err(|e| DomainError::IoError(e.to_string()))?;

        debug!(filename = %filename, "image stored");
        Ok(filename)
    }

    /// Remove a stored file. A missing file is an I/O error: the callers only
    /// ever delete filenames their rows still reference.
    #[instrument(skip(self))]
    pub fn delete(&self, kind: ImageKind, filename: &str) -> DomainResult<()> {
        std::fs::remove_file(self.path_of(kind, filename))
            .map_err(|e| DomainError::IoError(e.to_string()))?;
        debug!(filename = %filename, "image deleted");
        Ok(())
    }

    /// Check whether a stored file exists
    pub fn exists(&self, kind: ImageKind, filename: &str) -> bool {
        self.path_of(kind, filename).exists()
    }
}

/// Generate a filename that is free in `dir`: a fixed-length random
/// alphanumeric string with a `.png` extension, regenerated on collision.
/// Collisions are astronomically rare but handled rather than assumed away.
fn free_filename(dir: &Path) -> String {
    loop {
        let stem: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(FILENAME_LEN)
            .map(char::from)
            .collect();
        let filename = format!("{stem}.png");
        if !dir.join(&filename).exists() {
            return filename;
        }
    }
}
