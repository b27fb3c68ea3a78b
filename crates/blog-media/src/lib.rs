//! # blog-media
//!
//! Image attachment storage. Converts uploaded binary blobs into stored PNG
//! files under per-entity-type directories, generates collision-free random
//! filenames, resizes avatars to a fixed dimension, and removes files when an
//! attachment is replaced or its owning record is deleted.
//!
//! Decoding happens before anything touches the file system, so a non-image
//! payload never leaves a partial file behind. For replacement the workers
//! follow the crash-safe ordering: write the new file, update the owning row,
//! then delete the old file. A crash in between leaves at worst an orphaned
//! file, never a row pointing at a missing file.

mod store;

pub use store::{ImageKind, ImageStore, AVATAR_DIMENSION, FILENAME_LEN};
