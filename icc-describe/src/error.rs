// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use {std::path::PathBuf, thiserror::Error};

/// Errors that can occur when updating ICC profile descriptions.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("error reading {0}: {1}")]
    UnreadableFile(PathBuf, std::io::Error),

    #[error("error writing {0}: {1}")]
    UnwritableFile(PathBuf, std::io::Error),

    #[error("invalid ICC profile header")]
    InvalidHeader,

    #[error("no desc tag found, cannot update")]
    TagNotFound,

    #[error("desc tag of {0} bytes cannot hold a description")]
    PayloadTooLarge(u32),

    #[error("desc tag at offset {offset} with length {length} exceeds profile size {size}")]
    TagOutOfBounds { offset: u32, length: u32, size: usize },

    #[error("directory {0} does not exist")]
    DirectoryNotFound(PathBuf),

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("error accessing directory {0}: {1}")]
    DirectoryUnreadable(PathBuf, std::io::Error),

    #[error("error opening log file {0}: {1}")]
    LogFile(PathBuf, std::io::Error),

    #[error("error scanning directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type for this crate.
pub type ProfileResult<T> = Result<T, ProfileError>;
