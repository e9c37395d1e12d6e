// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Rewriting descriptions of profiles on disk.

A profile's new description is its filename without the extension. Profiles
are read fully into memory, patched, and written back in place. A profile is
either rewritten completely or left untouched.
*/

use {
    crate::{
        description::{patch_description, PatchedProfile},
        error::{ProfileError, ProfileResult},
        header::validate_header,
        reporter::Reporter,
    },
    std::path::{Path, PathBuf},
};

/// Filename extensions of ICC profiles.
pub const ICC_EXTENSION: &str = ".icc";
pub const ICM_EXTENSION: &str = ".icm";

/// Filenames containing this are macOS resource forks, not profiles.
pub const RESOURCE_FORK_MARKER: &str = "._";

const BANNER: &str = "============================================================";

/// The description a profile at a given path should carry.
pub fn description_for_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Rewrite the description of the profile at `path`.
///
/// Nothing is written unless the profile is valid and patching succeeds.
pub fn update_profile_file(path: &Path, description: &str) -> ProfileResult<PatchedProfile> {
    let data =
        std::fs::read(path).map_err(|e| ProfileError::UnreadableFile(path.to_path_buf(), e))?;

    if !validate_header(&data) {
        return Err(ProfileError::InvalidHeader);
    }

    let patched = patch_description(&data, description)?;

    std::fs::write(path, &patched.data)
        .map_err(|e| ProfileError::UnwritableFile(path.to_path_buf(), e))?;

    Ok(patched)
}

/// Resolve a directory to operate on to an absolute, canonical path.
pub fn resolve_directory(directory: &Path) -> ProfileResult<PathBuf> {
    let resolved = std::fs::canonicalize(directory).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProfileError::DirectoryNotFound(directory.to_path_buf())
        } else {
            ProfileError::DirectoryUnreadable(directory.to_path_buf(), e)
        }
    })?;

    if resolved.is_dir() {
        Ok(resolved)
    } else {
        Err(ProfileError::NotADirectory(directory.to_path_buf()))
    }
}

/// Profile files found in a directory tree.
#[derive(Clone, Debug, Default)]
pub struct ProfileScan {
    /// Paths to profiles, sorted.
    pub paths: Vec<PathBuf>,

    /// Number of `.icc` files.
    pub icc_count: usize,

    /// Number of `.icm` files.
    pub icm_count: usize,
}

/// Find profile files under a directory, recursively.
///
/// Files ending in `.icc` or `.icm` (case-sensitive) are profiles, unless
/// their name marks them as a macOS resource fork.
pub fn scan_profiles(root: &Path) -> ProfileResult<ProfileScan> {
    let mut scan = ProfileScan::default();

    for entry in walkdir::WalkDir::new(root) {
        let entry = entry?;

        if !entry.path().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();

        if name.contains(RESOURCE_FORK_MARKER) {
            continue;
        }

        if name.ends_with(ICC_EXTENSION) {
            scan.icc_count += 1;
        } else if name.ends_with(ICM_EXTENSION) {
            scan.icm_count += 1;
        } else {
            continue;
        }

        scan.paths.push(entry.into_path());
    }

    scan.paths.sort();

    Ok(scan)
}

/// Outcome of updating a batch of profiles.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProcessSummary {
    /// Number of profiles an update was attempted on.
    pub processed: usize,

    /// Number of profiles updated.
    pub successful: usize,
}

impl ProcessSummary {
    /// Number of profiles that could not be updated.
    pub fn failed(&self) -> usize {
        self.processed - self.successful
    }

    /// Whether every profile was updated.
    pub fn is_success(&self) -> bool {
        self.successful == self.processed
    }
}

/// Updates profile descriptions, reporting progress to a [Reporter].
pub struct ProfileUpdater<'a> {
    reporter: &'a dyn Reporter,
}

impl<'a> ProfileUpdater<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self { reporter }
    }

    /// Update the description of a single profile to match its filename.
    pub fn process_profile(&self, path: &Path) -> ProfileResult<PatchedProfile> {
        let description = description_for_path(path);

        match update_profile_file(path, &description) {
            Ok(patched) => {
                if let Some(previous) = &patched.previous_description {
                    self.reporter.debug(&format!(
                        "  {}: replaced description \"{}\"",
                        path.display(),
                        previous
                    ));
                }

                if patched.overflowed {
                    self.reporter.warn(&format!(
                        "  Warning: description of {} too long, truncating to \"{}\"",
                        path.display(),
                        patched.description
                    ));
                }

                self.reporter.info(&format!(
                    "  ✓ Updated: {}",
                    path.file_name()
                        .map(|name| name.to_string_lossy())
                        .unwrap_or_default()
                ));

                Ok(patched)
            }
            Err(e) => {
                self.reporter.error(&format!("  Error: {}: {}", path.display(), e));

                Err(e)
            }
        }
    }

    /// Update every profile under a directory.
    ///
    /// Failures on individual profiles are reported and counted but do not
    /// stop the batch. An error is only returned if the directory can't be
    /// scanned, in which case no profiles are touched.
    pub fn process_directory(&self, directory: &Path) -> ProfileResult<ProcessSummary> {
        if !directory.is_dir() {
            return Err(ProfileError::DirectoryNotFound(directory.to_path_buf()));
        }

        self.reporter.info(BANNER);
        self.reporter.info("Starting ICC Profile Description Update");
        self.reporter.info(&format!("Directory: {}", directory.display()));
        self.reporter.info(BANNER);

        let scan = scan_profiles(directory)?;

        self.reporter.info(&format!("Found {} profile files", scan.paths.len()));
        self.reporter.info(&format!("  ICC: {} files", scan.icc_count));
        self.reporter.info(&format!("  ICM: {} files", scan.icm_count));

        let mut summary = ProcessSummary::default();

        for path in &scan.paths {
            summary.processed += 1;

            if self.process_profile(path).is_ok() {
                summary.successful += 1;
            }
        }

        self.reporter.info(BANNER);
        self.reporter.info("SUMMARY");
        self.reporter.info(BANNER);
        self.reporter.info(&format!("Total files processed: {}", summary.processed));
        self.reporter.info(&format!("Successfully updated: {}", summary.successful));
        self.reporter.info(&format!("Failed: {}", summary.failed()));
        self.reporter.info(BANNER);

        Ok(summary)
    }
}
