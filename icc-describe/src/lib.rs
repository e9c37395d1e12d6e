// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Rewrite the description of ICC color profiles.

ICC profiles carry a human readable description in their `desc` tag. This
crate rewrites that description in place, without moving any other data
in the profile. It is primarily used to make profile descriptions match the
filenames of the profiles.

The low-level primitives operate on in-memory profile data:

* [validate_header] checks for the `acsp` profile signature.
* [find_tag] locates a tag in the profile's tag table.
* [build_payload] constructs description tag data sized for an existing tag.
* [patch_description] rewrites the description in profile data.

[ProfileUpdater] applies these to files on disk, reporting progress through
a [Reporter].
*/

pub mod description;
pub use description::{
    build_payload, patch_description, read_description, DescriptionPayload, PatchedProfile,
};
pub mod error;
pub use error::{ProfileError, ProfileResult};
pub mod header;
pub use header::validate_header;
pub mod reporter;
pub use reporter::{FileReporter, LogReporter, MultiReporter, NullReporter, Reporter};
pub mod tag_table;
pub use tag_table::{find_tag, TagEntry, TagTable};
pub mod updater;
pub use updater::{
    description_for_path, resolve_directory, scan_profiles, update_profile_file, ProcessSummary,
    ProfileScan, ProfileUpdater,
};

#[cfg(test)]
mod testutil;
