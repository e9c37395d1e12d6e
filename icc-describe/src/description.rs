// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Profile description (`desc`) tag handling.

# Binary Encoding

The description tag data consists of:

* 4 byte tag type signature (`desc`).
* 4 reserved bytes (always 0).
* Big-endian u32 holding the length of the ASCII description, including
  its NULL terminator.
* The ASCII description and its NULL terminator.

The tag data is padded with NULL bytes to a 4 byte boundary.

Rewriting the tag never moves other tags: the new tag data always occupies
exactly the bytes of the old tag data. Shorter descriptions are padded with
NULLs. Descriptions too long for the existing tag are truncated.
*/

use {
    crate::{
        error::{ProfileError, ProfileResult},
        tag_table::find_tag,
    },
    scroll::Pread,
};

/// Tag signature and tag type signature of the description tag.
pub const DESCRIPTION_TAG: &[u8; 4] = b"desc";

/// Bytes of description tag data preceding the description text.
pub const DESCRIPTION_HEADER_SIZE: usize = 12;

/// Maximum number of description bytes written, excluding the terminator.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// Encode text as ASCII.
///
/// Each character outside ASCII becomes a `?`. At most `limit` bytes are
/// emitted.
pub fn encode_ascii(text: &str, limit: usize) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .take(limit)
        .collect()
}

fn description_tag_data(text: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(DESCRIPTION_HEADER_SIZE + text.len() + 4);
    data.extend_from_slice(DESCRIPTION_TAG);
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
    data.extend_from_slice(text);
    data.push(0);

    data
}

/// Description tag data sized for an existing tag.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DescriptionPayload {
    /// Raw tag data. Always exactly as long as the requested span.
    pub data: Vec<u8>,

    /// The ASCII description stored in [Self::data].
    pub text: String,

    /// Whether the aligned tag data didn't fit the span and the description
    /// was cut down to the space available.
    pub overflowed: bool,

    /// Whether characters of the description were dropped to fit the span.
    pub truncated: bool,
}

/// Build description tag data occupying exactly `span` bytes.
///
/// The description is capped at [MAX_DESCRIPTION_LENGTH] bytes and padded to
/// a 4 byte boundary. If that doesn't fit in `span`, the description is cut
/// down to the `span - 13` bytes that remain after the header and
/// terminator, which may or may not drop characters. Either way the result
/// is NULL padded to `span`.
pub fn build_payload(text: &str, span: u32) -> ProfileResult<DescriptionPayload> {
    let span_size = span as usize;

    let full = encode_ascii(text, MAX_DESCRIPTION_LENGTH);

    let data = description_tag_data(&full);
    let aligned = match data.len() % 4 {
        0 => data.len(),
        extra => data.len() + 4 - extra,
    };

    let overflowed = aligned > span_size;

    let (mut data, encoded) = if !overflowed {
        (data, full.clone())
    } else {
        let available = span_size
            .checked_sub(DESCRIPTION_HEADER_SIZE)
            .filter(|available| *available > 0)
            .ok_or(ProfileError::PayloadTooLarge(span))?;

        let encoded = full[..std::cmp::min(full.len(), available - 1)].to_vec();

        (description_tag_data(&encoded), encoded)
    };

    data.resize(span_size, 0);

    Ok(DescriptionPayload {
        data,
        overflowed,
        truncated: encoded.len() < full.len(),
        text: String::from_utf8_lossy(&encoded).to_string(),
    })
}

/// A profile whose description has been rewritten.
#[derive(Clone, Debug)]
pub struct PatchedProfile {
    /// Full profile data. Same length as the input profile.
    pub data: Vec<u8>,

    /// The description that was written.
    pub description: String,

    /// Whether the description had to be cut down to fit the existing tag.
    pub overflowed: bool,

    /// Whether characters of the description were dropped to fit.
    pub truncated: bool,

    /// The description the profile carried before patching, if readable.
    pub previous_description: Option<String>,
}

/// Replace the description in ICC profile data.
///
/// The profile header is not validated. Callers should use
/// [crate::header::validate_header] first.
pub fn patch_description(data: &[u8], description: &str) -> ProfileResult<PatchedProfile> {
    let entry = find_tag(data, DESCRIPTION_TAG).ok_or(ProfileError::TagNotFound)?;

    let range = entry
        .data_range(data.len())
        .ok_or(ProfileError::TagOutOfBounds {
            offset: entry.offset,
            length: entry.length,
            size: data.len(),
        })?;

    let payload = build_payload(description, entry.length)?;

    let mut patched = Vec::with_capacity(data.len());
    patched.extend_from_slice(&data[..range.start]);
    patched.extend_from_slice(&payload.data);
    patched.extend_from_slice(&data[range.end..]);

    debug_assert_eq!(patched.len(), data.len());

    Ok(PatchedProfile {
        data: patched,
        description: payload.text,
        overflowed: payload.overflowed,
        truncated: payload.truncated,
        previous_description: read_description(data),
    })
}

/// Read the current description from ICC profile data.
///
/// Returns `None` if there is no well-formed `desc` tag.
pub fn read_description(data: &[u8]) -> Option<String> {
    let entry = find_tag(data, DESCRIPTION_TAG)?;
    let tag = &data[entry.data_range(data.len())?];

    if tag.len() < DESCRIPTION_HEADER_SIZE || &tag[0..4] != DESCRIPTION_TAG {
        return None;
    }

    let declared = tag.pread_with::<u32>(8, scroll::BE).ok()? as usize;
    let text = &tag[DESCRIPTION_HEADER_SIZE..];
    let text = &text[..std::cmp::min(declared, text.len())];
    let text = match text.iter().position(|b| *b == 0) {
        Some(end) => &text[..end],
        None => text,
    };

    Some(String::from_utf8_lossy(text).to_string())
}
