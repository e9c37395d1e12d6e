// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ICC profile header primitives.

/// Size in bytes of the fixed ICC profile header.
pub const HEADER_SIZE: usize = 128;

/// Offset of the profile file signature within the header.
pub const SIGNATURE_OFFSET: usize = 36;

/// Profile file signature. Every ICC profile carries this at [SIGNATURE_OFFSET].
pub const PROFILE_SIGNATURE: &[u8; 4] = b"acsp";

/// Whether data looks like an ICC profile.
///
/// Data must be large enough to hold a full header and carry the `acsp`
/// signature at offset 36. Nothing else in the header is checked.
pub fn validate_header(data: &[u8]) -> bool {
    if data.len() < HEADER_SIZE {
        return false;
    }

    data.get(SIGNATURE_OFFSET..SIGNATURE_OFFSET + PROFILE_SIGNATURE.len())
        .map(|signature| signature == PROFILE_SIGNATURE)
        .unwrap_or(false)
}

#[cfg(test)]
mod test {
    use super::*;

    fn header_with_signature(size: usize, signature: &[u8; 4]) -> Vec<u8> {
        let mut data = vec![0u8; size];
        if size >= SIGNATURE_OFFSET + 4 {
            data[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 4].copy_from_slice(signature);
        }
        data
    }

    #[test]
    fn valid_header() {
        assert!(validate_header(&header_with_signature(128, b"acsp")));
        assert!(validate_header(&header_with_signature(4096, b"acsp")));
    }

    #[test]
    fn short_buffer() {
        assert!(!validate_header(&[]));
        assert!(!validate_header(&header_with_signature(50, b"acsp")));
        assert!(!validate_header(&header_with_signature(127, b"acsp")));
    }

    #[test]
    fn bad_signature() {
        assert!(!validate_header(&header_with_signature(128, b"ascp")));
        assert!(!validate_header(&header_with_signature(1024, b"\0\0\0\0")));
    }

    #[test]
    fn signature_elsewhere_ignored() {
        let mut data = vec![0u8; 256];
        data[0..4].copy_from_slice(b"acsp");
        assert!(!validate_header(&data));
    }
}
