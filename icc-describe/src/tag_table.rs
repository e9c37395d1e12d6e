// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! ICC tag table parsing.

The tag table immediately follows the 128 byte profile header. It starts
with a big-endian u32 holding the number of tags. Then follow that many
12 byte entries, each holding the tag signature, the offset of the tag data
from the start of the profile, and the size of the tag data. All integers
are big-endian.

Profiles in the wild are sometimes truncated. Entries that would extend past
the end of the data are treated as absent.
*/

use {
    crate::header::HEADER_SIZE,
    scroll::Pread,
    std::fmt::{Debug, Formatter},
};

/// Offset of the tag count.
pub const TAG_COUNT_OFFSET: usize = HEADER_SIZE;

/// Offset of the first tag table entry.
pub const TAG_TABLE_OFFSET: usize = TAG_COUNT_OFFSET + 4;

/// Size in bytes of a tag table entry.
pub const TAG_ENTRY_SIZE: usize = 12;

/// An entry in the tag table.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct TagEntry {
    /// 4 byte tag signature. e.g. `desc`.
    pub signature: [u8; 4],

    /// Offset of tag data from start of profile.
    pub offset: u32,

    /// Size of tag data in bytes.
    pub length: u32,
}

impl Debug for TagEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagEntry")
            .field("signature", &String::from_utf8_lossy(&self.signature))
            .field("offset", &self.offset)
            .field("length", &self.length)
            .finish()
    }
}

impl TagEntry {
    fn parse(data: &[u8], offset: usize) -> Result<Self, scroll::Error> {
        let mut signature = [0u8; 4];
        signature.copy_from_slice(data.pread_with::<&[u8]>(offset, 4)?);

        Ok(Self {
            signature,
            offset: data.pread_with(offset + 4, scroll::BE)?,
            length: data.pread_with(offset + 8, scroll::BE)?,
        })
    }

    /// Byte range of the tag data within the profile.
    ///
    /// `None` if the range does not fit within `size` bytes.
    pub fn data_range(&self, size: usize) -> Option<std::ops::Range<usize>> {
        let start = self.offset as usize;
        let end = start.checked_add(self.length as usize)?;

        if end <= size {
            Some(start..end)
        } else {
            None
        }
    }
}

/// Iterator over readable entries in a profile's tag table.
pub struct TagTable<'a> {
    data: &'a [u8],
    count: u32,
    index: u32,
}

impl<'a> TagTable<'a> {
    /// Construct an instance over profile data.
    ///
    /// Data too short to hold the tag count yields an empty table.
    pub fn new(data: &'a [u8]) -> Self {
        let count = if data.len() < TAG_TABLE_OFFSET {
            0
        } else {
            data.pread_with::<u32>(TAG_COUNT_OFFSET, scroll::BE)
                .unwrap_or(0)
        };

        Self {
            data,
            count,
            index: 0,
        }
    }

    /// The number of tags the table claims to have.
    pub fn declared_count(&self) -> u32 {
        self.count
    }
}

impl<'a> Iterator for TagTable<'a> {
    type Item = TagEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }

        let start = (self.index as usize)
            .checked_mul(TAG_ENTRY_SIZE)
            .and_then(|x| x.checked_add(TAG_TABLE_OFFSET));

        let start = match start {
            Some(start)
                if start
                    .checked_add(TAG_ENTRY_SIZE)
                    .map_or(false, |end| end <= self.data.len()) =>
            {
                start
            }
            // Truncated table. Stop iterating for good.
            _ => {
                self.index = self.count;
                return None;
            }
        };

        self.index += 1;

        match TagEntry::parse(self.data, start) {
            Ok(entry) => Some(entry),
            Err(_) => {
                self.index = self.count;
                None
            }
        }
    }
}

/// Find the first tag table entry having the given signature.
pub fn find_tag(data: &[u8], signature: &[u8; 4]) -> Option<TagEntry> {
    TagTable::new(data).find(|entry| &entry.signature == signature)
}
