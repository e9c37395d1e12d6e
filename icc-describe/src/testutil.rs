// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Helpers for constructing profile data and capturing reports in tests.

use {
    crate::{
        header::{PROFILE_SIGNATURE, SIGNATURE_OFFSET},
        reporter::Reporter,
        tag_table::{TAG_COUNT_OFFSET, TAG_ENTRY_SIZE, TAG_TABLE_OFFSET},
    },
    log::Level,
    std::sync::Mutex,
};

struct TestTag {
    signature: [u8; 4],
    offset: u32,
    length: u32,
    payload: Vec<u8>,
}

/// Builds minimal ICC profiles with a signed header and a tag table.
///
/// Anything that doesn't fit in the requested size is silently dropped so
/// truncated profiles can be produced.
pub struct ProfileBuilder {
    size: usize,
    fill: u8,
    signature: [u8; 4],
    tags: Vec<TestTag>,
}

impl ProfileBuilder {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            fill: 0,
            signature: *PROFILE_SIGNATURE,
            tags: vec![],
        }
    }

    /// Byte value for everything not otherwise written.
    pub fn fill(mut self, value: u8) -> Self {
        self.fill = value;
        self
    }

    pub fn signature(mut self, signature: &[u8; 4]) -> Self {
        self.signature = *signature;
        self
    }

    pub fn tag(mut self, signature: &[u8; 4], offset: u32, length: u32, payload: &[u8]) -> Self {
        self.tags.push(TestTag {
            signature: *signature,
            offset,
            length,
            payload: payload.to_vec(),
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = vec![self.fill; self.size];

        write_at(&mut data, SIGNATURE_OFFSET, &self.signature);
        write_at(
            &mut data,
            TAG_COUNT_OFFSET,
            &(self.tags.len() as u32).to_be_bytes(),
        );

        for (i, tag) in self.tags.iter().enumerate() {
            let mut entry = Vec::with_capacity(TAG_ENTRY_SIZE);
            entry.extend_from_slice(&tag.signature);
            entry.extend_from_slice(&tag.offset.to_be_bytes());
            entry.extend_from_slice(&tag.length.to_be_bytes());

            write_at(&mut data, TAG_TABLE_OFFSET + i * TAG_ENTRY_SIZE, &entry);
            write_at(&mut data, tag.offset as usize, &tag.payload);
        }

        data
    }
}

fn write_at(data: &mut [u8], offset: usize, value: &[u8]) {
    if offset >= data.len() {
        return;
    }

    let end = std::cmp::min(data.len(), offset + value.len());
    data[offset..end].copy_from_slice(&value[..end - offset]);
}

/// A [Reporter] that remembers every message it receives.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    messages: Mutex<Vec<(Level, String)>>,
}

impl CollectingReporter {
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|(l, message)| if l == level { Some(message) } else { None })
            .collect()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, level: Level, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}
