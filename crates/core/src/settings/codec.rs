//! Setting name codec
//!
//! Names are stored as a short run of dictionary indices and expanded on
//! demand into `word_word_word`. Two encodings exist:
//!
//! - **Byte indexed**: every byte is one dictionary index (up to 255 words)
//! - **Varint**: little-endian base-128; a byte with the high bit set carries
//!   the low 7 bits of an index and announces more bytes, a byte with the
//!   high bit clear completes the index
//!
//! Which one a firmware image uses is fixed when its tables are generated.

use super::dictionary::WordDictionary;
use super::error::NameError;

/// Encoded name capacity per descriptor (bytes)
pub const SETTING_ENCODED_NAME_MAX_BYTES: usize = 8;

/// Longest decoded setting name
pub const SETTING_MAX_NAME_LENGTH: usize = 48;

/// Word separator in decoded names
pub const SETTING_NAME_SEPARATOR: char = '_';

/// Decoded setting name buffer
pub type SettingName = heapless::String<SETTING_MAX_NAME_LENGTH>;

/// Encoded name storage
pub type EncodedName = [u8; SETTING_ENCODED_NAME_MAX_BYTES];

/// Dictionary index encoding used by a table set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameEncoding {
    /// One byte per word index
    ByteIndexed,
    /// Base-128 varint per word index
    Varint,
}

impl NameEncoding {
    /// Parse the build-time encoding flag (`byte` or `varint`)
    ///
    /// Anything other than `byte` selects the varint encoding.
    pub const fn from_build_flag(flag: &str) -> Self {
        match flag.as_bytes() {
            b"byte" => NameEncoding::ByteIndexed,
            _ => NameEncoding::Varint,
        }
    }

    /// Iterate over the dictionary indices stored in `encoded`
    ///
    /// At most `SETTING_ENCODED_NAME_MAX_BYTES` bytes are consumed. A varint
    /// cut short by that limit yields nothing.
    pub fn indices(self, encoded: &[u8]) -> WordIndices<'_> {
        let len = encoded.len().min(SETTING_ENCODED_NAME_MAX_BYTES);
        WordIndices {
            bytes: encoded[..len].iter(),
            encoding: self,
        }
    }

    /// Decode `encoded` into an underscore-joined name
    ///
    /// Stops at the first index that does not name a word.
    pub fn decode(
        self,
        encoded: &[u8],
        dictionary: &WordDictionary,
    ) -> Result<SettingName, NameError> {
        let mut name = SettingName::new();
        for index in self.indices(encoded) {
            let Some(word) = dictionary.word(index) else {
                break;
            };
            if !name.is_empty() {
                name.push(SETTING_NAME_SEPARATOR)
                    .map_err(|_| NameError::TooLong)?;
            }
            name.push_str(word).map_err(|_| NameError::TooLong)?;
        }
        Ok(name)
    }

    /// Encode word indices, zero padded
    ///
    /// Meant for building descriptor tables in `static` items, so running out
    /// of room or a byte-indexed word above 255 is a compile-time error there.
    pub const fn encode(self, indices: &[u16]) -> EncodedName {
        let mut out = [0u8; SETTING_ENCODED_NAME_MAX_BYTES];
        let mut pos = 0;
        let mut i = 0;
        while i < indices.len() {
            let mut n = indices[i];
            match self {
                NameEncoding::ByteIndexed => {
                    assert!(n <= 0xff, "word index does not fit a byte");
                    assert!(pos < SETTING_ENCODED_NAME_MAX_BYTES, "encoded name too long");
                    out[pos] = n as u8;
                    pos += 1;
                }
                NameEncoding::Varint => {
                    while n >= 0x80 {
                        assert!(pos < SETTING_ENCODED_NAME_MAX_BYTES, "encoded name too long");
                        out[pos] = (n & 0x7f) as u8 | 0x80;
                        pos += 1;
                        n >>= 7;
                    }
                    assert!(pos < SETTING_ENCODED_NAME_MAX_BYTES, "encoded name too long");
                    out[pos] = n as u8;
                    pos += 1;
                }
            }
            i += 1;
        }
        out
    }
}

/// Iterator over the dictionary indices of an encoded name
#[derive(Debug, Clone)]
pub struct WordIndices<'a> {
    bytes: core::slice::Iter<'a, u8>,
    encoding: NameEncoding,
}

impl Iterator for WordIndices<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self.encoding {
            NameEncoding::ByteIndexed => self.bytes.next().map(|&b| b as usize),
            NameEncoding::Varint => {
                let mut n: u32 = 0;
                let mut shift: u32 = 0;
                for &b in self.bytes.by_ref() {
                    let bits = u32::from(b & 0x7f).checked_shl(shift).unwrap_or(0);
                    n |= bits;
                    if b & 0x80 == 0 {
                        return Some(n as usize);
                    }
                    shift += 7;
                }
                None
            }
        }
    }
}
