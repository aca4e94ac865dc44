//! Domain names and character-strings.

use std::fmt;
use std::str::FromStr;

use super::wire::{Reader, Writer};
use crate::error::{DecodeError, NameError};

/// Longest label allowed in text names.
pub const MAX_LABEL_LEN: usize = 63;

/// Longest name in wire form, length bytes and terminator included.
pub const MAX_NAME_LEN: usize = 255;

/// A domain name kept in uncompressed wire form.
///
/// Label bytes are stored exactly as received, so a decoded name encodes
/// back to the same octets whatever its case or character set.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Name {
    wire: Vec<u8>,
}

impl Name {
    pub fn root() -> Self {
        Self { wire: vec![0] }
    }

    pub fn is_root(&self) -> bool {
        self.wire == [0]
    }

    /// Length-prefixed labels followed by the zero byte.
    pub fn as_wire(&self) -> &[u8] {
        &self.wire
    }

    /// Label contents, leftmost first.
    pub fn labels(&self) -> impl Iterator<Item = &[u8]> {
        let mut rest = &self.wire[..];
        std::iter::from_fn(move || {
            let (&len, tail) = rest.split_first()?;
            if len == 0 || tail.len() < len as usize {
                return None;
            }
            let (label, tail) = tail.split_at(len as usize);
            rest = tail;
            Some(label)
        })
    }

    /// Copy with ASCII letters lowered. Other bytes are left alone.
    pub fn to_ascii_lowercase(&self) -> Self {
        let mut wire = Vec::with_capacity(self.wire.len());
        for label in self.labels() {
            wire.push(label.len() as u8);
            wire.extend(label.iter().map(u8::to_ascii_lowercase));
        }
        wire.push(0);
        Self { wire }
    }
}

impl FromStr for Name {
    type Err = NameError;

    /// Parse dotted text. Labels are taken verbatim, without escapes.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_name(text);
        if normalized == "." {
            return Ok(Self::root());
        }

        let mut wire = Vec::with_capacity(normalized.len() + 2);
        for label in normalized.split('.') {
            if label.is_empty() {
                return Err(NameError::EmptyLabel);
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(NameError::LabelTooLong(label.len()));
            }
            wire.push(label.len() as u8);
            wire.extend_from_slice(label.as_bytes());
        }
        wire.push(0);

        if wire.len() > MAX_NAME_LEN {
            return Err(NameError::NameTooLong(wire.len()));
        }
        Ok(Self { wire })
    }
}

/// Presentation form: dots between labels, the root as `"."`. Dots and
/// backslashes inside a label are escaped with a backslash, and bytes
/// outside printable ASCII as `\DDD`.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }

        for (i, label) in self.labels().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            for &b in label {
                match b {
                    b'.' | b'\\' => write!(f, "\\{}", b as char)?,
                    0x21..=0x7e => write!(f, "{}", b as char)?,
                    _ => write!(f, "\\{b:03}")?,
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({self})")
    }
}

/// Strip any trailing dot so `example.com.` and `example.com` compare equal.
///
/// The root name, in either spelling, becomes `"."`.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim_end_matches('.');
    if trimmed.is_empty() {
        ".".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Append `name` as a sequence of length-prefixed labels ending in a zero byte.
///
/// For fixed names and names already checked with [`Name::from_str`]:
/// labels must be 1 to 63 bytes.
pub fn encode_name(w: &mut Writer, name: &str) {
    let trimmed = name.trim_end_matches('.');
    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            debug_assert!(!label.is_empty() && label.len() <= MAX_LABEL_LEN);
            w.put_u8(label.len() as u8);
            w.put_slice(label.as_bytes());
        }
    }
    w.put_u8(0);
}

/// Read an uncompressed domain name, keeping its bytes as they are.
///
/// Compression pointers are not followed: a length byte is always taken
/// literally as the size of the next label. Names over 255 octets fail.
pub fn decode_name(r: &mut Reader<'_>) -> Result<Name, DecodeError> {
    let mut wire = Vec::with_capacity(32);

    loop {
        let len = r.read_u8("label length")?;
        wire.push(len);
        if len == 0 {
            break;
        }
        let label = r.read_bytes(len as usize, "label")?;
        wire.extend_from_slice(label);
        // One more byte is still needed for the terminator.
        if wire.len() >= MAX_NAME_LEN {
            return Err(DecodeError::NameTooLong);
        }
    }

    Ok(Name { wire })
}

/// Encode text as TXT RDATA.
///
/// Each character-string holds at most 255 bytes, so longer text is split
/// over several consecutive strings.
pub fn encode_txt(text: &str) -> Vec<u8> {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return vec![0];
    }

    let mut out = Vec::with_capacity(bytes.len() + bytes.len() / 255 + 1);
    for chunk in bytes.chunks(255) {
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
    out
}
