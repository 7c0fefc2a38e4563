//! Listing text decoding
//!
//! The recovery tool exports listings as UTF-8 or UTF-16 depending on locale
//! and version, with or without a byte-order mark. Detection order:
//! - `FF FE`: UTF-16LE with BOM
//! - `FE FF`: UTF-16BE with BOM
//! - `EF BB BF`: UTF-8 with BOM
//! - zero bytes at offsets 1 and 3: UTF-16LE without BOM
//! - zero bytes at offsets 0 and 2: UTF-16BE without BOM
//! - anything else: UTF-8

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

const BOM_UTF16_LE: [u8; 2] = [0xFF, 0xFE];
const BOM_UTF16_BE: [u8; 2] = [0xFE, 0xFF];
const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Text encoding detected for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16LeBom,
    Utf16Be,
    Utf16BeBom,
}

impl TextEncoding {
    /// Number of marker bytes that precede the text
    pub fn bom_len(&self) -> usize {
        match self {
            Self::Utf8Bom => BOM_UTF8.len(),
            Self::Utf16LeBom | Self::Utf16BeBom => 2,
            Self::Utf8 | Self::Utf16Le | Self::Utf16Be => 0,
        }
    }

    fn encoding(&self) -> &'static Encoding {
        match self {
            Self::Utf8 | Self::Utf8Bom => UTF_8,
            Self::Utf16Le | Self::Utf16LeBom => UTF_16LE,
            Self::Utf16Be | Self::Utf16BeBom => UTF_16BE,
        }
    }

    fn is_utf16(&self) -> bool {
        !matches!(self, Self::Utf8 | Self::Utf8Bom)
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "UTF-8"),
            TextEncoding::Utf8Bom => write!(f, "UTF-8 (BOM)"),
            TextEncoding::Utf16Le => write!(f, "UTF-16LE"),
            TextEncoding::Utf16LeBom => write!(f, "UTF-16LE (BOM)"),
            TextEncoding::Utf16Be => write!(f, "UTF-16BE"),
            TextEncoding::Utf16BeBom => write!(f, "UTF-16BE (BOM)"),
        }
    }
}

/// Decoded listing text
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    pub encoding: TextEncoding,
    /// Malformed sequences were replaced with U+FFFD
    pub had_replacements: bool,
}

/// Detect the encoding of raw listing bytes
pub fn detect_encoding(data: &[u8]) -> TextEncoding {
    if data.starts_with(&BOM_UTF16_LE) {
        return TextEncoding::Utf16LeBom;
    }
    if data.starts_with(&BOM_UTF16_BE) {
        return TextEncoding::Utf16BeBom;
    }
    if data.starts_with(&BOM_UTF8) {
        return TextEncoding::Utf8Bom;
    }
    // ASCII content in UTF-16 alternates with zero high bytes
    if data.len() >= 4 && data[1] == 0 && data[3] == 0 {
        return TextEncoding::Utf16Le;
    }
    if data.len() >= 4 && data[0] == 0 && data[2] == 0 {
        return TextEncoding::Utf16Be;
    }
    TextEncoding::Utf8
}

/// Decode raw listing bytes into text, never failing
pub fn decode_listing(data: &[u8]) -> DecodedText {
    let encoding = detect_encoding(data);
    let mut body = &data[encoding.bom_len()..];

    // A trailing odd byte cannot form a code unit
    if encoding.is_utf16() && body.len() % 2 != 0 {
        body = &body[..body.len() - 1];
    }

    let (decoded, had_replacements) = encoding.encoding().decode_without_bom_handling(body);
    if had_replacements {
        tracing::warn!("Listing contains malformed {} sequences, replaced with U+FFFD", encoding);
    }

    DecodedText {
        text: decoded.into_owned(),
        encoding,
        had_replacements,
    }
}
