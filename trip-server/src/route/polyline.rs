//! Encoded path decoding.
//!
//! Paths arrive as polyline-encoded strings with a fixed precision of
//! 1e5. Each coordinate is stored as a delta from the previous one,
//! zigzag-signed and split into 5-bit chunks, least significant first.
//! Every chunk is offset by 63 to land in printable ASCII, and bit 0x20
//! marks that another chunk follows.

use crate::domain::PathPoint;

/// Offset added to every chunk so encoded bytes are printable.
const CHUNK_OFFSET: u8 = 63;

/// Highest byte a valid chunk can encode to (`63 + 0x3f`).
const MAX_ENCODED_BYTE: u8 = 126;

/// Set on every chunk except the last one of a value.
const CONTINUATION_BIT: i64 = 0x20;

/// Value bits carried by one chunk.
const CHUNK_MASK: i64 = 0x1f;

/// Largest shift accepted before a value is considered malformed.
/// Seven chunks (35 bits) is far beyond any real coordinate delta.
const MAX_SHIFT: u32 = 30;

/// Error decoding an encoded path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// The input ended while a value still expected more chunks.
    #[error("encoded path is truncated: value starting at byte {offset} is incomplete")]
    Truncated { offset: usize },

    /// A byte outside the encodable range `?`..=`~`.
    #[error("invalid byte {byte:#04x} at offset {offset} in encoded path")]
    InvalidByte { byte: u8, offset: usize },

    /// A value used more chunks than any coordinate delta can need.
    #[error("value starting at byte {offset} in encoded path is too long")]
    Overflow { offset: usize },
}

/// Decode an encoded path into points, in encoded order.
///
/// An empty string decodes to an empty path. Decoding keeps no state
/// between calls.
///
/// # Examples
///
/// ```
/// use trip_server::route::decode_polyline;
///
/// let path = decode_polyline("_p~iF~ps|U").unwrap();
/// assert_eq!(path.len(), 1);
/// assert!((path[0].latitude - 38.5).abs() < 1e-9);
/// assert!((path[0].longitude - -120.2).abs() < 1e-9);
///
/// assert!(decode_polyline("").unwrap().is_empty());
/// assert!(decode_polyline("_p~i").is_err());
/// ```
pub fn decode(encoded: &str) -> Result<Vec<PathPoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    // Short coordinate pairs take around 4 bytes; this avoids most regrowth.
    let mut points = Vec::with_capacity(bytes.len() / 4);

    let mut pos = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while pos < bytes.len() {
        lat += read_value(bytes, &mut pos)?;
        lng += read_value(bytes, &mut pos)?;
        points.push(PathPoint::from_e5(lat, lng));
    }

    Ok(points)
}

/// Read one zigzag-encoded delta starting at `pos`, advancing past it.
fn read_value(bytes: &[u8], pos: &mut usize) -> Result<i64, PolylineError> {
    let start = *pos;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*pos) else {
            return Err(PolylineError::Truncated { offset: start });
        };
        if !(CHUNK_OFFSET..=MAX_ENCODED_BYTE).contains(&byte) {
            return Err(PolylineError::InvalidByte { byte, offset: *pos });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { offset: start });
        }

        let chunk = i64::from(byte - CHUNK_OFFSET);
        *pos += 1;

        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    // Lowest bit is the sign flag.
    if result & 1 != 0 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}
