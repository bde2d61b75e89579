//! Decoder for the encoded polyline format used by the directions provider:
//! zig-zag signed deltas split into 5-bit chunks, offset by 63 into printable
//! ASCII, latitude then longitude, scaled by 1e5.

use thiserror::Error;

use crate::entities::GeoPoint;

const PRECISION: f64 = 1e5;
const CHUNK_OFFSET: u8 = 63;
const CHUNK_MASK: i64 = 0x1f;
const CONTINUATION_BIT: i64 = 0x20;
// Seven chunks cover any coordinate delta at 1e5 precision.
const MAX_SHIFT: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid character {byte:#04x} at position {position}")]
    InvalidCharacter { position: usize, byte: u8 },

    #[error("polyline ends in the middle of a coordinate at position {position}")]
    Truncated { position: usize },

    #[error("value starting at position {position} does not fit a coordinate")]
    Overflow { position: usize },
}

/// Decodes an encoded polyline. An empty string is an empty path.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::with_capacity(bytes.len() / 4);
    let mut position = 0;
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;

    while position < bytes.len() {
        latitude += read_value(bytes, &mut position)?;

        if position >= bytes.len() {
            return Err(DecodeError::Truncated { position });
        }

        longitude += read_value(bytes, &mut position)?;

        // Dividing integers keeps results identical to the decimal literals.
        points.push(GeoPoint::new(
            latitude as f64 / PRECISION,
            longitude as f64 / PRECISION,
        ));
    }

    Ok(points)
}

fn read_value(bytes: &[u8], position: &mut usize) -> Result<i64, DecodeError> {
    let start = *position;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *bytes
            .get(*position)
            .ok_or(DecodeError::Truncated {
                position: *position,
            })?;

        if !(CHUNK_OFFSET..=CHUNK_OFFSET + 63).contains(&byte) {
            return Err(DecodeError::InvalidCharacter {
                position: *position,
                byte,
            });
        }

        if shift > MAX_SHIFT {
            return Err(DecodeError::Overflow { position: start });
        }

        let chunk = i64::from(byte - CHUNK_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        *position += 1;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    if result & 1 == 1 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}
