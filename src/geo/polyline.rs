//! Compact path encoding used by routing services ("encoded polyline").
//!
//! Each point is written as a pair of deltas against the previous point,
//! latitude first, scaled by `10^PRECISION` and zig-zag encoded into
//! base64-like 5-bit chunks offset by 63. The encoded axis order is
//! latitude/longitude; use [`Coordinate::lng_lat`] when handing points to
//! a renderer.

use super::coordinate::Coordinate;
use super::error::PolylineError;

pub const PRECISION: u32 = 5;

fn factor() -> f64 {
    10f64.powi(PRECISION as i32)
}

pub fn encode(points: &[Coordinate]) -> String {
    let factor = factor();
    let mut out = String::new();
    let (mut prev_lat, mut prev_lon) = (0i64, 0i64);

    for point in points {
        let lat = (point.latitude * factor).round() as i64;
        let lon = (point.longitude * factor).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

fn encode_value(delta: i64, out: &mut String) {
    let mut value = (if delta < 0 { !(delta << 1) } else { delta << 1 }) as u64;
    while value >= 0x20 {
        out.push(char::from((((value & 0x1f) | 0x20) + 63) as u8));
        value >>= 5;
    }
    out.push(char::from((value + 63) as u8));
}

pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let factor = factor();
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let (mut lat, mut lon) = (0i64, 0i64);
    let mut points = Vec::new();

    while index < bytes.len() {
        lat += decode_value(bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(PolylineError::Truncated(index));
        }
        lon += decode_value(bytes, &mut index)?;

        let point = Coordinate::new(lat as f64 / factor, lon as f64 / factor).map_err(|source| {
            PolylineError::OutOfRange {
                index: points.len(),
                source,
            }
        })?;
        points.push(point);
    }

    Ok(points)
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: u64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or(PolylineError::Truncated(*index))?;
        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(PolylineError::InvalidCharacter(byte as char, *index));
        }
        *index += 1;

        let chunk = (byte - 63) as u64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    let value = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !value } else { value })
}
