//! STL parsing.
//!
//! Both ASCII and binary STL are read into a triangle soup: three fresh
//! positions per facet, no shared vertices. Stored facet normals are
//! ignored; normals are derived from the welded mesh instead.
//!
//! # Format Detection
//!
//! A binary file is recognised by its size, which is exactly
//! `84 + 50 × triangle_count` bytes. Anything else starting with `solid` is
//! parsed as ASCII. Binary files whose header happens to begin with `solid`
//! are still read as binary because the size check comes first.

use nalgebra::Point3;

use crate::error::{IoError, IoResult};

/// Binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Header plus the triangle count.
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// One binary triangle: normal, three vertices, attribute count.
const TRIANGLE_SIZE: usize = 50;

/// Triangle soup read from an STL file.
#[derive(Debug, Clone, Default)]
pub(crate) struct Soup {
    pub triangles: Vec<[Point3<f64>; 3]>,
}

/// Parse STL bytes, detecting the encoding.
pub(crate) fn parse_stl(bytes: &[u8]) -> IoResult<Soup> {
    if bytes.len() < 6 {
        return Err(IoError::invalid_content("file too small to be valid STL"));
    }

    if let Some(count) = binary_triangle_count(bytes) {
        if bytes.len() == PREAMBLE_SIZE + count as usize * TRIANGLE_SIZE {
            return parse_binary(bytes);
        }
    }

    let text = String::from_utf8_lossy(bytes);
    if text.trim_start().starts_with("solid") {
        parse_ascii(&text)
    } else {
        parse_binary(bytes)
    }
}

fn binary_triangle_count(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_SIZE..PREAMBLE_SIZE)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

fn parse_binary(bytes: &[u8]) -> IoResult<Soup> {
    let count = binary_triangle_count(bytes)
        .ok_or_else(|| IoError::invalid_content("binary STL shorter than its 84-byte preamble"))?;

    let body = &bytes[PREAMBLE_SIZE..];
    let available = body.len() / TRIANGLE_SIZE;
    if available < count as usize {
        return Err(IoError::TruncatedBinary {
            expected: count,
            got: u32::try_from(available).unwrap_or(u32::MAX),
        });
    }

    let triangles = body
        .chunks_exact(TRIANGLE_SIZE)
        .take(count as usize)
        // skip the 12-byte normal
        .map(|t| [read_point(&t[12..24]), read_point(&t[24..36]), read_point(&t[36..48])])
        .collect();

    Ok(Soup { triangles })
}

fn read_point(buf: &[u8]) -> Point3<f64> {
    let coord = |i: usize| {
        f64::from(f32::from_le_bytes([
            buf[i],
            buf[i + 1],
            buf[i + 2],
            buf[i + 3],
        ]))
    };
    Point3::new(coord(0), coord(4), coord(8))
}

fn parse_ascii(text: &str) -> IoResult<Soup> {
    let mut triangles = Vec::new();
    let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);
    let mut in_loop = false;

    for (line_no, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "outer" => {
                in_loop = true;
                corners.clear();
            }
            "vertex" if in_loop => {
                let coords: Vec<&str> = parts.collect();
                if coords.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: vertex needs three coordinates",
                        line_no + 1
                    )));
                }
                corners.push(Point3::new(
                    coords[0].parse()?,
                    coords[1].parse()?,
                    coords[2].parse()?,
                ));
            }
            "endloop" => in_loop = false,
            "endfacet" => {
                if corners.len() != 3 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: facet has {} vertices, expected 3",
                        line_no + 1,
                        corners.len()
                    )));
                }
                triangles.push([corners[0], corners[1], corners[2]]);
                corners.clear();
            }
            "endsolid" => break,
            _ => {}
        }
    }

    Ok(Soup { triangles })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII_TRIANGLE: &str = "solid tri
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid tri
";

    fn binary(triangles: &[[[f32; 3]; 3]], header: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_SIZE];
        bytes[..header.len()].copy_from_slice(header);
        bytes.extend_from_slice(&u32::try_from(triangles.len()).unwrap().to_le_bytes());
        for tri in triangles {
            bytes.extend_from_slice(&[0u8; 12]);
            for v in tri {
                for c in v {
                    bytes.extend_from_slice(&c.to_le_bytes());
                }
            }
            bytes.extend_from_slice(&0u16.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn ascii_triangle() {
        let soup = parse_stl(ASCII_TRIANGLE.as_bytes()).unwrap();
        assert_eq!(soup.triangles.len(), 1);
        assert_eq!(soup.triangles[0][1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn binary_triangle() {
        let bytes = binary(&[[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.5, 0.0]]], b"test");
        let soup = parse_stl(&bytes).unwrap();
        assert_eq!(soup.triangles.len(), 1);
        assert_eq!(soup.triangles[0][2], Point3::new(0.0, 2.5, 0.0));
    }

    #[test]
    fn binary_with_solid_header() {
        let bytes = binary(&[[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]], b"solid trap");
        let soup = parse_stl(&bytes).unwrap();
        assert_eq!(soup.triangles.len(), 1);
    }

    #[test]
    fn truncated_binary() {
        let mut bytes = binary(
            &[
                [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            ],
            b"",
        );
        bytes.truncate(bytes.len() - 10);
        assert!(matches!(
            parse_stl(&bytes),
            Err(IoError::TruncatedBinary {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn malformed_ascii() {
        let text = ASCII_TRIANGLE.replace("vertex 1 0 0", "vertex 1 zero 0");
        assert!(matches!(parse_stl(text.as_bytes()), Err(IoError::ParseFloat(_))));

        let text = ASCII_TRIANGLE.replace("      vertex 0 1 0\n", "");
        assert!(matches!(
            parse_stl(text.as_bytes()),
            Err(IoError::InvalidContent { .. })
        ));
    }

    #[test]
    fn too_small() {
        assert!(matches!(
            parse_stl(b"sol"),
            Err(IoError::InvalidContent { .. })
        ));
    }
}
