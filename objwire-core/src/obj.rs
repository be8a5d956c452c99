/// Wavefront OBJ parser (vertex/face subset)
///
/// Only `v` and `f` records are consumed; comments, normals, texture
/// coordinates, groups and everything else are skipped. Face references of
/// the form `index/texture/normal` keep just the leading 1-based vertex
/// index, which is translated to 0-based on load.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use nalgebra::{Matrix3xX, Vector3};
use nom::{
    bytes::complete::tag,
    character::complete::{char, digit0, digit1, multispace0, multispace1},
    combinator::{all_consuming, map_res, opt},
    multi::separated_list1,
    number::complete::float,
    sequence::{pair, preceded, terminated},
    IResult,
};

use crate::error::ParseError;
use crate::geometry::{Face, Mesh};

/// Parse an OBJ text stream into a mesh.
///
/// Face indices are validated against the final vertex count, so a face
/// record may legally precede the vertices it references.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh, ParseError> {
    let mut columns: Vec<Vector3<f32>> = Vec::new();
    // raw 1-based references, resolved once the vertex count is known
    let mut pending: Vec<(usize, Vec<usize>)> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = index + 1;
        let trimmed = line.trim();
        match trimmed.split_whitespace().next() {
            Some("v") => {
                let (_, [x, y, z]) = all_consuming(vertex_line)(trimmed)
                    .map_err(|_| ParseError::Vertex { line: lineno })?;
                columns.push(Vector3::new(x, y, z));
            }
            Some("f") => {
                let (_, refs) = all_consuming(face_line)(trimmed)
                    .map_err(|_| ParseError::Face { line: lineno })?;
                if refs.len() < 3 {
                    return Err(ParseError::DegenerateFace {
                        line: lineno,
                        count: refs.len(),
                    });
                }
                pending.push((lineno, refs));
            }
            _ => {} // ignore all other record types
        }
    }

    if columns.is_empty() {
        return Err(ParseError::NoVertices);
    }

    let vertex_count = columns.len();
    let mut faces = Vec::with_capacity(pending.len());
    for (lineno, refs) in pending {
        let mut indices = Vec::with_capacity(refs.len());
        for reference in refs {
            if reference == 0 || reference > vertex_count {
                return Err(ParseError::IndexOutOfRange {
                    line: lineno,
                    index: reference,
                    vertex_count,
                });
            }
            indices.push(reference - 1);
        }
        faces.push(Face::new(indices));
    }

    debug!(
        "loaded mesh: {} vertices, {} faces",
        vertex_count,
        faces.len()
    );
    Ok(Mesh::new(Matrix3xX::from_columns(&columns), faces))
}

impl Mesh {
    /// Open and parse an OBJ file, tagging errors with the path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Mesh, ParseError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ParseError::from(e).in_file(path))?;
        parse_obj(BufReader::new(file)).map_err(|e| e.in_file(path))
    }
}

/// `v x y z` — exactly three coordinates.
fn vertex_line(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, _) = terminated(tag("v"), multispace1)(input)?;
    let (input, x) = float(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, [x, y, z]))
}

/// `f ref ref ref ...` where each ref is `index[/tex][/normal]`.
fn face_line(input: &str) -> IResult<&str, Vec<usize>> {
    let (input, _) = terminated(tag("f"), multispace1)(input)?;
    let (input, refs) = separated_list1(multispace1, face_ref)(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, refs))
}

/// One face reference. Texture and normal sub-indices are discarded; the
/// texture slot may be empty (`1//3`).
fn face_ref(input: &str) -> IResult<&str, usize> {
    let (input, index) = map_res(digit1, str::parse::<usize>)(input)?;
    let (input, _) = opt(pair(
        preceded(char('/'), digit0),
        opt(preceded(char('/'), digit1)),
    ))(input)?;
    Ok((input, index))
}
