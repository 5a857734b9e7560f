/// ASCII STL reader
///
/// The reader works line by line. A line opening with the word `normal` (or
/// `facet normal`) followed by three numbers sets the current facet normal, a
/// line opening with the word `vertex` followed by three numbers starts a
/// triangle whose next two lines are read as its remaining vertices.
/// Everything else (`solid`, `outer loop`, `endloop`, `endfacet`, `endsolid`)
/// is skipped, whatever name follows `solid`. Bytes that are not UTF-8 are
/// replaced, so a Latin-1 solid name does not stop the read.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{multispace0, multispace1},
    combinator::{eof, opt},
    number::complete::double,
    sequence::{pair, preceded, terminated},
    IResult,
};

use crate::geometry::{Mesh, Triangle};
use crate::vector::Vec3;

/// Placeholder color given to every wireframe vertex
pub const WIREFRAME_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);

#[derive(Debug, thiserror::Error)]
pub enum StlError {
    #[error("failed to open STL file {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read STL data: {0}")]
    Read(#[from] io::Error),

    #[error("no facets found in {}", .0.display())]
    NoFacets(PathBuf),
}

/// Everything read from an ASCII STL source
///
/// `vertices` and `colors` hold four points per facet (`p1, p2, p3, p1`) for
/// line-loop rendering, `normals` holds the facet normal three times per
/// facet. `mesh` holds the same facets as clean triangles for geometric use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StlMesh {
    pub vertices: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub mesh: Mesh,
    /// Vertex blocks dropped because a coordinate did not parse or the input
    /// ended early
    pub dropped_facets: usize,
}

impl StlMesh {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.normals.is_empty()
    }

    pub fn facet_count(&self) -> usize {
        self.mesh.len()
    }

    fn push_facet(&mut self, p1: Vec3, p2: Vec3, p3: Vec3, normal: Vec3) {
        self.vertices.extend_from_slice(&[p1, p2, p3, p1]);
        self.colors.extend_from_slice(&[WIREFRAME_COLOR; 4]);
        self.mesh.add_triangle(Triangle::new(p1, p2, p3, normal));
    }
}

/// What a single line of the file contributes
#[derive(Debug, Clone, Copy, PartialEq)]
enum Line {
    /// A `normal` line, `None` when its numbers did not parse
    Normal(Option<Vec3>),
    /// A `vertex` line, `None` when its numbers did not parse
    Vertex(Option<Vec3>),
    Other,
}

fn classify(line: &str) -> Line {
    if let Ok((rest, _)) = normal_keyword(line) {
        return Line::Normal(parse_vector3(rest).ok().map(|(_, v)| v));
    }
    if let Ok((rest, _)) = keyword(line, "vertex") {
        return Line::Vertex(parse_vector3(rest).ok().map(|(_, v)| v));
    }
    Line::Other
}

/// Match `word` as the first word of the line, ending at whitespace or at the
/// end of the line
fn keyword<'a>(input: &'a str, word: &'static str) -> IResult<&'a str, &'a str> {
    preceded(multispace0, terminated(tag(word), alt((multispace1, eof))))(input)
}

/// `normal` with an optional leading `facet`
fn normal_keyword(input: &str) -> IResult<&str, &str> {
    let (input, _) = opt(pair(preceded(multispace0, tag("facet")), multispace1))(input)?;
    keyword(input, "normal")
}

fn parse_vector3(input: &str) -> IResult<&str, Vec3> {
    let (input, _) = multispace0(input)?;
    let (input, x) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = double(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

/// Line reader that tolerates bytes outside UTF-8
struct LossyLines<B> {
    reader: B,
    buf: Vec<u8>,
}

impl<B: BufRead> LossyLines<B> {
    fn new(reader: B) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Next line without its terminator, `None` at end of input
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
            self.buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

/// Read the line following a `vertex` line as the next triangle corner
fn next_vertex<B: BufRead>(lines: &mut LossyLines<B>) -> Result<Option<Vec3>, StlError> {
    match lines.next_line()? {
        Some(line) => match classify(&line) {
            Line::Vertex(v) => Ok(v),
            _ => Ok(None),
        },
        None => Ok(None),
    }
}

/// Parse ASCII STL from any buffered reader
///
/// Only I/O failures are errors. Lines that do not parse are skipped or
/// dropped and reported through the log.
pub fn parse_ascii_stl<B: BufRead>(reader: B) -> Result<StlMesh, StlError> {
    let mut result = StlMesh::default();
    let mut normal = Vec3::zeros();
    let mut lines = LossyLines::new(reader);
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line()? {
        line_number += 1;

        match classify(&line) {
            Line::Normal(parsed) => {
                normal = parsed.unwrap_or_else(|| {
                    warn!("line {}: malformed normal, using zero vector", line_number);
                    Vec3::zeros()
                });
                result.normals.extend_from_slice(&[normal; 3]);
            }
            Line::Vertex(p1) => {
                let p2 = next_vertex(&mut lines)?;
                let p3 = next_vertex(&mut lines)?;
                line_number += 2;

                match (p1, p2, p3) {
                    (Some(p1), Some(p2), Some(p3)) => result.push_facet(p1, p2, p3, normal),
                    _ => {
                        warn!(
                            "line {}: malformed or truncated vertex block, facet dropped",
                            line_number - 2
                        );
                        result.dropped_facets += 1;
                    }
                }
            }
            Line::Other => {}
        }
    }

    debug!(
        "parsed {} facets ({} dropped) from {} lines",
        result.facet_count(),
        result.dropped_facets,
        line_number
    );
    Ok(result)
}

/// Parse ASCII STL held in memory
pub fn parse_ascii_str(input: &str) -> StlMesh {
    // Reading from a byte slice cannot fail
    parse_ascii_stl(input.as_bytes()).unwrap_or_default()
}

/// Read an ASCII STL file, reporting why nothing could be loaded
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<StlMesh, StlError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| StlError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = parse_ascii_stl(BufReader::new(file))?;
    if mesh.mesh.is_empty() {
        return Err(StlError::NoFacets(path.to_path_buf()));
    }

    info!("loaded {} facets from {}", mesh.facet_count(), path.display());
    Ok(mesh)
}

/// Read an ASCII STL file, returning empty collections when it cannot be
/// opened or read
pub fn load_mesh<P: AsRef<Path>>(path: P) -> StlMesh {
    match read_mesh(path) {
        Ok(mesh) => mesh,
        Err(e) => {
            warn!("{}", e);
            StlMesh::default()
        }
    }
}
