use std::error::Error;
use std::fmt;
use std::fs;
use std::num::ParseFloatError;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

impl Vertex {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Three vertices laid out as six contiguous floats, ready for upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Triangle {
    pub v: [Vertex; 3],
}

impl Triangle {
    /// Number of floats in the textual form: `v0.x v0.y v1.x v1.y v2.x v2.y`.
    pub const COMPONENTS: usize = 6;

    #[inline]
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { v: [a, b, c] }
    }

    /// Reads and parses the whole file. Called once per frame.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not open the vertex data file {}", path.display()))?;

        let triangle = text
            .parse::<Triangle>()
            .with_context(|| format!("malformed vertex data in {}", path.display()))?;

        Ok(triangle)
    }
}

impl FromStr for Triangle {
    type Err = ParseTriangleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let mut values = [0.0f32; Triangle::COMPONENTS];

        for (index, value) in values.iter_mut().enumerate() {
            let token = tokens.next().ok_or(ParseTriangleError::Missing { index })?;
            *value = token.parse::<f32>().map_err(|source| ParseTriangleError::Invalid {
                index,
                token: token.to_owned(),
                source,
            })?;
        }

        Ok(Triangle::new(
            Vertex::new(values[0], values[1]),
            Vertex::new(values[2], values[3]),
            Vertex::new(values[4], values[5]),
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParseTriangleError {
    /// Input ended before component `index`.
    Missing { index: usize },
    Invalid {
        index: usize,
        token: String,
        source: ParseFloatError,
    },
}

impl fmt::Display for ParseTriangleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseTriangleError::Missing { index } => {
                write!(f, "expected {} floats, found {}", Triangle::COMPONENTS, index)
            }
            ParseTriangleError::Invalid { index, token, .. } => {
                write!(f, "component {} is not a float: {:?}", index, token)
            }
        }
    }
}

impl Error for ParseTriangleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseTriangleError::Missing { .. } => None,
            ParseTriangleError::Invalid { source, .. } => Some(source),
        }
    }
}
