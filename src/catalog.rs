use std::io;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::Coord;
use crate::parse_util;
use crate::parse_util::ConvertError;
use crate::pattern::Pattern;

/// The machines shipped with the binary.
const BUILTIN: &str = include_str!("../assets/machines.txt");

/// Anything bigger is assumed to be a typo.
const MAX_PATTERN_SIZE: Coord = 1024;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unexpected end of catalog, expected {expected} of record #{record}")]
    UnexpectedEof {
        record: usize,
        expected: &'static str,
    },

    #[error("Invalid pattern name in record #{record}: {source}")]
    InvalidName {
        record: usize,
        #[source]
        source: ConvertError,
    },

    #[error("Invalid {field} \"{token}\" for pattern \"{pattern}\": expected an integer in [1, 1024]")]
    InvalidDimension {
        pattern: String,
        field: &'static str,
        token: String,
    },

    #[error("Pattern index {index} out of range, the catalog holds {count} patterns")]
    IndexOutOfRange { index: usize, count: usize },
}

/// An immutable list of patterns, loaded once.
///
/// # Format
/// A stream of whitespace separated tokens. Each record is
/// ```notrust
/// name width height
/// ```
/// followed by `height` rows of `width` tokens each. A token starting with `X` is a live cell,
/// anything else (conventionally `.`) is dead. Line breaks carry no meaning.
///
/// ```notrust
/// Glider 3 3
/// . X .
/// . . X
/// X X X
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    patterns: Vec<Pattern>,
}

impl Catalog {
    /// Parse a whole catalog. Either every record parses, or nothing is returned.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut bytes = text.as_bytes();
        let mut patterns: Vec<Pattern> = Vec::new();

        loop {
            let (Some(name), rest) = parse_util::take_token(bytes) else {
                break;
            };

            let record = patterns.len();
            let name: String = parse_util::convert(name)
                .map_err(|source| CatalogError::InvalidName { record, source })?;

            let (width, rest) = read_dimension(rest, record, &name, "width")?;
            let (height, rest) = read_dimension(rest, record, &name, "height")?;
            let (template, rest) = read_template(rest, record, width * height)?;

            if patterns.iter().any(|p| p.name() == name) {
                warn!(name, "pattern name defined twice, lookups by name return the first");
            }

            patterns.push(Pattern::new(name, width, height, template));
            bytes = rest;
        }

        Ok(Self { patterns })
    }

    /// Read and parse the catalog at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();

        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::parse(&text)?;
        info!(path = %path.display(), count = catalog.count(), "pattern catalog loaded");

        Ok(catalog)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(BUILTIN)
    }

    pub fn count(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Pattern, CatalogError> {
        self.patterns
            .get(index)
            .ok_or(CatalogError::IndexOutOfRange {
                index,
                count: self.count(),
            })
    }

    pub fn name(&self, index: usize) -> Result<&str, CatalogError> {
        self.get(index).map(Pattern::name)
    }

    /// First pattern called `name`.
    pub fn find(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }
}

fn read_dimension<'a>(
    bytes: &'a [u8],
    record: usize,
    pattern: &str,
    field: &'static str,
) -> Result<(Coord, &'a [u8]), CatalogError> {
    let (Some(token), bytes) = parse_util::take_token(bytes) else {
        return Err(CatalogError::UnexpectedEof {
            record,
            expected: field,
        });
    };

    match parse_util::convert::<Coord>(token) {
        Ok(n) if (1..=MAX_PATTERN_SIZE).contains(&n) => Ok((n, bytes)),
        _ => Err(CatalogError::InvalidDimension {
            pattern: pattern.to_string(),
            field,
            token: String::from_utf8_lossy(token).to_string(),
        }),
    }
}

fn read_template(
    mut bytes: &[u8],
    record: usize,
    cells: Coord,
) -> Result<(Vec<bool>, &[u8]), CatalogError> {
    let mut template = Vec::with_capacity(cells as usize);

    for _ in 0..cells {
        let (Some(token), rest) = parse_util::take_token(bytes) else {
            return Err(CatalogError::UnexpectedEof {
                record,
                expected: "a cell",
            });
        };

        template.push(parse_util::peek_1(token) == Some(b'X'));
        bytes = rest;
    }

    Ok((template, bytes))
}

#[cfg(test)]
mod test {
    use super::Catalog;
    use super::CatalogError;

    const TWO: &str = "
        Blinker 3 1
        X X X

        Block 2 2
        X X
        X X
    ";

    #[test]
    fn parse_two_records() {
        let catalog = Catalog::parse(TWO).unwrap();

        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.name(0).unwrap(), "Blinker");
        assert_eq!(catalog.name(1).unwrap(), "Block");

        let blinker = catalog.get(0).unwrap();
        assert_eq!((blinker.width(), blinker.height()), (3, 1));
        assert_eq!(blinker.population(), 3);
    }

    #[test]
    fn only_leading_x_is_alive() {
        let catalog = Catalog::parse("Odd 4 1 Xo x . XX").unwrap();
        let odd = catalog.get(0).unwrap();

        assert!(odd.is_alive(0, 0));
        assert!(!odd.is_alive(1, 0));
        assert!(!odd.is_alive(2, 0));
        assert!(odd.is_alive(3, 0));
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::parse(" \n\t").unwrap();

        assert!(catalog.is_empty());
    }

    #[test]
    fn eof_mid_template() {
        let err = Catalog::parse("Block 2 2 X X X").unwrap_err();

        assert!(matches!(
            err,
            CatalogError::UnexpectedEof {
                record: 0,
                expected: "a cell"
            }
        ));
    }

    #[test]
    fn eof_mid_header() {
        let err = Catalog::parse("Blinker 3 1 X X X Block 2").unwrap_err();

        assert!(matches!(
            err,
            CatalogError::UnexpectedEof {
                record: 1,
                expected: "height"
            }
        ));
    }

    #[test]
    fn invalid_dimensions() {
        for text in ["Bad 0 1 X", "Bad -2 1 X", "Bad three 1 X", "Bad 1 99999 X"] {
            let err = Catalog::parse(text).unwrap_err();

            assert!(
                matches!(err, CatalogError::InvalidDimension { .. }),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn index_out_of_range() {
        let catalog = Catalog::parse(TWO).unwrap();

        let err = catalog.get(2).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IndexOutOfRange { index: 2, count: 2 }
        ));
        assert!(catalog.name(7).is_err());
    }

    #[test]
    fn find_by_name() {
        let catalog = Catalog::parse(TWO).unwrap();

        assert_eq!(catalog.find("Block").map(|p| p.population()), Some(4));
        assert!(catalog.find("Glider").is_none());
    }

    #[test]
    fn missing_file() {
        let err = Catalog::load("does/not/exist.txt").unwrap_err();

        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
