use std::fmt;

use audiocompare_core::{Endianness, WordWidth};

/// Parse an endianness token: `l`/`little` or `b`/`big`.
pub fn parse_endianness(value: &str) -> Result<Endianness, FormatParseError> {
    match value.trim() {
        "" => Err(FormatParseError::Empty {
            field: Field::Endianness,
        }),
        "l" | "little" => Ok(Endianness::Little),
        "b" | "big" => Ok(Endianness::Big),
        other => Err(FormatParseError::UnknownEndianness {
            found: other.to_string(),
        }),
    }
}

/// Parse a word width token: a whole number of bytes from 1 to 4.
pub fn parse_word_width(value: &str) -> Result<WordWidth, FormatParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormatParseError::Empty {
            field: Field::WordWidth,
        });
    }

    if let Some((index, found)) = trimmed.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(FormatParseError::UnexpectedChar { index, found });
    }

    let out_of_range = || FormatParseError::WidthOutOfRange {
        found: trimmed.to_string(),
    };
    let bytes = trimmed.parse::<u8>().map_err(|_| out_of_range())?;
    WordWidth::new(bytes).map_err(|_| out_of_range())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatParseError {
    Empty { field: Field },
    UnknownEndianness { found: String },
    UnexpectedChar { index: usize, found: char },
    WidthOutOfRange { found: String },
}

impl std::error::Error for FormatParseError {}

impl fmt::Display for FormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatParseError::Empty { field } => write!(f, "{} cannot be empty", field.name()),
            FormatParseError::UnknownEndianness { found } => write!(
                f,
                "unknown endianness '{}'; use l for little or b for big",
                found
            ),
            FormatParseError::UnexpectedChar { index, found } => write!(
                f,
                "unexpected character '{}' at position {} in word width",
                found,
                index + 1
            ),
            FormatParseError::WidthOutOfRange { found } => write!(
                f,
                "word width must be {} to {} bytes (got {})",
                WordWidth::MIN,
                WordWidth::MAX,
                found
            ),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Endianness,
    WordWidth,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Field::Endianness => "endianness",
            Field::WordWidth => "word width",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_endianness_tokens() {
        assert_eq!(parse_endianness("l").unwrap(), Endianness::Little);
        assert_eq!(parse_endianness("little").unwrap(), Endianness::Little);
        assert_eq!(parse_endianness("b").unwrap(), Endianness::Big);
        assert_eq!(parse_endianness(" big ").unwrap(), Endianness::Big);
    }

    #[test]
    fn rejects_unknown_endianness() {
        assert!(matches!(
            parse_endianness("x"),
            Err(FormatParseError::UnknownEndianness { .. })
        ));
        assert!(matches!(
            parse_endianness("L"),
            Err(FormatParseError::UnknownEndianness { .. })
        ));
        assert_eq!(
            parse_endianness(""),
            Err(FormatParseError::Empty {
                field: Field::Endianness
            })
        );
    }

    #[test]
    fn parses_every_supported_width() {
        for bytes in 1..=4u8 {
            let width = parse_word_width(&bytes.to_string()).unwrap();
            assert_eq!(width.bytes(), usize::from(bytes));
        }
    }

    #[test]
    fn rejects_widths_outside_one_to_four() {
        assert!(matches!(
            parse_word_width("0"),
            Err(FormatParseError::WidthOutOfRange { .. })
        ));
        assert!(matches!(
            parse_word_width("5"),
            Err(FormatParseError::WidthOutOfRange { .. })
        ));
        assert!(matches!(
            parse_word_width("300"),
            Err(FormatParseError::WidthOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_widths() {
        assert_eq!(
            parse_word_width("2b"),
            Err(FormatParseError::UnexpectedChar {
                index: 1,
                found: 'b'
            })
        );
        assert!(matches!(
            parse_word_width("-1"),
            Err(FormatParseError::UnexpectedChar { index: 0, .. })
        ));
    }
}
