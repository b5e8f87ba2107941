//! Inline `style` attribute parsing.

use cssparser::{Delimiter, ParseError, Parser, ParserInput};

use crate::model::Align;

/// Extract the `text-align` value from an inline style attribute.
///
/// Declarations are read in order and the last valid `text-align` wins.
/// Unsupported keywords (`start`, `end`, ...) are ignored.
pub fn text_align(style: &str) -> Option<Align> {
    let mut input = ParserInput::new(style);
    let mut parser = Parser::new(&mut input);
    let mut align = None;

    while !parser.is_exhausted() {
        let declaration: Result<Option<Align>, ParseError<'_, ()>> =
            parser.parse_until_after(Delimiter::Semicolon, |p| {
                let name = p.expect_ident()?.clone();
                p.expect_colon()?;
                let value = p.expect_ident()?.clone();
                if name.eq_ignore_ascii_case("text-align") {
                    Ok(Align::from_keyword(&value))
                } else {
                    Ok(None)
                }
            });
        if let Ok(Some(value)) = declaration {
            align = Some(value);
        }
    }

    align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_align() {
        assert_eq!(text_align("text-align: center"), Some(Align::Center));
        assert_eq!(text_align("text-align:right;"), Some(Align::Right));
        assert_eq!(
            text_align("color: red; TEXT-ALIGN: Justify; margin: 0 auto"),
            Some(Align::Justify)
        );
    }

    #[test]
    fn test_last_declaration_wins() {
        assert_eq!(
            text_align("text-align: left; text-align: right"),
            Some(Align::Right)
        );
    }

    #[test]
    fn test_missing_or_invalid() {
        assert_eq!(text_align(""), None);
        assert_eq!(text_align("color: red"), None);
        assert_eq!(text_align("text-align: start"), None);
        assert_eq!(text_align("text-align"), None);
        assert_eq!(text_align("text-align: 12px; font-weight: bold"), None);
    }
}
