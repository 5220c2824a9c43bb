//! Display-name explosion.
//!
//! Names made only of letters and digits are emitted as a quoted string;
//! any other character outside a glyph escape is an error.
//! Names that reference glyphs of the calculator's small font use `<...>`
//! escapes, e.g. `<Sdegree>F`, and are rewritten into a list of tokens for a
//! `.db` directive:
//!
//! ```text
//! "<Sdegree>F"  ->  ["Sdegree", "'F'"]  ->  .db Sdegree, 'F', 0
//! ```

use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::grammar::ast::{DisplayName, MenuFile, MenuNode};
use crate::traverse::{VisitMut, walk_mut};

/// Opens a glyph reference.
const GLYPH_OPEN: char = '<';
/// Closes a glyph reference.
const GLYPH_CLOSE: char = '>';

/// Why a display name could not be exploded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExplodeError {
    /// A `<` has no matching `>`.
    #[error("missing '>'")]
    MissingClose,
    /// `<>` names no glyph.
    #[error("empty <>")]
    EmptyTag,
    /// A character outside `<...>` is not an ASCII letter or digit.
    #[error("unsupported character '{0}'")]
    UnsupportedChar(char),
}

/// Explode `s` into character and glyph tokens.
///
/// Every ASCII letter or digit becomes a quoted character token (`'N'`);
/// every `<tag>` becomes the bare glyph name `tag`.
pub fn explode_str(s: &str) -> Result<Vec<String>, ExplodeError> {
    let mut tokens = Vec::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        if c.is_ascii_alphanumeric() {
            tokens.push(format!("'{c}'"));
        } else if c == GLYPH_OPEN {
            let body = &s[i + c.len_utf8()..];
            let Some(close) = body.find(GLYPH_CLOSE) else {
                return Err(ExplodeError::MissingClose);
            };
            let tag = &body[..close];
            if tag.is_empty() {
                return Err(ExplodeError::EmptyTag);
            }
            tokens.push(tag.to_string());
            // Skip past the closing '>'.
            for _ in 0..=tag.chars().count() {
                chars.next();
            }
        } else {
            return Err(ExplodeError::UnsupportedChar(c));
        }
    }
    Ok(tokens)
}

/// Check every non-blank name and alternate name, and fill
/// [`DisplayName::exploded`] for those that contain glyph escapes.
///
/// A plain name with a character outside `[A-Za-z0-9]` is rejected too,
/// since it would otherwise break the quoted `.db` string.
pub fn explode_names(file: &mut MenuFile) -> CompileResult<()> {
    let mut exploder = Exploder { exploded: 0 };
    walk_mut(&mut file.root, &mut exploder)?;
    debug!(count = exploder.exploded, "exploded display names");
    Ok(())
}

struct Exploder {
    exploded: usize,
}

impl Exploder {
    fn explode(
        &mut self,
        name: &mut DisplayName,
        line: usize,
        span: menudef_diagnostics::Span,
    ) -> CompileResult<()> {
        // Every name is checked; only glyph names keep the token form.
        let tokens = explode_str(&name.text).map_err(|source| CompileError::InvalidNameSyntax {
            name: name.text.clone(),
            source,
            line,
            span,
        })?;
        if name.contains_special() {
            name.exploded = Some(tokens);
            self.exploded += 1;
        }
        Ok(())
    }
}

impl VisitMut for Exploder {
    type Error = CompileError;

    fn visit_node(&mut self, node: &mut MenuNode, _parent_id: u8) -> CompileResult<()> {
        if node.is_blank() {
            return Ok(());
        }
        match node {
            MenuNode::ItemAlt { info, altname } => {
                self.explode(&mut info.name, info.line, info.span)?;
                self.explode(altname, info.line, info.span)
            }
            MenuNode::Item { info } | MenuNode::Group { info, .. } => {
                self.explode(&mut info.name, info.line, info.span)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_letters_become_char_tokens() {
        assert_eq!(explode_str("NUM").unwrap(), vec!["'N'", "'U'", "'M'"]);
    }

    #[test]
    fn glyph_then_letter() {
        assert_eq!(explode_str("<Sdegree>F").unwrap(), vec!["Sdegree", "'F'"]);
        assert_eq!(explode_str("<Sdegree>C").unwrap(), vec!["Sdegree", "'C'"]);
    }

    #[test]
    fn adjacent_glyphs() {
        assert_eq!(
            explode_str("<ScapDelta><Spercent>").unwrap(),
            vec!["ScapDelta", "Spercent"]
        );
        assert_eq!(
            explode_str("<ScapDelta><Sroot>").unwrap(),
            vec!["ScapDelta", "Sroot"]
        );
    }

    #[test]
    fn glyph_between_letters() {
        assert_eq!(
            explode_str("x<Sroot>2").unwrap(),
            vec!["'x'", "Sroot", "'2'"]
        );
    }

    #[test]
    fn unterminated_glyph_is_rejected() {
        assert_eq!(explode_str("<Sdegree"), Err(ExplodeError::MissingClose));
        assert_eq!(explode_str("A<"), Err(ExplodeError::MissingClose));
    }

    #[test]
    fn empty_glyph_is_rejected() {
        assert_eq!(explode_str("<>"), Err(ExplodeError::EmptyTag));
    }

    #[test]
    fn stray_characters_are_rejected() {
        assert_eq!(explode_str("A>B"), Err(ExplodeError::UnsupportedChar('>')));
        assert_eq!(explode_str("1/X"), Err(ExplodeError::UnsupportedChar('/')));
        assert_eq!(explode_str("é"), Err(ExplodeError::UnsupportedChar('é')));
    }
}
