use super::{
    ast::{DisplayName, MenuConfig, MenuFile, MenuNode, NodeInfo, Row},
    lexer::{Lexer, Token},
};
use crate::error::{CompileError, CompileResult};
use menudef_diagnostics::{Diagnostic, Span, codes};

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

// ─── Keywords ───────────────────────────────────────────────────────────────

const KW_CONFIG: &str = "MenuConfig";
const KW_GROUP: &str = "MenuGroup";
const KW_ROW: &str = "MenuRow";
const KW_ITEM: &str = "MenuItem";
const KW_ITEM_ALT: &str = "MenuItemAlt";
const OPEN: &str = "[";
const CLOSE: &str = "]";

/// Result of parsing a menu definition file.
#[derive(Debug, serde::Serialize)]
pub struct ParseOutput {
    /// The parsed, not yet validated, menu file.
    pub file: MenuFile,
    /// Non-fatal diagnostics (e.g. repeated config keys).
    pub warnings: Vec<Diagnostic>,
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse a menu definition from source text.
///
/// The grammar is checked strictly, but semantic rules (row sizes, labels,
/// duplicates) are left to the later passes.
pub fn parse_str(input: &str) -> CompileResult<ParseOutput> {
    Parser::new(input).parse()
}

// ─── Parser Implementation ─────────────────────────────────────────────────

struct Parser<'a> {
    lexer: Lexer<'a>,
    input_len: usize,
    warnings: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            input_len: input.len(),
            warnings: Vec::new(),
        }
    }

    // ── Token navigation ────────────────────────────────────────────────

    /// Next token; running out of input here is an error.
    fn expect_any(&mut self, expected: &str) -> CompileResult<Token<'a>> {
        match self.lexer.next_token() {
            Some(tok) => Ok(tok),
            None => Err(CompileError::UnexpectedEof {
                expected: expected.to_string(),
                line: self.lexer.line(),
                span: Span::empty(self.input_len),
            }),
        }
    }

    /// Next token, which must be exactly `text`.
    fn expect(&mut self, text: &str) -> CompileResult<Token<'a>> {
        let expected = format!("'{text}'");
        let tok = self.expect_any(&expected)?;
        if tok.text != text {
            return Err(unexpected(&tok, expected));
        }
        Ok(tok)
    }

    // ── Productions ─────────────────────────────────────────────────────

    /// `File := Config MenuGroup`
    fn parse(mut self) -> CompileResult<ParseOutput> {
        let config = self.parse_config()?;

        let mut root: Option<MenuNode> = None;
        while let Some(tok) = self.lexer.next_token() {
            if tok.text != KW_GROUP {
                return Err(unexpected(&tok, format!("'{KW_GROUP}'")));
            }
            if root.is_some() {
                return Err(CompileError::ExtraRoot {
                    line: tok.line,
                    span: tok.span,
                });
            }
            root = Some(self.parse_group(&tok)?);
        }

        let Some(root) = root else {
            return Err(CompileError::MissingRoot {
                line: self.lexer.line(),
                span: Span::empty(self.input_len),
            });
        };

        Ok(ParseOutput {
            file: MenuFile { config, root },
            warnings: self.warnings,
        })
    }

    /// `Config := 'MenuConfig' '[' (ConfigKey Value)* ']'`
    fn parse_config(&mut self) -> CompileResult<MenuConfig> {
        self.expect(KW_CONFIG)?;
        self.expect(OPEN)?;

        let mut config = MenuConfig::default();
        loop {
            let key = self.expect_any("a MenuConfig key or ']'")?;
            let slot = match key.text {
                "ItemName" => &mut config.item_name,
                "ItemNameId" => &mut config.item_name_id,
                "ItemHandler" => &mut config.item_handler,
                "GroupHandler" => &mut config.group_handler,
                CLOSE => break,
                _ => {
                    return Err(unexpected(
                        &key,
                        "'ItemName', 'ItemNameId', 'ItemHandler', 'GroupHandler' or ']'",
                    ));
                }
            };
            let value = self.expect_any(&format!("a value for '{}'", key.text))?;
            if let Some(previous) = slot.replace(value.text.to_string()) {
                self.warnings.push(
                    Diagnostic::warn(
                        codes::DUPLICATE_CONFIG_KEY,
                        format!(
                            "MenuConfig key '{}' repeated at line {}; '{}' replaces '{}'",
                            key.text, key.line, value.text, previous
                        ),
                        Some(key.span),
                    )
                    .with_context(ctx!("key" => key.text, "previous" => previous)),
                );
            }
        }
        Ok(config)
    }

    /// `MenuGroup := 'MenuGroup' Name Label '[' MenuRow* ']'`
    ///
    /// `keyword` is the already-consumed `MenuGroup` token.
    fn parse_group(&mut self, keyword: &Token<'a>) -> CompileResult<MenuNode> {
        let name = self.expect_any("a MenuGroup name")?;
        let label = self.expect_any("a MenuGroup label")?;
        self.expect(OPEN)?;

        let mut rows = Vec::new();
        loop {
            let tok = self.expect_any(&format!("'{KW_ROW}' or ']'"))?;
            match tok.text {
                KW_ROW => rows.push(self.parse_row(&tok)?),
                CLOSE => break,
                _ => return Err(unexpected(&tok, format!("'{KW_ROW}' or ']'"))),
            }
        }

        Ok(MenuNode::Group {
            info: NodeInfo::new(name.text, label.text, keyword.line, keyword.span),
            rows,
        })
    }

    /// `MenuRow := 'MenuRow' '[' Slot* ']'`
    fn parse_row(&mut self, keyword: &Token<'a>) -> CompileResult<Row> {
        self.expect(OPEN)?;

        let mut slots = Vec::new();
        loop {
            let tok = self.expect_any("a menu slot or ']'")?;
            let node = match tok.text {
                KW_ITEM => self.parse_item(&tok)?,
                KW_ITEM_ALT => self.parse_item_alt(&tok)?,
                KW_GROUP => self.parse_group(&tok)?,
                CLOSE => break,
                _ => {
                    return Err(unexpected(
                        &tok,
                        format!("'{KW_ITEM}', '{KW_ITEM_ALT}', '{KW_GROUP}' or ']'"),
                    ));
                }
            };
            slots.push(node);
        }

        Ok(Row {
            slots,
            line: keyword.line,
            span: keyword.span,
        })
    }

    /// `MenuItem := 'MenuItem' Name Label`
    fn parse_item(&mut self, keyword: &Token<'a>) -> CompileResult<MenuNode> {
        let name = self.expect_any("a MenuItem name")?;
        let label = self.expect_any("a MenuItem label")?;
        Ok(MenuNode::Item {
            info: NodeInfo::new(name.text, label.text, keyword.line, keyword.span),
        })
    }

    /// `MenuItemAlt := 'MenuItemAlt' Name AltName Label`
    fn parse_item_alt(&mut self, keyword: &Token<'a>) -> CompileResult<MenuNode> {
        let name = self.expect_any("a MenuItemAlt name")?;
        let altname = self.expect_any("a MenuItemAlt alternate name")?;
        let label = self.expect_any("a MenuItemAlt label")?;
        Ok(MenuNode::ItemAlt {
            info: NodeInfo::new(name.text, label.text, keyword.line, keyword.span),
            altname: DisplayName::new(altname.text),
        })
    }
}

fn unexpected(tok: &Token<'_>, expected: impl Into<String>) -> CompileError {
    CompileError::UnexpectedToken {
        found: tok.text.to_string(),
        expected: expected.into(),
        line: tok.line,
        span: tok.span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_keys_are_collected() {
        let out = parse_str(
            "MenuConfig [ ItemName mNullName ItemNameId mNullNameId \
             ItemHandler mNullHandler GroupHandler mGroupHandler ]\n\
             MenuGroup Root mRoot [ MenuRow [ MenuItem A mA ] ]",
        )
        .unwrap();
        let c = &out.file.config;
        assert_eq!(c.item_name.as_deref(), Some("mNullName"));
        assert_eq!(c.item_name_id.as_deref(), Some("mNullNameId"));
        assert_eq!(c.item_handler.as_deref(), Some("mNullHandler"));
        assert_eq!(c.group_handler.as_deref(), Some("mGroupHandler"));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn repeated_config_key_warns_and_last_wins() {
        let out = parse_str(
            "MenuConfig [ GroupHandler a\nGroupHandler b ]\n\
             MenuGroup Root mRoot [ MenuRow [ MenuItem A mA ] ]",
        )
        .unwrap();
        assert_eq!(out.file.config.group_handler.as_deref(), Some("b"));
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].id, codes::DUPLICATE_CONFIG_KEY);
        assert!(out.warnings[0].message.contains("line 2"));
    }

    #[test]
    fn config_must_come_first() {
        let err = parse_str("MenuGroup Root mRoot [ ]").unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnexpectedToken { ref found, line: 1, .. } if found == "MenuGroup"
        ));
    }

    #[test]
    fn unknown_config_key() {
        let err = parse_str("MenuConfig [ Bogus x ]").unwrap_err();
        assert!(matches!(err, CompileError::UnexpectedToken { ref found, .. } if found == "Bogus"));
    }
}
