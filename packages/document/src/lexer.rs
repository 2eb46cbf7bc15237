//! Lexers for imported markup and stylesheets using logos
//!
//! Markup is tokenized at tag granularity; attribute lists and stylesheet
//! text get their own token sets.

use logos::{Lexer, Logos};

/// Tag-level tokens of an HTML source
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupToken<'src> {
    #[token("<!--", lex_markup_comment)]
    Comment(&'src str),

    /// `<!DOCTYPE html>`, `<![CDATA[...]]>` and friends
    #[regex(r"<![a-zA-Z\[][^>]*>", |lex| lex.slice())]
    Declaration(&'src str),

    #[regex(r#"<[a-zA-Z][a-zA-Z0-9:_.-]*([^>"']|"[^"]*"|'[^']*')*>"#, |lex| lex.slice())]
    OpenTag(&'src str),

    #[regex(r"</[a-zA-Z][a-zA-Z0-9:_.-]*[^>]*>", |lex| lex.slice())]
    CloseTag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),
}

fn lex_markup_comment<'src>(lex: &mut Lexer<'src, MarkupToken<'src>>) -> &'src str {
    let rest = lex.remainder();
    let end = rest.find("-->").map(|i| i + 3).unwrap_or(rest.len());
    lex.bump(end);
    lex.slice()
}

/// Tokens inside an open tag, after the tag name
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum AttrToken<'src> {
    #[token("=")]
    Eq,

    #[token("/")]
    Slash,

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        &s[1..s.len()-1]  // Strip quotes
    })]
    DoubleQuoted(&'src str),

    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        &s[1..s.len()-1]  // Strip quotes
    })]
    SingleQuoted(&'src str),

    #[regex(r#"[^ \t\r\n\f"'<>/=]+"#, |lex| lex.slice())]
    Word(&'src str),
}

/// Stylesheet tokens
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssToken<'src> {
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(";")]
    Semi,

    #[token("/*", lex_css_comment)]
    Comment(&'src str),

    #[token("/")]
    Slash,

    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    String(&'src str),

    #[regex(r"'([^'\\]|\\.)*'", |lex| lex.slice())]
    SingleQuoteString(&'src str),

    #[regex(r#"[^{};"'/]+"#, |lex| lex.slice())]
    Chunk(&'src str),
}

fn lex_css_comment<'src>(lex: &mut Lexer<'src, CssToken<'src>>) -> &'src str {
    let rest = lex.remainder();
    let end = rest.find("*/").map(|i| i + 2).unwrap_or(rest.len());
    lex.bump(end);
    lex.slice()
}

impl<'src> CssToken<'src> {
    /// Whether a comment token was closed with `*/`
    pub fn is_terminated_comment(&self) -> bool {
        match self {
            CssToken::Comment(text) => text.len() >= 4 && text.ends_with("*/"),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_markup_tags_and_text() {
        let tokens: Vec<_> = MarkupToken::lexer(r#"<p class="a>b">Hi</p>"#)
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], MarkupToken::OpenTag(r#"<p class="a>b">"#));
        assert_eq!(tokens[1], MarkupToken::Text("Hi"));
        assert_eq!(tokens[2], MarkupToken::CloseTag("</p>"));
    }

    #[test]
    fn test_lex_markup_comment_runs_to_terminator() {
        let tokens: Vec<_> = MarkupToken::lexer("<!-- a > b -->x")
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(tokens[0], MarkupToken::Comment("<!-- a > b -->"));
        assert_eq!(tokens[1], MarkupToken::Text("x"));
    }

    #[test]
    fn test_lex_doctype() {
        let tokens: Vec<_> = MarkupToken::lexer("<!DOCTYPE html><html>")
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(tokens[0], MarkupToken::Declaration("<!DOCTYPE html>"));
        assert_eq!(tokens[1], MarkupToken::OpenTag("<html>"));
    }

    #[test]
    fn test_lex_attributes() {
        let tokens: Vec<_> = AttrToken::lexer(r#"id="Title" data-x='1' hidden"#)
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(
            tokens,
            vec![
                AttrToken::Word("id"),
                AttrToken::Eq,
                AttrToken::DoubleQuoted("Title"),
                AttrToken::Word("data-x"),
                AttrToken::Eq,
                AttrToken::SingleQuoted("1"),
                AttrToken::Word("hidden"),
            ]
        );
    }

    #[test]
    fn test_lex_css_comment() {
        let mut lexer = CssToken::lexer("/* note */a{}");
        let first = lexer.next().unwrap().unwrap();
        assert_eq!(first, CssToken::Comment("/* note */"));
        assert!(first.is_terminated_comment());

        let unterminated = CssToken::lexer("/* open").next().unwrap().unwrap();
        assert!(!unterminated.is_terminated_comment());
    }
}
