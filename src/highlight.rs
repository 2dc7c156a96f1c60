use {
    lazy_static::lazy_static,
    regex::Regex,
    std::fmt::{Display, Formatter, Result as FmtResult},
};

lazy_static! {
    /// Matches a string literal (optionally followed by a colon, making it a key), a `true`/`false`/`null` literal,
    /// or a number.
    static ref JSON_TOKEN: Regex = Regex::new(
        r#""(\\u[a-zA-Z0-9]{4}|\\[^u]|[^\\"])*"(\s*:)?|\b(true|false|null)\b|-?[0-9]+(?:\.[0-9]*)?(?:[eE][+\-]?[0-9]+)?"#
    )
    .unwrap();
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    Key,
    String,
    Number,
    Boolean,
    Null,

    /// Punctuation, whitespace, and anything else the highlighter does not recognize.
    Plain,
}

impl TokenKind {
    /// The CSS class used for this kind of token in HTML output, if any.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::Key => Some("json-key"),
            Self::String => Some("json-string"),
            Self::Number => Some("json-number"),
            Self::Boolean => Some("json-boolean"),
            Self::Null => Some("json-null"),
            Self::Plain => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self.css_class() {
            Some(class) => f.write_str(class),
            None => f.write_str("plain"),
        }
    }
}

/// A slice of the input text and how it should be colored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct JsonToken<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> JsonToken<'a> {
    fn new(kind: TokenKind, text: &'a str) -> Self {
        Self {
            kind,
            text,
        }
    }
}

/// Split JSON text into colorable tokens. The text does not need to be valid JSON; unrecognized text comes back as
/// [TokenKind::Plain]. Concatenating the token texts reproduces the input.
pub fn highlight_tokens(text: &str) -> Vec<JsonToken<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in JSON_TOKEN.find_iter(text) {
        if m.start() > last {
            tokens.push(JsonToken::new(TokenKind::Plain, &text[last..m.start()]));
        }

        let matched = m.as_str();
        if matched.starts_with('"') {
            match matched.strip_suffix(':') {
                Some(key) => {
                    tokens.push(JsonToken::new(TokenKind::Key, key));
                    tokens.push(JsonToken::new(TokenKind::Plain, ":"));
                }
                None => tokens.push(JsonToken::new(TokenKind::String, matched)),
            }
        } else if matched == "true" || matched == "false" {
            tokens.push(JsonToken::new(TokenKind::Boolean, matched));
        } else if matched == "null" {
            tokens.push(JsonToken::new(TokenKind::Null, matched));
        } else {
            tokens.push(JsonToken::new(TokenKind::Number, matched));
        }

        last = m.end();
    }

    if last < text.len() {
        tokens.push(JsonToken::new(TokenKind::Plain, &text[last..]));
    }

    tokens
}

/// Render JSON text as HTML, wrapping each recognized token in `<span class="json-...">`. All text is HTML-escaped.
pub fn highlight_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);

    for token in highlight_tokens(text) {
        match token.kind.css_class() {
            Some(class) => {
                result.push_str("<span class=\"");
                result.push_str(class);
                result.push_str("\">");
                push_escaped(&mut result, token.text);
                result.push_str("</span>");
            }
            None => push_escaped(&mut result, token.text),
        }
    }

    result
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
