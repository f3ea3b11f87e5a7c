//! Article documents: a metadata header and the article text.

use lectern_core::{ContentError, Diagnostics};
use serde::Deserialize;

use super::{ParseOutcome, read_header};

/// A parsed article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Article title, if given.
    pub title: Option<String>,
    /// Author, if given.
    pub author: Option<String>,
    /// Original URL, if given.
    pub source_url: Option<String>,
    /// Article text after the header, searched by excerpt anchors.
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
struct ArticleHeader {
    title: Option<String>,
    author: Option<String>,
    #[serde(alias = "sourceUrl", alias = "url")]
    source_url: Option<String>,
}

/// Parse an article document.
pub fn parse_article(text: &str, file: &str) -> ParseOutcome<Article> {
    let mut diagnostics = Diagnostics::new();
    let Some(header) = read_header(text, file, &mut diagnostics) else {
        return ParseOutcome::new(None, diagnostics);
    };

    let meta: ArticleHeader = match header.deserialize() {
        Ok(meta) => meta,
        Err(e) => {
            diagnostics.push(
                ContentError::warning(file, format!("Ignoring unreadable article metadata: {e}"))
                    .at_line(1)
                    .with_suggestion("'title', 'author' and 'source_url' must be plain strings"),
            );
            ArticleHeader::default()
        }
    };

    if header.body().trim().is_empty() {
        diagnostics.push(ContentError::warning(file, "Article has no text").at_line(header.body_line()));
    }

    let article = Article {
        title: meta.title,
        author: meta.author,
        source_url: meta.source_url,
        body: header.body().to_string(),
    };
    ParseOutcome::new(Some(article), diagnostics)
}
