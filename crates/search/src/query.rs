use serde::Serialize;

/// Pattern metacharacters kept verbatim for the downstream matcher.
pub const WILDCARDS: [char; 2] = ['*', '?'];

const QUOTE: char = '"';

/// One search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub text: String,
    /// Came from inside a `"..."` phrase
    pub quoted: bool,
    /// Index of the whitespace-separated query word the term came from.
    /// Terms split out of one word by a wildcard share it.
    pub position: usize,
}

/// Split a query into search terms.
///
/// Whitespace separates words, also inside quoted phrases. Wildcards stick to
/// the term they follow (or, at the start of a term, precede) and end it, so
/// `test*1` gives `test*` and `1`. Other punctuation stays in its word, so
/// `Widget.fire` is one term. Terms without any alphanumeric character are
/// discarded. An unmatched `"` is ignored.
pub fn query_to_terms(query: &str) -> Vec<Term> {
    let mut builder = TermBuilder::default();
    let mut quoted = false;
    let mut open_quotes = quote_count(query) / 2 * 2;
    let mut in_word = false;

    for c in query.chars() {
        if c.is_whitespace() {
            builder.flush(quoted);
            if in_word {
                builder.word += 1;
                in_word = false;
            }
            continue;
        }
        in_word = true;

        if c == QUOTE {
            builder.flush(quoted);
            if quoted {
                quoted = false;
            } else if open_quotes > 0 {
                quoted = true;
                open_quotes -= 2;
            }
            continue;
        }

        if c.is_alphanumeric() {
            if builder.closed {
                builder.flush(quoted);
            }
            builder.push(c, true);
        } else if WILDCARDS.contains(&c) {
            builder.push(c, false);
            builder.closed = builder.has_alphanumeric;
        } else {
            builder.push(c, false);
        }
    }
    builder.flush(quoted);
    builder.terms
}

fn quote_count(query: &str) -> usize {
    query.chars().filter(|&c| c == QUOTE).count()
}

#[derive(Default)]
struct TermBuilder {
    terms: Vec<Term>,
    current: String,
    has_alphanumeric: bool,
    word: usize,
    /// A wildcard after alphanumerics ends the term at the next alphanumeric
    closed: bool,
}

impl TermBuilder {
    fn push(&mut self, c: char, alphanumeric: bool) {
        self.current.push(c);
        self.has_alphanumeric |= alphanumeric;
    }

    fn flush(&mut self, quoted: bool) {
        if self.has_alphanumeric {
            self.terms.push(Term {
                text: std::mem::take(&mut self.current),
                quoted,
                position: self.word,
            });
        } else {
            self.current.clear();
        }
        self.has_alphanumeric = false;
        self.closed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(query: &str) -> Vec<String> {
        query_to_terms(query).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_term_counts() {
        assert_eq!(query_to_terms("test").len(), 1);
        assert_eq!(query_to_terms("test1 test2").len(), 2);
        assert_eq!(query_to_terms("\"test1 test2\"").len(), 2);
        assert_eq!(query_to_terms("test*1 test?2").len(), 4);
        assert_eq!(query_to_terms("!@#$%^&").len(), 0);
        assert!(query_to_terms("").is_empty());
        assert!(query_to_terms("   \t ").is_empty());
    }

    #[test]
    fn test_wildcards_stay_literal() {
        assert_eq!(texts("test*1 test?2"), vec!["test*", "1", "test?", "2"]);
        assert_eq!(texts("*widget get?"), vec!["*widget", "get?"]);
        assert_eq!(texts("on**"), vec!["on**"]);
        assert_eq!(texts("* ?"), Vec::<String>::new());
    }

    #[test]
    fn test_quoted_phrase() {
        let terms = query_to_terms("\"fire event\" widget");
        assert_eq!(
            terms,
            vec![
                Term { text: "fire".into(), quoted: true, position: 0 },
                Term { text: "event".into(), quoted: true, position: 1 },
                Term { text: "widget".into(), quoted: false, position: 2 },
            ]
        );
    }

    #[test]
    fn test_unterminated_quote_is_ignored() {
        let terms = query_to_terms("\"open phrase");
        assert_eq!(terms.len(), 2);
        assert!(terms.iter().all(|t| !t.quoted));

        let terms = query_to_terms("\"a b\" \"c");
        let quoted: Vec<bool> = terms.iter().map(|t| t.quoted).collect();
        assert_eq!(quoted, vec![true, true, false]);
    }

    #[test]
    fn test_punctuation_stays_in_word() {
        assert_eq!(texts("Widget.fire foo-bar"), vec!["Widget.fire", "foo-bar"]);
        assert_eq!(texts("onClick(int) -- ..."), vec!["onClick(int)"]);
        assert_eq!(texts("größe"), vec!["größe"]);
    }

    #[test]
    fn test_position_is_source_word() {
        let positions: Vec<usize> = query_to_terms("test*1  ! test?2")
            .into_iter()
            .map(|t| t.position)
            .collect();
        assert_eq!(positions, vec![0, 0, 2, 2]);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&query_to_terms("a")).unwrap();
        assert_eq!(json, r#"[{"text":"a","quoted":false,"position":0}]"#);
    }
}
