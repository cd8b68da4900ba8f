//! Scanner for Java references embedded in JSNI bodies.
//!
//! ```text
//! @com.example.Foo::bar(ILjava/lang/String;)   method
//! @com.example.Foo::new(I)                     constructor
//! @com.example.Foo::count                      field
//! @com.example.Foo                             class only
//! ```
//!
//! The signature between the parentheses is kept verbatim; it is compared
//! against erased descriptors, never re-parsed here.

use crate::model::{JsniReference, MemberKind};
use smol_str::SmolStr;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    EmptyClassName,
    MissingMemberName,
    UnbalancedParentheses,
    MissingConstructorSignature,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MalformedReason::EmptyClassName => "expected a class name after '@'",
            MalformedReason::MissingMemberName => "expected a member name after '::'",
            MalformedReason::UnbalancedParentheses => "unbalanced parentheses in parameter signature",
            MalformedReason::MissingConstructorSignature => {
                "constructor reference requires a parameter signature"
            }
        };
        f.write_str(msg)
    }
}

/// A `@...::` sequence that could not be read as a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedReference {
    pub offset: usize,
    pub length: usize,
    pub text: String,
    pub reason: MalformedReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsniToken {
    Reference(JsniReference),
    Malformed(MalformedReference),
}

/// Single-pass iterator over the references of one JSNI body.
pub struct JsniScanner<'a> {
    body: &'a str,
    base_offset: usize,
    owner: SmolStr,
    pos: usize,
}

impl<'a> JsniScanner<'a> {
    /// `base_offset` is the position of `body` within the source file.
    pub fn new(body: &'a str, base_offset: usize, owner: &str) -> Self {
        Self {
            body,
            base_offset,
            owner: SmolStr::new(owner),
            pos: 0,
        }
    }

    fn malformed(&mut self, start: usize, end: usize, reason: MalformedReason) -> JsniToken {
        self.pos = end.max(start + 1);
        JsniToken::Malformed(MalformedReference {
            offset: self.base_offset + start,
            length: end - start,
            text: self.body[start..end].to_string(),
            reason,
        })
    }

    fn reference(
        &mut self,
        start: usize,
        end: usize,
        class_name: &str,
        member_name: &str,
        kind: MemberKind,
        signature: &str,
    ) -> JsniToken {
        self.pos = end;
        JsniToken::Reference(JsniReference::new(
            self.base_offset + start,
            end - start,
            class_name,
            member_name,
            kind,
            signature,
            self.owner.clone(),
        ))
    }

    /// Try to read a reference whose `@` is at `start`.
    fn scan_at(&mut self, start: usize) -> Option<JsniToken> {
        let body = self.body;
        let class_start = start + 1;
        let class_end = scan_qualified_name(body, class_start);
        let class_name = &body[class_start..class_end];

        if class_name.is_empty() {
            if body[class_start..].starts_with("::") {
                let end = scan_identifier(body, class_start + 2);
                return Some(self.malformed(start, end, MalformedReason::EmptyClassName));
            }
            // A bare '@' is not a reference.
            return None;
        }

        if !body[class_end..].starts_with("::") {
            return Some(self.reference(start, class_end, class_name, "", MemberKind::ClassOnly, ""));
        }

        let member_start = class_end + 2;
        let member_end = scan_identifier(body, member_start);
        let member_name = &body[member_start..member_end];
        if member_name.is_empty() {
            return Some(self.malformed(start, member_start, MalformedReason::MissingMemberName));
        }

        let is_constructor = member_name == "new";
        if !body[member_end..].starts_with('(') {
            if is_constructor {
                return Some(self.malformed(
                    start,
                    member_end,
                    MalformedReason::MissingConstructorSignature,
                ));
            }
            return Some(self.reference(start, member_end, class_name, member_name, MemberKind::Field, ""));
        }

        let Some(close) = find_closing_paren(body, member_end) else {
            return Some(self.malformed(start, member_end + 1, MalformedReason::UnbalancedParentheses));
        };
        let signature = &body[member_end + 1..close];
        let kind = if is_constructor {
            MemberKind::Constructor
        } else {
            MemberKind::Method
        };
        Some(self.reference(start, close + 1, class_name, member_name, kind, signature))
    }
}

impl Iterator for JsniScanner<'_> {
    type Item = JsniToken;

    fn next(&mut self) -> Option<JsniToken> {
        while self.pos < self.body.len() {
            let start = self.pos + self.body[self.pos..].find('@')?;
            self.pos = start + 1;
            if let Some(token) = self.scan_at(start) {
                return Some(token);
            }
        }
        None
    }
}

/// Well-formed references of a JSNI body; malformed ones are skipped.
pub fn parse_references<'a>(
    body: &'a str,
    base_offset: usize,
    owner: &str,
) -> impl Iterator<Item = JsniReference> + use<'a> {
    JsniScanner::new(body, base_offset, owner).filter_map(|token| match token {
        JsniToken::Reference(r) => Some(r),
        JsniToken::Malformed(_) => None,
    })
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// End of the identifier starting at `start` (equal to `start` if there is none).
fn scan_identifier(text: &str, start: usize) -> usize {
    let mut chars = text[start..].char_indices();
    match chars.next() {
        Some((_, c)) if is_identifier_start(c) => {}
        _ => return start,
    }
    for (i, c) in chars {
        if !is_identifier_part(c) {
            return start + i;
        }
    }
    text.len()
}

/// End of a dotted name starting at `start`. A trailing '.' is not consumed.
fn scan_qualified_name(text: &str, start: usize) -> usize {
    let mut end = scan_identifier(text, start);
    if end == start {
        return start;
    }
    while text[end..].starts_with('.') {
        let next = scan_identifier(text, end + 1);
        if next == end + 1 {
            break;
        }
        end = next;
    }
    end
}

/// Index of the ')' matching the '(' at `open`.
fn find_closing_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}
