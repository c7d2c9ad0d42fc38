//! Placeholder scanning.
//!
//! Only `?` and `$<n>` outside quoted identifiers (`"..."`, `` `...` ``) and
//! string literals (`'...'`) are placeholders. A doubled quote inside a
//! quoted region is an escape and keeps the region open.

/// A placeholder found in SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `?`, with its 1-based position among the `?` tokens.
    Positional(usize),
    /// `$n`, with its number.
    Numbered(usize),
}

impl Placeholder {
    /// The 1-based binding index this placeholder refers to.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Positional(n) | Self::Numbered(n) => *n,
        }
    }
}

/// Rewrites every placeholder of `sql`.
///
/// `replace` returns the text to substitute, or `None` to keep the
/// placeholder as written.
pub fn replace_placeholders<F>(sql: &str, mut replace: F) -> String
where
    F: FnMut(Placeholder) -> Option<String>,
{
    let mut out = String::with_capacity(sql.len());
    let mut quote: Option<char> = None;
    let mut positional = 0;
    let mut chars = sql.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
            out.push(ch);
            continue;
        }
        match ch {
            '"' | '\'' | '`' => {
                quote = Some(ch);
                out.push(ch);
            }
            '?' => {
                positional += 1;
                match replace(Placeholder::Positional(positional)) {
                    Some(text) => out.push_str(&text),
                    None => out.push('?'),
                }
            }
            '$' => {
                let mut end = start + 1;
                while let Some((i, digit)) = chars.peek().copied() {
                    if !digit.is_ascii_digit() {
                        break;
                    }
                    end = i + 1;
                    chars.next();
                }
                let token = &sql[start..end];
                let replaced = token[1..]
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| replace(Placeholder::Numbered(n)));
                out.push_str(replaced.as_deref().unwrap_or(token));
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Counts the `?` placeholders of `sql`.
#[must_use]
pub fn count_positional(sql: &str) -> usize {
    let mut count = 0;
    replace_placeholders(sql, |placeholder| {
        if let Placeholder::Positional(_) = placeholder {
            count += 1;
        }
        None
    });
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(sql: &str) -> String {
        replace_placeholders(sql, |p| match p {
            Placeholder::Positional(n) => Some(format!("${n}")),
            Placeholder::Numbered(_) => None,
        })
    }

    #[test]
    fn test_quoted_regions_are_skipped() {
        assert_eq!(
            number(r#"SELECT "is_ok?", `a?b` FROM t WHERE s = '?' AND a = ?"#),
            r#"SELECT "is_ok?", `a?b` FROM t WHERE s = '?' AND a = $1"#
        );
    }

    #[test]
    fn test_doubled_quote_keeps_region_open() {
        assert_eq!(number(r#""a""?" = ? AND 'it''s?' = ?"#), r#""a""?" = $1 AND 'it''s?' = $2"#);
    }

    #[test]
    fn test_numbered_tokens() {
        let mut seen = Vec::new();
        let out = replace_placeholders("a = $1 AND b = $12 AND c = $", |p| {
            seen.push(p);
            None
        });
        assert_eq!(out, "a = $1 AND b = $12 AND c = $");
        assert_eq!(seen, vec![Placeholder::Numbered(1), Placeholder::Numbered(12)]);
    }

    #[test]
    fn test_count_positional() {
        assert_eq!(count_positional("a = ? AND b = '?' AND \"c?\" = ?"), 2);
        assert_eq!(count_positional("no placeholders"), 0);
    }
}
