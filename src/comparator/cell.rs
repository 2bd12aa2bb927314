//! Cell text parser.
//!
//! Every cell of a comparator table may open with an identifier tag and a
//! verse marker, e.g. `[M,O] 3. In finem` or `K. intellectum`. Parsing runs
//! two ordered matcher lists over the normalized text: identifier matchers
//! first, then marker matchers over whatever the identifier matcher left.
//! The first matcher returning `Some` wins. Parsing never fails; text that
//! matches nothing is returned whole as the body.

/// How the identifiers of a cell were declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdForm {
    /// `[M]`, `[M,O]`, optionally followed by a period.
    Bracketed,
    /// A single capital letter followed by a period: `K.`
    SingleLetter,
    /// No identifier tag.
    #[default]
    Untagged,
}

/// One parsed table cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCell {
    /// Identifiers in declaration order, without duplicates.
    pub ids: Vec<String>,
    pub form: IdForm,
    /// Leading arabic or roman numeral, without its period. May be empty.
    pub marker: String,
    pub body: String,
    /// The cell as it appeared in the source.
    pub raw: String,
}

struct IdMatch<'a> {
    form: IdForm,
    ids: Vec<String>,
    rest: &'a str,
}

struct MarkerMatch<'a> {
    marker: &'a str,
    rest: &'a str,
}

type IdMatcher = for<'a> fn(&'a str) -> Option<IdMatch<'a>>;
type MarkerMatcher = for<'a> fn(&'a str) -> Option<MarkerMatch<'a>>;

const ID_MATCHERS: &[IdMatcher] = &[match_bracketed_ids, match_single_letter_id];
const MARKER_MATCHERS: &[MarkerMatcher] = &[match_arabic_marker, match_roman_marker];

/// Parse one raw cell into identifiers, marker and body.
#[must_use]
pub fn parse_cell(raw: &str) -> ParsedCell {
    let text = normalize(raw);
    if text.is_empty() {
        return ParsedCell { raw: raw.to_owned(), ..ParsedCell::default() };
    }

    let (form, ids, rest) = match ID_MATCHERS.iter().find_map(|m| m(&text)) {
        Some(found) => (found.form, found.ids, found.rest),
        None => (IdForm::Untagged, Vec::new(), text.as_str()),
    };

    let (marker, body) = match MARKER_MATCHERS.iter().find_map(|m| m(rest)) {
        Some(found) => (found.marker, found.rest),
        None => ("", rest),
    };

    ParsedCell { ids, form, marker: marker.to_owned(), body: body.trim().to_owned(), raw: raw.to_owned() }
}

/// Strip, turn non-breaking spaces into plain spaces, and drop whitespace
/// that precedes a line break (which also folds blank lines away).
fn normalize(raw: &str) -> String {
    let replaced = raw.replace('\u{a0}', " ");
    replaced
        .trim()
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// IDENTIFIER MATCHERS
// =============================================================================

fn match_bracketed_ids(text: &str) -> Option<IdMatch<'_>> {
    let inner_start = text.strip_prefix('[')?;
    let close = inner_start.find(']')?;
    let inner = &inner_start[..close];

    let mut ids: Vec<String> = Vec::new();
    for part in inner.split(',') {
        let id = part.trim();
        if id.is_empty() || !id.chars().all(char::is_alphanumeric) {
            return None;
        }
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_owned());
        }
    }

    let after = &inner_start[close + 1..];
    let after = after.strip_prefix('.').unwrap_or(after);
    Some(IdMatch { form: IdForm::Bracketed, ids, rest: after.trim_start() })
}

fn match_single_letter_id(text: &str) -> Option<IdMatch<'_>> {
    let mut chars = text.char_indices();
    let (_, letter) = chars.next()?;
    if !letter.is_ascii_uppercase() {
        return None;
    }
    let (dot_idx, dot) = chars.next()?;
    if dot != '.' {
        return None;
    }
    let rest = &text[dot_idx + 1..];
    Some(IdMatch { form: IdForm::SingleLetter, ids: vec![letter.to_string()], rest: rest.trim_start() })
}

// =============================================================================
// MARKER MATCHERS
// =============================================================================

/// `\d+\.?\s+`
fn match_arabic_marker(text: &str) -> Option<MarkerMatch<'_>> {
    let digits_end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if digits_end == 0 {
        return None;
    }
    let after = &text[digits_end..];
    let after = after.strip_prefix('.').unwrap_or(after);
    let rest = strip_required_whitespace(after)?;
    Some(MarkerMatch { marker: &text[..digits_end], rest })
}

/// `[IVXLCDM]+\.\s+`
fn match_roman_marker(text: &str) -> Option<MarkerMatch<'_>> {
    let numeral_end = text
        .find(|c: char| !matches!(c, 'I' | 'V' | 'X' | 'L' | 'C' | 'D' | 'M'))
        .unwrap_or(text.len());
    if numeral_end == 0 {
        return None;
    }
    let after = text[numeral_end..].strip_prefix('.')?;
    let rest = strip_required_whitespace(after)?;
    Some(MarkerMatch { marker: &text[..numeral_end], rest })
}

/// Strip one or more leading whitespace characters; `None` if there are none.
fn strip_required_whitespace(text: &str) -> Option<&str> {
    let trimmed = text.trim_start();
    if trimmed.len() == text.len() {
        return None;
    }
    Some(trimmed)
}

#[cfg(test)]
#[path = "cell_test.rs"]
mod tests;
