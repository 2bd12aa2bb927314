//! Character-width text wrapping.
//!
//! Widths are counted in characters, not measured glyphs: the layout engine
//! sizes rows from line counts before anything is drawn, and the SVG backend
//! has no font metrics to consult.

/// Wrap `text` to at most `width` characters per line.
///
/// Existing newlines are hard breaks. Words are never split unless a single
/// word is longer than `width`, in which case it starts a fresh line and is
/// broken into `width`-sized chunks. Blank input yields one empty line.
#[must_use]
pub fn wrap_text_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let words: Vec<&str> = raw_line.split_whitespace().collect();
        if words.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in words {
            let word_len = char_len(word);
            if current.is_empty() {
                if word_len <= width {
                    current.push_str(word);
                } else {
                    let mut chunks = break_long_word(word, width);
                    if let Some(last) = chunks.pop() {
                        out.extend(chunks);
                        current = last;
                    }
                }
                continue;
            }

            if char_len(&current) + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                out.push(std::mem::take(&mut current));
                if word_len <= width {
                    current = word.to_owned();
                } else {
                    let mut chunks = break_long_word(word, width);
                    if let Some(last) = chunks.pop() {
                        out.extend(chunks);
                        current = last;
                    }
                }
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Number of lines [`wrap_text_lines`] would produce. Always at least 1.
#[must_use]
pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    wrap_text_lines(text, width).len()
}

fn break_long_word(word: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
