//! Split text into pieces the Translate speech endpoint accepts

/// Longest text the endpoint will speak in one request, in characters
pub const MAX_CHUNK_CHARS: usize = 100;

/// Characters after which a sentence-level split is preferred
const PUNCTUATION: &[char] = &['.', '!', '?', ';', ':', ',', '\n', '¡', '¿', '…', '。', '，'];

/// Split `text` into chunks of at most `max` characters.
///
/// Splits happen after punctuation when possible, then at whitespace, and
/// as a last resort inside a word. Chunks are trimmed and never empty.
pub fn split_text(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut chunks = Vec::new();

    for sentence in split_inclusive_any(text, PUNCTUATION) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        if char_len(sentence) <= max {
            chunks.push(sentence.to_string());
        } else {
            split_words(sentence, max, &mut chunks);
        }
    }

    merge_small(chunks, max)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Like `str::split_inclusive` over a set of characters
fn split_inclusive_any<'a>(text: &'a str, set: &'a [char]) -> impl Iterator<Item = &'a str> {
    text.split_inclusive(move |c: char| set.contains(&c))
}

/// Greedy word packing for sentences longer than `max`
fn split_words(sentence: &str, max: usize, out: &mut Vec<String>) {
    let mut current = String::new();

    for word in sentence.split_whitespace() {
        if char_len(word) > max {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max) {
                out.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            char_len(word)
        } else {
            char_len(&current) + 1 + char_len(word)
        };

        if needed > max {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        out.push(current);
    }
}

/// Join neighbouring chunks while they still fit, to keep request count low
fn merge_small(chunks: Vec<String>, max: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        match merged.last_mut() {
            Some(last) if char_len(last) + 1 + char_len(&chunk) <= max => {
                last.push(' ');
                last.push_str(&chunk);
            }
            _ => merged.push(chunk),
        }
    }

    merged
}
