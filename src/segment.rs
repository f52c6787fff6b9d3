//! Sentence boundary detection capability.

/// A sentence boundary detector.
///
/// Sentence segmentation is a precondition the chunker depends on but does
/// not define; swap in a language-aware implementation where the default
/// rule-based one is too crude.
pub trait SentenceSegmenter: Send + Sync {
    /// Split text into an ordered sequence of sentences.
    ///
    /// Returns an empty `Vec` for text containing no sentences.
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Splits on `.`, `!` or `?` followed by whitespace (or end of text).
///
/// Terminators stay attached to their sentence. Text without any terminal
/// punctuation comes back as a single sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedSegmenter;

impl SentenceSegmenter for RuleBasedSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if matches!(c, '.' | '!' | '?') {
                let at_boundary = match chars.peek() {
                    Some((_, next)) => next.is_whitespace(),
                    None => true,
                };
                if at_boundary {
                    let end = i + c.len_utf8();
                    let sentence = text[start..end].trim();
                    if !sentence.is_empty() {
                        sentences.push(sentence.to_string());
                    }
                    start = end;
                }
            }
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }

        sentences
    }
}
