//! Token-budgeted context assembly.

/// Measures the length of a piece of text.
///
/// The assembler is agnostic to the unit: a character count, a tokenizer's
/// token count, or anything else monotone enough to budget against.
pub trait LengthMeasure: Send + Sync {
    /// Return the measured length of `text`.
    fn measure(&self, text: &str) -> usize;
}

/// Measures length as the number of characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharLength;

impl LengthMeasure for CharLength {
    fn measure(&self, text: &str) -> usize {
        text.chars().count()
    }
}

/// Greedily accumulates ranked chunks into a context string under a budget.
///
/// Chunks are taken in ranked order and joined with single spaces. Each
/// chunk is committed only if the tentative result still measures within
/// `max_length`; the first rejection stops assembly entirely — later chunks
/// are discarded, not deferred. A chunk is always wholly included or wholly
/// excluded.
///
/// If the very first chunk alone exceeds the budget, the result is the
/// empty string. That is a valid, if degenerate, outcome.
#[derive(Debug, Clone, Copy)]
pub struct ContextAssembler {
    max_length: usize,
}

impl ContextAssembler {
    /// Create an assembler with the given maximum measured length.
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Assemble ranked chunk texts into a single context string.
    ///
    /// The returned string's measured length never exceeds `max_length`.
    pub fn assemble<'a, I>(&self, ranked: I, measure: &dyn LengthMeasure) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut context = String::new();
        for chunk in ranked {
            let tentative = if context.is_empty() {
                chunk.to_string()
            } else {
                format!("{context} {chunk}")
            };
            if measure.measure(&tentative) <= self.max_length {
                context = tentative;
            } else {
                break;
            }
        }
        context
    }
}
