use std::collections::VecDeque;

use phrase_tokenizer::Tokens;

use crate::tally::PhraseTally;

/// Words per phrase.
pub const PHRASE_LEN: usize = 3;

// While more input may arrive, keep one confirmed word of lookahead.
const STREAMING_DEPTH: usize = PHRASE_LEN + 1;

/// Per-source FIFO of pending words.
///
/// Words enter in source order and leave from the front once the phrase they
/// start has been tallied. A word that touched the end of a chunk is held
/// separately as the trailing partial word until the next chunk (or the end of
/// the source) shows whether it continues.
#[derive(Debug)]
pub struct SlidingWindow {
    pending: VecDeque<String>,
    trailing: Option<String>,
    stats: WindowStats,
}

/// What one source contributed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WindowStats {
    pub words: u64,
    pub phrases: u64,
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl SlidingWindow {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(STREAMING_DEPTH),
            trailing: None,
            stats: WindowStats::default(),
        }
    }

    /// Absorb one tokenized chunk, tallying every phrase that is now safe.
    pub fn on_chunk(&mut self, chunk: Tokens, tally: &PhraseTally) {
        if !chunk.has_text {
            return;
        }
        let Tokens {
            mut words,
            mut trailing,
            starts_with_letter,
            ..
        } = chunk;

        if let Some(partial) = self.trailing.take() {
            // The seam sits inside a word only if this chunk opens with a letter;
            // the first run is then the one touching the seam.
            let continuation = if starts_with_letter {
                words.first_mut().or(trailing.as_mut())
            } else {
                None
            };
            match continuation {
                Some(word) => word.insert_str(0, &partial),
                None => self.push(partial, STREAMING_DEPTH, tally),
            }
        }

        for word in words {
            self.push(word, STREAMING_DEPTH, tally);
        }
        self.trailing = trailing;
    }

    /// Close the source: the trailing word is final, and the last phrase can
    /// be retired without lookahead. Fewer than three leftover words are dropped.
    pub fn finish(mut self, tally: &PhraseTally) -> WindowStats {
        if let Some(partial) = self.trailing.take() {
            self.push(partial, PHRASE_LEN, tally);
        }
        self.drain(PHRASE_LEN, tally);
        self.stats
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn trailing(&self) -> Option<&str> {
        self.trailing.as_deref()
    }

    fn push(&mut self, word: String, depth: usize, tally: &PhraseTally) {
        self.pending.push_back(word);
        self.stats.words += 1;
        self.drain(depth, tally);
    }

    fn drain(&mut self, depth: usize, tally: &PhraseTally) {
        while self.pending.len() >= depth {
            tally.increment(phrase_key(self.pending.iter().take(PHRASE_LEN)));
            self.pending.pop_front();
            self.stats.phrases += 1;
        }
    }
}

/// Join words with single spaces.
pub fn phrase_key<'a>(words: impl IntoIterator<Item = &'a String>) -> String {
    let mut key = String::new();
    for word in words {
        if !key.is_empty() {
            key.push(' ');
        }
        key.push_str(word);
    }
    key
}
