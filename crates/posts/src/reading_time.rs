//! 読了時間の見積もり

use blog_core::{as_text, Section};

pub const WORDS_PER_MINUTE: usize = 200;

/// Whitespace-separated words. Empty and whitespace-only text count as zero.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn section_word_count(section: &Section) -> usize {
    count_words(&section.heading) + count_words(&as_text(&section.body))
}

pub fn total_words(content: &[Section]) -> usize {
    content.iter().map(section_word_count).sum()
}

pub fn minutes_for_words(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE)
}

pub fn reading_minutes(content: &[Section]) -> usize {
    minutes_for_words(total_words(content))
}
