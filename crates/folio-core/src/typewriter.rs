//! Typewriter banner: types a phrase one character at a time, holds it,
//! erases it, then moves on to the next phrase. Each phrase carries a subtitle
//! and a set of tags that are swapped in when typing starts.

use std::time::{Duration, Instant};

use crate::config::{PhraseConfig, TypingConfig};

/// Tags per displayed row
pub const TAGS_PER_ROW: usize = 4;

/// Stagger between consecutive tags appearing
pub const TAG_STAGGER: Duration = Duration::from_millis(100);

/// Pause added to the typing delay before the next phrase starts
const NEXT_PHRASE_PAUSE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    Erasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingState {
    pub phrase_index: usize,
    pub char_index: usize,
    pub phase: TypingPhase,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<PhraseConfig>,
    typing_delay: Duration,
    erasing_delay: Duration,
    hold: Duration,
    phrase_index: usize,
    char_index: usize,
    phase: TypingPhase,
    text: String,
    cursor_typing: bool,
    /// Phrase whose subtitle and tags are on display
    content_index: usize,
    content_since: Option<Instant>,
    next_step: Option<Instant>,
}

impl Typewriter {
    pub fn new(config: &TypingConfig) -> Self {
        Self {
            phrases: config.phrases.clone(),
            typing_delay: Duration::from_millis(config.typing_delay_ms),
            erasing_delay: Duration::from_millis(config.erasing_delay_ms),
            hold: Duration::from_millis(config.new_text_delay_ms),
            phrase_index: 0,
            char_index: 0,
            phase: TypingPhase::Typing,
            text: String::new(),
            cursor_typing: false,
            content_index: 0,
            content_since: None,
            next_step: None,
        }
    }

    /// Show the first phrase's subtitle and tags and begin typing after the hold delay
    pub fn start(&mut self, now: Instant) {
        if self.phrases.is_empty() {
            return;
        }
        self.refresh_content(now);
        self.next_step = Some(now + self.hold);
    }

    pub fn state(&self) -> TypingState {
        TypingState {
            phrase_index: self.phrase_index,
            char_index: self.char_index,
            phase: self.phase,
        }
    }

    /// Text typed so far
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the cursor is mid-word (solid) rather than idle (blinking)
    pub fn cursor_typing(&self) -> bool {
        self.cursor_typing
    }

    pub fn subtitle(&self) -> &str {
        self.phrases
            .get(self.content_index)
            .map(|p| p.subtitle.as_str())
            .unwrap_or("")
    }

    pub fn tags(&self) -> &[String] {
        self.phrases
            .get(self.content_index)
            .map(|p| p.tags.as_slice())
            .unwrap_or(&[])
    }

    /// Tags grouped into display rows
    pub fn tag_rows(&self) -> Vec<&[String]> {
        self.tags().chunks(TAGS_PER_ROW).collect()
    }

    /// Number of tags that have appeared at `now`, given the stagger
    pub fn visible_tags(&self, now: Instant) -> usize {
        let Some(since) = self.content_since else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(since);
        let shown = (elapsed.as_millis() / TAG_STAGGER.as_millis()) as usize + 1;
        shown.min(self.tags().len())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_step
    }

    fn refresh_content(&mut self, now: Instant) {
        self.content_index = self.phrase_index;
        self.content_since = Some(now);
    }

    /// Run every step due at `now`. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(at) = self.next_step.filter(|at| *at <= now) {
            let delay = match self.phase {
                TypingPhase::Typing => self.type_step(at),
                TypingPhase::Erasing => self.erase_step(),
            };
            self.next_step = Some(at + delay);
            changed = true;
        }
        changed
    }

    fn type_step(&mut self, at: Instant) -> Duration {
        if self.char_index == 0 {
            self.refresh_content(at);
        }

        match self.phrases[self.phrase_index].text.chars().nth(self.char_index) {
            Some(ch) => {
                self.cursor_typing = true;
                self.text.push(ch);
                self.char_index += 1;
                self.typing_delay
            }
            None => {
                self.cursor_typing = false;
                self.phase = TypingPhase::Erasing;
                self.hold
            }
        }
    }

    fn erase_step(&mut self) -> Duration {
        if self.char_index > 0 {
            self.cursor_typing = true;
            self.text.pop();
            self.char_index -= 1;
            self.erasing_delay
        } else {
            self.cursor_typing = false;
            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            self.phase = TypingPhase::Typing;
            self.typing_delay + NEXT_PHRASE_PAUSE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn config() -> TypingConfig {
        TypingConfig {
            phrases: vec![
                PhraseConfig {
                    text: "ab".to_string(),
                    subtitle: "first".to_string(),
                    tags: (1..=6).map(|i| format!("t{}", i)).collect(),
                },
                PhraseConfig {
                    text: "é".to_string(),
                    subtitle: "second".to_string(),
                    tags: vec!["x".to_string()],
                },
            ],
            ..TypingConfig::default()
        }
    }

    #[test]
    fn test_first_phrase_waits_for_hold() {
        let t0 = Instant::now();
        let mut writer = Typewriter::new(&config());
        writer.start(t0);
        assert_eq!(writer.subtitle(), "first");
        assert!(!writer.tick(t0 + ms(1999)));
        assert!(writer.tick(t0 + ms(2000)));
        assert_eq!(writer.text(), "a");
        assert!(writer.cursor_typing());
    }

    #[test]
    fn test_full_cycle() {
        let t0 = Instant::now();
        let mut writer = Typewriter::new(&config());
        writer.start(t0);

        // type "a" at 2000, "b" at 2100, finish at 2200
        writer.tick(t0 + ms(2200));
        assert_eq!(writer.text(), "ab");
        assert!(!writer.cursor_typing());
        assert_eq!(writer.state().phase, TypingPhase::Erasing);

        // erase starts after the hold: 4200, 4250, then done at 4300
        writer.tick(t0 + ms(4250));
        assert_eq!(writer.text(), "");
        assert_eq!(writer.state().char_index, 0);

        writer.tick(t0 + ms(4300));
        assert_eq!(
            writer.state(),
            TypingState {
                phrase_index: 1,
                char_index: 0,
                phase: TypingPhase::Typing
            }
        );
        assert_eq!(writer.subtitle(), "first");

        // next phrase after typing delay + 500ms
        writer.tick(t0 + ms(4900));
        assert_eq!(writer.text(), "é");
        assert_eq!(writer.subtitle(), "second");
        assert_eq!(writer.tags(), ["x".to_string()]);
    }

    #[test]
    fn test_wraps_to_first_phrase() {
        let t0 = Instant::now();
        let mut writer = Typewriter::new(&config());
        writer.start(t0);
        writer.tick(t0 + ms(60_000));
        assert!(writer.state().phrase_index < 2);
    }

    #[test]
    fn test_tag_rows_and_stagger() {
        let t0 = Instant::now();
        let mut writer = Typewriter::new(&config());
        assert_eq!(writer.visible_tags(t0), 0);
        writer.start(t0);

        let rows = writer.tag_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[1].len(), 2);

        assert_eq!(writer.visible_tags(t0), 1);
        assert_eq!(writer.visible_tags(t0 + ms(250)), 3);
        assert_eq!(writer.visible_tags(t0 + ms(5000)), 6);
    }

    #[test]
    fn test_empty_phrases_is_inert() {
        let t0 = Instant::now();
        let mut writer = Typewriter::new(&TypingConfig {
            phrases: Vec::new(),
            ..TypingConfig::default()
        });
        writer.start(t0);
        assert!(!writer.tick(t0 + ms(10_000)));
        assert_eq!(writer.text(), "");
        assert_eq!(writer.subtitle(), "");
    }
}
