//! Word-by-word disclosure of the greeting, driven by distinct slide changes.

/// Ordered words of the greeting. Blank entries are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    words: Vec<String>,
}

impl Message {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words
            .into_iter()
            .map(|word| {
                let word: String = word.into();
                word.trim().to_string()
            })
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn prefix(&self, count: usize) -> String {
        let count = count.min(self.words.len());
        self.words[..count].join(" ")
    }

    pub fn full(&self) -> String {
        self.words.join(" ")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    NotStarted,
    Revealing { word_step: u32 },
    Complete,
}

/// What the text element should show after a slide update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRender {
    pub text: String,
    pub visible: bool,
    /// Restart the opacity transition before showing `text`.
    pub fade_in: bool,
}

impl TextRender {
    pub fn hidden() -> Self {
        Self {
            text: String::new(),
            visible: false,
            fade_in: false,
        }
    }

    pub fn opacity(&self) -> f64 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealStep {
    pub render: TextRender,
    /// True only on the call that reached the full phrase.
    pub completed: bool,
}

#[derive(Clone, Debug)]
pub struct Reveal {
    message: Message,
    steps_per_word: u32,
    initial_words: u32,
    phase: RevealPhase,
    shown: String,
}

impl Reveal {
    pub fn new(message: Message, steps_per_word: u32, initial_words: u32) -> Self {
        Self {
            message,
            steps_per_word: steps_per_word.max(1),
            initial_words,
            phase: RevealPhase::NotStarted,
            shown: String::new(),
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn word_step(&self) -> Option<u32> {
        match self.phase {
            RevealPhase::Revealing { word_step } => Some(word_step),
            _ => None,
        }
    }

    /// First interaction. Later calls are no-ops.
    pub fn begin(&mut self) {
        if self.phase == RevealPhase::NotStarted {
            self.phase = RevealPhase::Revealing { word_step: 0 };
        }
    }

    pub fn word_count(&self) -> usize {
        match self.phase {
            RevealPhase::NotStarted => 0,
            RevealPhase::Revealing { word_step } => self.count_for_step(word_step),
            RevealPhase::Complete => self.message.len(),
        }
    }

    fn count_for_step(&self, word_step: u32) -> usize {
        let count = (word_step / self.steps_per_word).saturating_add(self.initial_words);
        (count as usize).min(self.message.len())
    }

    pub fn on_slide(&mut self, index_changed: bool) -> RevealStep {
        match self.phase {
            RevealPhase::NotStarted => RevealStep {
                render: TextRender::hidden(),
                completed: false,
            },
            RevealPhase::Complete => RevealStep {
                render: TextRender {
                    text: self.message.full(),
                    visible: true,
                    fade_in: false,
                },
                completed: false,
            },
            RevealPhase::Revealing { mut word_step } => {
                if index_changed {
                    word_step = word_step.saturating_add(1);
                }
                let count = self.count_for_step(word_step);
                let completed = count == self.message.len();
                self.phase = if completed {
                    RevealPhase::Complete
                } else {
                    RevealPhase::Revealing { word_step }
                };
                let text = self.message.prefix(count);
                let render = if text.is_empty() {
                    TextRender::hidden()
                } else {
                    TextRender {
                        fade_in: text != self.shown,
                        text: text.clone(),
                        visible: true,
                    }
                };
                self.shown = text;
                RevealStep { render, completed }
            }
        }
    }
}
