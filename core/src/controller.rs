use crate::config::{ConfigError, KnobConfig};
use crate::geometry::{angle_of, wrap_delta, wrap_index, KnobRect, RotationMap};
use crate::reveal::{Message, Reveal, RevealPhase, TextRender};

/// DOM write requested by the controller. Applied in order.
#[derive(Clone, Debug, PartialEq)]
pub enum KnobEffect {
    SetRotation(f64),
    ActivateSlide(usize),
    Text(TextRender),
    StartHeartRain,
    ShowFlowers,
    PlaySong,
    SetAriaValue(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Next,
    Previous,
}

impl KeyCommand {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "ArrowUp" => Some(KeyCommand::Next),
            "ArrowLeft" | "ArrowDown" => Some(KeyCommand::Previous),
            _ => None,
        }
    }

    fn offset(self) -> i64 {
        match self {
            KeyCommand::Next => 1,
            KeyCommand::Previous => -1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        start_angle: f64,
        start_rotation: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SongState {
    Silent,
    Requested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeartRainState {
    Idle,
    Started,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowerState {
    Hidden,
    Shown,
}

/// Which optional collaborators the page actually has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnobLayout {
    pub slide_count: usize,
    pub has_text: bool,
    pub has_song: bool,
}

impl KnobLayout {
    pub fn new(slide_count: usize) -> Self {
        Self {
            slide_count,
            has_text: true,
            has_song: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct KnobController {
    map: RotationMap,
    layout: KnobLayout,
    current_index: usize,
    rotation: f64,
    drag: DragState,
    reveal: Reveal,
    song: SongState,
    hearts: HeartRainState,
    flowers: FlowerState,
}

impl KnobController {
    pub fn new(config: &KnobConfig, layout: KnobLayout) -> Result<Self, ConfigError> {
        config.validate()?;
        if layout.slide_count == 0 {
            return Err(ConfigError::NoSlides);
        }
        let map = RotationMap::new(layout.slide_count, config.base_rotation_deg);
        let message = Message::new(config.words.iter().cloned());
        Ok(Self {
            map,
            layout,
            current_index: 0,
            rotation: map.rotation_for_index(0),
            drag: DragState::Idle,
            reveal: Reveal::new(message, config.steps_per_word, config.initial_words),
            song: SongState::Silent,
            hearts: HeartRainState::Idle,
            flowers: FlowerState::Hidden,
        })
    }

    /// Initial render: slide 0, empty text, knob at the base rotation.
    pub fn init(&mut self) -> Vec<KnobEffect> {
        self.show_slide(0)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Last rotation written to the knob, in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn rotation_map(&self) -> RotationMap {
        self.map
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn has_interacted(&self) -> bool {
        self.reveal.phase() != RevealPhase::NotStarted
    }

    pub fn reveal_phase(&self) -> RevealPhase {
        self.reveal.phase()
    }

    pub fn word_step(&self) -> Option<u32> {
        self.reveal.word_step()
    }

    pub fn word_count(&self) -> usize {
        self.reveal.word_count()
    }

    pub fn song_state(&self) -> SongState {
        self.song
    }

    pub fn heart_rain_state(&self) -> HeartRainState {
        self.hearts
    }

    pub fn flower_state(&self) -> FlowerState {
        self.flowers
    }

    /// Selects a slide. Any integer is accepted and wrapped into range.
    pub fn show_slide(&mut self, index: i64) -> Vec<KnobEffect> {
        let previous = self.current_index;
        let index = wrap_index(index, self.map.slide_count());
        self.current_index = index;

        let mut effects = vec![KnobEffect::ActivateSlide(index)];
        if self.layout.has_text {
            let step = self.reveal.on_slide(index != previous);
            effects.push(KnobEffect::Text(step.render));
            if step.completed {
                self.celebrate(&mut effects);
            }
        }
        if !self.is_dragging() {
            self.snap(&mut effects);
        }
        effects.push(KnobEffect::SetAriaValue(index));
        effects
    }

    pub fn handle_start(&mut self, rect: KnobRect, x: f64, y: f64) -> Vec<KnobEffect> {
        let mut effects = Vec::new();
        self.begin_interaction(&mut effects);
        self.drag = DragState::Dragging {
            start_angle: angle_of(rect, x, y),
            start_rotation: self.map.relative_for_index(self.current_index),
        };
        effects
    }

    pub fn handle_move(&mut self, rect: KnobRect, x: f64, y: f64) -> Vec<KnobEffect> {
        let DragState::Dragging {
            start_angle,
            start_rotation,
        } = self.drag
        else {
            return Vec::new();
        };
        let delta = wrap_delta(angle_of(rect, x, y) - start_angle);
        let relative = start_rotation + delta;
        let mut effects = Vec::new();
        self.set_rotation(self.map.visual(relative), &mut effects);
        effects.extend(self.show_slide(self.map.index_for_rotation(relative)));
        effects
    }

    pub fn handle_end(&mut self) -> Vec<KnobEffect> {
        let mut effects = Vec::new();
        if self.is_dragging() {
            self.snap(&mut effects);
        }
        self.drag = DragState::Idle;
        effects
    }

    pub fn handle_key(&mut self, command: KeyCommand) -> Vec<KnobEffect> {
        let mut effects = Vec::new();
        self.begin_interaction(&mut effects);
        effects.extend(self.show_slide(self.current_index as i64 + command.offset()));
        effects
    }

    fn begin_interaction(&mut self, effects: &mut Vec<KnobEffect>) {
        self.reveal.begin();
        // A rejected play() still counts; the song is never requested twice.
        if self.layout.has_song && self.song == SongState::Silent {
            self.song = SongState::Requested;
            effects.push(KnobEffect::PlaySong);
        }
    }

    fn celebrate(&mut self, effects: &mut Vec<KnobEffect>) {
        if self.hearts == HeartRainState::Idle {
            self.hearts = HeartRainState::Started;
            effects.push(KnobEffect::StartHeartRain);
        }
        if self.flowers == FlowerState::Hidden {
            self.flowers = FlowerState::Shown;
            effects.push(KnobEffect::ShowFlowers);
        }
    }

    fn snap(&mut self, effects: &mut Vec<KnobEffect>) {
        self.set_rotation(self.map.rotation_for_index(self.current_index), effects);
    }

    fn set_rotation(&mut self, rotation: f64, effects: &mut Vec<KnobEffect>) {
        self.rotation = rotation;
        effects.push(KnobEffect::SetRotation(rotation));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(slides: usize) -> KnobController {
        KnobController::new(&KnobConfig::default(), KnobLayout::new(slides)).expect("controller")
    }

    #[test]
    fn init_renders_first_slide_hidden() {
        let mut knob = controller(5);
        let effects = knob.init();
        assert_eq!(
            effects,
            vec![
                KnobEffect::ActivateSlide(0),
                KnobEffect::Text(TextRender::hidden()),
                KnobEffect::SetRotation(-90.0),
                KnobEffect::SetAriaValue(0),
            ]
        );
        assert_eq!(knob.reveal_phase(), RevealPhase::NotStarted);
    }

    #[test]
    fn rejects_empty_slide_set() {
        let err = KnobController::new(&KnobConfig::default(), KnobLayout::new(0))
            .expect_err("no slides");
        assert_eq!(err, ConfigError::NoSlides);
    }

    #[test]
    fn key_mapping() {
        assert_eq!(KeyCommand::from_key("ArrowUp"), Some(KeyCommand::Next));
        assert_eq!(KeyCommand::from_key("ArrowRight"), Some(KeyCommand::Next));
        assert_eq!(KeyCommand::from_key("ArrowDown"), Some(KeyCommand::Previous));
        assert_eq!(KeyCommand::from_key("ArrowLeft"), Some(KeyCommand::Previous));
        assert_eq!(KeyCommand::from_key("Enter"), None);
    }

    #[test]
    fn first_key_requests_song_once() {
        let mut knob = controller(5);
        knob.init();
        let first = knob.handle_key(KeyCommand::Next);
        assert_eq!(first.first(), Some(&KnobEffect::PlaySong));
        let second = knob.handle_key(KeyCommand::Next);
        assert!(!second.contains(&KnobEffect::PlaySong));
        assert_eq!(knob.song_state(), SongState::Requested);
    }

    #[test]
    fn no_song_without_audio() {
        let layout = KnobLayout {
            has_song: false,
            ..KnobLayout::new(5)
        };
        let mut knob = KnobController::new(&KnobConfig::default(), layout).expect("controller");
        let effects = knob.handle_key(KeyCommand::Previous);
        assert!(!effects.contains(&KnobEffect::PlaySong));
        assert_eq!(knob.song_state(), SongState::Silent);
        assert_eq!(knob.current_index(), 4);
    }

    #[test]
    fn no_reveal_without_text_target() {
        let layout = KnobLayout {
            has_text: false,
            ..KnobLayout::new(5)
        };
        let mut knob = KnobController::new(&KnobConfig::default(), layout).expect("controller");
        for _ in 0..40 {
            let effects = knob.handle_key(KeyCommand::Next);
            assert!(!effects.iter().any(|effect| matches!(effect, KnobEffect::Text(_))));
        }
        assert_eq!(knob.heart_rain_state(), HeartRainState::Idle);
        assert_eq!(knob.flower_state(), FlowerState::Hidden);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut knob = controller(5);
        knob.init();
        let rect = KnobRect::new(0.0, 0.0, 100.0, 100.0);
        assert!(knob.handle_move(rect, 100.0, 50.0).is_empty());
        assert!(knob.handle_end().is_empty());
    }
}
