use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent, TouchEvent};

use valentine_knob_core::{KnobConfig, KnobController, KnobEffect};

use crate::dom::{KnobDom, MountError};
use crate::effects::{play_song, start_heart_rain};
use crate::input::{key_command, PointerSample};

struct KnobShared {
    dom: KnobDom,
    config: KnobConfig,
    controller: RefCell<KnobController>,
}

impl KnobShared {
    fn run(&self, action: impl FnOnce(&mut KnobController) -> Vec<KnobEffect>) {
        let effects = {
            let mut controller = self.controller.borrow_mut();
            action(&mut controller)
        };
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&self, effect: KnobEffect) {
        match effect {
            KnobEffect::SetRotation(angle) => self.dom.set_rotation(angle),
            KnobEffect::ActivateSlide(index) => self.dom.activate_slide(index),
            KnobEffect::Text(render) => self.dom.render_text(&render),
            KnobEffect::StartHeartRain => {
                if let Some(container) = self.dom.heart_rain.as_ref() {
                    start_heart_rain(
                        &self.dom.document,
                        container,
                        &self.config.hearts,
                        &self.config.dom.heart_class,
                    );
                }
            }
            KnobEffect::ShowFlowers => self.dom.show_flowers(),
            KnobEffect::PlaySong => {
                if let Some(song) = self.dom.song.as_ref() {
                    play_song(song);
                }
            }
            KnobEffect::SetAriaValue(index) => self.dom.set_aria_value(index),
        }
    }

    fn press(&self, sample: PointerSample) {
        let rect = self.dom.knob_rect();
        self.run(|knob| knob.handle_start(rect, sample.x, sample.y));
    }

    fn drag(&self, sample: PointerSample) {
        if !self.controller.borrow().is_dragging() {
            return;
        }
        let rect = self.dom.knob_rect();
        self.run(|knob| knob.handle_move(rect, sample.x, sample.y));
    }

    fn release(&self) {
        self.run(KnobController::handle_end);
    }
}

/// Mounted knob. Dropping it detaches every listener.
pub(crate) struct KnobWidget {
    #[allow(dead_code)]
    shared: Rc<KnobShared>,
    _listeners: Vec<EventListener>,
}

#[cfg(test)]
impl KnobWidget {
    pub(crate) fn current_index(&self) -> usize {
        self.shared.controller.borrow().current_index()
    }
}

fn blocking() -> EventListenerOptions {
    EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive: false,
    }
}

fn listen<E, F>(target: &EventTarget, event_type: &'static str, passive: bool, handler: F) -> EventListener
where
    E: JsCast,
    F: Fn(&E) + 'static,
{
    let options = if passive {
        EventListenerOptions::default()
    } else {
        blocking()
    };
    EventListener::new_with_options(target, event_type, options, move |event: &Event| {
        if let Some(event) = event.dyn_ref::<E>() {
            handler(event);
        }
    })
}

pub(crate) fn mount(config: KnobConfig) -> Result<KnobWidget, MountError> {
    config.validate()?;
    let dom = KnobDom::lookup(&config.dom)?;
    let layout = dom.layout();
    let controller = KnobController::new(&config, layout)?;
    gloo::console::log!(
        "valentine knob: mounting",
        format!(
            "{} slides, text: {}, song: {}",
            layout.slide_count, layout.has_text, layout.has_song
        )
    );

    let shared = Rc::new(KnobShared {
        dom,
        config,
        controller: RefCell::new(controller),
    });
    shared.run(KnobController::init);

    let knob: EventTarget = shared.dom.knob.clone().into();
    let document: EventTarget = shared.dom.document.clone().into();
    let mut listeners = Vec::new();

    let state = shared.clone();
    listeners.push(listen(&knob, "mousedown", false, move |event: &MouseEvent| {
        event.prevent_default();
        state.press(PointerSample::from_mouse(event));
    }));
    let state = shared.clone();
    listeners.push(listen(&document, "mousemove", true, move |event: &MouseEvent| {
        state.drag(PointerSample::from_mouse(event));
    }));
    let state = shared.clone();
    listeners.push(listen(&document, "mouseup", true, move |_: &MouseEvent| {
        state.release();
    }));

    let state = shared.clone();
    listeners.push(listen(&knob, "touchstart", false, move |event: &TouchEvent| {
        event.prevent_default();
        if let Some(sample) = PointerSample::from_touch(event) {
            state.press(sample);
        }
    }));
    let state = shared.clone();
    listeners.push(listen(&document, "touchmove", true, move |event: &TouchEvent| {
        if let Some(sample) = PointerSample::from_touch(event) {
            state.drag(sample);
        }
    }));
    for event_type in ["touchend", "touchcancel"] {
        let state = shared.clone();
        listeners.push(listen(&document, event_type, true, move |_: &TouchEvent| {
            state.release();
        }));
    }

    let state = shared.clone();
    listeners.push(listen(&knob, "keydown", false, move |event: &KeyboardEvent| {
        let Some(command) = key_command(event) else {
            return;
        };
        event.prevent_default();
        state.run(|knob| knob.handle_key(command));
    }));

    Ok(KnobWidget {
        shared,
        _listeners: listeners,
    })
}
