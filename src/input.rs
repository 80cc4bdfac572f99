use web_sys::{DomRect, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

use valentine_knob_core::{KeyCommand, KnobRect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PointerSample {
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    pub(crate) fn from_mouse(event: &MouseEvent) -> Self {
        Self {
            x: event.client_x() as f64,
            y: event.client_y() as f64,
        }
    }

    /// First active touch; multi-touch is treated as a single finger.
    pub(crate) fn from_touch(event: &TouchEvent) -> Option<Self> {
        let touch = event.touches().get(0)?;
        Some(Self {
            x: touch.client_x() as f64,
            y: touch.client_y() as f64,
        })
    }
}

pub(crate) fn key_command(event: &KeyboardEvent) -> Option<KeyCommand> {
    KeyCommand::from_key(&event.key())
}

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> DomRect;
}

impl HasClientRect for HtmlElement {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }
}

pub(crate) fn knob_rect(element: &impl HasClientRect) -> KnobRect {
    let rect = element.client_rect();
    KnobRect::new(rect.left(), rect.top(), rect.width(), rect.height())
}
