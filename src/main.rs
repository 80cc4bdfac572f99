use std::cell::RefCell;

mod boot;
mod dom;
mod effects;
mod input;
mod widget;

use widget::KnobWidget;

thread_local! {
    static WIDGET: RefCell<Option<KnobWidget>> = RefCell::new(None);
}

fn main() {
    console_error_panic_hook::set_once();
    let config = boot::load_config();
    match widget::mount(config) {
        Ok(knob) => {
            WIDGET.with(|slot| slot.borrow_mut().replace(knob));
        }
        Err(err) => {
            gloo::console::error!(format!("valentine knob: mount failed: {err}"));
        }
    }
}
