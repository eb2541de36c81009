/// Status message state with auto-clear

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::status::{Status, StatusSlot};

#[derive(Clone)]
pub struct StatusHandle {
    current: Option<Status>,
    show: Callback<Status>,
}

impl StatusHandle {
    pub fn current(&self) -> Option<Status> {
        self.current.clone()
    }

    pub fn show(&self, status: Status) {
        self.show.emit(status);
    }
}

/// Each status stays visible for `display_ms`; a newer one restarts the timer
#[hook]
pub fn use_status(display_ms: u32) -> StatusHandle {
    let slot = use_mut_ref(StatusSlot::default);
    let timer = use_mut_ref(|| None::<Timeout>);
    let force_update = use_force_update();

    let show = {
        let slot = slot.clone();
        Callback::from(move |status: Status| {
            let ticket = slot.borrow_mut().show(status);
            force_update.force_update();

            let slot = slot.clone();
            let force_update = force_update.clone();
            // Dropping the previous Timeout cancels it
            *timer.borrow_mut() = Some(Timeout::new(display_ms, move || {
                if slot.borrow_mut().expire(ticket) {
                    force_update.force_update();
                }
            }));
        })
    };

    let current = slot.borrow().current().cloned();
    StatusHandle { current, show }
}
