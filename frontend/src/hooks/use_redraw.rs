use std::rc::Rc;

use yew::prelude::*;

#[derive(Default, PartialEq)]
struct RedrawCounter(u32);

impl Reducible for RedrawCounter {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(RedrawCounter(self.0.wrapping_add(1)))
    }
}

/// A generation number plus a callback that bumps it. Passing the number down
/// as a prop forces a child to re-render even when nothing else changed.
#[hook]
pub fn use_redraw() -> (u32, Callback<()>) {
    let counter = use_reducer(RedrawCounter::default);
    let bump = use_callback(counter.dispatcher(), |_: (), dispatcher| dispatcher.dispatch(()));
    (counter.0, bump)
}
