use std::sync::Mutex;

use crate::location::QueryResolver;
use crate::report::SunClock;

pub struct AppState<P> {
    pub resolver: QueryResolver<P>,
    pub clock: SunClock,
    /// Held for the whole of a lookup so that only one runs at a time.
    pub lookup_gate: Mutex<()>,
}

impl<P> AppState<P> {
    pub fn new(resolver: QueryResolver<P>, clock: SunClock) -> Self {
        Self {
            resolver,
            clock,
            lookup_gate: Mutex::new(()),
        }
    }
}
