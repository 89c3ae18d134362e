//! Read-only simulation state passed to every decision call.

use sdc_core::Tick;
use sdc_surface::Surface;

/// A read-only snapshot of the cohort's tick, shared by every agent.
///
/// Built once per tick by the cohort controller.  The surface cannot be
/// regenerated while a `SimContext` borrowing it is alive.
pub struct SimContext<'a> {
    /// Ticks elapsed in the current generation.
    pub tick:       Tick,
    /// The clamped step length used for this tick.
    pub dt:         f32,
    /// Zero-based generation counter (also the map counter).
    pub generation: u64,
    pub surface:    &'a dyn Surface,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(tick: Tick, dt: f32, generation: u64, surface: &'a dyn Surface) -> Self {
        Self { tick, dt, generation, surface }
    }
}
