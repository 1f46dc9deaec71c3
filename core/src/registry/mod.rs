//! Clock registry and layout manager
//!
//! The registry owns the ordered list of clocks (insertion order is display
//! order), the process-wide [`LayoutConfig`] and the host that shows them.
//! It guarantees that at least one clock exists once constructed.
//!
//! Structural operations (`add_clock`, `remove_clock`, `relayout`) move
//! things around; `tick` and `modify_clock` only redraw.

use chrono::{DateTime, Utc};

use crate::clock::{ClockId, ClockWidget, validate_label, validate_offset};
use crate::error::ClockError;
use crate::host::ClockHost;
use crate::layout::{self, Rect};
use crate::metrics::ClockMetrics;
use worldclock_types::{ClockSettings, LayoutConfig};

/// Ordered collection of clocks bound to a host
pub struct ClockRegistry<H: ClockHost> {
    host: H,
    clocks: Vec<ClockWidget>,
    layout: LayoutConfig,
    metrics: ClockMetrics,
    container: Rect,
    next_id: u32,
}

impl<H: ClockHost> ClockRegistry<H> {
    /// Create the registry with the given clocks and lay them out.
    ///
    /// An empty list yields a single default clock so the registry is never
    /// empty.
    pub fn new(
        host: H,
        layout: LayoutConfig,
        metrics: ClockMetrics,
        clocks: &[ClockSettings],
    ) -> Result<Self, ClockError> {
        let mut registry = Self {
            host,
            clocks: Vec::with_capacity(clocks.len().max(1)),
            layout,
            metrics,
            container: Rect::default(),
            next_id: 1,
        };

        if clocks.is_empty() {
            let fallback = ClockSettings::default();
            registry.add_clock(&fallback.name, fallback.offset as i32)?;
        } else {
            for clock in clocks {
                registry.add_clock(&clock.name, clock.offset as i32)?;
            }
        }

        registry.relayout(layout);
        tracing::info!(
            clocks = registry.clocks.len(),
            layout = layout.bits(),
            show_seconds = metrics.show_seconds,
            "Clock registry initialized"
        );
        Ok(registry)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a clock at the end of the display order.
    ///
    /// The new clock sits in a provisional cell until the next [`relayout`].
    ///
    /// [`relayout`]: Self::relayout
    pub fn add_clock(&mut self, label: &str, offset: i32) -> Result<ClockId, ClockError> {
        let offset = validate_offset(offset)?;
        validate_label(label)?;

        let id = ClockId::from_raw(self.next_id);
        self.host.create_clock(id)?;
        self.next_id += 1;

        let mut clock = ClockWidget::new(id, label.to_string(), offset);
        clock.cell = layout::cell_at(self.clocks.len(), self.metrics.cell_size(), &self.layout);
        self.host.place_clock(id, clock.cell);
        self.clocks.push(clock);

        tracing::info!(%id, label, offset, "Clock added");
        Ok(id)
    }

    /// Remove a clock and close the gap it leaves.
    ///
    /// The last remaining clock cannot be removed.
    pub fn remove_clock(&mut self, id: ClockId) -> Result<(), ClockError> {
        let index = self.index_of(id)?;
        if self.clocks.len() == 1 {
            tracing::warn!(%id, "Refusing to delete the last clock");
            return Err(ClockError::LastClock);
        }

        let clock = self.clocks.remove(index);
        self.host.destroy_clock(id);
        tracing::info!(%id, label = clock.label(), "Clock removed");

        self.relayout(self.layout);
        Ok(())
    }

    /// Replace a clock's label and offset in place.
    ///
    /// Both values are validated before anything changes. Only the modified
    /// clock is redrawn; its position is unaffected.
    pub fn modify_clock(&mut self, id: ClockId, label: &str, offset: i32) -> Result<(), ClockError> {
        let offset = validate_offset(offset)?;
        validate_label(label)?;
        let index = self.index_of(id)?;

        self.clocks[index].set(label.to_string(), offset);
        tracing::info!(%id, label, offset, "Clock modified");

        let clock = &self.clocks[index];
        self.host.draw_clock(id, &clock.face(Utc::now()));
        Ok(())
    }

    /// Recompute every clock's cell and the container geometry.
    ///
    /// Also stores `config` as the current layout and redraws every clock,
    /// since the container surface may have been resized.
    pub fn relayout(&mut self, config: LayoutConfig) {
        self.layout = config;
        let plan = layout::plan(
            self.clocks.len(),
            self.metrics.cell_size(),
            &config,
            self.host.screen_size(),
        );

        for (clock, cell) in self.clocks.iter_mut().zip(plan.cells) {
            clock.cell = cell;
            self.host.place_clock(clock.id(), cell);
        }
        self.host.place_container(plan.container, plan.always_on_top);
        self.container = plan.container;

        tracing::debug!(
            clocks = self.clocks.len(),
            x = plan.container.x,
            y = plan.container.y,
            width = plan.container.width,
            height = plan.container.height,
            always_on_top = plan.always_on_top,
            "Relayout"
        );

        self.tick();
    }

    /// Redraw every clock at the current time
    pub fn tick(&mut self) {
        self.tick_at(Utc::now());
    }

    /// Redraw every clock as of `now`
    pub fn tick_at(&mut self, now: DateTime<Utc>) {
        for clock in &self.clocks {
            self.host.draw_clock(clock.id(), &clock.face(now));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    fn index_of(&self, id: ClockId) -> Result<usize, ClockError> {
        self.clocks
            .iter()
            .position(|clock| clock.id() == id)
            .ok_or(ClockError::UnknownClock(id))
    }

    pub fn get(&self, id: ClockId) -> Option<&ClockWidget> {
        self.clocks.iter().find(|clock| clock.id() == id)
    }

    /// Clocks in display order
    pub fn clocks(&self) -> &[ClockWidget] {
        &self.clocks
    }

    /// Id of the clock at 0-based display position `index`
    pub fn id_at(&self, index: usize) -> Option<ClockId> {
        self.clocks.get(index).map(|clock| clock.id())
    }

    pub fn last_id(&self) -> ClockId {
        // The registry is never empty after construction
        self.clocks[self.clocks.len() - 1].id()
    }

    /// The clock whose cell contains a point in container coordinates
    pub fn clock_at(&self, x: i32, y: i32) -> Option<ClockId> {
        self.clocks
            .iter()
            .find(|clock| clock.cell().contains(x, y))
            .map(|clock| clock.id())
    }

    pub fn len(&self) -> usize {
        self.clocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clocks.is_empty()
    }

    pub fn layout(&self) -> LayoutConfig {
        self.layout
    }

    pub fn metrics(&self) -> ClockMetrics {
        self.metrics
    }

    /// Container geometry from the last relayout
    pub fn container(&self) -> Rect {
        self.container
    }

    /// Snapshot of the clocks for persisting
    pub fn settings(&self) -> Vec<ClockSettings> {
        self.clocks
            .iter()
            .map(|clock| ClockSettings::new(clock.label(), clock.offset()))
            .collect()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Destroy every clock and hand the host back
    pub fn shutdown(mut self) -> H {
        for clock in self.clocks.drain(..) {
            self.host.destroy_clock(clock.id());
        }
        tracing::info!("Clock registry shut down");
        self.host
    }
}
