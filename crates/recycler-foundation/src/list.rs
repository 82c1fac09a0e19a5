//! The mounted list instance.
//!
//! [`RecyclerList`] owns everything one mounted list needs: the measurement
//! service, the commit state machine, the render stack, the recycler and the
//! measured-size cache. Creating it is mounting; dropping it is unmounting.
//! Nothing is shared between instances, so a remounted list starts from a
//! fresh render generation with the gate closed.
//!
//! Every host event handler runs the whole pipeline synchronously: measure,
//! feed the commit machine, rebind the window, report population. A layout
//! event that arrives after data is already bound therefore commits within
//! the same call.

use recycler_core::{
    CommitLayoutStateMachine, CommitPhase, Delivery, Evaluation, LayoutMeasurementService,
    LayoutTicket, MeasureHost, Opacity, RecyclerError, RenderId, RenderStack, RenderStackObserver,
};
use recycler_ui_graphics::Rect;

use crate::config::{ConfigError, RecyclerListConfig};
use crate::lazy::{
    ItemLayoutCache, ItemProvider, LayoutStats, RecycleWindow, ViewHolderRecycler,
};

/// Called after any event that changed the opacity or the render generation.
pub type CommitListener = Box<dyn FnMut(&Evaluation)>;

pub struct RecyclerList<H: MeasureHost> {
    config: RecyclerListConfig,
    measurement: LayoutMeasurementService<H>,
    machine: CommitLayoutStateMachine,
    render_stack: RenderStack,
    observer: RenderStackObserver,
    recycler: ViewHolderRecycler,
    cache: ItemLayoutCache,
    items: Box<dyn ItemProvider>,
    scroll_offset: f32,
    listener: Option<CommitListener>,
    last_reported: (Opacity, RenderId),
}

impl<H: MeasureHost> RecyclerList<H> {
    /// Mounts a list with no data. The gate stays closed until the host
    /// reports a layout and data arrives.
    pub fn mount(host: H, config: RecyclerListConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let machine = CommitLayoutStateMachine::mounted();
        let last_reported = (machine.opacity(), machine.render_id());
        log::debug!(
            "recycler list mounted (estimated item size {})",
            config.estimated_item_size
        );
        Ok(Self {
            measurement: LayoutMeasurementService::new(host),
            machine,
            render_stack: RenderStack::new(),
            observer: RenderStackObserver::new(),
            recycler: ViewHolderRecycler::new(config.max_pool_size),
            cache: ItemLayoutCache::new(config.estimated_item_size),
            items: Box::new(Vec::<()>::new()),
            scroll_offset: 0.0,
            listener: None,
            last_reported,
            config,
        })
    }

    /// Replaces the bound data.
    pub fn set_data(
        &mut self,
        items: impl ItemProvider + 'static,
    ) -> Result<Evaluation, RecyclerError> {
        self.cache.remap(&items);
        self.items = Box::new(items);
        let data = self.machine.set_has_data(self.items.has_data());
        let eval = merge(data, self.refresh_content()?);
        self.notify(eval);
        Ok(eval)
    }

    /// Host layout event: measures synchronously and runs one full pass.
    pub fn on_layout(&mut self) -> Result<Evaluation, RecyclerError> {
        let parent = self.measurement.measure_parent_size();
        self.measurement.measure_first_child_layout();
        self.apply_container_layout(parent)
    }

    /// Starts a callback-based container measurement.
    pub fn request_layout(&self) -> LayoutTicket {
        self.machine.issue_ticket()
    }

    /// Completes a measurement started with [`request_layout`](Self::request_layout).
    pub fn deliver_layout(
        &mut self,
        ticket: &LayoutTicket,
        layout: Option<Rect>,
    ) -> Result<Delivery, RecyclerError> {
        if !self.machine.accepts(ticket) {
            return Ok(Delivery::Stale);
        }
        // The header box may have been forgotten by a detach since the request.
        self.measurement.measure_first_child_layout();
        Ok(Delivery::Accepted(self.apply_container_layout(layout)?))
    }

    /// Moves the window. Negative offsets clamp to the start.
    pub fn set_scroll_offset(&mut self, offset: f32) -> Result<Evaluation, RecyclerError> {
        self.scroll_offset = offset.max(0.0);
        let eval = self.refresh_content()?;
        self.notify(eval);
        Ok(eval)
    }

    /// Scrolls so item `index` starts at the top of the viewport.
    pub fn scroll_to_index(&mut self, index: usize) -> Result<Evaluation, RecyclerError> {
        let count = self.items.item_count();
        if index >= count {
            return Err(RecyclerError::DataIndexOutOfBounds { index, count });
        }
        let offset = self.content_origin() + self.cache.offset_of(index);
        self.set_scroll_offset(offset)
    }

    /// Explicit commit; a no-op unless layout, data and content are present.
    pub fn commit_layout(&mut self) -> Evaluation {
        let eval = self.machine.commit_layout();
        self.notify(eval);
        eval
    }

    /// The host view was destroyed while this instance stays mounted.
    ///
    /// Bindings and measured sizes are kept; the gate closes until the next
    /// layout event measures the recreated container.
    pub fn on_detached(&mut self) -> Evaluation {
        self.measurement.forget();
        let eval = self.machine.invalidate_container();
        self.notify(eval);
        eval
    }

    pub fn set_commit_listener(&mut self, listener: impl FnMut(&Evaluation) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn current_opacity(&self) -> Opacity {
        self.machine.opacity()
    }

    pub fn current_render_id(&self) -> RenderId {
        self.machine.render_id()
    }

    pub fn phase(&self) -> CommitPhase {
        self.machine.phase()
    }

    pub fn container_layout(&self) -> Option<Rect> {
        self.machine.container_layout()
    }

    pub fn has_data(&self) -> bool {
        self.machine.has_data()
    }

    pub fn items(&self) -> &dyn ItemProvider {
        &*self.items
    }

    pub fn render_stack(&self) -> &RenderStack {
        &self.render_stack
    }

    pub fn stats(&self) -> LayoutStats {
        self.recycler.stats(&self.render_stack)
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn config(&self) -> &RecyclerListConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        self.measurement.host()
    }

    pub fn measured_item_size(&self, index: usize) -> Option<f32> {
        self.cache.measured(index)
    }

    /// Box of item `index` in content coordinates, from measured sizes where
    /// known and the estimate otherwise.
    pub fn item_layout(&self, index: usize) -> Option<Rect> {
        if index >= self.items.item_count() {
            return None;
        }
        let vertical = self.config.is_vertical;
        let main_offset = self.content_origin() + self.cache.offset_of(index);
        let main_size = self.cache.size_of(index);
        let cross_size = self
            .machine
            .container_layout()
            .map(|container| container.size().cross_axis(vertical))
            .unwrap_or(0.0);
        Some(if vertical {
            Rect::new(0.0, main_offset, cross_size, main_size)
        } else {
            Rect::new(main_offset, 0.0, main_size, cross_size)
        })
    }

    /// Total content extent along the main axis.
    pub fn content_size(&self) -> f32 {
        self.content_origin() + self.cache.total_size(self.items.item_count())
    }

    fn content_origin(&self) -> f32 {
        let (Some(container), Some(first_child)) = (
            self.machine.container_layout(),
            self.measurement.last_first_child_layout(),
        ) else {
            return 0.0;
        };
        let origin = if self.config.is_vertical {
            first_child.y - container.y
        } else {
            first_child.x - container.x
        };
        origin.max(0.0)
    }

    fn measure_items(&mut self) {
        let count = self.items.item_count();
        let vertical = self.config.is_vertical;
        for binding in self.render_stack.snapshot() {
            if binding.data_index >= count {
                continue;
            }
            if let Some(rect) = self.measurement.measure_item_layout(binding.view_holder_id) {
                let key = self.items.get_key(binding.data_index);
                self.cache
                    .record(binding.data_index, key, rect.size().main_axis(vertical));
            }
        }
    }

    /// Stores the container box, rebinds the window for it, and only then
    /// lets a resize commit.
    fn apply_container_layout(
        &mut self,
        layout: Option<Rect>,
    ) -> Result<Evaluation, RecyclerError> {
        let resized = self.machine.record_container_layout(layout);
        self.measure_items();
        let content = self.refresh_content()?;
        let eval = if content.committed.is_some() {
            content
        } else {
            self.machine.finish_layout_pass(resized)
        };
        self.notify(eval);
        Ok(eval)
    }

    fn refresh_content(&mut self) -> Result<Evaluation, RecyclerError> {
        match self.machine.container_layout() {
            Some(container) => {
                let window = RecycleWindow {
                    scroll_offset: self.scroll_offset,
                    viewport_size: container.size().main_axis(self.config.is_vertical),
                    content_origin: self.content_origin(),
                    draw_distance: self.config.draw_distance,
                };
                self.recycler
                    .fill(&mut self.render_stack, &*self.items, &self.cache, &window)?;
            }
            None => {
                self.recycler
                    .trim(&mut self.render_stack, self.items.item_count())?;
            }
        }
        Ok(match self.observer.observe(&self.render_stack) {
            Some(populated) => self.machine.set_render_stack_populated(populated),
            None => self.machine.current(),
        })
    }

    fn notify(&mut self, eval: Evaluation) {
        let current = (eval.opacity, eval.render_id);
        if current == self.last_reported {
            return;
        }
        self.last_reported = current;
        if let Some(listener) = self.listener.as_mut() {
            listener(&eval);
        }
    }
}

/// Latest state, keeping whichever step of the pass committed.
fn merge(earlier: Evaluation, later: Evaluation) -> Evaluation {
    Evaluation {
        committed: later.committed.or(earlier.committed),
        ..later
    }
}

impl<H: MeasureHost> Drop for RecyclerList<H> {
    fn drop(&mut self) {
        log::debug!(
            "recycler list unmounted at render_id {} with {} holders bound",
            self.machine.render_id(),
            self.render_stack.len()
        );
    }
}
