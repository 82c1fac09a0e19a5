//! Commit-layout state machine.
//!
//! Reconciles three independently arriving inputs (the container box, data
//! availability, render-stack population) into commits of the render
//! generation. Every input setter runs exactly one evaluation pass against the
//! current inputs, so the machine drives itself: a container that becomes
//! measurable while data and content are already present commits in the same
//! call, with no external kick.
//!
//! ```text
//! Uninitialized --mount--> AwaitingLayout --layout--> AwaitingContent --ready--> Committed
//!        any state --invalidate_container--> AwaitingLayout
//! ```

use recycler_ui_graphics::Rect;

use crate::opacity::{Opacity, OpacityGate};
use crate::ticket::{LayoutTicket, MountToken, RenderId};

/// Container boxes closer than this are the same layout.
const LAYOUT_CHANGE_TOLERANCE: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitPhase {
    Uninitialized,
    AwaitingLayout,
    AwaitingContent,
    Committed,
}

/// Why a commit happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitTrigger {
    /// Layout, data and content all became available.
    ContentReady,
    /// The container box changed while content was showing.
    ContainerResized,
    /// `commit_layout()` was called with every precondition met.
    Explicit,
}

/// State after one evaluation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub phase: CommitPhase,
    pub render_id: RenderId,
    pub opacity: Opacity,
    /// Set when this pass advanced the render generation.
    pub committed: Option<CommitTrigger>,
}

/// Outcome of delivering a callback-based container measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Delivery {
    Accepted(Evaluation),
    /// The ticket was superseded; nothing changed.
    Stale,
}

/// Per-instance commit state. Owned by exactly one mounted list.
#[derive(Debug)]
pub struct CommitLayoutStateMachine {
    phase: CommitPhase,
    container_layout: Option<Rect>,
    has_data: bool,
    render_stack_populated: bool,
    render_id: RenderId,
    /// Bumped whenever the host view is invalidated.
    epoch: u32,
    /// Readiness seen by the previous pass; commits fire on its rising edge.
    ready: bool,
    mount: MountToken,
}

impl Default for CommitLayoutStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitLayoutStateMachine {
    /// Creates an unmounted machine. Inputs may be recorded but nothing is
    /// evaluated until [`on_mount`](Self::on_mount).
    pub fn new() -> Self {
        Self {
            phase: CommitPhase::Uninitialized,
            container_layout: None,
            has_data: false,
            render_stack_populated: false,
            render_id: RenderId::INITIAL,
            epoch: 0,
            ready: false,
            mount: MountToken::new(),
        }
    }

    /// Creates a machine that is already mounted.
    pub fn mounted() -> Self {
        let mut machine = Self::new();
        machine.on_mount();
        machine
    }

    pub fn on_mount(&mut self) -> Evaluation {
        if self.phase == CommitPhase::Uninitialized {
            self.phase = CommitPhase::AwaitingLayout;
            log::debug!("commit machine mounted");
        }
        self.evaluate(None)
    }

    /// Records a container measurement. `None` is the "not measurable yet"
    /// sentinel and leaves everything untouched.
    pub fn set_container_layout(&mut self, layout: Option<Rect>) -> Evaluation {
        if layout.is_none() {
            return self.snapshot(None);
        }
        let resized = self.record_container_layout(layout);
        self.finish_layout_pass(resized)
    }

    /// Stores a container measurement without running a pass. Returns `true`
    /// if it replaced a different box.
    ///
    /// Callers that rebind content for the new geometry do so between this
    /// and [`finish_layout_pass`](Self::finish_layout_pass), so a resize
    /// commit sees the stack that matches the box.
    pub fn record_container_layout(&mut self, layout: Option<Rect>) -> bool {
        let Some(layout) = layout else {
            return false;
        };
        let resized = self
            .container_layout
            .is_some_and(|previous| !previous.approx_eq(&layout, LAYOUT_CHANGE_TOLERANCE));
        self.container_layout = Some(layout);
        resized
    }

    /// Runs the pass for a layout stored with
    /// [`record_container_layout`](Self::record_container_layout).
    pub fn finish_layout_pass(&mut self, resized: bool) -> Evaluation {
        self.evaluate(resized.then_some(CommitTrigger::ContainerResized))
    }

    /// Whether a measurement requested with `ticket` may still be applied.
    pub fn accepts(&self, ticket: &LayoutTicket) -> bool {
        if ticket.is_current(&self.mount, self.epoch, self.render_id) {
            return true;
        }
        log::debug!(
            "discarding stale container measurement (ticket epoch={} render_id={}, current epoch={} render_id={})",
            ticket.epoch(),
            ticket.render_id(),
            self.epoch,
            self.render_id
        );
        false
    }

    /// Records a measurement that was requested with `ticket`.
    ///
    /// Deliveries from another mount, an older container epoch, or an older
    /// render generation are dropped.
    pub fn deliver_container_layout(
        &mut self,
        ticket: &LayoutTicket,
        layout: Option<Rect>,
    ) -> Delivery {
        if !self.accepts(ticket) {
            return Delivery::Stale;
        }
        Delivery::Accepted(self.set_container_layout(layout))
    }

    pub fn set_has_data(&mut self, has_data: bool) -> Evaluation {
        self.has_data = has_data;
        self.evaluate(None)
    }

    pub fn set_render_stack_populated(&mut self, populated: bool) -> Evaluation {
        self.render_stack_populated = populated;
        self.evaluate(None)
    }

    /// Explicit commit. A no-op unless layout, data and content are all present.
    pub fn commit_layout(&mut self) -> Evaluation {
        self.evaluate(Some(CommitTrigger::Explicit))
    }

    /// Forgets the container box, e.g. because the host view was destroyed.
    ///
    /// Outstanding tickets become stale. The render generation is kept.
    pub fn invalidate_container(&mut self) -> Evaluation {
        self.container_layout = None;
        self.epoch = self.epoch.wrapping_add(1);
        log::debug!("container invalidated, epoch={}", self.epoch);
        self.evaluate(None)
    }

    /// Tags a measurement request with the current epoch and generation.
    pub fn issue_ticket(&self) -> LayoutTicket {
        LayoutTicket::issue(&self.mount, self.epoch, self.render_id)
    }

    /// Current state without running a pass.
    pub fn current(&self) -> Evaluation {
        self.snapshot(None)
    }

    pub fn phase(&self) -> CommitPhase {
        self.phase
    }

    pub fn render_id(&self) -> RenderId {
        self.render_id
    }

    pub fn opacity(&self) -> Opacity {
        OpacityGate::evaluate(self.container_layout.as_ref(), self.render_stack_populated)
    }

    pub fn container_layout(&self) -> Option<Rect> {
        self.container_layout
    }

    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn is_render_stack_populated(&self) -> bool {
        self.render_stack_populated
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Layout, data and content are all present.
    pub fn is_ready(&self) -> bool {
        self.container_layout.is_some() && self.has_data && self.render_stack_populated
    }

    fn evaluate(&mut self, requested: Option<CommitTrigger>) -> Evaluation {
        if self.phase == CommitPhase::Uninitialized {
            return self.snapshot(None);
        }
        if self.container_layout.is_none() {
            self.phase = CommitPhase::AwaitingLayout;
            self.ready = false;
            return self.snapshot(None);
        }
        if self.phase == CommitPhase::AwaitingLayout {
            self.phase = CommitPhase::AwaitingContent;
        }

        let ready = self.is_ready();
        let rising = ready && !self.ready;
        self.ready = ready;

        let trigger = match (rising, ready) {
            (true, _) => Some(CommitTrigger::ContentReady),
            (false, true) => requested,
            (false, false) => None,
        };
        log::trace!(
            "commit pass: phase={:?} data={} populated={} trigger={:?}",
            self.phase,
            self.has_data,
            self.render_stack_populated,
            trigger
        );
        if let Some(trigger) = trigger {
            self.render_id = self.render_id.next();
            self.phase = CommitPhase::Committed;
            log::debug!("layout committed: render_id={} ({:?})", self.render_id, trigger);
        }
        self.snapshot(trigger)
    }

    fn snapshot(&self, committed: Option<CommitTrigger>) -> Evaluation {
        Evaluation {
            phase: self.phase,
            render_id: self.render_id,
            opacity: self.opacity(),
            committed,
        }
    }
}
