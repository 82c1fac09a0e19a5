//! Host measurement primitives and the service that caches their results.
//!
//! Every query answers `None` until the host has completed a layout pass for
//! the underlying native view. `None` means "ask again on the next layout
//! event"; it is never a zero-sized box.

use std::rc::Rc;

use recycler_ui_graphics::Rect;

use crate::render_stack::ViewHolderId;

/// Measurement primitives provided by the host platform.
///
/// Boxes are reported in the coordinate space of the nearest scrollable
/// ancestor. Implementations must not panic when the native view does not
/// exist yet.
pub trait MeasureHost {
    /// Bounding box of the list's outer viewport.
    fn measure_parent_size(&self) -> Option<Rect>;

    /// Bounding box of the first child of the scroll content.
    fn measure_first_child_layout(&self) -> Option<Rect>;

    /// Bounding box of the view currently owned by `id`.
    fn measure_item_layout(&self, id: ViewHolderId) -> Option<Rect>;
}

impl<H: MeasureHost + ?Sized> MeasureHost for Rc<H> {
    fn measure_parent_size(&self) -> Option<Rect> {
        (**self).measure_parent_size()
    }

    fn measure_first_child_layout(&self) -> Option<Rect> {
        (**self).measure_first_child_layout()
    }

    fn measure_item_layout(&self, id: ViewHolderId) -> Option<Rect> {
        (**self).measure_item_layout(id)
    }
}

impl<H: MeasureHost + ?Sized> MeasureHost for Box<H> {
    fn measure_parent_size(&self) -> Option<Rect> {
        (**self).measure_parent_size()
    }

    fn measure_first_child_layout(&self) -> Option<Rect> {
        (**self).measure_first_child_layout()
    }

    fn measure_item_layout(&self, id: ViewHolderId) -> Option<Rect> {
        (**self).measure_item_layout(id)
    }
}

/// Query surface over a [`MeasureHost`].
///
/// Keeps the last successful container and first-child boxes so callers can
/// read them between layout events without going back to the host.
#[derive(Debug)]
pub struct LayoutMeasurementService<H> {
    host: H,
    last_parent: Option<Rect>,
    last_first_child: Option<Rect>,
}

impl<H: MeasureHost> LayoutMeasurementService<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            last_parent: None,
            last_first_child: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn measure_parent_size(&mut self) -> Option<Rect> {
        let measured = self.host.measure_parent_size();
        if measured.is_some() {
            self.last_parent = measured;
        } else {
            log::trace!("container not measurable yet");
        }
        measured
    }

    pub fn measure_first_child_layout(&mut self) -> Option<Rect> {
        let measured = self.host.measure_first_child_layout();
        if measured.is_some() {
            self.last_first_child = measured;
        }
        measured
    }

    pub fn measure_item_layout(&self, id: ViewHolderId) -> Option<Rect> {
        self.host.measure_item_layout(id)
    }

    pub fn last_parent_size(&self) -> Option<Rect> {
        self.last_parent
    }

    pub fn last_first_child_layout(&self) -> Option<Rect> {
        self.last_first_child
    }

    /// Drops cached boxes. Used when the host view is destroyed.
    pub fn forget(&mut self) {
        self.last_parent = None;
        self.last_first_child = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct ScriptedHost {
        parent: Cell<Option<Rect>>,
        calls: Cell<usize>,
    }

    impl MeasureHost for ScriptedHost {
        fn measure_parent_size(&self) -> Option<Rect> {
            self.calls.set(self.calls.get() + 1);
            self.parent.get()
        }

        fn measure_first_child_layout(&self) -> Option<Rect> {
            self.parent.get().map(|rect| Rect::new(0.0, 12.0, rect.width, 40.0))
        }

        fn measure_item_layout(&self, id: ViewHolderId) -> Option<Rect> {
            Some(Rect::new(0.0, id.0 as f32 * 100.0, 100.0, 100.0))
        }
    }

    #[test]
    fn sentinel_does_not_overwrite_cached_box() {
        let host = Rc::new(ScriptedHost::default());
        let mut service = LayoutMeasurementService::new(Rc::clone(&host));

        assert_eq!(service.measure_parent_size(), None);
        assert_eq!(service.last_parent_size(), None);

        let rect = Rect::new(0.0, 0.0, 399.0, 899.0);
        host.parent.set(Some(rect));
        assert_eq!(service.measure_parent_size(), Some(rect));

        host.parent.set(None);
        assert_eq!(service.measure_parent_size(), None);
        assert_eq!(service.last_parent_size(), Some(rect));
        assert_eq!(host.calls.get(), 3);
    }

    #[test]
    fn forget_clears_cache() {
        let host = ScriptedHost::default();
        host.parent.set(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let mut service = LayoutMeasurementService::new(host);

        service.measure_parent_size();
        service.measure_first_child_layout();
        assert_eq!(
            service.last_first_child_layout(),
            Some(Rect::new(0.0, 12.0, 10.0, 40.0))
        );

        service.forget();
        assert_eq!(service.last_parent_size(), None);
        assert_eq!(service.last_first_child_layout(), None);
    }

    #[test]
    fn item_queries_pass_through() {
        let service = LayoutMeasurementService::new(Box::new(ScriptedHost::default()));
        assert_eq!(
            service.measure_item_layout(ViewHolderId(2)),
            Some(Rect::new(0.0, 200.0, 100.0, 100.0))
        );
    }
}
