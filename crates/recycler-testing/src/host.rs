//! Scriptable stand-in for the host's measurement primitives.

use std::cell::RefCell;
use std::rc::Rc;

use recycler_core::{MeasureHost, ViewHolderId};
use recycler_ui_graphics::{Rect, Size};

#[derive(Debug)]
struct FakeHostState {
    view_created: bool,
    parent: Option<Rect>,
    first_child: Option<Rect>,
    item_size: Option<Size>,
    parent_calls: usize,
    item_calls: usize,
}

/// Fake measurement host shared between a test and the list under test.
///
/// Clones share state, so a test can keep a handle and change what the host
/// reports after handing it to the list. Before [`create_view`](Self::create_view)
/// (or after [`destroy_view`](Self::destroy_view)) every query returns `None`,
/// like a host whose native view does not exist.
#[derive(Clone, Debug)]
pub struct FakeMeasureHost {
    state: Rc<RefCell<FakeHostState>>,
}

impl FakeMeasureHost {
    /// A host whose view already exists.
    pub fn new(parent: Rect, item_size: Size) -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeHostState {
                view_created: true,
                parent: Some(parent),
                first_child: Some(parent),
                item_size: Some(item_size),
                parent_calls: 0,
                item_calls: 0,
            })),
        }
    }

    /// 399x899 container, first child filling it, 100x100 items.
    pub fn phone() -> Self {
        Self::new(Rect::new(0.0, 0.0, 399.0, 899.0), Size::new(100.0, 100.0))
    }

    /// Same as [`phone`](Self::phone) but without a native view yet.
    pub fn phone_without_view() -> Self {
        let host = Self::phone();
        host.destroy_view();
        host
    }

    pub fn create_view(&self) {
        self.state.borrow_mut().view_created = true;
    }

    pub fn destroy_view(&self) {
        self.state.borrow_mut().view_created = false;
    }

    pub fn set_parent(&self, parent: Option<Rect>) {
        self.state.borrow_mut().parent = parent;
    }

    pub fn set_first_child(&self, first_child: Option<Rect>) {
        self.state.borrow_mut().first_child = first_child;
    }

    /// `None` makes items unmeasurable while the container still measures.
    pub fn set_item_size(&self, size: Option<Size>) {
        self.state.borrow_mut().item_size = size;
    }

    pub fn parent_calls(&self) -> usize {
        self.state.borrow().parent_calls
    }

    pub fn item_calls(&self) -> usize {
        self.state.borrow().item_calls
    }
}

impl MeasureHost for FakeMeasureHost {
    fn measure_parent_size(&self) -> Option<Rect> {
        let mut state = self.state.borrow_mut();
        state.parent_calls += 1;
        if !state.view_created {
            return None;
        }
        state.parent
    }

    fn measure_first_child_layout(&self) -> Option<Rect> {
        let state = self.state.borrow();
        if !state.view_created {
            return None;
        }
        state.first_child
    }

    fn measure_item_layout(&self, _id: ViewHolderId) -> Option<Rect> {
        let mut state = self.state.borrow_mut();
        state.item_calls += 1;
        if !state.view_created {
            return None;
        }
        state.item_size.map(Rect::from_size)
    }
}
