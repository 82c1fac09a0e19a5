//! Test rule that mounts a list against a [`FakeMeasureHost`] and renders
//! bound items to strings.
//!
//! # Example
//!
//! ```
//! use recycler_foundation::RecyclerListConfig;
//! use recycler_testing::{FakeMeasureHost, ListTestRule};
//!
//! let mut rule = ListTestRule::mount(
//!     FakeMeasureHost::phone(),
//!     RecyclerListConfig::new().estimated_item_size(100.0),
//!     vec![0, 1, 2, 3, 4],
//!     |item: &i32| item.to_string(),
//! )
//! .expect("mount succeeds");
//!
//! rule.settle().expect("layout settles");
//! assert!(rule.contains_text("0"));
//! assert!(rule.opacity().is_visible());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use recycler_core::{Evaluation, Opacity, RecyclerError, RenderId};
use recycler_foundation::{ConfigError, RecyclerList, RecyclerListConfig};

use crate::host::FakeMeasureHost;

/// Upper bound on layout passes in [`ListTestRule::settle`]. Each pass can
/// bind new items that only get measured on the next one.
const MAX_LAYOUT_PASSES: usize = 8;

/// Anything that can go wrong while driving a list from a test.
#[derive(Debug, Clone, PartialEq)]
pub enum HarnessError {
    Config(ConfigError),
    Recycler(RecyclerError),
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Config(err) => write!(f, "invalid list config: {err}"),
            HarnessError::Recycler(err) => write!(f, "recycler error: {err}"),
        }
    }
}

impl std::error::Error for HarnessError {}

impl From<ConfigError> for HarnessError {
    fn from(err: ConfigError) -> Self {
        HarnessError::Config(err)
    }
}

impl From<RecyclerError> for HarnessError {
    fn from(err: RecyclerError) -> Self {
        HarnessError::Recycler(err)
    }
}

type RenderItem<T> = Box<dyn Fn(&T) -> String>;

/// A mounted list plus the data and item renderer a screen would give it.
///
/// Dropping the rule (or calling [`unmount`](Self::unmount)) unmounts the list.
pub struct ListTestRule<T> {
    list: RecyclerList<FakeMeasureHost>,
    host: FakeMeasureHost,
    data: Rc<Vec<T>>,
    render_item: RenderItem<T>,
    events: Rc<RefCell<Vec<Evaluation>>>,
}

impl<T: 'static> ListTestRule<T> {
    /// Mounts the list and binds `data`. No layout event is delivered yet.
    pub fn mount(
        host: FakeMeasureHost,
        config: RecyclerListConfig,
        data: Vec<T>,
        render_item: impl Fn(&T) -> String + 'static,
    ) -> Result<Self, HarnessError> {
        let mut list = RecyclerList::mount(host.clone(), config)?;
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        list.set_commit_listener(move |eval: &Evaluation| sink.borrow_mut().push(*eval));

        let data = Rc::new(data);
        list.set_data(Rc::clone(&data))?;
        Ok(Self {
            list,
            host,
            data,
            render_item: Box::new(render_item),
            events,
        })
    }

    /// Delivers host layout events until a pass changes neither the render
    /// stack nor the render generation.
    pub fn settle(&mut self) -> Result<Evaluation, HarnessError> {
        let mut eval = self.list.on_layout()?;
        for _ in 1..MAX_LAYOUT_PASSES {
            let before = (self.list.render_stack().version(), eval.render_id);
            eval = self.list.on_layout()?;
            if (self.list.render_stack().version(), eval.render_id) == before {
                return Ok(eval);
            }
        }
        log::warn!("layout did not settle after {MAX_LAYOUT_PASSES} passes");
        Ok(eval)
    }

    /// Replaces the data without delivering a layout event.
    pub fn set_data(&mut self, data: Vec<T>) -> Result<Evaluation, HarnessError> {
        self.data = Rc::new(data);
        Ok(self.list.set_data(Rc::clone(&self.data))?)
    }

    pub fn scroll_to(&mut self, offset: f32) -> Result<Evaluation, HarnessError> {
        Ok(self.list.set_scroll_offset(offset)?)
    }

    /// The host destroys the list's view; the list stays mounted.
    pub fn hide(&mut self) -> Evaluation {
        self.host.destroy_view();
        self.list.on_detached()
    }

    /// The host recreates the view and lays it out again.
    pub fn show(&mut self) -> Result<Evaluation, HarnessError> {
        self.host.create_view();
        self.settle()
    }

    /// Rendered output of every bound holder, in data order.
    pub fn rendered_texts(&self) -> Vec<String> {
        self.list
            .render_stack()
            .iter()
            .filter_map(|binding| self.data.get(binding.data_index))
            .map(|item| (self.render_item)(item))
            .collect()
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.rendered_texts().iter().any(|rendered| rendered == text)
    }

    pub fn rendered_indices(&self) -> Vec<usize> {
        self.list
            .render_stack()
            .iter()
            .map(|binding| binding.data_index)
            .collect()
    }

    pub fn opacity(&self) -> Opacity {
        self.list.current_opacity()
    }

    pub fn render_id(&self) -> RenderId {
        self.list.current_render_id()
    }

    /// Height of item `index` as the list would place it.
    pub fn item_height(&self, index: usize) -> Option<f32> {
        self.list.item_layout(index).map(|rect| rect.height)
    }

    /// Every opacity/generation change reported to the commit listener.
    pub fn events(&self) -> Vec<Evaluation> {
        self.events.borrow().clone()
    }

    pub fn list(&self) -> &RecyclerList<FakeMeasureHost> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut RecyclerList<FakeMeasureHost> {
        &mut self.list
    }

    pub fn host(&self) -> &FakeMeasureHost {
        &self.host
    }

    pub fn unmount(self) {
        drop(self);
    }
}
