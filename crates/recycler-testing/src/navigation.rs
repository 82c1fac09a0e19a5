//! Minimal navigation stack for hide/show scenarios.
//!
//! Pushing a screen hides the one below it without unmounting it: its host
//! view is destroyed but the list instance, its bindings and its measured
//! sizes stay alive. Popping unmounts the top screen and shows the one below.

use crate::rule::{HarnessError, ListTestRule};

pub struct ScreenStack<T> {
    screens: Vec<(String, ListTestRule<T>)>,
}

impl<T: 'static> Default for ScreenStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ScreenStack<T> {
    pub fn new() -> Self {
        Self {
            screens: Vec::new(),
        }
    }

    /// Hides the current top screen and lays out `rule` on top of it.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        mut rule: ListTestRule<T>,
    ) -> Result<(), HarnessError> {
        if let Some((_, top)) = self.screens.last_mut() {
            top.hide();
        }
        rule.settle()?;
        self.screens.push((name.into(), rule));
        Ok(())
    }

    /// Unmounts the top screen and shows the one below. Returns the name of
    /// the popped screen.
    pub fn pop(&mut self) -> Result<Option<String>, HarnessError> {
        let Some((name, popped)) = self.screens.pop() else {
            return Ok(None);
        };
        popped.unmount();
        if let Some((_, top)) = self.screens.last_mut() {
            top.show()?;
        }
        Ok(Some(name))
    }

    pub fn top(&self) -> Option<&ListTestRule<T>> {
        self.screens.last().map(|(_, rule)| rule)
    }

    pub fn screen(&self, name: &str) -> Option<&ListTestRule<T>> {
        self.screens
            .iter()
            .find(|(screen_name, _)| screen_name == name)
            .map(|(_, rule)| rule)
    }

    pub fn screen_mut(&mut self, name: &str) -> Option<&mut ListTestRule<T>> {
        self.screens
            .iter_mut()
            .find(|(screen_name, _)| screen_name == name)
            .map(|(_, rule)| rule)
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}
