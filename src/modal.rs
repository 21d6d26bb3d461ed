//! Detail modal navigation state.
//!
//! When a marker is activated the modal opens on the clicked location's
//! [`group`](crate::markers::group_by_location) of co-located stores and
//! tracks two cursors: which store in the group is shown, and which of that
//! store's images. Both wrap circularly; switching store invalidates the
//! image selection and resets it to the first image. Everything here is a UI
//! affordance: navigation on a closed modal or an empty group is silently
//! ignored rather than treated as an error.

use crate::models::StoreRecord;

/// Horizontal swipe distance (px-equivalent) required to change image.
pub const SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Default)]
pub struct ModalNavigator {
    open: bool,
    group: Vec<StoreRecord>,
    store_index: usize,
    image_index: usize,
}

impl ModalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open on a location group. Ignored for an empty group; otherwise the
    /// cursors reset to the first store and its first image.
    pub fn open(&mut self, group: Vec<StoreRecord>) {
        if group.is_empty() {
            return;
        }
        self.group = group;
        self.open = true;
        self.store_index = 0;
        self.image_index = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.group.clear();
        self.store_index = 0;
        self.image_index = 0;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn store_index(&self) -> usize {
        self.store_index
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn group(&self) -> &[StoreRecord] {
        &self.group
    }

    pub fn current_store(&self) -> Option<&StoreRecord> {
        if self.open {
            self.group.get(self.store_index)
        } else {
            None
        }
    }

    /// Image URLs of the store currently shown.
    pub fn current_images(&self) -> Vec<String> {
        self.current_store()
            .map(|s| s.image_url_list())
            .unwrap_or_default()
    }

    /// Header line: the store name for a lone store, or
    /// "district (N ร้าน)" when several stores share the location.
    pub fn location_title(&self) -> Option<String> {
        let first = self.current_store()?;
        if self.group.len() > 1 {
            Some(format!("{} ({} ร้าน)", first.district, self.group.len()))
        } else {
            Some(first.store_name.clone())
        }
    }

    fn nav_allowed(&self) -> bool {
        self.open && !self.group.is_empty()
    }

    pub fn next_store(&mut self) {
        if !self.nav_allowed() {
            return;
        }
        self.store_index = if self.store_index + 1 == self.group.len() {
            0
        } else {
            self.store_index + 1
        };
        self.image_index = 0;
    }

    pub fn prev_store(&mut self) {
        if !self.nav_allowed() {
            return;
        }
        self.store_index = if self.store_index == 0 {
            self.group.len() - 1
        } else {
            self.store_index - 1
        };
        self.image_index = 0;
    }

    /// Jump to a store by index; out-of-range indices are ignored.
    pub fn go_to_store(&mut self, index: usize) {
        if !self.nav_allowed() || index >= self.group.len() {
            return;
        }
        self.store_index = index;
        self.image_index = 0;
    }

    pub fn next_image(&mut self) {
        if !self.nav_allowed() {
            return;
        }
        let n = self.current_images().len();
        if n == 0 {
            self.image_index = 0;
            return;
        }
        self.image_index = if self.image_index + 1 == n {
            0
        } else {
            self.image_index + 1
        };
    }

    pub fn prev_image(&mut self) {
        if !self.nav_allowed() {
            return;
        }
        let n = self.current_images().len();
        if n == 0 {
            self.image_index = 0;
            return;
        }
        self.image_index = if self.image_index == 0 {
            n - 1
        } else {
            self.image_index - 1
        };
    }

    /// Touch-swipe on the image area. `delta_x` is end minus start: a drag to
    /// the left (negative past the threshold) advances, a drag to the right
    /// goes back. Smaller motions and single-image stores are ignored.
    pub fn on_swipe(&mut self, delta_x: f32) {
        if !self.nav_allowed() || self.current_images().len() < 2 {
            return;
        }
        if delta_x <= -SWIPE_THRESHOLD {
            self.next_image();
        } else if delta_x >= SWIPE_THRESHOLD {
            self.prev_image();
        }
    }
}
