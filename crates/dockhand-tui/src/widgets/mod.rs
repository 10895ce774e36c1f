//! Reusable widgets

mod selectable_list;

pub use selectable_list::SelectableList;
