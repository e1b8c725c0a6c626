//! Building selector
//!
//! A drop-down listing every building as `"<short code>: <long name>"`.
//! The selector only remembers what it is displaying; the raw label is
//! reported upward unchanged and never validated here.

use iced::widget::pick_list;
use iced::Element;

use crate::state::data::BuildingDirectory;
use crate::Message;

/// Label shown for one building
pub fn option_label(short_code: &str, long_name: &str) -> String {
    format!("{short_code}: {long_name}")
}

/// All selectable labels for a directory, in short code order
pub fn options(directory: &BuildingDirectory) -> Vec<String> {
    directory.iter().map(|(code, name)| option_label(code, name)).collect()
}

#[derive(Debug, Clone, Default)]
pub struct Selector {
    displayed: Option<String>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the user's choice and hand back the label to report
    pub fn choose(&mut self, label: String) -> String {
        self.displayed = Some(label.clone());
        label
    }

    pub fn clear(&mut self) {
        self.displayed = None;
    }

    pub fn displayed(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    pub fn view<'a>(
        &'a self,
        options: &'a [String],
        on_select: impl Fn(String) -> Message + 'a,
    ) -> Element<'a, Message> {
        pick_list(options, self.displayed.clone(), on_select)
            .placeholder("Choose a building...")
            .padding(8)
            .into()
    }
}
