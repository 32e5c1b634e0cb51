pub mod format;
pub mod picker;

pub use format::format_ranges;
pub use picker::SubcarrierPicker;
