pub mod dialogs;
pub mod form_field;
pub mod keybindings;
pub mod terminal_guard;
pub mod view;

pub use form_field::FieldWidget;
pub use terminal_guard::install_panic_hook;
pub use view::{FieldSlot, FormView};
