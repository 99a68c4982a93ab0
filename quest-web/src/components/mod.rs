pub mod badge_shelf;
pub mod dialogs;
pub mod header;
pub mod modal;
pub mod module_panel;
pub mod nav;
pub mod notifications;
pub mod overview;
