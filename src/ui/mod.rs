pub mod code_editor;
pub mod components;
pub mod layout;
pub mod markup;
pub mod theme;
