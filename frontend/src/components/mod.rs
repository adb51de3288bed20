// Reusable components live here.

pub mod badges;
pub mod loading_button;
pub mod loading_spinner;
pub mod toast;
