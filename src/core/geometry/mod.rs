pub mod angle;
pub mod rect;
pub mod site;
