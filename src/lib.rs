pub mod bitmap_font;
pub mod color;
pub mod font;
pub mod grid_gen;
pub mod icons;
pub mod layout;
