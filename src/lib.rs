//! Classic single-player Snake on a fixed grid.
//!
//! [`game::SnakeGame`] owns the snake, the food and the tick schedule, and
//! paints itself on any [`render::Surface`]. The binary drives it on a
//! terminal through [`term::TermManager`].

pub mod app;
pub mod cell;
pub mod collision;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod render;
pub mod snake;
pub mod term;
