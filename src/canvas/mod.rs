pub mod renderer;
pub mod shapes;
