pub mod marker_io;
pub mod outline;
pub mod pipeline;
pub mod plot_outline;
pub mod shapes;
