pub mod config;
pub use config::OutlineConfig;
pub mod error;
pub use error::{OutlineError, Stage};
pub mod grayscale;
pub use grayscale::{GrayscaleImage, grayscale_from_image, load_grayscale};
pub mod edges;
pub use edges::{CannyEdgeDetector, EdgeDetector, EdgeMask};
pub mod vertices;
pub use vertices::{Vertex, find_vertices};
pub mod order;
pub use order::order_vertices;
pub mod finalize;
pub use finalize::{NormalizedPoint, finalize_polygon};
