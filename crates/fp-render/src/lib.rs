pub mod extrude;
pub mod hit;
pub mod outline;

pub use extrude::{MeshGeometry, MeshSpec, SurfaceFinish, TriMesh, project_element, project_scene};
pub use hit::{hit_test, hit_test_rect, resize_handle_hit};
pub use outline::{plan_bounds, plan_outline};
