//! 2D plan → 3D mesh descriptions.
//!
//! Each element becomes one `MeshSpec`: geometry in local space centred on
//! the origin, a world position, a rotation about the vertical axis, and a
//! surface finish. The 3D scene library on the host turns these into real
//! meshes and materials; nothing here talks to a GPU.
//!
//! World axes are Y-up. Plan x maps to world x and plan y maps to world z.

use fp_core::id::ElementId;
use fp_core::model::{Color, Element, ElementKind, Material, ShapeVariant};
use fp_core::shape::{footprint, signed_area};
use serde::Serialize;

/// Floor slab thickness for rooms.
pub const SLAB_THICKNESS: f32 = 2.0;

const WINDOW_TINT: &str = "#bae6fd";
const DOOR_DEFAULT: &str = "#78350f";

// ─── Output types ────────────────────────────────────────────────────────

/// Indexed triangle mesh in local space.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl TriMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MeshGeometry {
    /// Axis-aligned box centred on the origin.
    Cuboid { width: f32, height: f32, depth: f32 },
    /// Extruded polygon for L- and T-shaped footprints.
    Prism { height: f32, mesh: TriMesh },
}

/// Physically-based surface parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceFinish {
    /// `#rrggbb`.
    pub color: String,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    /// Light transmission; non-zero means a physical (glass) material.
    pub transmission: f32,
    pub thickness: f32,
}

impl SurfaceFinish {
    fn matte(color: String, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
            opacity: 1.0,
            transmission: 0.0,
            thickness: 0.0,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshSpec {
    pub element_id: ElementId,
    pub kind: ElementKind,
    pub geometry: MeshGeometry,
    /// World position of the local origin.
    pub position: [f32; 3],
    /// Radians about world Y.
    pub rotation_y: f32,
    pub finish: SurfaceFinish,
}

// ─── Projection ──────────────────────────────────────────────────────────

/// Project every element, in scene order.
pub fn project_scene(elements: &[Element], default_extent: f32) -> Vec<MeshSpec> {
    let specs: Vec<MeshSpec> = elements
        .iter()
        .map(|el| project_element(el, default_extent))
        .collect();
    log::trace!("projected {} elements", specs.len());
    specs
}

/// Project one element.
///
/// | kind | height | centre y |
/// |------|--------|----------|
/// | room | slab | slab / 2 |
/// | window | 0.4·h | 0.6·h |
/// | door | 0.8·h | 0.4·h |
/// | wall, furniture | h | h / 2 |
pub fn project_element(el: &Element, default_extent: f32) -> MeshSpec {
    let h = el.extent_or(default_extent);
    let base = resolved_color(el.color.as_deref(), el.material.default_color());

    let (height, center_y, mut finish) = match el.kind {
        ElementKind::Room => (
            SLAB_THICKNESS,
            SLAB_THICKNESS / 2.0,
            SurfaceFinish::matte(base, 0.9, 0.1),
        ),
        ElementKind::Window => (
            h * 0.4,
            h * 0.6,
            SurfaceFinish {
                color: WINDOW_TINT.to_string(),
                roughness: 0.1,
                metalness: 0.0,
                opacity: 0.4,
                transmission: 0.9,
                thickness: 5.0,
            },
        ),
        ElementKind::Door => (
            h * 0.8,
            h * 0.4,
            SurfaceFinish::matte(resolved_color(el.color.as_deref(), DOOR_DEFAULT), 0.4, 0.0),
        ),
        ElementKind::Wall | ElementKind::Furniture => {
            let (roughness, metalness) = if el.material == Material::Metal {
                (0.2, 0.8)
            } else {
                (0.7, 0.0)
            };
            (h, h / 2.0, SurfaceFinish::matte(base, roughness, metalness))
        }
    };
    if let Some(o) = el.opacity {
        finish.opacity = (finish.opacity * o).clamp(0.0, 1.0);
    }

    let geometry = match el.variant {
        ShapeVariant::Rectangle => MeshGeometry::Cuboid {
            width: el.width,
            height,
            depth: el.height,
        },
        variant => MeshGeometry::Prism {
            height,
            mesh: extrude_outline(&centered_footprint(variant, el.width, el.height), height),
        },
    };

    MeshSpec {
        element_id: el.id,
        kind: el.kind,
        geometry,
        position: [el.x + el.width / 2.0, center_y, el.y + el.height / 2.0],
        // Plan y runs along world +z, which mirrors the turn direction.
        rotation_y: -el.normalized_rotation().to_radians(),
        finish,
    }
}

/// Override color if it parses, otherwise `fallback`. Always `#rrggbb`.
fn resolved_color(color: Option<&str>, fallback: &str) -> String {
    color
        .and_then(Color::from_hex)
        .or_else(|| Color::from_hex(fallback))
        .map_or_else(|| fallback.to_string(), |c| c.to_hex())
}

fn centered_footprint(variant: ShapeVariant, w: f32, d: f32) -> Vec<(f32, f32)> {
    footprint(variant, w, d)
        .iter()
        .map(|&(x, z)| (x - w / 2.0, z - d / 2.0))
        .collect()
}

// ─── Extrusion ───────────────────────────────────────────────────────────

/// Extrude a simple polygon (x, z) into a closed prism spanning
/// `-height/2 ..= height/2` on Y. Faces wind counter-clockwise seen from
/// outside.
///
/// Vertex layout: `0..n` bottom ring, `n..2n` top ring.
pub fn extrude_outline(outline: &[(f32, f32)], height: f32) -> TriMesh {
    let n = outline.len();
    if n < 3 {
        return TriMesh::default();
    }
    // Work in the orientation the cap winding below assumes.
    let ring: Vec<(f32, f32)> = if signed_area(outline) < 0.0 {
        outline.iter().rev().copied().collect()
    } else {
        outline.to_vec()
    };

    let (y0, y1) = (-height / 2.0, height / 2.0);
    let mut mesh = TriMesh {
        positions: Vec::with_capacity(2 * n),
        indices: Vec::with_capacity(6 * (n - 2) + 6 * n),
    };
    mesh.positions.extend(ring.iter().map(|&(x, z)| [x, y0, z]));
    mesh.positions.extend(ring.iter().map(|&(x, z)| [x, y1, z]));

    let top = n as u32;
    for [a, b, c] in triangulate(&ring) {
        let (a, b, c) = (a as u32, b as u32, c as u32);
        mesh.indices.extend([a, b, c]);
        mesh.indices.extend([top + a, top + c, top + b]);
    }
    for i in 0..n as u32 {
        let j = (i + 1) % n as u32;
        mesh.indices.extend([i, top + i, top + j]);
        mesh.indices.extend([i, top + j, j]);
    }
    mesh
}

/// Ear-clipping triangulation of a simple polygon with positive signed
/// area. Returns index triples into `poly`.
pub fn triangulate(poly: &[(f32, f32)]) -> Vec<[usize; 3]> {
    let mut remaining: Vec<usize> = (0..poly.len()).collect();
    let mut tris = Vec::with_capacity(poly.len().saturating_sub(2));

    while remaining.len() > 3 {
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let (p, c, nx) = (
                remaining[(i + m - 1) % m],
                remaining[i],
                remaining[(i + 1) % m],
            );
            cross(poly[p], poly[c], poly[nx]) > 0.0
                && remaining
                    .iter()
                    .filter(|&&v| v != p && v != c && v != nx)
                    .all(|&v| !in_triangle(poly[v], poly[p], poly[c], poly[nx]))
        });
        let Some(i) = ear else {
            // Degenerate input: fall back to a fan over what is left.
            log::warn!("ear clipping stalled with {m} vertices; using a fan");
            for k in 1..m - 1 {
                tris.push([remaining[0], remaining[k], remaining[k + 1]]);
            }
            return tris;
        };
        tris.push([
            remaining[(i + m - 1) % m],
            remaining[i],
            remaining[(i + 1) % m],
        ]);
        remaining.remove(i);
    }
    if remaining.len() == 3 {
        tris.push([remaining[0], remaining[1], remaining[2]]);
    }
    tris
}

fn cross(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> f32 {
    (b.0 - a.0) * (c.1 - b.1) - (b.1 - a.1) * (c.0 - b.0)
}

fn in_triangle(p: (f32, f32), a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> bool {
    let side = |u: (f32, f32), v: (f32, f32)| (v.0 - u.0) * (p.1 - u.1) - (v.1 - u.1) * (p.0 - u.0);
    side(a, b) >= 0.0 && side(b, c) >= 0.0 && side(c, a) >= 0.0
}
