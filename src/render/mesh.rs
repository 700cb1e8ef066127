use card_core::rose::{self, RoseScene};
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Vertex {
    pub(crate) position: [f32; 3],
    pub(crate) normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Instance {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
    pub(crate) params: [f32; 4],
}

impl Instance {
    fn new(model: Mat4, color: [f32; 4], in_sparkle_cloud: bool, emissive: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            params: [if in_sparkle_cloud { 1.0 } else { 0.0 }, emissive, 0.0, 0.0],
        }
    }
}

pub(crate) const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
pub(crate) const INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x4
];

pub(crate) struct MeshData {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) indices: Vec<u16>,
}

/// Unit disc in the XY plane facing +Z.
pub(crate) fn disc(segments: u16) -> MeshData {
    let mut vertices = vec![Vertex {
        position: [0.0, 0.0, 0.0],
        normal: [0.0, 0.0, 1.0],
    }];
    for i in 0..segments {
        let a = i as f32 / segments as f32 * TAU;
        vertices.push(Vertex {
            position: [a.cos(), a.sin(), 0.0],
            normal: [0.0, 0.0, 1.0],
        });
    }
    let mut indices = Vec::with_capacity(segments as usize * 3);
    for i in 0..segments {
        indices.extend_from_slice(&[0, 1 + i, 1 + (i + 1) % segments]);
    }
    MeshData { vertices, indices }
}

/// Unit UV sphere.
pub(crate) fn sphere(rings: u16, sectors: u16) -> MeshData {
    let mut vertices = Vec::with_capacity(((rings + 1) * (sectors + 1)) as usize);
    for r in 0..=rings {
        let phi = r as f32 / rings as f32 * PI;
        for s in 0..=sectors {
            let theta = s as f32 / sectors as f32 * TAU;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            vertices.push(Vertex {
                position: n.to_array(),
                normal: n.to_array(),
            });
        }
    }
    let stride = sectors + 1;
    let mut indices = Vec::with_capacity((rings * sectors * 6) as usize);
    for r in 0..rings {
        for s in 0..sectors {
            let a = r * stride + s;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    MeshData { vertices, indices }
}

pub(crate) const SPARKLE_SIZE: f32 = 0.03;

pub(crate) fn petal_instances(scene: &RoseScene) -> Vec<Instance> {
    scene
        .petals
        .iter()
        .map(|m| Instance::new(*m, rose::PETAL_COLOR, false, 0.13))
        .collect()
}

pub(crate) fn bud_instance(scene: &RoseScene) -> Instance {
    Instance::new(scene.bud, rose::BUD_COLOR, false, 0.2)
}

pub(crate) fn sparkle_instances(scene: &RoseScene) -> Vec<Instance> {
    scene
        .sparkles
        .iter()
        .map(|p| {
            let m = Mat4::from_translation(*p) * Mat4::from_scale(Vec3::splat(SPARKLE_SIZE));
            Instance::new(m, rose::SPARKLE_COLOR, true, 0.8)
        })
        .collect()
}
