//! Frame loop demo application
//!
//! Demonstrates the render-submission core by driving a few frames through
//! the full path: register resolved proxies, traverse a tiny "scene" into
//! the queue, sort with the opaque/transparent split, and submit to a
//! backend that logs every bind and draw.

use render_core::prelude::*;
use std::sync::Arc;

/// Backend that logs the draw stream instead of talking to a GPU
struct LoggingBackend;

impl DrawBackend for LoggingBackend {
    fn bind_material(&mut self, material: &MaterialProxy, pass_idx: u32) -> Result<(), SubmitError> {
        log::info!(
            "  bind material '{}' pass {} ({}, {} params)",
            material.name(),
            pass_idx,
            material
                .pass(pass_idx)
                .map_or("?", |pass| pass.shader.as_str()),
            material.params().len()
        );
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &MeshProxy) -> Result<(), SubmitError> {
        let range = mesh.sub_mesh();
        log::info!(
            "  draw '{}' ({} indices at {})",
            mesh.name(),
            range.index_count,
            range.index_offset
        );
        Ok(())
    }
}

/// One drawable in the demo scene
struct SceneObject {
    material: Arc<MaterialProxy>,
    mesh: Arc<MeshProxy>,
    position: Vec3,
    layers: LayerMask,
}

fn build_scene(registry: &mut ProxyRegistry) -> Result<Vec<SceneObject>, Box<dyn std::error::Error>> {
    let rock = registry.add_material(
        MaterialProxy::new(
            MaterialId(0),
            "rock",
            vec![
                MaterialPass::opaque("pbr"),
                MaterialPass::new("shadow_caster", PassStateFlags::DEPTH_WRITE),
            ],
        )?
        .with_param("base_color", ParamValue::Vec4(Vec4::new(0.45, 0.42, 0.38, 1.0)))
        .with_param("roughness", ParamValue::Float(0.85))
        .with_param("albedo_map", ParamValue::Texture(TextureHandle(0x30))),
    );
    let glass = registry.add_material(
        MaterialProxy::new(
            MaterialId(1),
            "glass",
            vec![MaterialPass::transparent("pbr_blend")],
        )?
        .with_param("base_color", ParamValue::Vec4(Vec4::new(0.6, 0.8, 0.9, 0.35)))
        .with_param("roughness", ParamValue::Float(0.05)),
    );

    let boulder = registry.add_mesh(MeshProxy::new(
        MeshId(0),
        "boulder",
        BufferHandle(0x10),
        BufferHandle(0x11),
        SubMesh::new(0, 1536),
    )?);
    let pane = registry.add_mesh(MeshProxy::new(
        MeshId(1),
        "window_pane",
        BufferHandle(0x20),
        BufferHandle(0x21),
        SubMesh::new(0, 6),
    )?);

    Ok(vec![
        SceneObject {
            material: registry.material(rock)?,
            mesh: registry.mesh(boulder)?,
            position: Vec3::new(0.0, 0.0, -12.0),
            layers: LayerMask::layer(0),
        },
        SceneObject {
            material: registry.material(rock)?,
            mesh: registry.mesh(boulder)?,
            position: Vec3::new(3.0, 0.0, -4.0),
            layers: LayerMask::layer(0),
        },
        SceneObject {
            material: registry.material(glass)?,
            mesh: registry.mesh(pane)?,
            position: Vec3::new(0.0, 1.0, -6.0),
            layers: LayerMask::layer(0),
        },
        SceneObject {
            material: registry.material(glass)?,
            mesh: registry.mesh(pane)?,
            position: Vec3::new(-2.0, 1.0, -9.0),
            layers: LayerMask::layer(0),
        },
        // Editor-only gizmo, filtered out by the camera's layer mask.
        SceneObject {
            material: registry.material(rock)?,
            mesh: registry.mesh(pane)?,
            position: Vec3::new(0.0, 5.0, 0.0),
            layers: LayerMask::layer(8),
        },
    ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Starting frame loop demo...");

    let mut registry = ProxyRegistry::new();
    let scene = build_scene(&mut registry)?;
    log::info!(
        "Scene ready: {} objects, {} materials, {} meshes",
        scene.len(),
        registry.material_count(),
        registry.mesh_count()
    );

    let config = SubmissionConfig {
        log_frame_stats: true,
        ..SubmissionConfig::default()
    };
    let camera_layers = LayerMask::layer(0);
    let mut camera_position = Vec3::new(0.0, 2.0, 4.0);

    let mut queue = RenderQueue::with_capacity(
        Box::new(AlphaSplit::new(camera_position)),
        config.queue_capacity,
    );
    let mut submitter = FrameSubmitter::new(config);
    let mut backend = LoggingBackend;

    for frame in 0..3 {
        log::info!("--- frame {frame} (camera at {camera_position:?}) ---");

        queue.clear();
        queue.set_strategy(Box::new(AlphaSplit::new(camera_position)));
        for object in scene
            .iter()
            .filter(|object| object.layers.intersects(camera_layers))
        {
            queue.add(object.material.clone(), object.mesh.clone(), object.position)?;
        }

        queue.sort();
        submitter.submit(&queue, &mut backend)?;

        let stats = submitter.stats();
        log::info!(
            "frame {frame}: {} draws, {} binds",
            stats.draw_calls,
            stats.material_binds
        );

        // Dolly the camera forward so the depth ordering shifts per frame.
        camera_position += Vec3::new(0.0, 0.0, -3.0);
    }

    log::info!("Frame loop demo finished");
    Ok(())
}
