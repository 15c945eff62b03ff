//! Scenery demo - renders the kitchen scene on the headless backend
//!
//! Usage: scenery_demo [TEXTURE_DIR] [--journal]
//!
//! Textures that cannot be found under TEXTURE_DIR (default `textures`) are
//! replaced by a checker placeholder. `--journal` prints every recorded
//! backend call.

mod kitchen;
mod log_bridge;

use scenery_engine::scenery::{Engine, SceneConfig};
use scenery_engine::scenery::device::ShapeKind;
use scenery_engine::scenery::device::headless::HeadlessBackend;
use scenery_engine::scenery::scene::SceneOrchestrator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    Engine::set_logger(log_bridge::LogFacadeBridge);

    let mut texture_root = String::from(scenery_engine::config::DEFAULT_TEXTURE_ROOT);
    let mut print_journal = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--journal" => print_journal = true,
            other => texture_root = other.to_string(),
        }
    }

    let config = SceneConfig::default().with_texture_root(&texture_root);
    Engine::set_min_severity(config.min_log_severity);

    let backend = HeadlessBackend::new();
    let mut orchestrator = SceneOrchestrator::new(
        config,
        backend.device(),
        backend.shader(),
        backend.geometry(),
    )?;

    // ========== PREPARE ==========
    let scene = kitchen::scene()?;
    let report = orchestrator.prepare(&scene)?;

    let mut placeholders = 0;
    for source in &scene.textures {
        if orchestrator.textures().entry(&source.tag).is_none() {
            orchestrator
                .textures_mut()
                .register_image(kitchen::placeholder(), &source.tag)?;
            placeholders += 1;
        }
    }
    if placeholders > 0 {
        orchestrator.textures_mut().bind_all()?;
    }

    // ========== RENDER ==========
    let stats = orchestrator.render(&scene)?;

    println!("Scene prepared from '{}'", texture_root);
    println!("  textures loaded:     {} ({} placeholders)", report.textures_loaded, placeholders);
    println!("  materials defined:   {}", report.materials_defined);
    println!("  point lights:        {}", report.point_lights);
    println!("  meshes loaded:       {}", report.meshes_loaded);
    println!("Frame");
    println!("  draw calls:          {}", stats.draw_calls);
    println!("  missing textures:    {}", stats.missing_textures);
    println!("  missing materials:   {}", stats.missing_materials);
    println!("  stale bindings:      {}", stats.stale_bindings);

    if let Ok(geometry) = backend.geometry.lock() {
        for shape in ShapeKind::ALL {
            let draws = geometry.draw_count(shape);
            if draws > 0 {
                println!("  {:<20} {}", format!("{}:", shape), draws);
            }
        }
    }

    if print_journal {
        println!("Journal ({} entries)", backend.journal.len());
        for (index, entry) in backend.journal.entries().iter().enumerate() {
            println!("  {:>4}  {}", index, entry);
        }
    }

    // ========== TEARDOWN ==========
    orchestrator.teardown()?;
    Ok(())
}
