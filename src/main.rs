//! isomesh: extract an isosurface or contour wireframe from a scalar field and write it as OBJ.

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use isomesh_field::generate_field;
use isomesh_mesh_cpu::{MeshBuild, extract_with, mesh_report};

mod config;
mod obj;

use config::{IsomeshConfig, load_config_from_path};

#[derive(Parser, Debug)]
#[command(name = "isomesh")]
#[command(about = "Extract isosurfaces and contour lines from scalar fields", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, default_value = "isomesh.toml")]
    config: PathBuf,

    /// Iso-level; samples strictly above it are inside
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Flip every normal
    #[arg(long)]
    invert: bool,

    /// Emit per-face contour lines instead of triangles
    #[arg(long)]
    lines: bool,

    /// Output OBJ file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Re-run whenever the config file changes
    #[arg(long)]
    watch: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run_once(&cli) {
        log::error!("{}", e);
        if !cli.watch {
            std::process::exit(1);
        }
    }
    if cli.watch {
        watch_config(&cli);
    }
}

fn resolve_config(cli: &Cli) -> Result<IsomeshConfig, Box<dyn Error>> {
    let mut cfg = if cli.config.exists() {
        load_config_from_path(&cli.config)?
    } else {
        log::warn!(
            "config {} not found, using defaults",
            cli.config.display()
        );
        IsomeshConfig::default()
    };
    cfg.apply_overrides(cli.threshold, cli.invert, cli.lines, cli.output.clone());
    Ok(cfg)
}

fn run_once(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let cfg = resolve_config(cli)?;
    let buf = generate_field(&cfg.field)?;
    let opts = cfg.extract.options();
    if let Some((lo, hi)) = buf.value_range() {
        log::debug!(
            "field {}x{}x{} values in [{}, {}]",
            buf.dims().nx,
            buf.dims().ny,
            buf.dims().nz,
            lo,
            hi
        );
        if opts.threshold < lo || opts.threshold >= hi {
            log::warn!(
                "threshold {} does not split the field range [{}, {}]; output will be empty",
                opts.threshold,
                lo,
                hi
            );
        }
    }

    let mut mesh = MeshBuild::default();
    // Rough surface-sized guess: one vertex per sample on each axis-aligned slice.
    let dims = buf.dims();
    mesh.reserve_points(dims.nx * dims.ny + dims.ny * dims.nz + dims.nx * dims.nz);
    let stats = extract_with(&buf.as_field(), &opts, &mut mesh)?;
    mesh.transform_to_world(cfg.output.origin(), cfg.output.spacing());
    obj::write_obj(&cfg.output.path, &mesh)?;

    log::info!(
        "wrote {}: {} vertices, {} triangles, {} lines ({} ms)",
        cfg.output.path.display(),
        stats.vertices,
        stats.triangles,
        stats.lines,
        stats.elapsed_ms
    );
    if let Some(bounds) = mesh.bounds() {
        log::debug!("world bounds {:?} .. {:?}", bounds.min, bounds.max);
    }
    if stats.degenerate_normals > 0 {
        log::warn!(
            "{} vertices had a vanishing gradient and got the default normal",
            stats.degenerate_normals
        );
    }
    let report = mesh_report(&mesh);
    log::info!(
        "mesh report: duplicate_positions={} degenerate_triangles={} unreferenced={} boundary_edges={} non_manifold_edges={}",
        report.duplicate_positions,
        report.degenerate_triangles,
        report.unreferenced_vertices,
        report.boundary_edges,
        report.non_manifold_edges
    );
    Ok(())
}

fn watch_config(cli: &Cli) {
    use notify::{EventKind, RecursiveMode, Watcher};
    let (tx, rx) = std::sync::mpsc::channel::<()>();
    let mut watcher =
        match notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        }) {
            Ok(w) => w,
            Err(e) => {
                log::error!("failed to start config watcher: {}", e);
                return;
            }
        };
    if let Err(e) = watcher.watch(&cli.config, RecursiveMode::NonRecursive) {
        log::error!("cannot watch {}: {}", cli.config.display(), e);
        return;
    }
    log::info!("watching {} for changes", cli.config.display());
    while rx.recv().is_ok() {
        // editors save in several steps; coalesce the burst
        std::thread::sleep(Duration::from_millis(100));
        while rx.try_recv().is_ok() {}
        log::info!("config changed, re-extracting");
        if let Err(e) = run_once(cli) {
            log::warn!("reload failed: {}", e);
        }
    }
}
