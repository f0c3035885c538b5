use std::path::{Path, PathBuf};

use serde::Serialize;
use tilt::logging::parse_level;
use tilt::{parse_document, ScriptedEvent, Visualizer};
use tilt_core::{TiltSettings, SIXTY_HZ_MS};
use tilt_render::{HeadlessRenderer, TextureImage};
use tilt_scene::{Document, Element, LayoutRect, NodeInfo, Viewport};
use tracing_subscriber::filter::LevelFilter;

const DEFAULT_FRAMES: u32 = 60;

#[derive(Debug, PartialEq)]
pub struct HeadlessArgs {
    pub layout_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub events_path: Option<PathBuf>,
    pub frames: u32,
    pub pick: Option<(f32, f32)>,
    pub print: bool,
    pub log_level: LevelFilter,
    pub help: bool,
}

#[derive(Debug, Serialize)]
struct RunReport {
    nodes: usize,
    triangles: usize,
    frames: u32,
    draws: usize,
    rotation: [f32; 4],
    translation: [f32; 3],
    picked: Option<NodeInfo>,
}

pub fn parse_headless_args(args: &[String]) -> Result<HeadlessArgs, String> {
    let mut parsed = HeadlessArgs {
        layout_path: None,
        config_path: None,
        events_path: None,
        frames: DEFAULT_FRAMES,
        pick: None,
        print: false,
        log_level: LevelFilter::INFO,
        help: false,
    };
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--layout" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--layout requires a path".to_string())?;
                parsed.layout_path = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            "--events" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--events requires a path".to_string())?;
                parsed.events_path = Some(PathBuf::from(value));
            }
            "--frames" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--frames requires a count".to_string())?;
                parsed.frames = value
                    .parse()
                    .map_err(|_| format!("invalid frame count '{value}'"))?;
            }
            "--pick" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--pick requires x,y".to_string())?;
                parsed.pick = Some(parse_point(value)?);
            }
            "--log-level" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--log-level requires a level".to_string())?;
                parsed.log_level = parse_level(value)?;
            }
            "--print" => parsed.print = true,
            "--help" | "-h" => parsed.help = true,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    Ok(parsed)
}

pub fn print_headless_help() {
    println!(
        "Usage: tilt [options]\n  --layout <path>     page layout JSON (built-in sample when omitted)\n  --config <path>     settings JSON\n  --events <path>     scripted input events JSON\n  --frames <n>        frames to simulate at 60 Hz (default {DEFAULT_FRAMES})\n  --pick <x,y>        pick the node under a page pixel after the last frame\n  --print             print a JSON report to stdout\n  --log-level <level> error, warn, info, debug or trace"
    );
}

pub fn run_headless(args: &HeadlessArgs) -> Result<(), String> {
    let settings = match &args.config_path {
        Some(path) => TiltSettings::from_json(&read_text(path)?).map_err(|err| err.to_string())?,
        None => TiltSettings::default(),
    };
    let document = match &args.layout_path {
        Some(path) => parse_document(&read_text(path)?).map_err(|err| err.to_string())?,
        None => sample_document(),
    };
    let mut events = match &args.events_path {
        Some(path) => load_events(path)?,
        None => Vec::new(),
    };
    events.sort_by_key(|scripted| scripted.frame);

    let viewport = document.viewport;
    let renderer = HeadlessRenderer::new(viewport.width, viewport.height);
    let mut visualizer = Visualizer::new(renderer, settings);
    visualizer.load_document(&document);
    visualizer.set_texture("snapshot", &blank_snapshot(viewport));

    let mut draws = 0;
    let mut picked = None;
    let mut pending = events.iter().peekable();
    for frame in 0..args.frames {
        while let Some(scripted) = pending.next_if(|scripted| scripted.frame <= frame) {
            if let Some(info) = visualizer.handle_event(scripted.event) {
                tracing::info!(label = %info.label, frame, "double click picked node");
                picked = Some(info);
            }
        }
        if visualizer.frame(SIXTY_HZ_MS) {
            draws += visualizer.renderer_mut().take_draws().len();
        }
    }
    if pending.peek().is_some() {
        tracing::warn!("some scripted events were scheduled after the last frame");
    }

    if let Some((x, y)) = args.pick {
        picked = visualizer.pick(x, y).cloned();
        match &picked {
            Some(info) => tracing::info!(x, y, label = %info.label, "picked node"),
            None => tracing::info!(x, y, "nothing to pick"),
        }
    }

    let frame = visualizer.last_frame();
    let report = RunReport {
        nodes: visualizer.mesh().node_count(),
        triangles: visualizer.mesh().triangle_count(),
        frames: args.frames,
        draws,
        rotation: frame.rotation.to_array(),
        translation: frame.translation.to_array(),
        picked,
    };
    tracing::info!(
        nodes = report.nodes,
        triangles = report.triangles,
        draws = report.draws,
        "headless: completed"
    );

    if args.print {
        let json = serde_json::to_string_pretty(&report).map_err(|err| err.to_string())?;
        println!("{json}");
    }
    Ok(())
}

fn parse_point(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{value}'"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid x coordinate '{x}'"))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid y coordinate '{y}'"))?;
    Ok((x, y))
}

fn read_text(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))
}

fn load_events(path: &Path) -> Result<Vec<ScriptedEvent>, String> {
    serde_json::from_str(&read_text(path)?).map_err(|err| format!("{}: {err}", path.display()))
}

fn blank_snapshot(viewport: Viewport) -> TextureImage {
    let width = viewport.width.max(1.0) as u32;
    let height = viewport.height.max(1.0) as u32;
    TextureImage {
        width,
        height,
        pixels: vec![255; width as usize * height as usize * 4],
    }
}

fn sample_document() -> Document {
    let root = Element::new("body", LayoutRect::new(0.0, 0.0, 1024.0, 768.0))
        .with_child(
            Element::new("header", LayoutRect::new(0.0, 0.0, 1024.0, 80.0))
                .with_id("top")
                .with_child(
                    Element::new("h1", LayoutRect::new(24.0, 20.0, 400.0, 40.0))
                        .with_inner_html("Tilt"),
                ),
        )
        .with_child(
            Element::new("main", LayoutRect::new(0.0, 80.0, 1024.0, 688.0)).with_child(
                Element::new("article", LayoutRect::new(312.0, 184.0, 400.0, 400.0))
                    .with_class("card")
                    .with_child(
                        Element::new("p", LayoutRect::new(362.0, 334.0, 300.0, 100.0))
                            .with_inner_html("Hello from the page."),
                    ),
            ),
        );
    Document::new(Viewport::default(), root)
}
