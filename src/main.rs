use anyhow::{bail, Context};
use std::path::PathBuf;

use vpick::init_logging;
use vpick_picker::{default_layout, load_layout, renderer, xml, PickerCanvas};

/// Headless layout utility: validate a picker layout file, summarize its
/// controls, and optionally render a PNG preview. Runs without a host
/// session, so selection/action behavior is out of scope here.
fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut layout_path: Option<PathBuf> = None;
    let mut render_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--render" => match args.next() {
                Some(path) => render_path = Some(PathBuf::from(path)),
                None => bail!("--render requires an output path"),
            },
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            _ if arg.starts_with('-') => bail!("unknown option '{arg}'"),
            _ => layout_path = Some(PathBuf::from(arg)),
        }
    }

    let shapes = match &layout_path {
        Some(path) => load_layout(path)
            .with_context(|| format!("failed to load layout '{}'", path.display()))?,
        None => {
            tracing::info!("no layout given, using the built-in default");
            default_layout()
        }
    };

    println!("{} control(s)", shapes.len());
    for shape in &shapes {
        let label = if shape.label.is_empty() {
            "-"
        } else {
            shape.label.as_str()
        };
        let node = if shape.node.is_empty() {
            "-"
        } else {
            shape.node.as_str()
        };
        println!(
            "  {:<12} label={:<12} pos={},{} size={}x{} node={}{}",
            shape.kind.as_str(),
            label,
            shape.position.x,
            shape.position.y,
            shape.size.w,
            shape.size.h,
            node,
            if shape.action.is_empty() {
                ""
            } else {
                " [action]"
            },
        );
    }

    // Round-trip sanity: the document must survive write + re-parse intact.
    let written = xml::write_document(&shapes)?;
    let reparsed = xml::parse_document(&written)?;
    if reparsed != shapes {
        bail!("round-trip mismatch: the layout does not serialize cleanly");
    }
    println!("round-trip OK");

    if let Some(out) = render_path {
        let mut canvas = PickerCanvas::new();
        canvas.import(shapes, true);

        let mut width = 64;
        let mut height = 64;
        for item in canvas.items() {
            let rect = item.scene_rect();
            width = width.max(rect.right() + 10);
            height = height.max(rect.bottom() + 10);
        }

        renderer::render_to_png(&canvas, width as u32, height as u32, &out)
            .with_context(|| format!("failed to render '{}'", out.display()))?;
        println!("preview written to {}", out.display());
    }

    Ok(())
}

fn print_usage() {
    println!("usage: vpick [LAYOUT.xml] [--render OUT.png]");
    println!();
    println!("Validates a picker layout document and prints a per-control summary.");
    println!("Without a layout argument the built-in default layout is used.");
}
