use anyhow::Result;
use serde::Serialize;

use panelcam_core::cell::source_for;
use panelcam_core::{AppConfig, CameraPose, CenterLinePath, KeyframePath, ScaleResolver, Viewport};

#[derive(Debug, Serialize)]
struct FrameRow {
    frame: usize,
    point_id: f64,
    width: f64,
    height: f64,
    scale: f64,
    x: f64,
    y: f64,
}

pub async fn run(config: &AppConfig, width: f64, height: f64, json: bool) -> Result<()> {
    let source = source_for(&config.source)?;
    let cells = source.fetch().await?;
    let path = KeyframePath::build(&CenterLinePath, &cells)?;
    let viewport = Viewport::new(width, height);

    let rows = frame_rows(&path, viewport);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{} frames from {} at {}x{}:\n",
        rows.len(),
        source.describe(),
        width,
        height
    );
    println!(
        "  {:>5}  {:>10}  {:>12}  {:>6}  {:>10}  {:>10}",
        "frame", "point", "cell", "scale", "x", "y"
    );
    for row in &rows {
        println!(
            "  {:>5}  {:>10.1}  {:>12}  {:>6.2}  {:>10.1}  {:>10.1}",
            row.frame,
            row.point_id,
            format!("{}x{}", row.width, row.height),
            row.scale,
            row.x,
            row.y
        );
    }

    Ok(())
}

fn frame_rows(path: &KeyframePath, viewport: Viewport) -> Vec<FrameRow> {
    let resolver = ScaleResolver;
    path.keys()
        .iter()
        .enumerate()
        .map(|(frame, key)| {
            let scale = resolver.resolve(key.cell.size(), viewport);
            let pose = CameraPose::framing(key.anchor, scale, viewport);
            FrameRow {
                frame,
                point_id: key.point_id,
                width: key.cell.w,
                height: key.cell.h,
                scale,
                x: pose.x,
                y: pose.y,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use panelcam_core::Cell;

    use super::*;

    #[test]
    fn test_frame_rows() {
        let cells = [
            Cell::new(0.0, 0.0, 800.0, 600.0),
            Cell::new(900.0, 0.0, 2000.0, 600.0),
        ];
        let path = KeyframePath::build(&CenterLinePath, &cells).unwrap();
        let rows = frame_rows(&path, Viewport::new(1000.0, 800.0));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].scale, 1.0);
        assert_eq!(rows[1].scale, 0.5);
        assert_eq!(rows[1].point_id, 1500.0);
        assert_eq!((rows[1].x, rows[1].y), (-450.0, 250.0));
    }
}
