//! Polygon files: `.csv` with `x`,`y` columns, or `.json` as `[[x, y], ...]`.

use anyhow::{bail, Context, Result};
use parcel::{Point, Polygon};
use polars::prelude::*;
use std::path::Path;

pub fn load_polygon(path: &Path) -> Result<Polygon> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let vertices = match ext.as_deref() {
        Some("csv") => read_csv(path),
        Some("json") => read_json(path),
        _ => bail!(
            "unsupported polygon file {} (expected .csv or .json)",
            path.display()
        ),
    }
    .with_context(|| format!("reading polygon from {}", path.display()))?;
    if let Some(i) = vertices
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        bail!("vertex {i} of {} is not finite", path.display());
    }
    tracing::debug!(path = %path.display(), vertices = vertices.len(), "polygon_loaded");
    Ok(Polygon::new(vertices))
}

fn read_csv(path: &Path) -> Result<Vec<Point>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, xy)| match xy {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => bail!("row {row} has an empty or non-numeric coordinate"),
        })
        .collect()
}

fn read_json(path: &Path) -> Result<Vec<Point>> {
    let bytes = std::fs::read(path)?;
    let pairs: Vec<[f64; 2]> = serde_json::from_slice(&bytes)?;
    Ok(pairs.into_iter().map(|[x, y]| Point::new(x, y)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn csv_with_integer_columns_is_cast() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lot.csv");
        fs::write(&path, "x,y\n0,0\n10,0\n10,5\n0,5\n").unwrap();
        let poly = load_polygon(&path).unwrap();
        assert_eq!(poly.len(), 4);
        assert_eq!(poly.area(), 50.0);
    }

    #[test]
    fn csv_missing_column_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "x,z\n0,0\n1,1\n").unwrap();
        assert!(load_polygon(&path).is_err());
    }

    #[test]
    fn csv_empty_cell_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hole.csv");
        fs::write(&path, "x,y\n0,0\n1.5,\n2,2\n").unwrap();
        let err = load_polygon(&path).unwrap_err();
        assert!(format!("{err:#}").contains("row 1"));
    }

    #[test]
    fn json_pairs_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lot.json");
        fs::write(&path, "[[0, 0], [4, 0], [0, 3]]").unwrap();
        let poly = load_polygon(&path).unwrap();
        assert_eq!(poly.area(), 6.0);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lot.png");
        fs::write(&path, [0u8; 4]).unwrap();
        let err = load_polygon(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported polygon file"));
    }
}
