//! Cuts the strip x in [7.5, 12.5] through three adjacent zone squares and
//! prints the resulting feature collection as GeoJSON. The right square lies
//! outside the strip and comes back unchanged.
//!
//! Usage:
//! ```text
//! cargo run --example cut
//! RUST_LOG=boundary_edit=trace cargo run --example cut
//! ```

use boundary_edit::{cut, merge, FeatureCollection, Geometry};
use geo::Rect;

const ZONES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "id": -1, "properties": { "name": "A" },
      "geometry": { "type": "Polygon",
        "coordinates": [[[5, 5], [10, 5], [10, 10], [5, 10], [5, 5]]] } },
    { "type": "Feature", "id": 1, "properties": { "name": "B" },
      "geometry": { "type": "Polygon",
        "coordinates": [[[10, 5], [15, 5], [15, 10], [10, 10], [10, 5]]] } },
    { "type": "Feature", "id": 2, "properties": { "name": "C" },
      "geometry": { "type": "Polygon",
        "coordinates": [[[15, 5], [20, 5], [20, 10], [15, 10], [15, 5]]] } }
  ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default: WARN for everything, DEBUG for boundary_edit.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("boundary_edit=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let zones = FeatureCollection::from_geojson_str(ZONES)?;
    let cutter = Geometry::Polygon(Rect::new((7.5, 0.0), (12.5, 15.0)).to_polygon());

    let Some(edited) = cut(&zones, &cutter) else {
        println!("cutter overlaps nothing; zones unchanged");
        return Ok(());
    };
    let edited = FeatureCollection::new(edited);
    println!("{}", serde_json::to_string_pretty(&edited.to_geojson())?);

    if let Some(merged) = merge(&edited) {
        println!("{}", serde_json::to_string_pretty(&merged.to_geojson())?);
    }
    Ok(())
}
