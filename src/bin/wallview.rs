//! Build the upper wall between two toy sectors and print the vertices.
//!
//! ```bash
//! cargo run -- --own-ceiling 128 --neighbor-ceiling 64
//! ```

use anyhow::Result;
use clap::Parser;
use glam::dvec2;

use vised_rs::config::{MapConfig, MapInfo};
use vised_rs::map::{
    FieldMap, Linedef, LinedefFlags, Map, MapFormat, NO_TEXTURE_NAME, Sector, Sidedef, Vertex,
};
use vised_rs::textures::{TextureCatalog, TextureImage};
use vised_rs::visual::{EditContext, SectorDataCache, UpperWall, WallPart};

#[derive(Parser)]
#[command(about = "Upper wall-part geometry preview")]
struct Args {
    /// Ceiling height of the owning sector
    #[arg(long, default_value_t = 128.0)]
    own_ceiling: f64,

    /// Ceiling height of the neighbouring sector
    #[arg(long, default_value_t = 64.0)]
    neighbor_ceiling: f64,

    /// Wall texture size, as WIDTHxHEIGHT
    #[arg(long, default_value = "64x128")]
    texture_size: String,

    /// Set the line's "upper unpegged" flag
    #[arg(long)]
    unpegged: bool,
}

fn main() -> Result<()> {
    simplelog::TermLogger::init(
        log::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    let args = Args::parse();

    let (tw, th) = args
        .texture_size
        .split_once('x')
        .ok_or_else(|| anyhow::anyhow!("texture size must look like 64x128"))?;
    let (tw, th): (u32, u32) = (tw.parse()?, th.parse()?);

    let mut map = Map::new(MapFormat::Udmf);
    map.vertices = vec![
        Vertex { pos: dvec2(0.0, 0.0) },
        Vertex { pos: dvec2(64.0, 0.0) },
    ];
    map.sectors = vec![
        Sector::new(0.0, args.own_ceiling, 192),
        Sector::new(0.0, args.neighbor_ceiling, 160),
    ];
    let mut flags = LinedefFlags::TWO_SIDED;
    if args.unpegged {
        flags |= LinedefFlags::UPPER_UNPEGGED;
    }
    map.linedefs = vec![Linedef {
        v1: 0,
        v2: 1,
        flags,
        front: Some(0),
        back: Some(1),
    }];
    map.sidedefs = vec![
        Sidedef {
            linedef: 0,
            is_front: true,
            sector: 0,
            offset_x: 0,
            offset_y: 0,
            upper: "DEMOTEX".into(),
            middle: NO_TEXTURE_NAME.into(),
            lower: NO_TEXTURE_NAME.into(),
            fields: FieldMap::new(),
        },
        Sidedef {
            linedef: 0,
            is_front: false,
            sector: 1,
            offset_x: 0,
            offset_y: 0,
            upper: NO_TEXTURE_NAME.into(),
            middle: NO_TEXTURE_NAME.into(),
            lower: NO_TEXTURE_NAME.into(),
            fields: FieldMap::new(),
        },
    ];

    let mut catalog = TextureCatalog::new();
    catalog.insert(TextureImage::new("DEMOTEX", tw, th))?;

    let mut cache = SectorDataCache::new();
    let config = MapConfig::default();
    let mapinfo = MapInfo::default();
    let mut ctx = EditContext {
        map: &mut map,
        cache: &mut cache,
        catalog: &catalog,
        config: &config,
        mapinfo: &mapinfo,
    };

    let mut wall = UpperWall::new(0);
    if !wall.setup(&mut ctx) {
        println!("no geometry (upper part not visible)");
        return Ok(());
    }

    println!(
        "{} vertices, fog {:.3}, sky {}",
        wall.vertices().len(),
        wall.fog,
        wall.render_as_sky
    );
    for v in wall.vertices() {
        println!(
            "  pos ({:7.2} {:7.2} {:7.2})  uv ({:6.3} {:6.3})  color {:08X}",
            v.pos.x, v.pos.y, v.pos.z, v.uv.x, v.uv.y, v.color
        );
    }
    Ok(())
}
