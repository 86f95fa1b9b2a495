use serde::Serialize;
use utoipa::ToSchema;

use super::error::TileError;

/// Placeholder order of a raster tile URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TileAxisOrder {
    /// `{z}/{x}/{y}`, the OpenStreetMap slippy map convention.
    Zxy,
    /// `{z}/{y}/{x}`, used by ArcGIS MapServer tile endpoints.
    Zyx,
}

/// Raster tile source, e.g.
/// `https://server.arcgisonline.com/.../MapServer/tile/{z}/{y}/{x}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileTemplate {
    template: String,
    order: TileAxisOrder,
}

impl TileTemplate {
    pub fn parse(template: &str) -> Result<Self, TileError> {
        let find = |placeholder: &'static str| {
            template
                .find(placeholder)
                .ok_or(TileError::MissingPlaceholder(placeholder))
        };
        find("{z}")?;
        let x = find("{x}")?;
        let y = find("{y}")?;

        let order = if x < y {
            TileAxisOrder::Zxy
        } else {
            TileAxisOrder::Zyx
        };

        Ok(Self {
            template: template.to_string(),
            order,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn order(&self) -> TileAxisOrder {
        self.order
    }

    /// Render the URL for slippy map tile `x`/`y` at zoom `z`.
    pub fn url(&self, z: u8, x: u32, y: u32) -> Result<String, TileError> {
        let max_tile = 1u64 << z.min(31);
        if x as u64 >= max_tile || y as u64 >= max_tile {
            return Err(TileError::OutOfRange { z, x, y });
        }
        Ok(self
            .template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string()))
    }
}
